//! Product store repository
//!
//! The single source of truth for in-progress inventory work. Records are
//! created once by the import bootstrap and only ever mutated field-by-field
//! afterwards; "removing" a barcode resets the fields, it never deletes the
//! row. Each call is independently durable; no operation spans records.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::inventory::Product;

/// A mutation targeted a nonexistent product id. No partial effect.
#[derive(Debug)]
pub struct NotFound {
    pub id: i64,
}

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product {} not found", self.id)
    }
}

impl std::error::Error for NotFound {}

const SELECT: &str =
    "SELECT id, name, nomenclature_code, stock_quantity, barcode, actual_quantity FROM products";

/// Number of records in the store.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await
        .context("failed to count products")?;
    Ok(n)
}

/// Bulk-insert the imported records, but only into an empty store.
///
/// Returns `false` (leaving the store untouched) when records already exist,
/// so re-running the import on every launch is a safe no-op.
pub async fn initialize(pool: &SqlitePool, products: &[Product]) -> Result<bool> {
    if count(pool).await? > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await.context("failed to begin transaction")?;
    for product in products {
        sqlx::query(
            "INSERT INTO products (id, name, nomenclature_code, stock_quantity, barcode, actual_quantity)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.nomenclature_code)
        .bind(product.stock_quantity)
        .bind(&product.barcode)
        .bind(product.actual_quantity)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to insert product {}", product.id))?;
    }
    tx.commit().await.context("failed to commit initial import")?;

    Ok(true)
}

/// Fetch one product by id.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch product")?;
    Ok(product)
}

/// All products, in insertion order.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!("{SELECT} ORDER BY id"))
        .fetch_all(pool)
        .await
        .context("failed to list products")?;
    Ok(products)
}

/// Products still waiting for a scan (`barcode = ''`).
pub async fn list_without_barcode(pool: &SqlitePool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!("{SELECT} WHERE barcode = '' ORDER BY id"))
        .fetch_all(pool)
        .await
        .context("failed to list unscanned products")?;
    Ok(products)
}

/// Products with an assigned barcode.
pub async fn list_with_barcode(pool: &SqlitePool) -> Result<Vec<Product>> {
    let products =
        sqlx::query_as::<_, Product>(&format!("{SELECT} WHERE barcode != '' ORDER BY id"))
            .fetch_all(pool)
            .await
            .context("failed to list scanned products")?;
    Ok(products)
}

/// Case-insensitive substring search over name and nomenclature code.
///
/// Folding happens in Rust: SQLite's LOWER/LIKE only fold ASCII and the
/// inventory names are Cyrillic. An empty query returns everything.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Product>> {
    let all = list_all(pool).await?;
    if query.is_empty() {
        return Ok(all);
    }

    let needle = query.to_lowercase();
    Ok(all
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.nomenclature_code.to_lowercase().contains(&needle)
        })
        .collect())
}

/// Assign a barcode and, optionally, a counted quantity in one write. Used
/// both for scan assignment and manual edits.
pub async fn update_barcode_and_quantity(
    pool: &SqlitePool,
    id: i64,
    barcode: &str,
    actual_quantity: Option<f64>,
) -> Result<()> {
    let result = sqlx::query("UPDATE products SET barcode = ?, actual_quantity = ? WHERE id = ?")
        .bind(barcode)
        .bind(actual_quantity)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update barcode")?;

    if result.rows_affected() == 0 {
        return Err(NotFound { id }.into());
    }
    Ok(())
}

/// Update only the counted quantity, for quick recounts of scanned items.
pub async fn update_actual_quantity(pool: &SqlitePool, id: i64, actual_quantity: f64) -> Result<()> {
    let result = sqlx::query("UPDATE products SET actual_quantity = ? WHERE id = ?")
        .bind(actual_quantity)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update counted quantity")?;

    if result.rows_affected() == 0 {
        return Err(NotFound { id }.into());
    }
    Ok(())
}

/// Remove a barcode assignment: barcode back to `''`, counted quantity back
/// to unset. The record itself always survives.
pub async fn clear_barcode(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("UPDATE products SET barcode = '', actual_quantity = NULL WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to clear barcode")?;

    if result.rows_affected() == 0 {
        return Err(NotFound { id }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // One connection, or every statement would see its own :memory: db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::config::apply_schema(&pool).await.unwrap();
        pool
    }

    fn product(id: i64, name: &str, code: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            nomenclature_code: code.to_string(),
            stock_quantity: 10.0,
            barcode: String::new(),
            actual_quantity: None,
        }
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let pool = memory_pool().await;
        let products = vec![product(1, "Сахар", "555"), product(2, "Соль", "777")];

        assert!(initialize(&pool, &products).await.unwrap());
        assert!(!initialize(&pool, &products).await.unwrap());
        assert_eq!(count(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn partitions_are_complete_and_disjoint() {
        let pool = memory_pool().await;
        initialize(&pool, &[product(1, "Сахар", "555"), product(2, "Соль", "777")])
            .await
            .unwrap();
        update_barcode_and_quantity(&pool, 1, "4600123456789", Some(12.5))
            .await
            .unwrap();

        let all = list_all(&pool).await.unwrap();
        let without = list_without_barcode(&pool).await.unwrap();
        let with = list_with_barcode(&pool).await.unwrap();

        assert_eq!(without.len() + with.len(), all.len());
        assert_eq!(with[0].id, 1);
        assert_eq!(with[0].actual_quantity, Some(12.5));
        assert_eq!(without[0].id, 2);
    }

    #[tokio::test]
    async fn search_matches_name_and_code_case_insensitively() {
        let pool = memory_pool().await;
        initialize(&pool, &[product(1, "Сахар", "555"), product(2, "Соль", "777")])
            .await
            .unwrap();

        let by_name = search(&pool, "сах").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Сахар");

        let by_code = search(&pool, "777").await.unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].name, "Соль");

        assert_eq!(search(&pool, "").await.unwrap().len(), 2);
        // No results is a valid, empty answer -- not an error.
        assert!(search(&pool, "нет такого").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_barcode_resets_both_fields_but_keeps_the_record() {
        let pool = memory_pool().await;
        initialize(&pool, &[product(1, "Сахар", "555")]).await.unwrap();
        update_barcode_and_quantity(&pool, 1, "4600123456789", Some(3.0))
            .await
            .unwrap();

        clear_barcode(&pool, 1).await.unwrap();

        let p = get(&pool, 1).await.unwrap().unwrap();
        assert_eq!(p.barcode, "");
        assert_eq!(p.actual_quantity, None);
        assert_eq!(count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn recount_leaves_barcode_untouched() {
        let pool = memory_pool().await;
        initialize(&pool, &[product(1, "Сахар", "555")]).await.unwrap();
        update_barcode_and_quantity(&pool, 1, "4600123456789", None)
            .await
            .unwrap();

        update_actual_quantity(&pool, 1, 7.5).await.unwrap();

        let p = get(&pool, 1).await.unwrap().unwrap();
        assert_eq!(p.barcode, "4600123456789");
        assert_eq!(p.actual_quantity, Some(7.5));
    }

    #[tokio::test]
    async fn mutations_on_unknown_id_fail_with_not_found() {
        let pool = memory_pool().await;
        initialize(&pool, &[product(1, "Сахар", "555")]).await.unwrap();

        let err = update_barcode_and_quantity(&pool, 42, "460", None)
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<NotFound>().is_some());

        let err = update_actual_quantity(&pool, 42, 1.0).await.unwrap_err();
        assert!(err.downcast_ref::<NotFound>().is_some());

        let err = clear_barcode(&pool, 42).await.unwrap_err();
        assert!(err.downcast_ref::<NotFound>().is_some());

        // Prior state is untouched.
        assert_eq!(count(&pool).await.unwrap(), 1);
    }
}

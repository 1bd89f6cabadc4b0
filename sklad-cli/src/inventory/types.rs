//! Product record shared by the store, the spreadsheet pipeline and the remote
//! render payload

use serde::{Deserialize, Serialize};

/// One unit of inventory, extracted from a single row-group of the source sheet.
///
/// Field names are part of the remote render contract (the backend accepts the
/// collection as JSON), so they stay in snake_case as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Stable synthetic identifier, 1-based, assigned in scan order at import.
    pub id: i64,
    /// Human-readable label from the row-group's leading cell; never empty.
    pub name: String,
    /// Numeric-string identifier recovered two rows below the name; `""` when
    /// absent. The canonical matching key on export.
    pub nomenclature_code: String,
    /// On-hand quantity from the source sheet; immutable after import.
    pub stock_quantity: f64,
    /// User-assigned barcode; `""` means "not yet scanned". The empty/non-empty
    /// split is the sole partition key between the pending and scanned views.
    pub barcode: String,
    /// Counted quantity; `None` means "not yet counted".
    pub actual_quantity: Option<f64>,
}

impl Product {
    /// Whether this record sits in the "scanned" partition.
    pub fn has_barcode(&self) -> bool {
        !self.barcode.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_payload_contract() {
        let product = Product {
            id: 1,
            name: "Молоко 1л".to_string(),
            nomenclature_code: "10234".to_string(),
            stock_quantity: 50.0,
            barcode: String::new(),
            actual_quantity: None,
        };

        // The backend deserializes exactly these keys; `actual_quantity` is a
        // JSON null while uncounted.
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({
                "id": 1,
                "name": "Молоко 1л",
                "nomenclature_code": "10234",
                "stock_quantity": 50.0,
                "barcode": "",
                "actual_quantity": null,
            })
        );
    }
}

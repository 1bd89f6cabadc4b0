//! Subcommand handlers

pub mod export;
pub mod import;
pub mod products;
pub mod scan;

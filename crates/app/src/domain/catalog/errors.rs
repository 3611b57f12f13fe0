//! Catalog service errors.

use thiserror::Error;

/// Failure of a guarded stock mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("stock movements require a quantity of at least 1")]
    InvalidQuantity,

    #[error("requested {requested} units but only {available} in stock")]
    OutOfStock { requested: u32, available: u32 },
}

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("item not found")]
    NotFound,

    #[error(transparent)]
    Stock(#[from] StockError),
}

//! Carts service errors.

use thiserror::Error;

use crate::domain::catalog::errors::StockError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// Member, item, or cart line missing — or owned by someone else, which
    /// is reported identically.
    #[error("not found")]
    NotFound,

    #[error("cart lines require a quantity of at least 1")]
    InvalidQuantity,

    #[error("item is not available for sale")]
    ItemNotOnSale,

    #[error("requested {requested} units but only {available} in stock")]
    OutOfStock { requested: u32, available: u32 },
}

impl From<StockError> for CartsServiceError {
    fn from(error: StockError) -> Self {
        match error {
            StockError::InvalidQuantity => Self::InvalidQuantity,
            StockError::OutOfStock {
                requested,
                available,
            } => Self::OutOfStock {
                requested,
                available,
            },
        }
    }
}

//! Orders service errors.

use thiserror::Error;

use crate::domain::{
    catalog::errors::StockError, members::errors::PointsError, orders::models::OrderStatus,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// Order, member, address, cart line, or refund missing — or owned by
    /// another member, which is reported identically.
    #[error("not found")]
    NotFound,

    #[error("nothing selected to order")]
    EmptySelection,

    #[error("requested {requested} units but only {available} in stock")]
    OutOfStock { requested: u32, available: u32 },

    #[error("point balance {available} is below the required {required}")]
    InsufficientPoints { required: u64, available: u64 },

    #[error("callback amount {reported} does not match the payable amount {expected}")]
    AmountMismatch { expected: u64, reported: u64 },

    #[error("gateway reported the payment as not approved")]
    PaymentNotApproved,

    #[error("bank-transfer orders are confirmed manually, not by gateway callback")]
    BankTransferCallback,

    #[error("only bank-transfer orders are confirmed manually")]
    NotBankTransfer,

    #[error("operation not allowed while the order is {status:?}")]
    InvalidState { status: OrderStatus },

    #[error("order cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("could not allocate a unique order number")]
    NumberCollision,
}

impl From<StockError> for OrdersServiceError {
    fn from(error: StockError) -> Self {
        match error {
            // Line quantities are validated at cart time; a zero here would
            // mean a corrupted line, surfaced as out of stock of 0.
            StockError::InvalidQuantity => Self::OutOfStock {
                requested: 0,
                available: 0,
            },
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

impl From<PointsError> for OrdersServiceError {
    fn from(error: PointsError) -> Self {
        match error {
            PointsError::NotFound => Self::NotFound,
            PointsError::Insufficient {
                required,
                available,
            } => Self::InsufficientPoints {
                required,
                available,
            },
        }
    }
}

//! Orders

pub mod errors;
pub mod models;
mod number;
pub(crate) mod repositories;
pub mod service;
pub mod views;

pub use errors::OrdersServiceError;
pub use service::*;

//! Carts

pub mod errors;
pub mod models;
pub(crate) mod repositories;
pub mod service;
pub mod views;

pub use errors::CartsServiceError;
pub use service::*;

//! Pantry Domain Concerns

pub mod carts;
pub mod catalog;
pub mod members;
pub mod orders;

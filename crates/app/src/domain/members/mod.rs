//! Members
//!
//! Boundary collaborators: member identity/grade/point-balance and shipping
//! addresses. Identity is always an explicit parameter on core operations;
//! nothing here reads ambient authentication state.

pub mod errors;
pub mod models;
pub(crate) mod repository;

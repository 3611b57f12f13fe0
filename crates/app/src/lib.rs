//! Shared application domain and storage modules for the Pantry storefront.

pub mod context;
pub mod domain;
pub mod store;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;

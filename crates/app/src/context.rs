//! App Context

use std::sync::Arc;

use crate::{
    domain::{
        carts::{CartsService, StoreCartsService},
        catalog::{CatalogService, StoreCatalogService},
        orders::{OrdersService, StoreOrdersService},
    },
    store::Store,
};

/// The wired-up service graph handed to callers (HTTP handlers, jobs).
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Builds every service over one shared store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            catalog: Arc::new(StoreCatalogService::new(store.clone())),
            carts: Arc::new(StoreCartsService::new(store.clone())),
            orders: Arc::new(StoreOrdersService::new(store)),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Store::new())
    }
}

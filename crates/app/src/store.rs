//! In-process arena storage.
//!
//! Entities live in per-table maps keyed by surrogate identity; relationships
//! are plain id fields, never live object references. A [`Transaction`] holds
//! the store's single lock together with a working copy of the tables, so a
//! unit of work either publishes everything on [`Transaction::commit`] or
//! nothing when it is dropped. Holding the lock for the whole unit of work
//! also serializes concurrent checkouts against the same item, which is what
//! makes stock check-then-decrement safe.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    carts::models::{Cart, CartLine, CartLineUuid, CartUuid},
    catalog::models::{Item, ItemUuid},
    members::models::{Address, AddressUuid, Member, MemberUuid},
    orders::models::{Order, OrderLine, OrderLineUuid, OrderRefund, OrderUuid, RefundUuid},
};

/// Every table in the store.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub members: FxHashMap<MemberUuid, Member>,
    pub addresses: FxHashMap<AddressUuid, Address>,
    pub items: FxHashMap<ItemUuid, Item>,
    /// Representative image URL per item, keyed for batch lookup.
    pub item_images: FxHashMap<ItemUuid, String>,
    pub carts: FxHashMap<CartUuid, Cart>,
    pub cart_lines: FxHashMap<CartLineUuid, CartLine>,
    pub orders: FxHashMap<OrderUuid, Order>,
    pub order_lines: FxHashMap<OrderLineUuid, OrderLine>,
    pub refunds: FxHashMap<RefundUuid, OrderRefund>,
}

/// Shared handle to the storefront's store.
#[derive(Debug, Clone, Default)]
pub struct Store {
    tables: Arc<Mutex<Tables>>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a unit of work.
    ///
    /// Awaits the store lock; units of work execute one at a time.
    pub async fn begin(&self) -> Transaction {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();

        Transaction { guard, working }
    }
}

/// One atomic unit of work over the store.
///
/// Repositories mutate the working copy; nothing is visible to other callers
/// until [`Transaction::commit`]. Dropping the transaction discards every
/// change it staged.
#[derive(Debug)]
pub struct Transaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

impl Transaction {
    pub(crate) fn tables(&mut self) -> &mut Tables {
        &mut self.working
    }

    pub(crate) fn tables_ref(&self) -> &Tables {
        &self.working
    }

    /// Publish the staged changes.
    pub fn commit(self) {
        let Self { mut guard, working } = self;
        *guard = working;
    }
}

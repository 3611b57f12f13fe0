//! Items Repository

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::{
    domain::catalog::models::{Item, ItemUuid},
    store::Transaction,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct ItemsRepository;

impl ItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_item(&self, tx: &Transaction, item: ItemUuid) -> Option<Item> {
        tx.tables_ref().items.get(&item).cloned()
    }

    /// Inserts a new item, stamping both timestamps.
    pub(crate) fn insert_item(&self, tx: &mut Transaction, mut item: Item) -> Item {
        let now = Timestamp::now();
        item.created_at = now;
        item.updated_at = now;

        tx.tables().items.insert(item.uuid, item.clone());
        item
    }

    /// Writes back a loaded item, stamping `updated_at`.
    pub(crate) fn save_item(&self, tx: &mut Transaction, mut item: Item) -> Item {
        item.updated_at = Timestamp::now();

        tx.tables().items.insert(item.uuid, item.clone());
        item
    }

    pub(crate) fn set_image(&self, tx: &mut Transaction, item: ItemUuid, url: String) {
        tx.tables().item_images.insert(item, url);
    }

    /// Batch lookup of representative image URLs. One call per render, never
    /// one per line.
    pub(crate) fn representative_images(
        &self,
        tx: &Transaction,
        items: &[ItemUuid],
    ) -> FxHashMap<ItemUuid, String> {
        let tables = tx.tables_ref();

        items
            .iter()
            .filter_map(|uuid| tables.item_images.get(uuid).map(|url| (*uuid, url.clone())))
            .collect()
    }
}

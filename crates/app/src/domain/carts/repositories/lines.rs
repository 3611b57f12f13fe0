//! Cart Lines Repository

use jiff::Timestamp;

use crate::{
    domain::{
        carts::models::{CartLine, CartLineUuid, CartUuid},
        catalog::models::ItemUuid,
    },
    store::Transaction,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct CartLinesRepository;

impl CartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_line(&self, tx: &Transaction, line: CartLineUuid) -> Option<CartLine> {
        tx.tables_ref().cart_lines.get(&line).cloned()
    }

    /// All lines of a cart, oldest first.
    pub(crate) fn lines_for_cart(&self, tx: &Transaction, cart: CartUuid) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = tx
            .tables_ref()
            .cart_lines
            .values()
            .filter(|line| line.cart_uuid == cart)
            .cloned()
            .collect();

        lines.sort_by_key(|line| (line.created_at, line.uuid));
        lines
    }

    pub(crate) fn find_by_cart_and_item(
        &self,
        tx: &Transaction,
        cart: CartUuid,
        item: ItemUuid,
    ) -> Option<CartLine> {
        tx.tables_ref()
            .cart_lines
            .values()
            .find(|line| line.cart_uuid == cart && line.item_uuid == item)
            .cloned()
    }

    pub(crate) fn insert_line(&self, tx: &mut Transaction, mut line: CartLine) -> CartLine {
        let now = Timestamp::now();
        line.created_at = now;
        line.updated_at = now;

        tx.tables().cart_lines.insert(line.uuid, line.clone());
        line
    }

    pub(crate) fn save_line(&self, tx: &mut Transaction, mut line: CartLine) -> CartLine {
        line.updated_at = Timestamp::now();

        tx.tables().cart_lines.insert(line.uuid, line.clone());
        line
    }

    pub(crate) fn delete_line(&self, tx: &mut Transaction, line: CartLineUuid) -> u64 {
        u64::from(tx.tables().cart_lines.remove(&line).is_some())
    }

    /// Removes every line of a cart; returns how many were removed.
    pub(crate) fn delete_all_for_cart(&self, tx: &mut Transaction, cart: CartUuid) -> u64 {
        let doomed: Vec<CartLineUuid> = tx
            .tables_ref()
            .cart_lines
            .values()
            .filter(|line| line.cart_uuid == cart)
            .map(|line| line.uuid)
            .collect();

        let count = doomed.len() as u64;
        for uuid in doomed {
            tx.tables().cart_lines.remove(&uuid);
        }

        count
    }
}

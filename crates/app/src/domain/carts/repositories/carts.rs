//! Carts Repository

use jiff::Timestamp;

use crate::{
    domain::{
        carts::models::{Cart, CartUuid},
        members::models::MemberUuid,
    },
    store::Transaction,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct CartsRepository;

impl CartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn find_by_member(&self, tx: &Transaction, member: MemberUuid) -> Option<Cart> {
        tx.tables_ref()
            .carts
            .values()
            .find(|cart| cart.member_uuid == member)
            .cloned()
    }

    /// Fetches the member's cart, creating the empty one lazily on first use.
    pub(crate) fn find_or_create_for_member(
        &self,
        tx: &mut Transaction,
        member: MemberUuid,
    ) -> Cart {
        if let Some(cart) = self.find_by_member(tx, member) {
            return cart;
        }

        let now = Timestamp::now();
        let cart = Cart {
            uuid: CartUuid::new(),
            member_uuid: member,
            created_at: now,
            updated_at: now,
        };

        tx.tables().carts.insert(cart.uuid, cart.clone());
        cart
    }
}

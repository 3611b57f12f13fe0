//! Cart Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{catalog::models::ItemUuid, members::models::MemberUuid},
    uuids::TypedUuid,
};

/// Identity of a cart.
pub type CartUuid = TypedUuid<Cart>;

/// Identity of one line within a cart.
pub type CartLineUuid = TypedUuid<CartLine>;

/// A member's cart. At most one exists per member; it is created lazily on
/// the first add and emptied rather than deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub uuid: CartUuid,
    pub member_uuid: MemberUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One item-and-quantity row in a cart.
///
/// Lines never snapshot prices; amounts are always computed from the current
/// catalog price at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub uuid: CartLineUuid,
    pub cart_uuid: CartUuid,
    pub item_uuid: ItemUuid,
    /// Always at least 1; setting a line to 0 deletes it instead.
    pub quantity: u32,
    /// Selection marker for partial checkout.
    pub checked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

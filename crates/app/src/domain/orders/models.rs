//! Order Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{catalog::models::ItemUuid, members::models::MemberUuid},
    uuids::TypedUuid,
};

/// Identity of an order.
pub type OrderUuid = TypedUuid<Order>;

/// Identity of one frozen line within an order.
pub type OrderLineUuid = TypedUuid<OrderLine>;

/// Identity of a refund request.
pub type RefundUuid = TypedUuid<OrderRefund>;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, awaiting payment confirmation.
    Created,
    /// Paid; being picked and packed.
    Preparing,
    Shipped,
    Delivered,
    Completed,
    Canceled,
    RefundRequested,
    Refunded,
}

impl OrderStatus {
    /// Whether a customer may still cancel. Shipped and later are out.
    #[must_use]
    pub fn is_cancelable(self) -> bool {
        matches!(self, Self::Created | Self::Preparing)
    }

    /// Whether a customer may open a refund request.
    #[must_use]
    pub fn is_refund_eligible(self) -> bool {
        matches!(self, Self::Delivered | Self::Completed)
    }

    /// Edges of the lifecycle graph; administrative status updates are held
    /// to these, so an order cannot silently jump backwards.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Created => matches!(next, Self::Preparing | Self::Canceled),
            Self::Preparing => matches!(next, Self::Shipped | Self::Canceled),
            Self::Shipped => matches!(next, Self::Delivered),
            Self::Delivered => matches!(next, Self::Completed | Self::RefundRequested),
            Self::Completed => matches!(next, Self::RefundRequested),
            Self::RefundRequested => matches!(next, Self::Refunded | Self::Delivered),
            Self::Canceled | Self::Refunded => false,
        }
    }
}

/// How the order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Card via the payment gateway; confirmed by gateway callback.
    Card,
    /// Confirmed manually once the transfer arrives, never by callback.
    BankTransfer,
    /// Paid from the member's point balance at creation time.
    Points,
}

/// Shipping destination frozen onto the order at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub recipient: String,
    pub postal_code: String,
    pub line1: String,
    pub line2: Option<String>,
}

/// An order: an immutable snapshot of purchased lines plus the one mutable
/// status field. Totals are computed once at creation and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub uuid: OrderUuid,
    /// Human-readable unique number, `yyyymmdd-NNNNNN`.
    pub number: String,
    pub member_uuid: MemberUuid,
    pub destination: Destination,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub products_total: u64,
    pub discount_total: u64,
    pub shipping_fee: u64,
    pub coupon_discount: u64,
    pub payable_amount: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One purchased line; name and prices are frozen at purchase time and never
/// follow later catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub uuid: OrderLineUuid,
    pub order_uuid: OrderUuid,
    pub item_uuid: ItemUuid,
    pub item_name: String,
    /// List price at purchase time.
    pub list_price: u64,
    /// Sale price actually paid per unit.
    pub purchase_price: u64,
    pub quantity: u32,
    pub created_at: Timestamp,
}

/// Why a refund was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundReason {
    ChangeOfMind,
    Damaged,
    WrongItem,
    LateDelivery,
    Other,
}

/// Resolution state of a refund request. Terminal either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundStatus {
    Pending,
    Approved,
    Rejected,
}

/// A customer's refund request and its administrative resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRefund {
    pub uuid: RefundUuid,
    pub order_uuid: OrderUuid,
    pub reason: RefundReason,
    pub detail: Option<String>,
    pub status: RefundStatus,
    pub processed_by: Option<String>,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// What the payment gateway reports back after the shopper pays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCallback {
    pub order: OrderUuid,
    /// Amount the gateway captured; must equal the stored payable amount
    /// exactly.
    pub amount: u64,
    pub approved: bool,
}

/// Which cart lines a checkout consumes.
#[derive(Debug, Clone)]
pub enum OrderSelection {
    /// Every line currently checked in the cart.
    AllChecked,
    /// An explicit subset of cart line ids.
    Lines(Vec<crate::domain::carts::models::CartLineUuid>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelable_only_before_shipment() {
        assert!(OrderStatus::Created.is_cancelable(), "CREATED is cancelable");
        assert!(OrderStatus::Preparing.is_cancelable(), "PREPARING is cancelable");
        assert!(!OrderStatus::Shipped.is_cancelable(), "SHIPPED is not cancelable");
        assert!(!OrderStatus::Delivered.is_cancelable(), "DELIVERED is not cancelable");
    }

    #[test]
    fn refund_eligible_after_delivery() {
        assert!(OrderStatus::Delivered.is_refund_eligible(), "DELIVERED is eligible");
        assert!(OrderStatus::Completed.is_refund_eligible(), "COMPLETED is eligible");
        assert!(!OrderStatus::Shipped.is_refund_eligible(), "SHIPPED is not eligible");
        assert!(
            !OrderStatus::RefundRequested.is_refund_eligible(),
            "a pending request blocks a second one"
        );
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for next in [
            OrderStatus::Created,
            OrderStatus::Preparing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Completed,
            OrderStatus::RefundRequested,
            OrderStatus::Refunded,
        ] {
            assert!(
                !OrderStatus::Canceled.can_transition_to(next),
                "CANCELED must be terminal"
            );
            assert!(
                !OrderStatus::Refunded.can_transition_to(next),
                "REFUNDED must be terminal"
            );
        }
    }

    #[test]
    fn forward_path_is_connected() {
        assert!(OrderStatus::Created.can_transition_to(OrderStatus::Preparing), "paid");
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Shipped), "shipped");
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered), "delivered");
        assert!(OrderStatus::Delivered.can_transition_to(OrderStatus::Completed), "completed");
    }

    #[test]
    fn no_backwards_jumps() {
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Created), "no rewind");
        assert!(
            !OrderStatus::Delivered.can_transition_to(OrderStatus::Preparing),
            "no rewind"
        );
    }
}

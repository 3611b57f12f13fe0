//! Membership grades and their checkout privileges.

use serde::{Deserialize, Serialize};

/// A member's grade tier.
///
/// Grades grant a percentage coupon discount at checkout, distinct from any
/// discount the items themselves carry. Codes with no matching tier fall back
/// to [`Grade::Basic`], which carries no privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    /// Top tier: 10% coupon and free shipping on every order.
    Vip,
    /// 7% coupon.
    Gold,
    /// 5% coupon.
    Silver,
    /// No coupon, standard shipping rules.
    #[default]
    Basic,
}

impl Grade {
    /// Resolves a stored grade code; unknown codes behave as `Basic`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "VIP" => Self::Vip,
            "GOLD" => Self::Gold,
            "SILVER" => Self::Silver,
            _ => Self::Basic,
        }
    }

    /// Coupon discount percentage applied to the sale-price total.
    #[must_use]
    pub fn coupon_percent(self) -> u64 {
        match self {
            Self::Vip => 10,
            Self::Gold => 7,
            Self::Silver => 5,
            Self::Basic => 0,
        }
    }

    /// Whether this grade waives the shipping fee outright, regardless of the
    /// free-shipping subtotal threshold.
    #[must_use]
    pub fn waives_shipping(self) -> bool {
        matches!(self, Self::Vip)
    }
}

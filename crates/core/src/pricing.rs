//! Sale-price and shipping-fee policy.
//!
//! All amounts are whole currency units. Both functions are pure and
//! infallible; invalid discount rates are clamped rather than rejected.

/// Highest discount rate an item may carry, in percent.
pub const MAX_DISCOUNT_RATE: u8 = 95;

/// Flat shipping fee charged below the free-shipping threshold.
pub const BASE_SHIPPING_FEE: u64 = 3_000;

/// Subtotal at or above which the base shipping fee is waived.
pub const FREE_SHIPPING_THRESHOLD: u64 = 50_000;

/// Surcharge for destinations in the remote-region postal range.
pub const REMOTE_SURCHARGE: u64 = 5_000;

/// Postal-code prefix identifying remote-region destinations.
pub const REMOTE_PREFIX: &str = "63";

/// Clamps a discount rate to the allowed `0..=95` range.
#[must_use]
pub fn clamp_discount_rate(rate: u8) -> u8 {
    rate.min(MAX_DISCOUNT_RATE)
}

/// The currently effective price of an item: list price less its own
/// discount, floored to a whole currency unit.
#[must_use]
pub fn sale_price(list_price: u64, discount_rate: u8) -> u64 {
    let rate = u64::from(clamp_discount_rate(discount_rate));
    list_price * (100 - rate) / 100
}

/// Shipping fee for an order subtotal shipped to `destination`.
///
/// The base fee is waived once the subtotal reaches the free-shipping
/// threshold. The remote-region surcharge applies on top of that result and
/// is never waived. A missing destination behaves as a non-remote one.
#[must_use]
pub fn shipping_fee(subtotal: u64, destination: Option<&str>) -> u64 {
    let base = if subtotal >= FREE_SHIPPING_THRESHOLD {
        0
    } else {
        BASE_SHIPPING_FEE
    };

    let surcharge = match destination {
        Some(code) if code.starts_with(REMOTE_PREFIX) => REMOTE_SURCHARGE,
        _ => 0,
    };

    base + surcharge
}

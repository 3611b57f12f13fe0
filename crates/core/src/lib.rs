//! Pantry
//!
//! Pantry is the pure pricing engine for a grocery storefront: sale-price and
//! shipping-fee policy, membership-grade coupon tiers, and the shared summary
//! aggregation used for both cart summaries and order totals.

pub mod grades;
pub mod pricing;
pub mod summary;

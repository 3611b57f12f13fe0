//! Shared checkout aggregation.
//!
//! Cart summaries (all lines and checked-only) and order totals are computed
//! by the same [`summarize`] function so the grade coupon and free-shipping
//! rules exist in exactly one place.

use serde::{Deserialize, Serialize};

use crate::{
    grades::Grade,
    pricing::{sale_price, shipping_fee},
};

/// One priced line entering a summary: a list price, the effective sale
/// price, and a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    /// Undiscounted unit price.
    pub list_price: u64,
    /// Discount-applied unit price.
    pub sale_price: u64,
    /// Units purchased.
    pub quantity: u32,
}

impl SummaryLine {
    /// Builds a line from a list price and the item's own discount rate.
    #[must_use]
    pub fn new(list_price: u64, discount_rate: u8, quantity: u32) -> Self {
        Self {
            list_price,
            sale_price: sale_price(list_price, discount_rate),
            quantity,
        }
    }

    fn line_total(&self) -> u64 {
        self.list_price * u64::from(self.quantity)
    }

    fn line_payable(&self) -> u64 {
        self.sale_price * u64::from(self.quantity)
    }
}

/// Aggregated amounts for a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of list price × quantity.
    pub products_total: u64,
    /// Sum of per-item discounts, list price less sale price, × quantity.
    pub discount_total: u64,
    /// Sum of sale price × quantity; the base the coupon and shipping rules
    /// apply to.
    pub sale_price_total: u64,
    /// Shipping fee after the free-threshold and grade rules.
    pub shipping_fee: u64,
    /// Grade coupon discount, rounded to the nearest unit and capped at the
    /// sale-price total.
    pub coupon_discount: u64,
    /// Final amount due.
    pub payable_amount: u64,
}

/// Aggregates `lines` under the given grade and destination.
///
/// An empty set of lines yields an all-zero summary; no shipping is charged
/// on nothing.
#[must_use]
pub fn summarize(lines: &[SummaryLine], grade: Grade, destination: Option<&str>) -> Summary {
    if lines.is_empty() {
        return Summary::default();
    }

    let products_total: u64 = lines.iter().map(SummaryLine::line_total).sum();
    let sale_price_total: u64 = lines.iter().map(SummaryLine::line_payable).sum();
    let discount_total = products_total.saturating_sub(sale_price_total);

    let shipping = if grade.waives_shipping() {
        0
    } else {
        shipping_fee(sale_price_total, destination)
    };

    let coupon_discount = coupon_discount(sale_price_total, grade);

    Summary {
        products_total,
        discount_total,
        sale_price_total,
        shipping_fee: shipping,
        coupon_discount,
        payable_amount: (sale_price_total + shipping).saturating_sub(coupon_discount),
    }
}

/// Grade coupon: a percentage of the sale-price total, rounded to the
/// nearest unit, never exceeding the total itself.
fn coupon_discount(sale_price_total: u64, grade: Grade) -> u64 {
    let raw = (sale_price_total * grade.coupon_percent() + 50) / 100;
    raw.min(sale_price_total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_lines(total: u64) -> Vec<SummaryLine> {
        vec![SummaryLine::new(total, 0, 1)]
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = summarize(&[], Grade::Basic, None);

        assert_eq!(summary, Summary::default());
        assert_eq!(summary.shipping_fee, 0);
    }

    #[test]
    fn vip_waives_shipping_and_takes_ten_percent() {
        let summary = summarize(&plain_lines(55_000), Grade::Vip, None);

        assert_eq!(summary.products_total, 55_000);
        assert_eq!(summary.shipping_fee, 0);
        assert_eq!(summary.coupon_discount, 5_500);
        assert_eq!(summary.payable_amount, 49_500);
    }

    #[test]
    fn basic_grade_below_threshold_pays_base_plus_remote() {
        let summary = summarize(&plain_lines(40_000), Grade::Basic, Some("63104"));

        assert_eq!(summary.shipping_fee, 8_000);
        assert_eq!(summary.coupon_discount, 0);
        assert_eq!(summary.payable_amount, 48_000);
    }

    #[test]
    fn vip_shipping_waiver_ignores_threshold() {
        let summary = summarize(&plain_lines(10_000), Grade::Vip, None);

        assert_eq!(summary.shipping_fee, 0);
    }

    #[test]
    fn coupon_rounds_to_nearest_unit() {
        // 5% of 1,010 is 50.5; rounds up to 51.
        let summary = summarize(&plain_lines(1_010), Grade::Silver, None);

        assert_eq!(summary.coupon_discount, 51);
    }

    #[test]
    fn item_discount_and_coupon_stack() {
        // 20,000 list at 10% off, twice: sale total 36,000, products 40,000.
        let lines = [SummaryLine::new(20_000, 10, 2)];
        let summary = summarize(&lines, Grade::Gold, None);

        assert_eq!(summary.products_total, 40_000);
        assert_eq!(summary.discount_total, 4_000);
        assert_eq!(summary.sale_price_total, 36_000);
        // Under the threshold, so base shipping applies.
        assert_eq!(summary.shipping_fee, 3_000);
        assert_eq!(summary.coupon_discount, 2_520);
        assert_eq!(summary.payable_amount, 36_480);
    }

    #[test]
    fn payable_never_goes_negative() {
        let summary = summarize(&plain_lines(1), Grade::Vip, None);

        assert_eq!(summary.coupon_discount, 0); // 10% of 1 rounds to 0
        assert_eq!(summary.payable_amount, 1);
    }
}

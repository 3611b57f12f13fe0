//! Cart read models.

use pantry::summary::Summary;
use serde::{Deserialize, Serialize};

use crate::domain::{
    carts::models::CartLineUuid,
    catalog::models::ItemUuid,
};

/// One cart line enriched for display: current prices plus the item's name
/// and representative image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub line_uuid: CartLineUuid,
    pub item_uuid: ItemUuid,
    pub item_name: String,
    pub image_url: Option<String>,
    pub list_price: u64,
    pub sale_price: u64,
    pub quantity: u32,
    pub checked: bool,
    /// List price × quantity.
    pub line_total: u64,
    /// Item discount × quantity.
    pub line_discount: u64,
    /// Sale price × quantity.
    pub line_payable: u64,
}

/// Full cart detail: its lines plus summaries over all lines and over the
/// checked subset, both produced by the shared aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartDetail {
    pub lines: Vec<CartLineView>,
    pub all: Summary,
    pub checked: Summary,
}

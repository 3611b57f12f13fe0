//! Order read models.

use serde::{Deserialize, Serialize};

use crate::domain::orders::models::{Order, OrderLine};

/// An order with its frozen lines, as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

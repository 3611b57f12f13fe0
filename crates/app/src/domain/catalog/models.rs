//! Catalog Models

use jiff::Timestamp;
use pantry::pricing::{clamp_discount_rate, sale_price};
use serde::{Deserialize, Serialize};

use crate::{domain::catalog::errors::StockError, uuids::TypedUuid};

/// Identity of a catalog item.
pub type ItemUuid = TypedUuid<Item>;

/// Whether an item can currently be added to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SellStatus {
    /// Available for sale.
    Selling,
    /// Out of stock; restored to `Selling` automatically when restocked.
    SoldOut,
    /// Administrative halt. Never changed by stock movements.
    Stopped,
}

/// Top-level catalog section. Always derived from the subcategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Produce,
    Butchery,
    Dairy,
    Pantry,
    MealKits,
}

/// Catalog subcategory; the single source of truth for [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubCategory {
    Vegetables,
    Fruit,
    Beef,
    Poultry,
    Seafood,
    Milk,
    Cheese,
    Eggs,
    Grains,
    Sauces,
    ReadyMeal,
    RecipeBox,
}

impl SubCategory {
    /// The category this subcategory belongs to.
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::Vegetables | Self::Fruit => Category::Produce,
            Self::Beef | Self::Poultry | Self::Seafood => Category::Butchery,
            Self::Milk | Self::Cheese | Self::Eggs => Category::Dairy,
            Self::Grains | Self::Sauces => Category::Pantry,
            Self::ReadyMeal | Self::RecipeBox => Category::MealKits,
        }
    }
}

/// A sellable catalog entry.
///
/// `stock` and `sell_status` are deliberately private: every mutation goes
/// through [`Item::decrease_stock`] / [`Item::increase_stock`] so the
/// non-negative-stock and status-sync invariants hold everywhere, including
/// under concurrent checkouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub uuid: ItemUuid,
    pub name: String,
    /// Undiscounted unit price, whole currency units.
    pub list_price: u64,
    /// Item discount in percent, held in `0..=95`.
    pub discount_rate: u8,
    pub subcategory: SubCategory,
    pub category: Category,
    /// Monotonic counters; these are the stored source of truth.
    pub like_count: u64,
    pub view_count: u64,
    stock: u32,
    sell_status: SellStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields required to create an item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub uuid: ItemUuid,
    pub name: String,
    pub list_price: u64,
    pub discount_rate: u8,
    pub subcategory: SubCategory,
    pub stock: u32,
    /// Representative image, if one exists at creation time.
    pub image_url: Option<String>,
}

/// Administrative item edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub list_price: Option<u64>,
    pub discount_rate: Option<u8>,
    pub subcategory: Option<SubCategory>,
    pub sell_status: Option<SellStatus>,
}

impl Item {
    /// Builds a normalized item from its creation fields. Timestamps are
    /// stamped by the repository on insert.
    #[must_use]
    pub fn new(new: NewItem) -> Self {
        let mut item = Self {
            uuid: new.uuid,
            name: new.name,
            list_price: new.list_price,
            discount_rate: new.discount_rate,
            subcategory: new.subcategory,
            category: new.subcategory.category(),
            like_count: 0,
            view_count: 0,
            stock: new.stock,
            sell_status: SellStatus::Selling,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        item.normalize();
        item
    }

    /// Current stock on hand.
    #[must_use]
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Current sell status.
    #[must_use]
    pub fn sell_status(&self) -> SellStatus {
        self.sell_status
    }

    /// The currently effective, discount-applied unit price.
    #[must_use]
    pub fn sale_price(&self) -> u64 {
        sale_price(self.list_price, self.discount_rate)
    }

    /// Whether the item may be added to a cart right now.
    #[must_use]
    pub fn is_selling(&self) -> bool {
        self.sell_status == SellStatus::Selling
    }

    /// Removes `qty` units from stock.
    ///
    /// # Errors
    ///
    /// [`StockError::InvalidQuantity`] when `qty` is zero and
    /// [`StockError::OutOfStock`] when `qty` exceeds the stock on hand; the
    /// item is left untouched in both cases.
    pub fn decrease_stock(&mut self, qty: u32) -> Result<(), StockError> {
        if qty < 1 {
            return Err(StockError::InvalidQuantity);
        }
        if qty > self.stock {
            return Err(StockError::OutOfStock {
                requested: qty,
                available: self.stock,
            });
        }

        self.stock -= qty;
        if self.stock == 0 && self.sell_status != SellStatus::Stopped {
            self.sell_status = SellStatus::SoldOut;
        }

        Ok(())
    }

    /// Returns `qty` units to stock, reviving a sold-out item.
    ///
    /// # Errors
    ///
    /// [`StockError::InvalidQuantity`] when `qty` is zero.
    pub fn increase_stock(&mut self, qty: u32) -> Result<(), StockError> {
        if qty < 1 {
            return Err(StockError::InvalidQuantity);
        }

        self.stock += qty;
        if self.sell_status == SellStatus::SoldOut && self.stock > 0 {
            self.sell_status = SellStatus::Selling;
        }

        Ok(())
    }

    /// Explicit override used by administrative edits. `Stopped` set here
    /// stays until an administrator lifts it.
    pub fn set_sell_status(&mut self, status: SellStatus) {
        self.sell_status = status;
    }

    /// Re-establishes the derived fields after a mutation: category follows
    /// the subcategory, the discount rate is clamped, and the sell status
    /// follows stock unless an administrator stopped the item.
    pub fn normalize(&mut self) {
        self.category = self.subcategory.category();
        self.discount_rate = clamp_discount_rate(self.discount_rate);

        if self.sell_status != SellStatus::Stopped {
            self.sell_status = if self.stock == 0 {
                SellStatus::SoldOut
            } else {
                SellStatus::Selling
            };
        }
    }

    /// Applies an administrative edit; callers run [`Item::normalize`] after.
    pub fn apply(&mut self, update: ItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(list_price) = update.list_price {
            self.list_price = list_price;
        }
        if let Some(discount_rate) = update.discount_rate {
            self.discount_rate = discount_rate;
        }
        if let Some(subcategory) = update.subcategory {
            self.subcategory = subcategory;
        }
        if let Some(sell_status) = update.sell_status {
            self.sell_status = sell_status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(stock: u32) -> Item {
        Item::new(NewItem {
            uuid: ItemUuid::new(),
            name: "Heirloom Tomatoes".to_string(),
            list_price: 4_500,
            discount_rate: 10,
            subcategory: SubCategory::Vegetables,
            stock,
            image_url: None,
        })
    }

    #[test]
    fn category_is_derived_from_subcategory() {
        let mut it = item(5);
        assert_eq!(it.category, Category::Produce);

        it.subcategory = SubCategory::Cheese;
        it.normalize();
        assert_eq!(it.category, Category::Dairy);
    }

    #[test]
    fn new_item_with_zero_stock_starts_sold_out() {
        assert_eq!(item(0).sell_status(), SellStatus::SoldOut);
    }

    #[test]
    fn discount_rate_is_clamped_on_normalize() {
        let mut it = item(5);
        it.discount_rate = 120;
        it.normalize();
        assert_eq!(it.discount_rate, 95);
    }

    #[test]
    fn decrease_to_zero_marks_sold_out() {
        let mut it = item(3);

        it.decrease_stock(3).expect("stock should suffice");

        assert_eq!(it.stock(), 0);
        assert_eq!(it.sell_status(), SellStatus::SoldOut);
    }

    #[test]
    fn decrease_beyond_stock_fails_and_leaves_item_untouched() {
        let mut it = item(2);

        let result = it.decrease_stock(3);

        assert!(
            matches!(result, Err(StockError::OutOfStock { requested: 3, available: 2 })),
            "expected OutOfStock, got {result:?}"
        );
        assert_eq!(it.stock(), 2);
        assert_eq!(it.sell_status(), SellStatus::Selling);
    }

    #[test]
    fn zero_quantity_is_rejected_both_ways() {
        let mut it = item(2);

        assert!(matches!(it.decrease_stock(0), Err(StockError::InvalidQuantity)));
        assert!(matches!(it.increase_stock(0), Err(StockError::InvalidQuantity)));
    }

    #[test]
    fn restock_revives_sold_out_item() {
        let mut it = item(1);
        it.decrease_stock(1).expect("stock should suffice");

        it.increase_stock(4).expect("restock should succeed");

        assert_eq!(it.stock(), 4);
        assert_eq!(it.sell_status(), SellStatus::Selling);
    }

    #[test]
    fn stopped_item_is_never_resynced_by_stock_movements() {
        let mut it = item(2);
        it.set_sell_status(SellStatus::Stopped);

        it.decrease_stock(2).expect("stock should suffice");
        assert_eq!(it.sell_status(), SellStatus::Stopped);

        it.increase_stock(5).expect("restock should succeed");
        assert_eq!(it.sell_status(), SellStatus::Stopped);

        it.normalize();
        assert_eq!(it.sell_status(), SellStatus::Stopped);
    }

    #[test]
    fn sale_price_follows_discount_rate() {
        let it = item(5);
        assert_eq!(it.sale_price(), 4_050);
    }
}

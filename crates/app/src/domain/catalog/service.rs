//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::catalog::{
        errors::CatalogServiceError,
        models::{Item, ItemUpdate, ItemUuid, NewItem},
        repository::ItemsRepository,
    },
    store::Store,
};

#[derive(Debug, Clone)]
pub struct StoreCatalogService {
    store: Store,
    repository: ItemsRepository,
}

impl StoreCatalogService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            repository: ItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for StoreCatalogService {
    async fn create_item(&self, new: NewItem) -> Result<Item, CatalogServiceError> {
        let mut tx = self.store.begin().await;

        let image_url = new.image_url.clone();
        let item = self.repository.insert_item(&mut tx, Item::new(new));

        if let Some(url) = image_url {
            self.repository.set_image(&mut tx, item.uuid, url);
        }

        tx.commit();

        Ok(item)
    }

    async fn get_item(&self, item: ItemUuid) -> Result<Item, CatalogServiceError> {
        let tx = self.store.begin().await;

        self.repository
            .get_item(&tx, item)
            .ok_or(CatalogServiceError::NotFound)
    }

    async fn get_item_detail(&self, item: ItemUuid) -> Result<Item, CatalogServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .repository
            .get_item(&tx, item)
            .ok_or(CatalogServiceError::NotFound)?;

        found.view_count += 1;
        let found = self.repository.save_item(&mut tx, found);

        tx.commit();

        Ok(found)
    }

    async fn like_item(&self, item: ItemUuid) -> Result<u64, CatalogServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .repository
            .get_item(&tx, item)
            .ok_or(CatalogServiceError::NotFound)?;

        found.like_count += 1;
        let found = self.repository.save_item(&mut tx, found);

        tx.commit();

        Ok(found.like_count)
    }

    async fn update_item(
        &self,
        item: ItemUuid,
        update: ItemUpdate,
    ) -> Result<Item, CatalogServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .repository
            .get_item(&tx, item)
            .ok_or(CatalogServiceError::NotFound)?;

        found.apply(update);
        found.normalize();
        let found = self.repository.save_item(&mut tx, found);

        tx.commit();

        Ok(found)
    }

    async fn increase_stock(&self, item: ItemUuid, qty: u32) -> Result<Item, CatalogServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .repository
            .get_item(&tx, item)
            .ok_or(CatalogServiceError::NotFound)?;

        found.increase_stock(qty)?;
        let found = self.repository.save_item(&mut tx, found);

        tx.commit();

        Ok(found)
    }

    async fn decrease_stock(&self, item: ItemUuid, qty: u32) -> Result<Item, CatalogServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .repository
            .get_item(&tx, item)
            .ok_or(CatalogServiceError::NotFound)?;

        found.decrease_stock(qty)?;
        let found = self.repository.save_item(&mut tx, found);

        tx.commit();

        Ok(found)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Creates a catalog item, deriving its category and initial sell status.
    async fn create_item(&self, new: NewItem) -> Result<Item, CatalogServiceError>;

    /// Fetches an item without side effects.
    async fn get_item(&self, item: ItemUuid) -> Result<Item, CatalogServiceError>;

    /// Fetches an item for a detail page view, bumping its view counter.
    async fn get_item_detail(&self, item: ItemUuid) -> Result<Item, CatalogServiceError>;

    /// Records a like; returns the new like count.
    async fn like_item(&self, item: ItemUuid) -> Result<u64, CatalogServiceError>;

    /// Administrative edit; re-clamps the discount rate and re-derives the
    /// category from the subcategory.
    async fn update_item(&self, item: ItemUuid, update: ItemUpdate)
    -> Result<Item, CatalogServiceError>;

    /// Administrative restock through the stock ledger.
    async fn increase_stock(&self, item: ItemUuid, qty: u32) -> Result<Item, CatalogServiceError>;

    /// Administrative stock adjustment through the stock ledger.
    async fn decrease_stock(&self, item: ItemUuid, qty: u32) -> Result<Item, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::catalog::{
            errors::StockError,
            models::{Category, SellStatus, SubCategory},
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn create_item_derives_category_and_status() -> TestResult {
        let ctx = TestContext::new().await;

        let item = ctx
            .catalog
            .create_item(NewItem {
                uuid: ItemUuid::new(),
                name: "Free-Range Eggs".to_string(),
                list_price: 6_000,
                discount_rate: 0,
                subcategory: SubCategory::Eggs,
                stock: 12,
                image_url: Some("https://img.example/eggs.jpg".to_string()),
            })
            .await?;

        assert_eq!(item.category, Category::Dairy);
        assert_eq!(item.sell_status(), SellStatus::Selling);

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_item_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_item(ItemUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn detail_view_bumps_view_count() -> TestResult {
        let ctx = TestContext::new().await;
        let item = ctx.create_item("Oat Milk", 3_500, 0, 10).await;

        ctx.catalog.get_item_detail(item.uuid).await?;
        let seen = ctx.catalog.get_item_detail(item.uuid).await?;

        assert_eq!(seen.view_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_with_oversized_rate_is_clamped() -> TestResult {
        let ctx = TestContext::new().await;
        let item = ctx.create_item("Basmati Rice", 9_000, 0, 10).await;

        let updated = ctx
            .catalog
            .update_item(
                item.uuid,
                ItemUpdate {
                    discount_rate: Some(100),
                    ..ItemUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.discount_rate, 95);

        Ok(())
    }

    #[tokio::test]
    async fn stopped_status_survives_restock() -> TestResult {
        let ctx = TestContext::new().await;
        let item = ctx.create_item("Short Ribs", 28_000, 0, 4).await;

        ctx.catalog
            .update_item(
                item.uuid,
                ItemUpdate {
                    sell_status: Some(SellStatus::Stopped),
                    ..ItemUpdate::default()
                },
            )
            .await?;

        let restocked = ctx.catalog.increase_stock(item.uuid, 10).await?;

        assert_eq!(restocked.sell_status(), SellStatus::Stopped);

        Ok(())
    }

    #[tokio::test]
    async fn decrease_stock_propagates_out_of_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let item = ctx.create_item("Salmon Fillet", 12_000, 0, 2).await;

        let result = ctx.catalog.decrease_stock(item.uuid, 5).await;

        assert!(
            matches!(
                result,
                Err(CatalogServiceError::Stock(StockError::OutOfStock { .. }))
            ),
            "expected OutOfStock, got {result:?}"
        );

        // The failed adjustment must not have been published.
        let unchanged = ctx.catalog.get_item(item.uuid).await?;
        assert_eq!(unchanged.stock(), 2);

        Ok(())
    }
}

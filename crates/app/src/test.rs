//! Test context for service-level tests.

use jiff::Timestamp;
use pantry::grades::Grade;

use crate::{
    domain::{
        carts::StoreCartsService,
        catalog::{
            CatalogService, StoreCatalogService,
            models::{Item, ItemUpdate, ItemUuid, NewItem, SellStatus, SubCategory},
        },
        members::{
            models::{Address, AddressUuid, Member, MemberUuid},
            repository::MembersRepository,
        },
        orders::StoreOrdersService,
    },
    store::Store,
};

/// Services over one shared in-memory store, seeded with a member and a
/// non-remote shipping address.
pub struct TestContext {
    pub store: Store,
    pub catalog: StoreCatalogService,
    pub carts: StoreCartsService,
    pub orders: StoreOrdersService,
    pub member_uuid: MemberUuid,
    pub address_uuid: AddressUuid,
}

impl TestContext {
    pub async fn new() -> Self {
        let store = Store::new();

        let mut ctx = Self {
            catalog: StoreCatalogService::new(store.clone()),
            carts: StoreCartsService::new(store.clone()),
            orders: StoreOrdersService::new(store.clone()),
            member_uuid: MemberUuid::new(),
            address_uuid: AddressUuid::new(),
            store,
        };

        ctx.member_uuid = ctx.create_member(Grade::Basic, 100_000).await;
        ctx.address_uuid = ctx.create_address(ctx.member_uuid, "06236").await;

        ctx
    }

    pub async fn create_member(&self, grade: Grade, points: u64) -> MemberUuid {
        let mut tx = self.store.begin().await;

        let member = MembersRepository::new().insert_member(
            &mut tx,
            Member {
                uuid: MemberUuid::new(),
                grade,
                points,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
        );

        tx.commit();
        member.uuid
    }

    pub async fn create_address(&self, owner: MemberUuid, postal_code: &str) -> AddressUuid {
        let mut tx = self.store.begin().await;

        let address = MembersRepository::new().insert_address(
            &mut tx,
            Address {
                uuid: AddressUuid::new(),
                owner,
                recipient: "Test Member".to_string(),
                postal_code: postal_code.to_string(),
                line1: "12 Greenmarket Way".to_string(),
                line2: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
        );

        tx.commit();
        address.uuid
    }

    pub async fn create_item(
        &self,
        name: &str,
        list_price: u64,
        discount_rate: u8,
        stock: u32,
    ) -> Item {
        self.catalog
            .create_item(NewItem {
                uuid: ItemUuid::new(),
                name: name.to_string(),
                list_price,
                discount_rate,
                subcategory: SubCategory::Vegetables,
                stock,
                image_url: None,
            })
            .await
            .expect("create_item should succeed")
    }

    pub async fn create_item_with_image(&self, name: &str, list_price: u64, url: &str) -> Item {
        self.catalog
            .create_item(NewItem {
                uuid: ItemUuid::new(),
                name: name.to_string(),
                list_price,
                discount_rate: 0,
                subcategory: SubCategory::Vegetables,
                stock: 10,
                image_url: Some(url.to_string()),
            })
            .await
            .expect("create_item should succeed")
    }

    pub async fn create_stopped_item(&self, name: &str, list_price: u64) -> Item {
        let item = self.create_item(name, list_price, 0, 10).await;

        self.catalog
            .update_item(
                item.uuid,
                ItemUpdate {
                    sell_status: Some(SellStatus::Stopped),
                    ..ItemUpdate::default()
                },
            )
            .await
            .expect("update_item should succeed")
    }
}

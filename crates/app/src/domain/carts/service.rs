//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use pantry::summary::{SummaryLine, summarize};
use smallvec::SmallVec;

use crate::{
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartLine, CartLineUuid},
            repositories::{CartLinesRepository, CartsRepository},
            views::{CartDetail, CartLineView},
        },
        catalog::{models::ItemUuid, repository::ItemsRepository},
        members::{models::MemberUuid, repository::MembersRepository},
    },
    store::{Store, Transaction},
};

#[derive(Debug, Clone)]
pub struct StoreCartsService {
    store: Store,
    carts_repository: CartsRepository,
    lines_repository: CartLinesRepository,
    items_repository: ItemsRepository,
    members_repository: MembersRepository,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            carts_repository: CartsRepository::new(),
            lines_repository: CartLinesRepository::new(),
            items_repository: ItemsRepository::new(),
            members_repository: MembersRepository::new(),
        }
    }

    /// Builds the enriched detail for a set of lines. Item names and prices
    /// are read live from the catalog; images are fetched in one batch.
    fn detail(
        &self,
        tx: &Transaction,
        member: MemberUuid,
        lines: &[CartLine],
        destination: Option<&str>,
    ) -> Result<CartDetail, CartsServiceError> {
        let grade = self
            .members_repository
            .get_member(tx, member)
            .ok_or(CartsServiceError::NotFound)?
            .grade;

        let mut distinct: SmallVec<[ItemUuid; 8]> = SmallVec::new();
        for line in lines {
            if !distinct.contains(&line.item_uuid) {
                distinct.push(line.item_uuid);
            }
        }
        let images = self.items_repository.representative_images(tx, &distinct);

        let mut views = Vec::with_capacity(lines.len());
        let mut all_lines = Vec::with_capacity(lines.len());
        let mut checked_lines = Vec::new();

        for line in lines {
            let item = self
                .items_repository
                .get_item(tx, line.item_uuid)
                .ok_or(CartsServiceError::NotFound)?;

            let summary_line =
                SummaryLine::new(item.list_price, item.discount_rate, line.quantity);
            all_lines.push(summary_line);
            if line.checked {
                checked_lines.push(summary_line);
            }

            let quantity = u64::from(line.quantity);
            views.push(CartLineView {
                line_uuid: line.uuid,
                item_uuid: line.item_uuid,
                item_name: item.name.clone(),
                image_url: images.get(&line.item_uuid).cloned(),
                list_price: item.list_price,
                sale_price: item.sale_price(),
                quantity: line.quantity,
                checked: line.checked,
                line_total: item.list_price * quantity,
                line_discount: (item.list_price - item.sale_price()) * quantity,
                line_payable: item.sale_price() * quantity,
            });
        }

        Ok(CartDetail {
            lines: views,
            all: summarize(&all_lines, grade, destination),
            checked: summarize(&checked_lines, grade, destination),
        })
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    async fn add_line(
        &self,
        member: MemberUuid,
        item: ItemUuid,
        quantity: u32,
    ) -> Result<CartLineUuid, CartsServiceError> {
        if quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.store.begin().await;

        self.members_repository
            .get_member(&tx, member)
            .ok_or(CartsServiceError::NotFound)?;

        let found = self
            .items_repository
            .get_item(&tx, item)
            .ok_or(CartsServiceError::NotFound)?;

        if !found.is_selling() {
            return Err(CartsServiceError::ItemNotOnSale);
        }

        let cart = self.carts_repository.find_or_create_for_member(&mut tx, member);

        // The merged quantity is what must fit in stock, so a cart can never
        // hold more of an item than exists.
        let check_stock = |requested: u32| {
            if requested > found.stock() {
                return Err(CartsServiceError::OutOfStock {
                    requested,
                    available: found.stock(),
                });
            }
            Ok(())
        };

        let line = match self
            .lines_repository
            .find_by_cart_and_item(&tx, cart.uuid, item)
        {
            Some(mut existing) => {
                existing.quantity += quantity;
                check_stock(existing.quantity)?;
                self.lines_repository.save_line(&mut tx, existing)
            }
            None => {
                check_stock(quantity)?;
                self.lines_repository.insert_line(
                    &mut tx,
                    CartLine {
                        uuid: CartLineUuid::new(),
                        cart_uuid: cart.uuid,
                        item_uuid: item,
                        quantity,
                        checked: true,
                        created_at: Timestamp::UNIX_EPOCH,
                        updated_at: Timestamp::UNIX_EPOCH,
                    },
                )
            }
        };

        tx.commit();

        Ok(line.uuid)
    }

    async fn update_line(
        &self,
        member: MemberUuid,
        line: CartLineUuid,
        quantity: Option<i64>,
        checked: Option<bool>,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.store.begin().await;

        let cart = self
            .carts_repository
            .find_by_member(&tx, member)
            .ok_or(CartsServiceError::NotFound)?;

        let mut found = self
            .lines_repository
            .get_line(&tx, line)
            .filter(|found| found.cart_uuid == cart.uuid)
            .ok_or(CartsServiceError::NotFound)?;

        match quantity {
            Some(qty) if qty < 0 => return Err(CartsServiceError::InvalidQuantity),
            Some(0) => {
                self.lines_repository.delete_line(&mut tx, found.uuid);
                tx.commit();
                return Ok(());
            }
            Some(qty) => {
                found.quantity =
                    u32::try_from(qty).map_err(|_| CartsServiceError::InvalidQuantity)?;
            }
            None => {}
        }

        if let Some(checked) = checked {
            found.checked = checked;
        }

        self.lines_repository.save_line(&mut tx, found);
        tx.commit();

        Ok(())
    }

    async fn clear(&self, member: MemberUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.store.begin().await;

        self.members_repository
            .get_member(&tx, member)
            .ok_or(CartsServiceError::NotFound)?;

        if let Some(cart) = self.carts_repository.find_by_member(&tx, member) {
            self.lines_repository.delete_all_for_cart(&mut tx, cart.uuid);
        }

        tx.commit();

        Ok(())
    }

    async fn delete_checked(&self, member: MemberUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.store.begin().await;

        self.members_repository
            .get_member(&tx, member)
            .ok_or(CartsServiceError::NotFound)?;

        if let Some(cart) = self.carts_repository.find_by_member(&tx, member) {
            for line in self.lines_repository.lines_for_cart(&tx, cart.uuid) {
                if line.checked {
                    self.lines_repository.delete_line(&mut tx, line.uuid);
                }
            }
        }

        tx.commit();

        Ok(())
    }

    async fn get_detail(
        &self,
        member: MemberUuid,
        destination: Option<String>,
    ) -> Result<CartDetail, CartsServiceError> {
        let tx = self.store.begin().await;

        let lines = match self.carts_repository.find_by_member(&tx, member) {
            Some(cart) => self.lines_repository.lines_for_cart(&tx, cart.uuid),
            None => Vec::new(),
        };

        self.detail(&tx, member, &lines, destination.as_deref())
    }

    async fn get_selected_detail(
        &self,
        member: MemberUuid,
        lines: Vec<CartLineUuid>,
        destination: Option<String>,
    ) -> Result<CartDetail, CartsServiceError> {
        let tx = self.store.begin().await;

        let cart = self
            .carts_repository
            .find_by_member(&tx, member)
            .ok_or(CartsServiceError::NotFound)?;

        let mut selected = Vec::with_capacity(lines.len());
        for uuid in lines {
            let line = self
                .lines_repository
                .get_line(&tx, uuid)
                .filter(|line| line.cart_uuid == cart.uuid)
                .ok_or(CartsServiceError::NotFound)?;
            selected.push(line);
        }

        self.detail(&tx, member, &selected, destination.as_deref())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Puts `quantity` units of an item in the member's cart, merging into an
    /// existing line for the same item. The cart itself is created lazily.
    async fn add_line(
        &self,
        member: MemberUuid,
        item: ItemUuid,
        quantity: u32,
    ) -> Result<CartLineUuid, CartsServiceError>;

    /// Adjusts a line's quantity and/or checked flag. A quantity of 0 deletes
    /// the line; a negative quantity is invalid input.
    async fn update_line(
        &self,
        member: MemberUuid,
        line: CartLineUuid,
        quantity: Option<i64>,
        checked: Option<bool>,
    ) -> Result<(), CartsServiceError>;

    /// Removes every line from the member's cart. The cart remains.
    async fn clear(&self, member: MemberUuid) -> Result<(), CartsServiceError>;

    /// Removes only the checked lines.
    async fn delete_checked(&self, member: MemberUuid) -> Result<(), CartsServiceError>;

    /// Enriched cart detail with all-lines and checked-only summaries.
    async fn get_detail(
        &self,
        member: MemberUuid,
        destination: Option<String>,
    ) -> Result<CartDetail, CartsServiceError>;

    /// Same shape as [`CartsService::get_detail`], restricted to the given
    /// lines. Lines outside the member's cart read as not found.
    async fn get_selected_detail(
        &self,
        member: MemberUuid,
        lines: Vec<CartLineUuid>,
        destination: Option<String>,
    ) -> Result<CartDetail, CartsServiceError>;
}

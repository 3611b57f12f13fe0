//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use pantry::summary::{SummaryLine, summarize};
use rand::Rng;
use smallvec::SmallVec;

use crate::{
    domain::{
        carts::{
            models::CartLineUuid,
            repositories::{CartLinesRepository, CartsRepository},
        },
        catalog::repository::ItemsRepository,
        members::{models::AddressUuid, models::MemberUuid, repository::MembersRepository},
        orders::{
            errors::OrdersServiceError,
            models::{
                Destination, Order, OrderLine, OrderLineUuid, OrderRefund, OrderSelection,
                OrderStatus, OrderUuid, PaymentCallback, PaymentMethod, RefundReason,
                RefundStatus, RefundUuid,
            },
            number::order_number,
            repositories::{OrdersRepository, RefundsRepository},
            views::OrderView,
        },
    },
    store::{Store, Transaction},
};

/// How often a colliding order number is redrawn before giving up.
const MAX_NUMBER_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct StoreOrdersService {
    store: Store,
    orders_repository: OrdersRepository,
    refunds_repository: RefundsRepository,
    carts_repository: CartsRepository,
    lines_repository: CartLinesRepository,
    items_repository: ItemsRepository,
    members_repository: MembersRepository,
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            orders_repository: OrdersRepository::new(),
            refunds_repository: RefundsRepository::new(),
            carts_repository: CartsRepository::new(),
            lines_repository: CartLinesRepository::new(),
            items_repository: ItemsRepository::new(),
            members_repository: MembersRepository::new(),
        }
    }

    fn allocate_number(
        &self,
        tx: &Transaction,
        rng: &mut impl Rng,
    ) -> Result<String, OrdersServiceError> {
        for attempt in 0..MAX_NUMBER_ATTEMPTS {
            let candidate = order_number(Timestamp::now(), rng);
            if !self.orders_repository.number_exists(tx, &candidate) {
                return Ok(candidate);
            }
            tracing::warn!(attempt, %candidate, "order number collision, redrawing");
        }

        Err(OrdersServiceError::NumberCollision)
    }

    /// Compensations shared by cancellation and refund approval: return the
    /// points for point-paid orders, then restock every frozen line.
    fn compensate(&self, tx: &mut Transaction, order: &Order) -> Result<(), OrdersServiceError> {
        if order.payment_method == PaymentMethod::Points {
            self.members_repository
                .credit_points(tx, order.member_uuid, order.payable_amount)?;
        }

        for line in self.orders_repository.lines_for_order(tx, order.uuid) {
            let mut item = self
                .items_repository
                .get_item(tx, line.item_uuid)
                .ok_or(OrdersServiceError::NotFound)?;
            item.increase_stock(line.quantity)?;
            self.items_repository.save_item(tx, item);
        }

        Ok(())
    }

    fn view(&self, tx: &Transaction, order: Order) -> OrderView {
        let lines = self.orders_repository.lines_for_order(tx, order.uuid);
        OrderView { order, lines }
    }
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    async fn create_order(
        &self,
        member: MemberUuid,
        selection: OrderSelection,
        address: AddressUuid,
        payment_method: PaymentMethod,
    ) -> Result<OrderUuid, OrdersServiceError> {
        let mut tx = self.store.begin().await;

        let buyer = self
            .members_repository
            .get_member(&tx, member)
            .ok_or(OrdersServiceError::NotFound)?;

        let destination = self
            .members_repository
            .get_address(&tx, address, member)
            .ok_or(OrdersServiceError::NotFound)?;

        let cart = self
            .carts_repository
            .find_by_member(&tx, member)
            .ok_or(OrdersServiceError::EmptySelection)?;

        let selected = match selection {
            OrderSelection::AllChecked => self
                .lines_repository
                .lines_for_cart(&tx, cart.uuid)
                .into_iter()
                .filter(|line| line.checked)
                .collect(),
            OrderSelection::Lines(uuids) => {
                // The selection is a set; repeats of the same id collapse to
                // one line rather than billing it twice.
                let mut distinct: SmallVec<[CartLineUuid; 8]> = SmallVec::new();
                for uuid in uuids {
                    if !distinct.contains(&uuid) {
                        distinct.push(uuid);
                    }
                }

                let mut lines = Vec::with_capacity(distinct.len());
                for uuid in distinct {
                    let line = self
                        .lines_repository
                        .get_line(&tx, uuid)
                        .filter(|line| line.cart_uuid == cart.uuid)
                        .ok_or(OrdersServiceError::NotFound)?;
                    lines.push(line);
                }
                lines
            }
        };

        if selected.is_empty() {
            return Err(OrdersServiceError::EmptySelection);
        }

        // Decrement stock and freeze the purchase snapshot in one pass. Any
        // shortfall drops the transaction, so no partial decrement and no
        // partial order can ever be observed.
        let order_uuid = OrderUuid::new();
        let mut summary_lines = Vec::with_capacity(selected.len());
        let mut frozen = Vec::with_capacity(selected.len());

        for line in &selected {
            let mut item = self
                .items_repository
                .get_item(&tx, line.item_uuid)
                .ok_or(OrdersServiceError::NotFound)?;

            item.decrease_stock(line.quantity)?;
            let item = self.items_repository.save_item(&mut tx, item);

            summary_lines.push(SummaryLine {
                list_price: item.list_price,
                sale_price: item.sale_price(),
                quantity: line.quantity,
            });
            frozen.push(OrderLine {
                uuid: OrderLineUuid::new(),
                order_uuid,
                item_uuid: item.uuid,
                item_name: item.name.clone(),
                list_price: item.list_price,
                purchase_price: item.sale_price(),
                quantity: line.quantity,
                created_at: Timestamp::UNIX_EPOCH,
            });
        }

        let totals = summarize(
            &summary_lines,
            buyer.grade,
            Some(destination.postal_code.as_str()),
        );

        if payment_method == PaymentMethod::Points {
            self.members_repository
                .debit_points(&mut tx, member, totals.payable_amount)?;
        }

        let number = self.allocate_number(&tx, &mut rand::thread_rng())?;
        let order = self.orders_repository.insert_order(
            &mut tx,
            Order {
                uuid: order_uuid,
                number,
                member_uuid: member,
                destination: Destination {
                    recipient: destination.recipient,
                    postal_code: destination.postal_code,
                    line1: destination.line1,
                    line2: destination.line2,
                },
                payment_method,
                status: OrderStatus::Created,
                products_total: totals.products_total,
                discount_total: totals.discount_total,
                shipping_fee: totals.shipping_fee,
                coupon_discount: totals.coupon_discount,
                payable_amount: totals.payable_amount,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
        );

        for line in frozen {
            self.orders_repository.insert_line(&mut tx, line);
        }

        // The consumed lines leave the cart; unconsumed ones stay.
        for line in &selected {
            self.lines_repository.delete_line(&mut tx, line.uuid);
        }

        tx.commit();

        tracing::info!(
            order = %order.uuid,
            number = %order.number,
            payable = order.payable_amount,
            "order created"
        );

        Ok(order.uuid)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderView, OrdersServiceError> {
        let tx = self.store.begin().await;

        let found = self
            .orders_repository
            .get_order(&tx, order)
            .ok_or(OrdersServiceError::NotFound)?;

        Ok(self.view(&tx, found))
    }

    async fn get_order_detail(
        &self,
        order: OrderUuid,
        member: MemberUuid,
    ) -> Result<OrderView, OrdersServiceError> {
        let tx = self.store.begin().await;

        let found = self
            .orders_repository
            .get_order(&tx, order)
            .filter(|found| found.member_uuid == member)
            .ok_or(OrdersServiceError::NotFound)?;

        Ok(self.view(&tx, found))
    }

    async fn confirm_payment(&self, callback: PaymentCallback) -> Result<(), OrdersServiceError> {
        let mut tx = self.store.begin().await;

        let mut order = self
            .orders_repository
            .get_order(&tx, callback.order)
            .ok_or(OrdersServiceError::NotFound)?;

        if !callback.approved {
            return Err(OrdersServiceError::PaymentNotApproved);
        }
        if order.payment_method == PaymentMethod::BankTransfer {
            return Err(OrdersServiceError::BankTransferCallback);
        }
        if order.status != OrderStatus::Created {
            return Err(OrdersServiceError::InvalidState {
                status: order.status,
            });
        }
        if callback.amount != order.payable_amount {
            tracing::warn!(
                order = %order.uuid,
                expected = order.payable_amount,
                reported = callback.amount,
                "payment callback amount mismatch"
            );
            return Err(OrdersServiceError::AmountMismatch {
                expected: order.payable_amount,
                reported: callback.amount,
            });
        }

        order.status = OrderStatus::Preparing;
        let order = self.orders_repository.save_order(&mut tx, order);
        tx.commit();

        tracing::info!(order = %order.uuid, "payment confirmed");

        Ok(())
    }

    async fn confirm_bank_transfer(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .orders_repository
            .get_order(&tx, order)
            .ok_or(OrdersServiceError::NotFound)?;

        if found.payment_method != PaymentMethod::BankTransfer {
            return Err(OrdersServiceError::NotBankTransfer);
        }
        if found.status != OrderStatus::Created {
            return Err(OrdersServiceError::InvalidState {
                status: found.status,
            });
        }

        found.status = OrderStatus::Preparing;
        let found = self.orders_repository.save_order(&mut tx, found);
        tx.commit();

        tracing::info!(order = %found.uuid, "bank transfer confirmed");

        Ok(())
    }

    async fn cancel(&self, order: OrderUuid, member: MemberUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .orders_repository
            .get_order(&tx, order)
            .filter(|found| found.member_uuid == member)
            .ok_or(OrdersServiceError::NotFound)?;

        if !found.status.is_cancelable() {
            return Err(OrdersServiceError::InvalidState {
                status: found.status,
            });
        }

        self.compensate(&mut tx, &found)?;

        found.status = OrderStatus::Canceled;
        let found = self.orders_repository.save_order(&mut tx, found);
        tx.commit();

        tracing::info!(order = %found.uuid, "order canceled");

        Ok(())
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .orders_repository
            .get_order(&tx, order)
            .ok_or(OrdersServiceError::NotFound)?;

        if !found.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: found.status,
                to: status,
            });
        }

        found.status = status;
        self.orders_repository.save_order(&mut tx, found);
        tx.commit();

        Ok(())
    }

    async fn request_refund(
        &self,
        order: OrderUuid,
        member: MemberUuid,
        reason: RefundReason,
        detail: Option<String>,
    ) -> Result<RefundUuid, OrdersServiceError> {
        let mut tx = self.store.begin().await;

        let mut found = self
            .orders_repository
            .get_order(&tx, order)
            .filter(|found| found.member_uuid == member)
            .ok_or(OrdersServiceError::NotFound)?;

        if !found.status.is_refund_eligible() {
            return Err(OrdersServiceError::InvalidState {
                status: found.status,
            });
        }

        let refund = self.refunds_repository.insert_refund(
            &mut tx,
            OrderRefund {
                uuid: RefundUuid::new(),
                order_uuid: found.uuid,
                reason,
                detail,
                status: RefundStatus::Pending,
                processed_by: None,
                processed_at: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
        );

        found.status = OrderStatus::RefundRequested;
        self.orders_repository.save_order(&mut tx, found);
        tx.commit();

        tracing::info!(order = %order, refund = %refund.uuid, ?reason, "refund requested");

        Ok(refund.uuid)
    }

    async fn approve_refund(
        &self,
        refund: RefundUuid,
        processor: String,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.store.begin().await;

        let mut pending = self
            .refunds_repository
            .get_refund(&tx, refund)
            .ok_or(OrdersServiceError::NotFound)?;

        let mut order = self
            .orders_repository
            .get_order(&tx, pending.order_uuid)
            .ok_or(OrdersServiceError::NotFound)?;

        if order.status != OrderStatus::RefundRequested || pending.status != RefundStatus::Pending
        {
            return Err(OrdersServiceError::InvalidState {
                status: order.status,
            });
        }

        self.compensate(&mut tx, &order)?;

        order.status = OrderStatus::Refunded;
        self.orders_repository.save_order(&mut tx, order);

        pending.status = RefundStatus::Approved;
        pending.processed_by = Some(processor);
        pending.processed_at = Some(Timestamp::now());
        let pending = self.refunds_repository.save_refund(&mut tx, pending);

        tx.commit();

        tracing::info!(refund = %pending.uuid, order = %pending.order_uuid, "refund approved");

        Ok(())
    }

    async fn reject_refund(
        &self,
        refund: RefundUuid,
        processor: String,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.store.begin().await;

        let mut pending = self
            .refunds_repository
            .get_refund(&tx, refund)
            .ok_or(OrdersServiceError::NotFound)?;

        let mut order = self
            .orders_repository
            .get_order(&tx, pending.order_uuid)
            .ok_or(OrdersServiceError::NotFound)?;

        if order.status != OrderStatus::RefundRequested || pending.status != RefundStatus::Pending
        {
            return Err(OrdersServiceError::InvalidState {
                status: order.status,
            });
        }

        order.status = OrderStatus::Delivered;
        self.orders_repository.save_order(&mut tx, order);

        pending.status = RefundStatus::Rejected;
        pending.processed_by = Some(processor);
        pending.processed_at = Some(Timestamp::now());
        let pending = self.refunds_repository.save_refund(&mut tx, pending);

        tx.commit();

        tracing::info!(refund = %pending.uuid, order = %pending.order_uuid, "refund rejected");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Converts the selected cart lines into an immutable order: stock is
    /// decremented, prices and names are frozen, totals are computed once and
    /// stored, and the consumed lines leave the cart. All-or-nothing.
    async fn create_order(
        &self,
        member: MemberUuid,
        selection: OrderSelection,
        address: AddressUuid,
        payment_method: PaymentMethod,
    ) -> Result<OrderUuid, OrdersServiceError>;

    /// Fetches an order with its frozen lines.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderView, OrdersServiceError>;

    /// Ownership-checked order view for the buying member.
    async fn get_order_detail(
        &self,
        order: OrderUuid,
        member: MemberUuid,
    ) -> Result<OrderView, OrdersServiceError>;

    /// Applies a payment-gateway callback. Only `Created`, non-bank-transfer
    /// orders advance, and only when the captured amount matches the stored
    /// payable amount exactly.
    async fn confirm_payment(&self, callback: PaymentCallback) -> Result<(), OrdersServiceError>;

    /// Manual confirmation for bank-transfer orders.
    async fn confirm_bank_transfer(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;

    /// Customer cancellation, allowed before shipment. Restocks every line
    /// and returns points on point-paid orders.
    async fn cancel(&self, order: OrderUuid, member: MemberUuid)
    -> Result<(), OrdersServiceError>;

    /// Administrative transition along the lifecycle graph.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;

    /// Opens a refund request on a delivered order.
    async fn request_refund(
        &self,
        order: OrderUuid,
        member: MemberUuid,
        reason: RefundReason,
        detail: Option<String>,
    ) -> Result<RefundUuid, OrdersServiceError>;

    /// Approves a pending refund: points back on point-paid orders, stock
    /// back for every line, order to `Refunded`.
    async fn approve_refund(
        &self,
        refund: RefundUuid,
        processor: String,
    ) -> Result<(), OrdersServiceError>;

    /// Rejects a pending refund and returns the order to `Delivered`. No
    /// stock or point side effects.
    async fn reject_refund(
        &self,
        refund: RefundUuid,
        processor: String,
    ) -> Result<(), OrdersServiceError>;
}

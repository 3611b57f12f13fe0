//! Orders Repository

use jiff::Timestamp;

use crate::{
    domain::orders::models::{Order, OrderLine, OrderUuid},
    store::Transaction,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct OrdersRepository;

impl OrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_order(&self, tx: &Transaction, order: OrderUuid) -> Option<Order> {
        tx.tables_ref().orders.get(&order).cloned()
    }

    pub(crate) fn number_exists(&self, tx: &Transaction, number: &str) -> bool {
        tx.tables_ref()
            .orders
            .values()
            .any(|order| order.number == number)
    }

    pub(crate) fn insert_order(&self, tx: &mut Transaction, mut order: Order) -> Order {
        let now = Timestamp::now();
        order.created_at = now;
        order.updated_at = now;

        tx.tables().orders.insert(order.uuid, order.clone());
        order
    }

    pub(crate) fn save_order(&self, tx: &mut Transaction, mut order: Order) -> Order {
        order.updated_at = Timestamp::now();

        tx.tables().orders.insert(order.uuid, order.clone());
        order
    }

    pub(crate) fn insert_line(&self, tx: &mut Transaction, mut line: OrderLine) -> OrderLine {
        line.created_at = Timestamp::now();

        tx.tables().order_lines.insert(line.uuid, line.clone());
        line
    }

    /// All frozen lines of an order, oldest first.
    pub(crate) fn lines_for_order(&self, tx: &Transaction, order: OrderUuid) -> Vec<OrderLine> {
        let mut lines: Vec<OrderLine> = tx
            .tables_ref()
            .order_lines
            .values()
            .filter(|line| line.order_uuid == order)
            .cloned()
            .collect();

        lines.sort_by_key(|line| (line.created_at, line.uuid));
        lines
    }
}

//! Refunds Repository

use jiff::Timestamp;

use crate::{
    domain::orders::models::{OrderRefund, RefundUuid},
    store::Transaction,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct RefundsRepository;

impl RefundsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_refund(&self, tx: &Transaction, refund: RefundUuid) -> Option<OrderRefund> {
        tx.tables_ref().refunds.get(&refund).cloned()
    }

    pub(crate) fn insert_refund(&self, tx: &mut Transaction, mut refund: OrderRefund) -> OrderRefund {
        let now = Timestamp::now();
        refund.created_at = now;
        refund.updated_at = now;

        tx.tables().refunds.insert(refund.uuid, refund.clone());
        refund
    }

    pub(crate) fn save_refund(&self, tx: &mut Transaction, mut refund: OrderRefund) -> OrderRefund {
        refund.updated_at = Timestamp::now();

        tx.tables().refunds.insert(refund.uuid, refund.clone());
        refund
    }
}

//! Order repositories.

mod orders;
mod refunds;

pub(crate) use orders::OrdersRepository;
pub(crate) use refunds::RefundsRepository;

//! Cart repositories.

mod carts;
mod lines;

pub(crate) use carts::CartsRepository;
pub(crate) use lines::CartLinesRepository;

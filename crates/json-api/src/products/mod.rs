//! Products

mod errors;
pub(crate) mod handlers;
mod models;
pub(crate) mod owner;
mod payload;

pub(crate) use handlers::*;

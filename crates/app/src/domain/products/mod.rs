//! Products

pub mod access;
pub mod data;
pub mod errors;
pub mod filter;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use filter::{FilterError, ProductFilter};
pub use service::*;

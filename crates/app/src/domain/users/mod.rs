//! Users & Sessions

pub mod data;
pub mod errors;
mod passwords;
pub mod records;
mod repository;
pub mod service;
pub mod tokens;

pub use errors::UsersServiceError;
pub use service::*;

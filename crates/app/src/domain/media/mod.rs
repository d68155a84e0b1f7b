//! Media
//!
//! Uploaded product images stored on local disk, and the tagged image
//! reference products carry.

pub mod errors;
pub mod models;
pub mod store;

pub use errors::MediaStoreError;
pub use models::*;
pub use store::*;

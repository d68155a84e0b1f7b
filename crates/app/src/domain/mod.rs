//! Vitrine Domain Concerns

pub mod media;
pub mod products;
pub mod users;

//! SeaORM entities and their domain conversions.

pub mod analytics;
pub mod post;
pub mod user;

//! Record generators for seeding.
//!
//! - [`RecordGenerator`]: the deterministic `products` row sequence

pub mod product;

pub use product::{Category, Record, RecordGenerator};

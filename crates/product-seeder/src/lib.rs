//! Bulk seed inserter for the `products` table.
//!
//! Connects to each configured PostgreSQL target and inserts a fixed number
//! of deterministic rows, one parameterized statement per row. Record `i`
//! is always `("Product i", "Type X")` where the category cycles through
//! A, B and C with `i % 3`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use product_seeder::prelude::*;
//!
//! let seeder = Seeder::new(PgConnector).with_table("products");
//! let report = seeder.run(&TargetConfig::primary(), 1_000).await?;
//! println!("{} rows", report.rows_inserted);
//! ```

pub mod config;
pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{SeedConfig, TargetConfig};
    pub use crate::db::{
        Connector, PgConnector, ProductWriter, SeedError, SeedReport, Seeder, TargetOutcome,
        seed_targets,
    };
    pub use crate::generators::{Category, Record, RecordGenerator};
}

//! Database integration for seeding.
//!
//! The [`Seeder`] drives one connection per target through the
//! [`Connector`] and [`ProductWriter`] traits. [`PgConnector`] is the
//! PostgreSQL implementation used by the `seed` binary.

mod postgres;
mod seeder;

use async_trait::async_trait;

use crate::config::TargetConfig;
use crate::generators::Record;

pub use postgres::{InsertStatement, PgConnector, PgProductWriter};
pub use seeder::{SeedError, SeedReport, Seeder, TargetOutcome, seed_targets};

/// Opens connections to target databases.
#[async_trait]
pub trait Connector: Send + Sync {
    type Writer: ProductWriter;

    /// Opens a single dedicated connection to `target`.
    async fn connect(&self, target: &TargetConfig) -> Result<Self::Writer, sqlx::Error>;
}

/// A live connection that accepts product rows.
#[async_trait]
pub trait ProductWriter: Send {
    /// Inserts one record, binding its values positionally.
    async fn insert(
        &mut self,
        statement: &InsertStatement,
        record: &Record,
    ) -> Result<(), sqlx::Error>;

    /// Releases the connection.
    async fn close(self) -> Result<(), sqlx::Error>;
}

//! PostgreSQL connector and writer.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};

use super::{Connector, ProductWriter, SeedError};
use crate::config::TargetConfig;
use crate::generators::Record;

/// Parameterized `INSERT` for one target table.
///
/// The table name is spliced into the SQL text, so it is restricted to
/// `ident` or `schema.ident`. Row values are always bound as `$1`/`$2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    table: String,
    sql: String,
}

impl InsertStatement {
    pub fn new(table: &str) -> Result<Self, SeedError> {
        let parts: Vec<&str> = table.split('.').collect();
        if parts.len() > 2 || !parts.iter().all(|part| is_identifier(part)) {
            return Err(SeedError::InvalidTable(table.to_string()));
        }

        Ok(Self {
            table: table.to_string(),
            sql: format!("INSERT INTO {table} (name, type) VALUES ($1, $2)"),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builds driver options from a target. Endpoint and credentials always come
/// from the target, even when `PG*` variables are set.
fn connect_options(target: &TargetConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&target.host)
        .port(target.port)
        .username(&target.user)
        .password(&target.password)
        .database(&target.database)
        .application_name("product-seeder")
        // every row is logged by the seeder already
        .disable_statement_logging()
}

/// Opens one unpooled [`PgConnection`] per target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

#[async_trait]
impl Connector for PgConnector {
    type Writer = PgProductWriter;

    async fn connect(&self, target: &TargetConfig) -> Result<PgProductWriter, sqlx::Error> {
        let conn = connect_options(target).connect().await?;
        Ok(PgProductWriter { conn })
    }
}

/// Writer backed by a single PostgreSQL connection.
pub struct PgProductWriter {
    conn: PgConnection,
}

#[async_trait]
impl ProductWriter for PgProductWriter {
    async fn insert(
        &mut self,
        statement: &InsertStatement,
        record: &Record,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(statement.as_str())
            .bind(record.name.as_str())
            .bind(record.category.label())
            .execute(&mut self.conn)
            .await?;

        Ok(())
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await
    }
}

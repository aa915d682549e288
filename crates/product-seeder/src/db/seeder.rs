//! Row-by-row seeding of a single target.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{error, info, warn};

use super::{Connector, InsertStatement, ProductWriter};
use crate::config::{DEFAULT_TABLE, TargetConfig};
use crate::generators::RecordGenerator;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to connect to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Connection lost while inserting record {index}: {source}")]
    ConnectionLost {
        index: u64,
        #[source]
        source: sqlx::Error,
    },
    #[error("Insert of record {index} failed: {source}")]
    Query {
        index: u64,
        #[source]
        source: sqlx::Error,
    },
    #[error("Invalid table name: {0:?}")]
    InvalidTable(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Seeding task for {target} aborted")]
    Aborted { target: String },
}

impl SeedError {
    /// Classifies a failed insert. Transport failures mean the connection is
    /// gone; anything else was rejected by the database.
    fn from_insert(index: u64, source: sqlx::Error) -> Self {
        if is_transport_error(&source) {
            SeedError::ConnectionLost { index, source }
        } else {
            SeedError::Query { index, source }
        }
    }

    /// Index of the record whose insert failed, if the error came from one.
    pub fn index(&self) -> Option<u64> {
        match self {
            SeedError::ConnectionLost { index, .. } | SeedError::Query { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}

fn is_transport_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Protocol(_) => true,
        // the server ended the session with a FATAL error response
        sqlx::Error::Database(e) => e.code().is_some_and(|code| ends_session(&code)),
        _ => false,
    }
}

/// SQLSTATE classes 08 (connection exception) and 57P (operator
/// intervention: admin shutdown, crash shutdown, cannot connect now).
fn ends_session(code: &str) -> bool {
    code.starts_with("08") || code.starts_with("57P")
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    /// Label of the seeded target.
    pub target: String,
    pub rows_inserted: u64,
    pub duration: Duration,
}

impl SeedReport {
    pub fn rows_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Inserts the deterministic product sequence into one target at a time.
pub struct Seeder<C> {
    connector: C,
    table: String,
}

impl<C: Connector> Seeder<C> {
    /// Creates a seeder writing to the default `products` table.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Sets the table receiving the rows.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Inserts records `1..=record_count` into `target`, one statement per row.
    ///
    /// The connection is opened once and closed exactly once before this
    /// returns, whether the loop finished or failed. Rows inserted before a
    /// failure stay committed.
    pub async fn run(
        &self,
        target: &TargetConfig,
        record_count: u64,
    ) -> Result<SeedReport, SeedError> {
        let statement = InsertStatement::new(&self.table)?;
        let started = Instant::now();

        let mut writer =
            self.connector
                .connect(target)
                .await
                .map_err(|source| SeedError::Connection {
                    target: target.to_string(),
                    source,
                })?;
        info!(db = %target.name, "Connected to the database");

        let outcome = insert_all(&mut writer, &statement, &target.name, record_count).await;

        if let Err(e) = writer.close().await {
            warn!(db = %target.name, "Error while closing connection: {e}");
        }
        info!(db = %target.name, "Disconnected from the database");

        let rows_inserted = outcome?;
        info!(
            db = %target.name,
            "Successfully inserted {} records into the {} table",
            rows_inserted,
            statement.table()
        );

        Ok(SeedReport {
            target: target.name.clone(),
            rows_inserted,
            duration: started.elapsed(),
        })
    }
}

async fn insert_all<W: ProductWriter>(
    writer: &mut W,
    statement: &InsertStatement,
    target: &str,
    record_count: u64,
) -> Result<u64, SeedError> {
    let mut inserted = 0;

    for record in RecordGenerator::new(record_count) {
        writer
            .insert(statement, &record)
            .await
            .map_err(|e| SeedError::from_insert(record.index, e))?;
        inserted += 1;

        info!(db = %target, "Inserted: {}, {}", record.name, record.category);
    }

    Ok(inserted)
}

/// Result of seeding one target.
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: String,
    pub result: Result<SeedReport, SeedError>,
}

/// Seeds every target on its own task and waits for all of them.
///
/// Targets share nothing: each task owns its seeder and connection, and a
/// failure in one does not stop the others. Outcomes are returned in the
/// order the targets were given.
pub async fn seed_targets<C>(
    connector: C,
    targets: Vec<TargetConfig>,
    record_count: u64,
    table: &str,
) -> Vec<TargetOutcome>
where
    C: Connector + Clone + 'static,
{
    let mut handles = Vec::with_capacity(targets.len());
    for target in targets {
        let seeder = Seeder::new(connector.clone()).with_table(table);
        let name = target.name.clone();
        let handle = tokio::spawn(async move { seeder.run(&target, record_count).await });
        handles.push((name, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (target, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => {
                error!(db = %target, "Seeding task failed: {e}");
                Err(SeedError::Aborted {
                    target: target.clone(),
                })
            }
        };
        outcomes.push(TargetOutcome { target, result });
    }

    outcomes
}

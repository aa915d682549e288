//! Seeds the products table of every configured target.
//!
//! Run with:
//! ```
//! cargo run -p product-seeder --bin seed -- --count 1000
//! ```

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use product_seeder::config::{SeedConfig, TargetConfig};
use product_seeder::db::{PgConnector, seed_targets};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seed", about = "Insert deterministic product rows into PostgreSQL targets")]
struct Args {
    /// Records to insert into each target
    #[arg(long, env = "SEED_RECORD_COUNT")]
    count: Option<u64>,

    /// Table receiving the rows (`name` or `schema.name`)
    #[arg(long, env = "SEED_TABLE")]
    table: Option<String>,

    /// JSON file describing targets, record count and table
    #[arg(long, env = "SEED_CONFIG")]
    config: Option<PathBuf>,

    /// Seed a single target read from PGHOST, PGPORT, PGUSER, PGPASSWORD and PGDATABASE
    #[arg(long)]
    pg_env: bool,
}

impl Args {
    fn resolve(self) -> anyhow::Result<SeedConfig> {
        let mut config = match &self.config {
            Some(path) => SeedConfig::from_file(path)?,
            None => SeedConfig::default(),
        };

        if self.pg_env {
            config.targets = vec![TargetConfig::from_pg_env()?];
        }
        if let Some(count) = self.count {
            config.record_count = count;
        }
        if let Some(table) = self.table {
            config.table = table;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().resolve()?;

    if config.targets.is_empty() {
        bail!("no targets configured");
    }

    tracing::info!(
        "Seeding {} records into {} on {} target(s)",
        config.record_count,
        config.table,
        config.targets.len()
    );
    for target in &config.targets {
        tracing::info!("  {}", target);
    }

    let outcomes = seed_targets(
        PgConnector,
        config.targets,
        config.record_count,
        &config.table,
    )
    .await;

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => tracing::info!(
                "{}: {} rows in {:.1?} ({:.0} rows/s)",
                outcome.target,
                report.rows_inserted,
                report.duration,
                report.rows_per_second()
            ),
            Err(e) => {
                failed += 1;
                tracing::error!("{}: error inserting records: {}", outcome.target, e);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} target(s) failed", outcomes.len());
    }

    Ok(())
}

//! Configuration types for seeding runs.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::SeedError;

/// Number of records inserted per target when nothing else is configured.
pub const DEFAULT_RECORD_COUNT: u64 = 182_679_498;

/// Table written to when nothing else is configured.
pub const DEFAULT_TABLE: &str = "products";

/// Connection parameters for one target database.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Label used in logs and reports.
    pub name: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl TargetConfig {
    /// First of the two stock targets.
    pub fn primary() -> Self {
        Self {
            name: "primary".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            user: "user1".to_string(),
            password: "password1".to_string(),
            database: "postgres".to_string(),
        }
    }

    /// Second of the two stock targets.
    pub fn secondary() -> Self {
        Self {
            name: "secondary".to_string(),
            host: "localhost".to_string(),
            port: 5433,
            user: "user2".to_string(),
            password: "password2".to_string(),
            database: "postgres".to_string(),
        }
    }

    /// Reads a target from the libpq environment variables
    /// (`PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`).
    ///
    /// Unset variables keep their [`Default`] value.
    pub fn from_pg_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SeedError> {
        let mut target = Self {
            name: "env".to_string(),
            ..Self::default()
        };

        if let Some(host) = lookup("PGHOST") {
            target.host = host;
        }
        if let Some(port) = lookup("PGPORT") {
            target.port = port
                .parse()
                .map_err(|_| SeedError::Config(format!("PGPORT is not a valid port: {port}")))?;
        }
        if let Some(user) = lookup("PGUSER") {
            target.user = user;
        }
        if let Some(password) = lookup("PGPASSWORD") {
            target.password = password;
        }
        if let Some(database) = lookup("PGDATABASE") {
            target.database = database;
        }

        Ok(target)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
        }
    }
}

impl fmt::Display for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}@{}:{}/{})",
            self.name, self.user, self.host, self.port, self.database
        )
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetConfig")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Configuration for a seeding run across one or more targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Databases to seed. Each one gets its own connection and task.
    pub targets: Vec<TargetConfig>,

    /// Number of records inserted into each target.
    pub record_count: u64,

    /// Table receiving the rows. Must have text columns `name` and `type`.
    pub table: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            targets: vec![TargetConfig::primary(), TargetConfig::secondary()],
            record_count: DEFAULT_RECORD_COUNT,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl SeedConfig {
    /// Loads a JSON configuration file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SeedError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&contents)
            .map_err(|e| SeedError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config_targets_both_databases() {
        let config = SeedConfig::default();

        assert_eq!(config.record_count, DEFAULT_RECORD_COUNT);
        assert_eq!(config.table, "products");
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.targets[0].port, 5432);
        assert_eq!(config.targets[0].user, "user1");
        assert_eq!(config.targets[1].port, 5433);
        assert_eq!(config.targets[1].user, "user2");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SeedConfig::from_json(r#"{"record_count": 10}"#).unwrap();

        assert_eq!(config.record_count, 10);
        assert_eq!(config.table, "products");
        assert_eq!(config.targets.len(), 2);
    }

    #[test]
    fn test_json_targets_fill_missing_fields() {
        let config = SeedConfig::from_json(
            r#"{"targets": [{"name": "staging", "host": "db.internal", "password": "s3cret"}]}"#,
        )
        .unwrap();

        assert_eq!(config.targets.len(), 1);
        let target = &config.targets[0];
        assert_eq!(target.name, "staging");
        assert_eq!(target.host, "db.internal");
        assert_eq!(target.port, 5432);
        assert_eq!(target.user, "postgres");
        assert_eq!(target.password, "s3cret");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"table": "seed.products", "record_count": 3}}"#).unwrap();

        let config = SeedConfig::from_file(file.path()).unwrap();
        assert_eq!(config.table, "seed.products");
        assert_eq!(config.record_count, 3);
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = SeedConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SeedError::Config(_)));
    }

    #[test]
    fn test_password_is_never_printed() {
        let target = TargetConfig::primary();

        assert_eq!(target.to_string(), "primary (user1@localhost:5432/postgres)");
        assert!(!format!("{target:?}").contains("password1"));
    }

    #[test]
    fn test_pg_env_lookup() {
        let vars: HashMap<&str, &str> = [
            ("PGHOST", "10.0.0.7"),
            ("PGPORT", "6543"),
            ("PGUSER", "seeder"),
            ("PGDATABASE", "shop"),
        ]
        .into_iter()
        .collect();

        let target =
            TargetConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(target.host, "10.0.0.7");
        assert_eq!(target.port, 6543);
        assert_eq!(target.user, "seeder");
        assert_eq!(target.password, "");
        assert_eq!(target.database, "shop");
    }

    #[test]
    fn test_pg_env_rejects_bad_port() {
        let result = TargetConfig::from_lookup(|key| {
            (key == "PGPORT").then(|| "not-a-port".to_string())
        });
        assert!(matches!(result, Err(SeedError::Config(_))));
    }
}

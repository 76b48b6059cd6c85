//! Relational store configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which driver the gateway connects with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    /// MySQL or MariaDB over TCP.
    #[default]
    Mysql,
    /// SQLite file. `database` is the file path; network fields are ignored.
    Sqlite,
}

/// Connection options for the relational store.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Driver.
    #[serde(default)]
    pub driver: DatabaseDriver,
    /// Server host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// User name.
    #[serde(default = "default_user")]
    pub user: String,
    /// Password.
    #[serde(default)]
    pub password: String,
    /// Database (schema) name, or file path for SQLite.
    #[serde(default = "default_database")]
    pub database: String,
    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long a request waits for a pooled connection.
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    /// How long one statement may run.
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,
    /// Create the tables at startup when they are missing.
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: String::new(),
            database: default_database(),
            max_connections: default_max_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            statement_timeout_ms: default_statement_timeout_ms(),
            auto_migrate: false,
        }
    }
}

impl DatabaseConfig {
    /// SQLite configuration for a database file.
    #[must_use]
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            driver: DatabaseDriver::Sqlite,
            database: path.into(),
            ..Self::default()
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_ms", &self.acquire_timeout_ms)
            .field("statement_timeout_ms", &self.statement_timeout_ms)
            .field("auto_migrate", &self.auto_migrate)
            .finish()
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    "root".to_string()
}

fn default_database() -> String {
    "shop".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_acquire_timeout_ms() -> u64 {
    3_000
}

const fn default_statement_timeout_ms() -> u64 {
    5_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let config = DatabaseConfig {
            password: "hunter2".to_string(),
            ..DatabaseConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn sqlite_sets_driver_and_path() {
        let config = DatabaseConfig::sqlite("/tmp/intake.db");
        assert_eq!(config.driver, DatabaseDriver::Sqlite);
        assert_eq!(config.database, "/tmp/intake.db");
    }
}

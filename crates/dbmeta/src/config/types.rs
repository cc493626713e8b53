//! Configuration type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drivers::ProviderImpl;
use crate::error::Result;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database to introspect.
    pub database: DatabaseConfig,

    /// Introspection behavior.
    #[serde(default)]
    pub introspect: IntrospectConfig,
}

/// Database connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database type ("mysql", "postgres", ...).
    pub r#type: String,

    /// Database host.
    pub host: String,

    /// Database port (default: 3306 for MySQL, 5432 for PostgreSQL).
    #[serde(default)]
    pub port: Option<u16>,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Schema to introspect when none is given on the command line.
    #[serde(default)]
    pub schema: Option<String>,

    /// SSL mode: disable, require, verify-full (default: disable).
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,

    /// Maximum pool connections (default: 2).
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Port to connect to, falling back to the product's standard port.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedDialect`](crate::MetaError::UnsupportedDialect)
    /// if no port is set and the type is not recognized.
    pub fn port(&self) -> Result<u16> {
        match self.port {
            Some(port) => Ok(port),
            None => Ok(ProviderImpl::from_db_type(&self.r#type)?.default_port()),
        }
    }

    /// Schema to introspect when the caller does not name one.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedDialect`](crate::MetaError::UnsupportedDialect)
    /// if no schema is set and the type is not recognized.
    pub fn default_schema(&self) -> Result<String> {
        match &self.schema {
            Some(schema) => Ok(schema.clone()),
            None => Ok(ProviderImpl::from_db_type(&self.r#type)?.default_schema(&self.database)),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("type", &self.r#type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("schema", &self.schema)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Introspection behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectConfig {
    /// Attach index membership to columns (default: true).
    #[serde(default = "default_true")]
    pub include_indexes: bool,
}

impl Default for IntrospectConfig {
    fn default() -> Self {
        Self {
            include_indexes: true,
        }
    }
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_max_connections() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

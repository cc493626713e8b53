//! Configuration validation.

use super::Config;
use crate::drivers::{ProviderImpl, SslMode};
use crate::error::{MetaError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let db = &config.database;

    if db.host.is_empty() {
        return Err(MetaError::Config("database.host is required".into()));
    }
    if db.database.is_empty() {
        return Err(MetaError::Config("database.database is required".into()));
    }
    if db.user.is_empty() {
        return Err(MetaError::Config("database.user is required".into()));
    }

    // Unknown types are rejected here rather than at first use
    ProviderImpl::from_db_type(&db.r#type)?;
    SslMode::parse(&db.ssl_mode)?;

    if db.max_connections == 0 {
        return Err(MetaError::Config(
            "database.max_connections must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, IntrospectConfig};

    fn valid_config() -> Config {
        Config {
            database: DatabaseConfig {
                r#type: "mysql".to_string(),
                host: "localhost".to_string(),
                port: None,
                database: "shop".to_string(),
                user: "root".to_string(),
                password: "password".to_string(),
                schema: None,
                ssl_mode: "disable".to_string(),
                max_connections: 2,
            },
            introspect: IntrospectConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_host() {
        let mut config = valid_config();
        config.database.host = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_type() {
        let mut config = valid_config();
        config.database.r#type = "sqlite".to_string();
        assert!(matches!(
            validate(&config),
            Err(MetaError::UnsupportedDialect(_))
        ));
    }

    #[test]
    fn test_invalid_ssl_mode() {
        let mut config = valid_config();
        config.database.ssl_mode = "maybe".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_connections() {
        let mut config = valid_config();
        config.database.max_connections = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_database_config_debug_redacts_password() {
        let mut config = valid_config();
        config.database.password = "super_secret_password_123".to_string();
        let debug_output = format!("{:?}", config.database);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password_123"));
    }

    #[test]
    fn test_default_port_and_schema() {
        let mut config = valid_config();
        assert_eq!(config.database.port().unwrap(), 3306);
        assert_eq!(config.database.default_schema().unwrap(), "shop");

        config.database.r#type = "postgres".to_string();
        assert_eq!(config.database.port().unwrap(), 5432);
        assert_eq!(config.database.default_schema().unwrap(), "public");

        config.database.port = Some(6543);
        config.database.schema = Some("billing".to_string());
        assert_eq!(config.database.port().unwrap(), 6543);
        assert_eq!(config.database.default_schema().unwrap(), "billing");
    }

    #[test]
    fn test_defaults_follow_provider_for_every_alias() {
        let mut config = valid_config();
        for tag in ["mysql", "mariadb", "postgres", "postgresql", "pg"] {
            config.database.r#type = tag.to_string();
            let provider = ProviderImpl::from_db_type(tag).unwrap();
            assert_eq!(config.database.port().unwrap(), provider.default_port());
            assert_eq!(
                config.database.default_schema().unwrap(),
                provider.default_schema("shop")
            );
        }
    }

    #[test]
    fn test_defaults_reject_unknown_type() {
        let mut config = valid_config();
        config.database.r#type = "sqlite".to_string();
        assert!(matches!(
            config.database.port(),
            Err(MetaError::UnsupportedDialect(ref t)) if t == "sqlite"
        ));
        assert!(matches!(
            config.database.default_schema(),
            Err(MetaError::UnsupportedDialect(_))
        ));
    }
}

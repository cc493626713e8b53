//! TLS settings shared by the session drivers.

use std::sync::Arc;

use rustls::ClientConfig;
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::info;

use crate::error::{MetaError, Result};

/// SSL modes accepted in configuration.
///
/// Names follow PostgreSQL's `sslmode` parameter. Both TLS modes verify the
/// server certificate against the webpki root store on either driver. The
/// rustls connector used for PostgreSQL always checks the hostname; MySQL
/// checks it only under `verify-full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    /// Plain TCP.
    #[default]
    Disable,
    /// TLS required.
    Require,
    /// TLS with certificate and hostname verification.
    VerifyFull,
}

impl SslMode {
    /// Parse an SSL mode from a string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "disable" | "" => Ok(SslMode::Disable),
            "require" => Ok(SslMode::Require),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(MetaError::Config(format!(
                "Invalid ssl_mode '{}'. Valid values: disable, require, verify-full",
                other
            ))),
        }
    }

    /// Check if this mode requires TLS.
    pub fn requires_tls(&self) -> bool {
        !matches!(self, SslMode::Disable)
    }
}

/// Build a rustls connector for tokio-postgres.
///
/// Returns None if TLS is disabled.
pub fn postgres_tls(ssl_mode: SslMode) -> Result<Option<MakeRustlsConnect>> {
    if !ssl_mode.requires_tls() {
        return Ok(None);
    }

    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| MetaError::Config(format!("building TLS config: {}", e)))?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    info!("ssl_mode={:?}: certificate verification enabled", ssl_mode);
    Ok(Some(MakeRustlsConnect::new(config)))
}

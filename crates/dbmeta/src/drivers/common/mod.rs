//! Utilities shared across session drivers.
//!
//! - [`tls`]: SSL mode parsing and the PostgreSQL rustls connector

pub mod tls;

pub use tls::{postgres_tls, SslMode};

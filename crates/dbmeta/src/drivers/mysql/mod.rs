//! MySQL/MariaDB driver.
//!
//! - [`MysqlProvider`]: catalog queries against `information_schema`
//! - [`MysqlSession`]: SQLx-backed [`Session`](crate::core::Session)
//!
//! # Supported Versions
//!
//! - MySQL 5.7+, 8.0+
//! - MariaDB 10.2+

mod provider;
mod session;

pub use provider::MysqlProvider;
pub use session::MysqlSession;

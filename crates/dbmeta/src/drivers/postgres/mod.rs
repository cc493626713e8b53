//! PostgreSQL driver.
//!
//! - [`PostgresProvider`]: catalog query plus zero-row type probe
//! - [`PostgresSession`]: deadpool-postgres backed [`Session`](crate::core::Session)

mod provider;
mod session;

pub use provider::PostgresProvider;
pub use session::PostgresSession;

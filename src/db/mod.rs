//! Database connection pool and repositories.

pub mod connection;
pub mod driver;
pub mod duty_log;
pub mod hos_status;

pub use connection::{TableCounts, connect, get_table_counts, get_version, test_connection};

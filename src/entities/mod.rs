//! SeaORM entity definitions for the `app` schema.

pub mod prelude;

pub mod drivers;
pub mod duty_logs;
pub mod hos_statuses;

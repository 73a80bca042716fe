pub use super::drivers::Entity as Drivers;
pub use super::duty_logs::Entity as DutyLogs;
pub use super::hos_statuses::Entity as HosStatuses;

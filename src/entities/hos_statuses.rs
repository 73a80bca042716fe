use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Latest computed HOS snapshot per driver.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "app", table_name = "hos_statuses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub driver_id: String,
    pub current_status: String,
    pub available_drive_time: i32,
    pub available_on_duty_time: i32,
    pub used_drive_time: i32,
    pub used_on_duty_time: i32,
    pub cycle_hours: i32,
    pub used_cycle_hours: i32,
    pub restart_available: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub violations: Json,
    pub last_logged_at: Option<DateTimeWithTimeZone>,
    pub compliance_status: String,
    pub computed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::drivers::Entity",
        from = "Column::DriverId",
        to = "super::drivers::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Drivers,
}

impl Related<super::drivers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drivers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

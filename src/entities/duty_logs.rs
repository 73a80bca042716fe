use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One daily log per row; `logs` holds the duty status entries as JSONB.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "app", table_name = "duty_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub driver_id: String,
    pub log_date: Date,
    #[sea_orm(column_type = "JsonBinary")]
    pub logs: Json,
    pub created_at: DateTimeWithTimeZone,
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

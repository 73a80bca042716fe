use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "app", table_name = "drivers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::duty_logs::Entity")]
    DutyLogs,
    #[sea_orm(has_one = "super::hos_statuses::Entity")]
    HosStatuses,
}

impl Related<super::duty_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DutyLogs.def()
    }
}

impl Related<super::hos_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HosStatuses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Display name for reports.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

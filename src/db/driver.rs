//! Driver repository.

use crate::entities::{drivers, prelude::*};
use sea_orm::*;

/// List active drivers of an organization ordered by name.
pub async fn list_active(db: &DatabaseConnection, organization_id: &str) -> Result<Vec<drivers::Model>, DbErr> {
    Drivers::find()
        .filter(drivers::Column::OrganizationId.eq(organization_id))
        .filter(drivers::Column::IsActive.eq(true))
        .order_by_asc(drivers::Column::LastName)
        .order_by_asc(drivers::Column::FirstName)
        .all(db)
        .await
}

/// Get driver by ID.
pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<drivers::Model>, DbErr> {
    Drivers::find_by_id(id.to_owned()).one(db).await
}

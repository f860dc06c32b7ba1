use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "maintenance_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    /// RFC 3339, normalized to UTC so string comparison is chronological.
    pub start: String,

    pub end: String,

    /// May point at a missing row; referential integrity is not enforced here.
    pub equipment_id: Option<i32>,

    pub equipment_name: Option<String>,

    /// "preventive", "corrective" or "inspection"
    #[sea_orm(column_name = "type")]
    pub kind: String,

    /// "scheduled", "in_progress", "completed" or "cancelled"
    pub status: String,

    pub technician: Option<String>,

    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

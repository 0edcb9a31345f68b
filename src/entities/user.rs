use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Roles whose members may be assigned materialized work orders when a
/// field has no explicitly assigned user.
pub const ASSIGNABLE_ROLES: [&str; 2] = ["field_supervisor", "field_officer"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

impl Model {
    /// Display name used as the work order assignee.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

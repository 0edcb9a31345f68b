use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{ActivityCategory, ActivityKind, ActivityPriority};
use crate::schedule::calendar::Schedulable;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::EnumString, strum::AsRefStr, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "overdue")]
    Overdue,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// A persisted, assignable task derived from one template activity and
/// tracked to completion through field reports.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub field_id: i64,
    pub cultivation_season_id: Uuid,
    pub title: String,
    pub activity_kind: ActivityKind,
    pub category: ActivityCategory,
    pub status: WorkOrderStatus,
    pub priority: ActivityPriority,
    /// Display name of the responsible user.
    pub assignee: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Completion percentage, 0-100.
    pub progress: i32,
    pub description: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::field::Entity",
        from = "Column::FieldId",
        to = "super::field::Column::Id"
    )]
    Field,
    #[sea_orm(
        belongs_to = "super::cultivation_season::Entity",
        from = "Column::CultivationSeasonId",
        to = "super::cultivation_season::Column::Id"
    )]
    Season,
}

impl Related<super::field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Field.def()
    }
}

impl Related<super::cultivation_season::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Season.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = self.id {
                self.id = ActiveValue::Set(Uuid::new_v4());
            }
            if let ActiveValue::NotSet = self.created_at {
                self.created_at = ActiveValue::Set(now);
            }
        }

        if let ActiveValue::NotSet = self.status {
            self.status = ActiveValue::Set(WorkOrderStatus::Pending);
        }
        if let ActiveValue::NotSet = self.progress {
            self.progress = ActiveValue::Set(0);
        }

        self.updated_at = ActiveValue::Set(now);

        Ok(self)
    }
}

impl Schedulable for Model {
    fn schedule_id(&self) -> Uuid {
        self.id
    }

    fn schedule_start(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn schedule_end(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

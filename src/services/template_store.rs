//! Template storage collaborator.
//!
//! The engine itself never caches: persistence goes through this trait,
//! injected at construction. The database-backed implementation keeps the
//! activity list as a JSON column; the in-memory one backs tests and
//! single-process deployments.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::saved_template;
use crate::errors::ServiceError;
use crate::models::{ActivityItem, CultivationTemplate};

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn save(&self, template: CultivationTemplate) -> Result<CultivationTemplate, ServiceError>;
    async fn load(&self, id: Uuid) -> Result<Option<CultivationTemplate>, ServiceError>;
    async fn list(&self) -> Result<Vec<CultivationTemplate>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// Process-local store, keyed by template id.
#[derive(Default)]
pub struct InMemoryTemplateStore {
    templates: DashMap<Uuid, CultivationTemplate>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn save(&self, template: CultivationTemplate) -> Result<CultivationTemplate, ServiceError> {
        self.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn load(&self, id: Uuid) -> Result<Option<CultivationTemplate>, ServiceError> {
        Ok(self.templates.get(&id).map(|t| t.value().clone()))
    }

    async fn list(&self) -> Result<Vec<CultivationTemplate>, ServiceError> {
        Ok(self.templates.iter().map(|t| t.value().clone()).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.templates.remove(&id);
        Ok(())
    }
}

/// Database-backed store over the `saved_templates` table.
pub struct DbTemplateStore {
    db: Arc<DbPool>,
}

impl DbTemplateStore {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    fn from_row(row: saved_template::Model) -> Result<CultivationTemplate, ServiceError> {
        let activities: Vec<ActivityItem> = serde_json::from_value(row.activities)
            .map_err(|e| ServiceError::InternalError(format!("corrupt stored template: {e}")))?;
        Ok(CultivationTemplate {
            id: row.id,
            name: row.name,
            description: row.description,
            planting_date: row.planting_date,
            activities,
        })
    }
}

#[async_trait]
impl TemplateStore for DbTemplateStore {
    async fn save(&self, template: CultivationTemplate) -> Result<CultivationTemplate, ServiceError> {
        let activities = serde_json::to_value(&template.activities)
            .map_err(|e| ServiceError::InternalError(format!("unserializable template: {e}")))?;

        let row = saved_template::ActiveModel {
            id: Set(template.id),
            name: Set(template.name.clone()),
            description: Set(template.description.clone()),
            planting_date: Set(template.planting_date),
            activities: Set(activities),
            created_at: Set(Utc::now()),
        };
        row.insert(self.db.as_ref()).await?;
        Ok(template)
    }

    async fn load(&self, id: Uuid) -> Result<Option<CultivationTemplate>, ServiceError> {
        let row = saved_template::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        row.map(Self::from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<CultivationTemplate>, ServiceError> {
        let rows = saved_template::Entity::find()
            .order_by_asc(saved_template::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        rows.into_iter().map(Self::from_row).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        saved_template::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}

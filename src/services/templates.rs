//! Planning-session operations over cultivation templates.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{ActivityItem, CultivationTemplate};
use crate::schedule::template::{self, RecalculateOptions};
use crate::services::template_store::TemplateStore;

#[derive(Clone)]
pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
    event_sender: Option<Arc<EventSender>>,
}

impl TemplateService {
    pub fn new(store: Arc<dyn TemplateStore>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            store,
            event_sender,
        }
    }

    /// The built-in standard plan anchored to `planting_date`.
    #[instrument(skip(self))]
    pub fn standard_plan(
        &self,
        planting_date: NaiveDate,
    ) -> Result<CultivationTemplate, ServiceError> {
        template::standard_rice_plan(planting_date)
    }

    /// Persists the current in-progress activity set as a reusable,
    /// named template.
    #[instrument(skip(self, activities), fields(activities = activities.len()))]
    pub async fn save_as_template(
        &self,
        name: String,
        description: Option<String>,
        planting_date: NaiveDate,
        activities: Vec<ActivityItem>,
    ) -> Result<CultivationTemplate, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "template name is required".into(),
            ));
        }
        if activities.is_empty() {
            return Err(ServiceError::InvalidActivity(
                "cannot save a template with no activities".into(),
            ));
        }

        let template = CultivationTemplate {
            id: Uuid::new_v4(),
            name,
            description,
            planting_date,
            activities,
        };

        let saved = self.store.save(template).await?;
        info!(template_id = %saved.id, name = %saved.name, "template saved");

        if let Some(events) = &self.event_sender {
            events
                .send(Event::TemplateSaved {
                    template_id: saved.id,
                    name: saved.name.clone(),
                })
                .await;
        }

        Ok(saved)
    }

    /// Loads a stored template and re-derives all activity dates for a new
    /// planting date. The stored template is never mutated; the result is
    /// a disjoint copy with fresh activity ids.
    #[instrument(skip(self))]
    pub async fn load_recalculated(
        &self,
        id: Uuid,
        planting_date: NaiveDate,
        options: RecalculateOptions,
    ) -> Result<CultivationTemplate, ServiceError> {
        let stored = self
            .store
            .load(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("template {id}")))?;

        Ok(template::recalculate(&stored, planting_date, options))
    }

    #[instrument(skip(self))]
    pub async fn list_templates(&self) -> Result<Vec<CultivationTemplate>, ServiceError> {
        self.store.list().await
    }

    #[instrument(skip(self))]
    pub async fn delete_template(&self, id: Uuid) -> Result<(), ServiceError> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::template_store::InMemoryTemplateStore;
    use assert_matches::assert_matches;

    fn service() -> TemplateService {
        TemplateService::new(Arc::new(InMemoryTemplateStore::new()), None)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn save_rejects_empty_activity_set() {
        let svc = service();
        let result = svc
            .save_as_template("Dry Season".into(), None, d(2025, 12, 1), vec![])
            .await;
        assert_matches!(result, Err(ServiceError::InvalidActivity(_)));
    }

    #[tokio::test]
    async fn load_unknown_template_is_not_found() {
        let svc = service();
        let result = svc
            .load_recalculated(Uuid::new_v4(), d(2025, 12, 1), RecalculateOptions::default())
            .await;
        assert_matches!(result, Err(ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn loading_leaves_the_stored_template_untouched() {
        let svc = service();
        let plan = svc.standard_plan(d(2025, 12, 1)).unwrap();
        let saved = svc
            .save_as_template(
                "Standard".into(),
                None,
                plan.planting_date,
                plan.activities.clone(),
            )
            .await
            .unwrap();

        let loaded = svc
            .load_recalculated(saved.id, d(2026, 6, 1), RecalculateOptions::default())
            .await
            .unwrap();

        assert_ne!(loaded.id, saved.id);
        assert_eq!(loaded.planting_date, d(2026, 6, 1));

        // Stored copy still anchored to the original date.
        let stored_again = svc
            .load_recalculated(saved.id, d(2025, 12, 1), RecalculateOptions::default())
            .await
            .unwrap();
        assert_eq!(stored_again.activities.len(), plan.activities.len());
    }
}

//! Season lifecycle and work order materialization.
//!
//! Materialization is the one multi-step write in the system: one season
//! plus one work order per activity, inside a single transaction. Either
//! everything commits or nothing persists.

use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::cultivation_season::{self, SeasonStatus};
use crate::entities::user::{self, ASSIGNABLE_ROLES};
use crate::entities::{field, work_order};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::ActivityItem;

#[derive(Debug, Clone)]
pub struct MaterializeRequest {
    pub field_id: i64,
    pub planting_date: NaiveDate,
    pub activities: Vec<ActivityItem>,
    pub created_by: Option<String>,
}

/// Everything persisted by a successful materialization.
#[derive(Debug, Clone)]
pub struct MaterializeOutcome {
    pub season: cultivation_season::Model,
    pub work_orders: Vec<work_order::Model>,
}

#[derive(Clone)]
pub struct SeasonService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl SeasonService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Expands a finalized activity set into one new cultivation season and
    /// one work order per activity.
    ///
    /// The whole sequence runs in a transaction: the active-season
    /// precondition, the season-number derivation, and every insert see a
    /// consistent snapshot, and any failure rolls all of it back. The
    /// unique index on `(field_id, season_number)` rejects the losing side
    /// of two racing sessions.
    #[instrument(skip(self, request), fields(field_id = request.field_id, activities = request.activities.len()))]
    pub async fn materialize(
        &self,
        request: MaterializeRequest,
    ) -> Result<MaterializeOutcome, ServiceError> {
        if request.activities.is_empty() {
            return Err(ServiceError::InvalidActivity(
                "no activities to materialize".into(),
            ));
        }

        let txn = self.db_pool.begin().await?;

        let field = field::Entity::find_by_id(request.field_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("field {}", request.field_id)))?;

        let existing = cultivation_season::Entity::find()
            .filter(cultivation_season::Column::FieldId.eq(field.id))
            .all(&txn)
            .await?;

        if existing.iter().any(|s| s.status == SeasonStatus::Active) {
            return Err(ServiceError::ActiveSeasonConflict { field_id: field.id });
        }

        let assignee = self.resolve_assignee(&txn, &field).await?;

        let season_number = existing.len() as i32 + 1;
        let season_name = format!("MT {} {}", season_number, request.planting_date.year());

        let season = cultivation_season::ActiveModel {
            id: Set(Uuid::new_v4()),
            field_id: Set(field.id),
            season_number: Set(season_number),
            name: Set(season_name.clone()),
            planting_date: Set(request.planting_date),
            status: Set(SeasonStatus::Active),
            notes: Set(Some(format!(
                "Season generated from a plan of {} activities",
                request.activities.len()
            ))),
            created_by: Set(request.created_by.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            error!(error = %e, field_id = field.id, "failed to create season");
            ServiceError::DatabaseError(e)
        })?;

        let mut work_orders = Vec::with_capacity(request.activities.len());
        for (idx, activity) in request.activities.iter().enumerate() {
            let order = work_order::ActiveModel {
                id: Set(Uuid::new_v4()),
                field_id: Set(field.id),
                cultivation_season_id: Set(season.id),
                title: Set(activity.title.clone()),
                activity_kind: Set(activity.kind),
                category: Set(activity.category),
                status: Set(work_order::WorkOrderStatus::Pending),
                priority: Set(activity.priority),
                assignee: Set(assignee.clone()),
                start_date: Set(Some(activity.start_date)),
                end_date: Set(Some(activity.end_date)),
                progress: Set(0),
                description: Set(activity.description.clone()),
                created_by: Set(request.created_by.clone()),
                ..Default::default()
            };

            match order.insert(&txn).await {
                Ok(model) => work_orders.push(model),
                Err(e) => {
                    // Dropping the transaction rolls back the season and
                    // every order inserted so far; report the activity that
                    // failed plus everything that never got attempted.
                    let failed: Vec<String> = request.activities[idx..]
                        .iter()
                        .map(|a| a.title.clone())
                        .collect();
                    error!(
                        error = %e,
                        season = %season_name,
                        failed = failed.len(),
                        "work order creation failed, rolling back season"
                    );
                    drop(txn);
                    return Err(ServiceError::PartialMaterialization { failed });
                }
            }
        }

        txn.commit().await?;

        info!(
            season_id = %season.id,
            season = %season_name,
            work_orders = work_orders.len(),
            "season materialized"
        );

        if let Some(events) = &self.event_sender {
            events
                .send(Event::SeasonCreated {
                    season_id: season.id,
                    field_id: field.id,
                    name: season_name,
                })
                .await;
            events
                .send(Event::WorkOrdersMaterialized {
                    season_id: season.id,
                    field_id: field.id,
                    count: work_orders.len(),
                })
                .await;
        }

        Ok(MaterializeOutcome {
            season,
            work_orders,
        })
    }

    /// Prefers the field's explicitly assigned user; falls back to the
    /// first user (by name) holding an assignable role.
    async fn resolve_assignee<C>(&self, conn: &C, f: &field::Model) -> Result<String, ServiceError>
    where
        C: sea_orm::ConnectionTrait,
    {
        if let Some(user_id) = f.assigned_user_id {
            match user::Entity::find_by_id(user_id).one(conn).await? {
                Some(assigned) => return Ok(assigned.full_name()),
                None => {
                    warn!(
                        field_id = f.id,
                        user_id, "assigned user missing, falling back to role lookup"
                    );
                }
            }
        }

        let eligible = user::Entity::find()
            .filter(user::Column::Role.is_in(ASSIGNABLE_ROLES))
            .order_by_asc(user::Column::FirstName)
            .order_by_asc(user::Column::LastName)
            .all(conn)
            .await?;

        eligible
            .first()
            .map(|u| u.full_name())
            .ok_or(ServiceError::NoAssignee { field_id: f.id })
    }

    #[instrument(skip(self))]
    pub async fn list_seasons(
        &self,
        field_id: Option<i64>,
        status: Option<SeasonStatus>,
    ) -> Result<Vec<cultivation_season::Model>, ServiceError> {
        let mut query = cultivation_season::Entity::find();
        if let Some(field_id) = field_id {
            query = query.filter(cultivation_season::Column::FieldId.eq(field_id));
        }
        if let Some(status) = status {
            query = query.filter(cultivation_season::Column::Status.eq(status));
        }
        let seasons = query
            .order_by_asc(cultivation_season::Column::FieldId)
            .order_by_asc(cultivation_season::Column::SeasonNumber)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(seasons)
    }

    #[instrument(skip(self))]
    pub async fn get_season(
        &self,
        id: Uuid,
    ) -> Result<Option<cultivation_season::Model>, ServiceError> {
        let season = cultivation_season::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?;
        Ok(season)
    }

    /// Marks a season completed, freeing the field for the next one.
    #[instrument(skip(self))]
    pub async fn complete_season(
        &self,
        id: Uuid,
    ) -> Result<cultivation_season::Model, ServiceError> {
        let season = cultivation_season::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("season {id}")))?;

        let mut active: cultivation_season::ActiveModel = season.into();
        active.status = Set(SeasonStatus::Completed);
        let updated = active.update(self.db_pool.as_ref()).await?;

        if let Some(events) = &self.event_sender {
            events
                .send(Event::SeasonCompleted {
                    season_id: updated.id,
                })
                .await;
        }

        Ok(updated)
    }
}

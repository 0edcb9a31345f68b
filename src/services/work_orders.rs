//! Work order queries and lifecycle updates after materialization.
//!
//! Field reports drive status/progress changes; the calendar board view
//! feeds the accordion and calendar UIs.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::work_order::{self, WorkOrderStatus};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::schedule::calendar::{self, ScheduleBoard};

/// Filters accepted by the list and schedule-board queries.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderFilters {
    pub field_id: Option<i64>,
    pub cultivation_season_id: Option<Uuid>,
    pub assignee: Option<String>,
    pub status: Option<WorkOrderStatus>,
    pub start_from: Option<NaiveDate>,
    pub end_until: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct WorkOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl WorkOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    fn build_filters(filters: &WorkOrderFilters) -> Condition {
        let mut condition = Condition::all();
        if let Some(field_id) = filters.field_id {
            condition = condition.add(work_order::Column::FieldId.eq(field_id));
        }
        if let Some(season_id) = filters.cultivation_season_id {
            condition = condition.add(work_order::Column::CultivationSeasonId.eq(season_id));
        }
        if let Some(assignee) = &filters.assignee {
            condition = condition.add(work_order::Column::Assignee.eq(assignee.clone()));
        }
        if let Some(status) = filters.status {
            condition = condition.add(work_order::Column::Status.eq(status));
        }
        if let Some(from) = filters.start_from {
            condition = condition.add(work_order::Column::StartDate.gte(from));
        }
        if let Some(until) = filters.end_until {
            condition = condition.add(work_order::Column::EndDate.lte(until));
        }
        condition
    }

    #[instrument(skip(self))]
    pub async fn list_work_orders(
        &self,
        filters: WorkOrderFilters,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<work_order::Model>, u64), ServiceError> {
        let db = self.db_pool.as_ref();
        let condition = Self::build_filters(&filters);

        let total = work_order::Entity::find()
            .filter(condition.clone())
            .count(db)
            .await?;

        let orders = work_order::Entity::find()
            .filter(condition)
            .order_by_asc(work_order::Column::StartDate)
            .offset(page.saturating_sub(1) * page_size)
            .limit(page_size)
            .all(db)
            .await?;

        Ok((orders, total))
    }

    #[instrument(skip(self))]
    pub async fn get_work_order(
        &self,
        id: Uuid,
    ) -> Result<Option<work_order::Model>, ServiceError> {
        let order = work_order::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?;
        Ok(order)
    }

    /// Sets the status from a field report or approval flow. Completing an
    /// order also drives its progress to 100.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: Uuid,
        status: WorkOrderStatus,
    ) -> Result<work_order::Model, ServiceError> {
        let order = self.require(id).await?;

        let mut active: work_order::ActiveModel = order.into();
        active.status = Set(status);
        if status == WorkOrderStatus::Completed {
            active.progress = Set(100);
        }
        let updated = active.update(self.db_pool.as_ref()).await?;

        if let Some(events) = &self.event_sender {
            events
                .send(Event::WorkOrderStatusChanged {
                    work_order_id: updated.id,
                    status: updated.status.as_ref().to_string(),
                })
                .await;
        }

        Ok(updated)
    }

    /// Records reported progress. Values outside 0-100 are clamped; full
    /// progress completes the order.
    #[instrument(skip(self))]
    pub async fn update_progress(
        &self,
        id: Uuid,
        progress: i32,
    ) -> Result<work_order::Model, ServiceError> {
        let order = self.require(id).await?;
        let progress = progress.clamp(0, 100);

        let mut active: work_order::ActiveModel = order.into();
        active.progress = Set(progress);
        if progress == 100 {
            active.status = Set(WorkOrderStatus::Completed);
        }
        let updated = active.update(self.db_pool.as_ref()).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn cancel_work_order(&self, id: Uuid) -> Result<work_order::Model, ServiceError> {
        self.update_status(id, WorkOrderStatus::Cancelled).await
    }

    /// Flips open work orders whose end date is strictly past into
    /// `overdue`. Returns the number of orders affected.
    #[instrument(skip(self))]
    pub async fn mark_overdue(&self, today: NaiveDate) -> Result<u64, ServiceError> {
        let db = self.db_pool.as_ref();
        let stale = work_order::Entity::find()
            .filter(
                Condition::all()
                    .add(work_order::Column::EndDate.lt(today))
                    .add(
                        work_order::Column::Status
                            .is_in([WorkOrderStatus::Pending, WorkOrderStatus::InProgress]),
                    ),
            )
            .all(db)
            .await?;

        let count = stale.len() as u64;
        for order in stale {
            let mut active: work_order::ActiveModel = order.into();
            active.status = Set(WorkOrderStatus::Overdue);
            active.update(db).await?;
        }

        if count > 0 {
            info!(count, "work orders marked overdue");
        }

        Ok(count)
    }

    /// Day-indexed schedule view for calendar/accordion UIs. `today`
    /// decides the past/upcoming split; handlers pass the current
    /// calendar day.
    #[instrument(skip(self))]
    pub async fn schedule_board(
        &self,
        filters: WorkOrderFilters,
        today: NaiveDate,
    ) -> Result<ScheduleBoard<work_order::Model>, ServiceError> {
        let orders = work_order::Entity::find()
            .filter(Self::build_filters(&filters))
            .order_by_asc(work_order::Column::StartDate)
            .all(self.db_pool.as_ref())
            .await?;

        Ok(calendar::day_buckets(&orders, today))
    }

    async fn require(&self, id: Uuid) -> Result<work_order::Model, ServiceError> {
        work_order::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("work order {id}")))
    }
}

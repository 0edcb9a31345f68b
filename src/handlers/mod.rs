pub mod catalog;
pub mod health;
pub mod seasons;
pub mod templates;
pub mod work_orders;

use std::sync::Arc;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::template_store::DbTemplateStore;
use crate::services::{seasons::SeasonService, templates::TemplateService, work_orders::WorkOrderService};

/// Services layer shared by all HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub templates: Arc<TemplateService>,
    pub seasons: Arc<SeasonService>,
    pub work_orders: Arc<WorkOrderService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        let template_store = Arc::new(DbTemplateStore::new(db_pool.clone()));
        Self {
            templates: Arc::new(TemplateService::new(
                template_store,
                Some(event_sender.clone()),
            )),
            seasons: Arc::new(SeasonService::new(
                db_pool.clone(),
                Some(event_sender.clone()),
            )),
            work_orders: Arc::new(WorkOrderService::new(db_pool, Some(event_sender))),
        }
    }
}

use utoipa::OpenApi;

use crate::catalog::{ActivityCategory, ActivityKind, ActivityParameters, ActivityPriority};
use crate::errors::ErrorResponse;
use crate::handlers;
use crate::models::{ActivityDraft, ActivityItem, CultivationTemplate, HstWindow};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::catalog::list_activities,
        handlers::templates::standard_template,
        handlers::templates::list_templates,
        handlers::templates::save_template,
        handlers::templates::load_template,
        handlers::templates::delete_template,
        handlers::templates::append_activity,
        handlers::seasons::create_season,
        handlers::seasons::list_seasons,
        handlers::seasons::get_season,
        handlers::seasons::complete_season,
        handlers::work_orders::list_work_orders,
        handlers::work_orders::schedule_board,
        handlers::work_orders::get_work_order,
        handlers::work_orders::update_status,
        handlers::work_orders::update_progress,
        handlers::work_orders::cancel_work_order,
        handlers::work_orders::mark_overdue,
        handlers::health::health,
    ),
    components(schemas(
        ActivityKind,
        ActivityCategory,
        ActivityPriority,
        ActivityParameters,
        ActivityDraft,
        ActivityItem,
        HstWindow,
        CultivationTemplate,
        ErrorResponse,
        handlers::catalog::CatalogEntry,
        handlers::templates::SaveTemplateRequest,
        handlers::templates::AppendActivityRequest,
        handlers::seasons::CreateSeasonRequest,
        handlers::work_orders::UpdateStatusRequest,
        handlers::work_orders::UpdateProgressRequest,
    )),
    tags(
        (name = "catalog", description = "Fixed cultivation activity vocabulary"),
        (name = "templates", description = "Cultivation plan templates"),
        (name = "seasons", description = "Season lifecycle and materialization"),
        (name = "work-orders", description = "Materialized work orders"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "AgriOps API",
        description = "Cultivation planning, season management, and work order scheduling",
    )
)]
pub struct ApiDoc;

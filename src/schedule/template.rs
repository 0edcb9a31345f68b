//! Template construction and re-anchoring.
//!
//! A template is an ordered activity set whose dates derive from HST
//! windows around a planting date. Construction resolves parent/child
//! links by name, in declaration order: a parent must be created before
//! any child that references it.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{ActivityCategory, ActivityKind, ActivityPriority};
use crate::errors::ServiceError;
use crate::models::{ActivityDraft, ActivityItem, CultivationTemplate, HstWindow};
use crate::schedule::hst::{date_from_offset, offset_from_date};

/// Policy knobs for [`recalculate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecalculateOptions {
    /// Activities without an HST window keep their absolute dates by
    /// default. When set, they shift by the same delta as the planting
    /// date instead.
    pub shift_non_hst_by_delta: bool,
}

/// One row of the built-in standard plan. Parents are referenced by title
/// and must appear earlier in the table.
struct PlanRow {
    title: &'static str,
    parent: Option<&'static str>,
    hst_min: i32,
    hst_max: i32,
    kind: ActivityKind,
    note: Option<&'static str>,
}

const fn row(
    title: &'static str,
    parent: Option<&'static str>,
    hst_min: i32,
    hst_max: i32,
    kind: ActivityKind,
) -> PlanRow {
    PlanRow {
        title,
        parent,
        hst_min,
        hst_max,
        kind,
        note: None,
    }
}

/// The standard rice cultivation schedule: one season from land
/// preparation (HST -30) through harvest and post-season rehabilitation
/// (HST +130). Offsets follow the agronomy plan the console shipped with.
#[rustfmt::skip]
const STANDARD_RICE_PLAN: &[PlanRow] = &[
    // Land preparation
    row("Land Preparation",                 None,                      -30,  -1, ActivityKind::LandPreparation),
    row("Bund Repair & Drainage Channels",  Some("Land Preparation"),  -30,  -4, ActivityKind::LandPreparation),
    row("Initial Field Irrigation",         Some("Land Preparation"),  -19, -17, ActivityKind::LandPreparation),
    row("First Plowing",                    Some("Land Preparation"),  -15, -13, ActivityKind::LandPreparation),
    row("Field Flooding",                   Some("Land Preparation"),  -14, -12, ActivityKind::LandPreparation),
    row("Soil Conditioning",                Some("Land Preparation"),  -10,  -8, ActivityKind::LandPreparation),
    row("Second Plowing (Leveling)",        Some("Land Preparation"),   -6,  -4, ActivityKind::LandPreparation),
    row("Quality Control Check",            Some("Land Preparation"),   -5,  -3, ActivityKind::LandPreparation),
    row("Water Drawdown",                   Some("Land Preparation"),   -1,  -1, ActivityKind::LandPreparation),
    // Nursery
    row("Nursery",                          None,                      -25,  -1, ActivityKind::Nursery),
    row("Seed Preparation",                 Some("Nursery"),           -25, -23, ActivityKind::Nursery),
    row("Seedbed & Tray Preparation",       Some("Nursery"),           -24, -22, ActivityKind::Nursery),
    row("Seed Broadcasting",                Some("Nursery"),           -22, -21, ActivityKind::Nursery),
    row("Nursery Maintenance",              Some("Nursery"),           -21,  -1, ActivityKind::Nursery),
    row("Quality Control Check (Nursery)",  Some("Nursery"),           -11,  -6, ActivityKind::Nursery),
    row("Seedling Transfer to Field",       Some("Nursery"),            -2,  -1, ActivityKind::Nursery),
    // Transplanting
    row("Transplanting",                    None,                       -2,   5, ActivityKind::Transplanting),
    row("Transplanter Machine Preparation", Some("Transplanting"),      -2,  -1, ActivityKind::Transplanting),
    row("Seed Sowing",                      Some("Transplanting"),       0,   0, ActivityKind::Transplanting),
    row("Quality Control Check (Transplanting)", Some("Transplanting"), 1,   5, ActivityKind::Transplanting),
    // Irrigation management
    row("Irrigation Management",            None,                        1, 100, ActivityKind::IrrigationManagement),
    row("Post-Transplant Irrigation",       Some("Irrigation Management"), 1, 3, ActivityKind::IrrigationManagement),
    row("Water Availability Monitoring",    Some("Irrigation Management"), 7, 90, ActivityKind::IrrigationManagement),
    row("Field Watering",                   Some("Irrigation Management"), 14, 90, ActivityKind::IrrigationManagement),
    row("Pre-Harvest Drying",               Some("Irrigation Management"), 90, 100, ActivityKind::IrrigationManagement),
    // Fertilization
    row("Fertilization",                    None,                        0,  70, ActivityKind::Fertilization),
    row("Base Fertilization",               Some("Fertilization"),       0,  14, ActivityKind::Fertilization),
    PlanRow { title: "Fertilization Result Monitoring", parent: Some("Fertilization"), hst_min: 3, hst_max: 17, kind: ActivityKind::Fertilization, note: Some("Repeat every 7 days") },
    row("First Follow-up Fertilization",    Some("Fertilization"),      21,  25, ActivityKind::Fertilization),
    row("Fertilization Result Monitoring",  Some("Fertilization"),      24,  28, ActivityKind::Fertilization),
    PlanRow { title: "Second Follow-up Fertilization", parent: Some("Fertilization"), hst_min: 31, hst_max: 35, kind: ActivityKind::Fertilization, note: Some("Repeat every 7 days") },
    row("Fertilization Result Monitoring",  Some("Fertilization"),      34,  38, ActivityKind::Fertilization),
    row("Supplemental Fertilization (optional)", Some("Fertilization"), 50,  70, ActivityKind::Fertilization),
    // Weed control
    row("Weed Control",                     None,                       -4,  50, ActivityKind::WeedControl),
    row("Pre-Emergent Herbicide Application", Some("Weed Control"),     -4,  -2, ActivityKind::WeedControl),
    row("Weed Growth Monitoring",           Some("Weed Control"),        7,  50, ActivityKind::WeedControl),
    row("Mechanical Weeding",               Some("Weed Control"),       14,  20, ActivityKind::WeedControl),
    row("Herbicide Application",            Some("Weed Control"),       28,  32, ActivityKind::WeedControl),
    // Pest & disease control
    row("Pest & Disease Control",           None,                        7, 100, ActivityKind::PestDiseaseControl),
    row("Pest Organism Monitoring",         Some("Pest & Disease Control"), 7, 90, ActivityKind::PestDiseaseControl),
    row("Economic Threshold Assessment",    Some("Pest & Disease Control"), 7, 90, ActivityKind::PestDiseaseControl),
    row("Biological / Mechanical Control",  Some("Pest & Disease Control"), 7, 100, ActivityKind::PestDiseaseControl),
    row("Pesticide Application",            Some("Pest & Disease Control"), 14, 100, ActivityKind::PestDiseaseControl),
    // Harvest forecasting
    row("Harvest Forecasting",              None,                       86,  97, ActivityKind::HarvestForecasting),
    row("Crop Cut Sampling",                Some("Harvest Forecasting"), 86,  96, ActivityKind::HarvestForecasting),
    row("Yield Estimation",                 Some("Harvest Forecasting"), 87,  97, ActivityKind::HarvestForecasting),
    // Harvest
    row("Harvest",                          None,                       99, 110, ActivityKind::Harvest),
    row("Combine Harvester Preparation",    Some("Harvest"),            99, 109, ActivityKind::Harvest),
    row("Harvesting",                       Some("Harvest"),           100, 110, ActivityKind::Harvest),
    row("Harvest Yield Accounting",         Some("Harvest"),           100, 110, ActivityKind::Harvest),
    row("Warehouse Transfer of Harvest",    Some("Harvest"),           100, 110, ActivityKind::Harvest),
    // Post-season rehabilitation
    row("Land Rehabilitation",              None,                      105, 126, ActivityKind::LandRehabilitation),
    row("Soil Sampling",                    Some("Land Rehabilitation"), 105, 115, ActivityKind::LandRehabilitation),
    row("Soil Analysis",                    Some("Land Rehabilitation"), 111, 116, ActivityKind::LandRehabilitation),
    row("Soil Amendment Application",       Some("Land Rehabilitation"), 121, 126, ActivityKind::LandRehabilitation),
    // R&D
    row("Practice & Variety Evaluation",    None,                      110, 120, ActivityKind::ResearchDevelopment),
    row("Next Season Recommendations",      None,                      120, 130, ActivityKind::ResearchDevelopment),
];

fn priority_for(category: ActivityCategory) -> ActivityPriority {
    match category {
        ActivityCategory::Harvest | ActivityCategory::PlantingPrep => ActivityPriority::High,
        _ => ActivityPriority::Medium,
    }
}

/// Builds the canonical standard-plan template anchored to `planting_date`.
///
/// Construction walks the plan in declaration order; top-level activities
/// register under their title so later children can resolve them. A child
/// referencing a parent that has not been created yet fails with
/// [`ServiceError::UnresolvedParent`].
pub fn standard_rice_plan(planting_date: NaiveDate) -> Result<CultivationTemplate, ServiceError> {
    let mut activities = Vec::with_capacity(STANDARD_RICE_PLAN.len());
    let mut parents: HashMap<&str, Uuid> = HashMap::new();

    for entry in STANDARD_RICE_PLAN {
        let parent_id = match entry.parent {
            Some(name) => Some(
                *parents
                    .get(name)
                    .ok_or_else(|| ServiceError::UnresolvedParent(name.to_string()))?,
            ),
            None => None,
        };

        let id = Uuid::new_v4();
        let category = entry.kind.category();
        let window = HstWindow::new(entry.hst_min, entry.hst_max);

        activities.push(ActivityItem {
            id,
            kind: entry.kind,
            title: entry.title.to_string(),
            description: entry.note.map(str::to_string),
            hst: Some(window),
            start_date: date_from_offset(planting_date, i64::from(window.min)),
            end_date: date_from_offset(planting_date, i64::from(window.max)),
            parent_id,
            category,
            priority: priority_for(category),
            parameters: None,
        });

        if entry.parent.is_none() {
            parents.insert(entry.title, id);
        }
    }

    debug!(
        activities = activities.len(),
        %planting_date,
        "built standard rice plan"
    );

    Ok(CultivationTemplate {
        id: Uuid::new_v4(),
        name: "Standard Rice Cultivation".to_string(),
        description: Some("Full-season rice schedule with all standard activities".to_string()),
        planting_date,
        activities,
    })
}

/// Produces a disjoint copy of `template` re-anchored to
/// `new_planting_date`.
///
/// Every activity receives a fresh id through a substitution table so
/// parent references stay internally consistent. Activities with an HST
/// window are recomputed from the new planting date; activities without
/// one follow the policy in `options`.
pub fn recalculate(
    template: &CultivationTemplate,
    new_planting_date: NaiveDate,
    options: RecalculateOptions,
) -> CultivationTemplate {
    let id_map: HashMap<Uuid, Uuid> = template
        .activities
        .iter()
        .map(|a| (a.id, Uuid::new_v4()))
        .collect();

    let delta = offset_from_date(template.planting_date, new_planting_date);

    let activities = template
        .activities
        .iter()
        .map(|a| {
            let (start_date, end_date) = match a.hst {
                Some(window) => (
                    date_from_offset(new_planting_date, i64::from(window.min)),
                    date_from_offset(new_planting_date, i64::from(window.max)),
                ),
                None if options.shift_non_hst_by_delta => (
                    date_from_offset(a.start_date, delta),
                    date_from_offset(a.end_date, delta),
                ),
                None => (a.start_date, a.end_date),
            };

            ActivityItem {
                id: id_map[&a.id],
                start_date,
                end_date,
                parent_id: a.parent_id.and_then(|p| id_map.get(&p).copied()),
                ..a.clone()
            }
        })
        .collect();

    CultivationTemplate {
        id: Uuid::new_v4(),
        name: template.name.clone(),
        description: template.description.clone(),
        planting_date: new_planting_date,
        activities,
    }
}

/// Appends a user-authored activity to an in-progress planning session.
/// The draft is validated at this boundary; a parent reference must name
/// an activity already in the session.
pub fn add_custom_activity(
    activities: &mut Vec<ActivityItem>,
    draft: ActivityDraft,
) -> Result<Uuid, ServiceError> {
    if let Some(parent_id) = draft.parent_id {
        if !activities.iter().any(|a| a.id == parent_id) {
            return Err(ServiceError::UnresolvedParent(parent_id.to_string()));
        }
    }

    let activity = draft.into_activity()?;
    let id = activity.id;
    activities.push(activity);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn plan_is_built_in_parent_first_order() {
        let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
        // Every declared parent reference resolved to an earlier activity.
        for (idx, activity) in template.activities.iter().enumerate() {
            if let Some(parent_id) = activity.parent_id {
                let parent_idx = template
                    .activities
                    .iter()
                    .position(|a| a.id == parent_id)
                    .expect("parent exists in the same template");
                assert!(parent_idx < idx, "{} before its parent", activity.title);
            }
        }
    }

    #[test]
    fn harvest_and_prep_are_high_priority() {
        let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
        let harvesting = template
            .activities
            .iter()
            .find(|a| a.title == "Harvesting")
            .unwrap();
        assert_eq!(harvesting.priority, ActivityPriority::High);

        let monitoring = template
            .activities
            .iter()
            .find(|a| a.title == "Weed Growth Monitoring")
            .unwrap();
        assert_eq!(monitoring.priority, ActivityPriority::Medium);
    }

    #[test]
    fn recalculate_drops_dangling_parent_refs() {
        let mut template = standard_rice_plan(d(2025, 12, 1)).unwrap();
        // Orphan one child by deleting its parent from the set.
        let parent_id = template
            .activities
            .iter()
            .find(|a| a.title == "Harvest")
            .unwrap()
            .id;
        template.activities.retain(|a| a.id != parent_id);

        let rebuilt = recalculate(&template, d(2026, 4, 1), RecalculateOptions::default());
        let orphan = rebuilt
            .activities
            .iter()
            .find(|a| a.title == "Harvesting")
            .unwrap();
        assert_eq!(orphan.parent_id, None);
    }
}

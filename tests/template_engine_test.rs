//! Template engine behavior: standard plan construction, recalculation,
//! and custom activity admission.

use agriops_api::catalog::ActivityKind;
use agriops_api::errors::ServiceError;
use agriops_api::models::{ActivityDraft, ActivityItem};
use agriops_api::schedule::hst::date_from_offset;
use agriops_api::schedule::template::{
    add_custom_activity, recalculate, standard_rice_plan, RecalculateOptions,
};
use agriops_api::services::template_store::InMemoryTemplateStore;
use agriops_api::services::templates::TemplateService;
use assert_matches::assert_matches;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn seed_sowing_lands_exactly_on_the_planting_date() {
    let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    let sowing = template
        .activities
        .iter()
        .find(|a| a.title == "Seed Sowing")
        .expect("standard plan contains the planting-day activity");

    let window = sowing.hst.unwrap();
    assert_eq!((window.min, window.max), (0, 0));
    assert!(window.is_single_day());
    assert_eq!(sowing.start_date, d(2025, 12, 1));
    assert_eq!(sowing.end_date, d(2025, 12, 1));
}

#[test]
fn land_preparation_spans_the_month_before_planting() {
    let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    let prep = template
        .activities
        .iter()
        .find(|a| a.title == "Land Preparation")
        .unwrap();

    let window = prep.hst.unwrap();
    assert_eq!((window.min, window.max), (-30, -1));
    assert_eq!(prep.start_date, d(2025, 11, 1));
    assert_eq!(prep.end_date, d(2025, 11, 30));
}

#[test]
fn every_declared_parent_resolves() {
    let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    let ids: Vec<Uuid> = template.activities.iter().map(|a| a.id).collect();

    for activity in &template.activities {
        if let Some(parent_id) = activity.parent_id {
            assert!(
                ids.contains(&parent_id),
                "{} references a parent outside the template",
                activity.title
            );
        }
    }

    // Sub-activities exist for all the major blocks.
    let with_parent = template
        .activities
        .iter()
        .filter(|a| a.parent_id.is_some())
        .count();
    assert!(with_parent > 40, "most plan rows are sub-activities");
}

#[test]
fn plan_carries_the_full_standard_schedule() {
    let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    assert_eq!(template.activities.len(), 57);
    // One entry per catalog kind somewhere in the plan.
    for kind in ActivityKind::all() {
        assert!(
            template.activities.iter().any(|a| a.kind == kind),
            "no activity of kind {kind}"
        );
    }
}

#[test]
fn recalculate_restores_the_hst_invariant_for_every_activity() {
    let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    let new_date = d(2026, 6, 15);
    let rebuilt = recalculate(&template, new_date, RecalculateOptions::default());

    assert_eq!(rebuilt.activities.len(), template.activities.len());
    for activity in &rebuilt.activities {
        let window = activity.hst.expect("standard plan activities carry HST");
        assert_eq!(
            activity.start_date,
            date_from_offset(new_date, i64::from(window.min)),
            "{}",
            activity.title
        );
        assert_eq!(
            activity.end_date,
            date_from_offset(new_date, i64::from(window.max)),
            "{}",
            activity.title
        );
    }
}

#[test]
fn recalculate_remaps_ids_and_keeps_parent_links_consistent() {
    let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    let rebuilt = recalculate(&template, d(2026, 6, 15), RecalculateOptions::default());

    // All ids are fresh.
    let old_ids: Vec<Uuid> = template.activities.iter().map(|a| a.id).collect();
    for activity in &rebuilt.activities {
        assert!(!old_ids.contains(&activity.id));
    }

    // Parent/child pairs survive the substitution: match activities by
    // position and verify the rebuilt child points at the rebuilt parent.
    let old_to_new: HashMap<Uuid, Uuid> = template
        .activities
        .iter()
        .zip(&rebuilt.activities)
        .map(|(old, new)| (old.id, new.id))
        .collect();

    for (old, new) in template.activities.iter().zip(&rebuilt.activities) {
        assert_eq!(
            new.parent_id,
            old.parent_id.map(|p| old_to_new[&p]),
            "{}",
            old.title
        );
    }
}

#[test]
fn non_hst_activities_keep_absolute_dates_by_default() {
    let mut template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    let pinned = ActivityDraft {
        kind: ActivityKind::ResearchDevelopment,
        title: Some("Soil Sensor Installation".into()),
        description: None,
        start_date: Some(d(2025, 12, 20)),
        end_date: Some(d(2025, 12, 22)),
        priority: None,
        parent_id: None,
        parameters: None,
    }
    .into_activity()
    .unwrap();
    template.activities.push(pinned);

    let kept = recalculate(&template, d(2026, 6, 15), RecalculateOptions::default());
    let kept_activity = kept
        .activities
        .iter()
        .find(|a| a.title == "Soil Sensor Installation")
        .unwrap();
    assert_eq!(kept_activity.start_date, d(2025, 12, 20));
    assert_eq!(kept_activity.end_date, d(2025, 12, 22));

    // With the policy flag set, the pinned activity shifts by the same
    // delta as the planting date.
    let shifted = recalculate(
        &template,
        d(2026, 6, 15),
        RecalculateOptions {
            shift_non_hst_by_delta: true,
        },
    );
    let shifted_activity = shifted
        .activities
        .iter()
        .find(|a| a.title == "Soil Sensor Installation")
        .unwrap();
    let delta = d(2026, 6, 15).signed_duration_since(d(2025, 12, 1));
    assert_eq!(shifted_activity.start_date, d(2025, 12, 20) + delta);
    assert_eq!(shifted_activity.end_date, d(2025, 12, 22) + delta);
}

#[test]
fn zero_duration_windows_collapse_to_one_day() {
    let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    for activity in template
        .activities
        .iter()
        .filter(|a| a.hst.is_some_and(|w| w.is_single_day()))
    {
        assert_eq!(activity.start_date, activity.end_date, "{}", activity.title);
    }

    // And it survives recalculation.
    let rebuilt = recalculate(&template, d(2026, 1, 10), RecalculateOptions::default());
    let drawdown = rebuilt
        .activities
        .iter()
        .find(|a| a.title == "Water Drawdown")
        .unwrap();
    assert_eq!(drawdown.start_date, d(2026, 1, 9));
    assert_eq!(drawdown.end_date, d(2026, 1, 9));
}

#[test]
fn custom_activity_with_unknown_parent_is_rejected() {
    let mut activities: Vec<ActivityItem> = Vec::new();
    let draft = ActivityDraft {
        kind: ActivityKind::WeedControl,
        title: None,
        description: None,
        start_date: Some(d(2025, 12, 5)),
        end_date: Some(d(2025, 12, 6)),
        priority: None,
        parent_id: Some(Uuid::new_v4()),
        parameters: None,
    };
    assert_matches!(
        add_custom_activity(&mut activities, draft),
        Err(ServiceError::UnresolvedParent(_))
    );
    assert!(activities.is_empty());
}

#[test]
fn custom_activity_appends_and_preserves_order() {
    let template = standard_rice_plan(d(2025, 12, 1)).unwrap();
    let mut activities = template.activities;
    let before = activities.len();

    let id = add_custom_activity(
        &mut activities,
        ActivityDraft {
            kind: ActivityKind::IrrigationManagement,
            title: Some("Pump Maintenance".into()),
            description: None,
            start_date: Some(d(2025, 12, 9)),
            end_date: None,
            priority: None,
            parent_id: None,
            parameters: None,
        },
    )
    .unwrap();

    assert_eq!(activities.len(), before + 1);
    assert_eq!(activities.last().unwrap().id, id);
}

#[tokio::test]
async fn loaded_template_is_a_disjoint_copy() {
    let service = TemplateService::new(Arc::new(InMemoryTemplateStore::new()), None);
    let plan = service.standard_plan(d(2025, 12, 1)).unwrap();

    let saved = service
        .save_as_template(
            "Wet Season Standard".into(),
            Some("Authored against 2025-12-01".into()),
            plan.planting_date,
            plan.activities,
        )
        .await
        .unwrap();

    let loaded = service
        .load_recalculated(saved.id, d(2026, 4, 1), RecalculateOptions::default())
        .await
        .unwrap();

    assert_ne!(loaded.id, saved.id);
    for (stored, fresh) in saved.activities.iter().zip(&loaded.activities) {
        assert_ne!(stored.id, fresh.id);
        assert_eq!(stored.title, fresh.title);
    }
}

//! In-memory planning types: the activity list a planning session edits
//! before it is materialized into persisted work orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::catalog::{ActivityCategory, ActivityKind, ActivityParameters, ActivityPriority};
use crate::errors::ServiceError;

/// Relative scheduling window in days after planting. Negative values fall
/// before the planting date. `min` and `max` always travel together; an
/// activity either has a full window or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HstWindow {
    pub min: i32,
    pub max: i32,
}

impl HstWindow {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// A window with `min == max` is a single-day activity.
    pub fn is_single_day(&self) -> bool {
        self.min == self.max
    }
}

/// One schedulable entry in a cultivation template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityItem {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Days-after-planting window; absent for activities pinned to
    /// absolute dates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hst: Option<HstWindow>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Same-template parent activity, if this is a sub-activity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub category: ActivityCategory,
    pub priority: ActivityPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ActivityParameters>,
}

/// A named, reusable activity set anchored to the planting date it was
/// authored against. Stored templates are immutable; loading one into a new
/// planning session always produces a recalculated, disjoint copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CultivationTemplate {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub planting_date: NaiveDate,
    pub activities: Vec<ActivityItem>,
}

/// A user-authored activity before it is admitted into a planning session.
/// Drafts carry explicit dates rather than an HST window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityDraft {
    pub kind: ActivityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<ActivityPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ActivityParameters>,
}

impl ActivityDraft {
    /// Validates and converts the draft into a full activity. An activity
    /// with neither an HST window nor explicit dates is rejected here, at
    /// the boundary, not silently accepted.
    pub fn into_activity(self) -> Result<ActivityItem, ServiceError> {
        let (start_date, end_date) = match (self.start_date, self.end_date) {
            (Some(s), Some(e)) => (s, e),
            (Some(d), None) | (None, Some(d)) => (d, d),
            (None, None) => {
                return Err(ServiceError::InvalidActivity(
                    "activity requires a start and end date".into(),
                ))
            }
        };

        if start_date > end_date {
            return Err(ServiceError::InvalidActivity(format!(
                "start date {start_date} is after end date {end_date}"
            )));
        }

        if let Some(params) = &self.parameters {
            if !params.matches_kind(self.kind) {
                return Err(ServiceError::InvalidActivity(format!(
                    "parameters do not match activity kind {}",
                    self.kind
                )));
            }
        }

        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => self.kind.display_name().to_string(),
        };

        Ok(ActivityItem {
            id: Uuid::new_v4(),
            kind: self.kind,
            title,
            description: self.description,
            hst: None,
            start_date,
            end_date,
            parent_id: self.parent_id,
            category: self.kind.category(),
            priority: self.priority.unwrap_or(ActivityPriority::Medium),
            parameters: self.parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn draft(kind: ActivityKind) -> ActivityDraft {
        ActivityDraft {
            kind,
            title: Some("Drone survey".into()),
            description: None,
            start_date: Some(NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2025, 12, 12).unwrap()),
            priority: None,
            parent_id: None,
            parameters: None,
        }
    }

    #[test]
    fn draft_without_any_date_is_rejected() {
        let mut d = draft(ActivityKind::ResearchDevelopment);
        d.start_date = None;
        d.end_date = None;
        assert_matches!(d.into_activity(), Err(ServiceError::InvalidActivity(_)));
    }

    #[test]
    fn draft_with_inverted_dates_is_rejected() {
        let mut d = draft(ActivityKind::WeedControl);
        d.start_date = Some(NaiveDate::from_ymd_opt(2025, 12, 20).unwrap());
        assert_matches!(d.into_activity(), Err(ServiceError::InvalidActivity(_)));
    }

    #[test]
    fn draft_with_single_date_becomes_single_day() {
        let mut d = draft(ActivityKind::WeedControl);
        d.end_date = None;
        let activity = d.into_activity().unwrap();
        assert_eq!(activity.start_date, activity.end_date);
    }

    #[test]
    fn draft_inherits_category_and_default_priority() {
        let activity = draft(ActivityKind::ResearchDevelopment).into_activity().unwrap();
        assert_eq!(activity.category, ActivityCategory::ResearchDevelopment);
        assert_eq!(activity.priority, ActivityPriority::Medium);
        assert!(activity.hst.is_none());
    }

    #[test]
    fn mismatched_parameters_are_rejected() {
        let mut d = draft(ActivityKind::WeedControl);
        d.parameters = Some(ActivityParameters::LandPreparation {
            area_hectares: rust_decimal::Decimal::new(15, 1),
        });
        assert_matches!(d.into_activity(), Err(ServiceError::InvalidActivity(_)));
    }
}

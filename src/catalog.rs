//! The fixed vocabulary of cultivation activities.
//!
//! This is static reference data shipped with the service, not per-tenant
//! state: the template engine validates activity kinds against it and the
//! planning UI lists it for selection. There are no mutation operations.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the eleven cultivation operations the console schedules.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    #[sea_orm(string_value = "land_preparation")]
    LandPreparation,
    #[sea_orm(string_value = "nursery")]
    Nursery,
    #[sea_orm(string_value = "transplanting")]
    Transplanting,
    #[sea_orm(string_value = "irrigation_management")]
    IrrigationManagement,
    #[sea_orm(string_value = "fertilization")]
    Fertilization,
    #[sea_orm(string_value = "weed_control")]
    WeedControl,
    #[sea_orm(string_value = "pest_disease_control")]
    PestDiseaseControl,
    #[sea_orm(string_value = "harvest_forecasting")]
    HarvestForecasting,
    #[sea_orm(string_value = "harvest")]
    Harvest,
    #[sea_orm(string_value = "land_rehabilitation")]
    LandRehabilitation,
    #[sea_orm(string_value = "rnd")]
    ResearchDevelopment,
}

/// Display grouping for an activity kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    #[sea_orm(string_value = "planting_prep")]
    PlantingPrep,
    #[sea_orm(string_value = "crop_care")]
    CropCare,
    #[sea_orm(string_value = "harvest")]
    Harvest,
    #[sea_orm(string_value = "rnd")]
    ResearchDevelopment,
}

/// Work order / activity priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "snake_case")]
pub enum ActivityPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

impl ActivityKind {
    /// Every kind maps to exactly one display category.
    pub fn category(&self) -> ActivityCategory {
        match self {
            Self::LandPreparation
            | Self::Nursery
            | Self::Transplanting
            | Self::LandRehabilitation => ActivityCategory::PlantingPrep,
            Self::IrrigationManagement
            | Self::Fertilization
            | Self::WeedControl
            | Self::PestDiseaseControl => ActivityCategory::CropCare,
            Self::HarvestForecasting | Self::Harvest => ActivityCategory::Harvest,
            Self::ResearchDevelopment => ActivityCategory::ResearchDevelopment,
        }
    }

    /// Human-readable label for catalog listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LandPreparation => "Land Preparation",
            Self::Nursery => "Nursery",
            Self::Transplanting => "Transplanting",
            Self::IrrigationManagement => "Irrigation Management",
            Self::Fertilization => "Fertilization",
            Self::WeedControl => "Weed Control",
            Self::PestDiseaseControl => "Pest & Disease Control",
            Self::HarvestForecasting => "Harvest Forecasting",
            Self::Harvest => "Harvest",
            Self::LandRehabilitation => "Land Rehabilitation",
            Self::ResearchDevelopment => "R&D",
        }
    }

    /// All catalog entries, in canonical order.
    pub fn all() -> Vec<ActivityKind> {
        use sea_orm::Iterable;
        ActivityKind::iter().collect()
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Kind-specific parameters, modeled as a tagged union so each kind's valid
/// shape is statically checkable instead of an open key-value bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityParameters {
    /// Harvest and harvest forecasting targets.
    Harvest {
        expected_quantity_tons: Decimal,
        quality_grade: Option<String>,
    },
    /// Fertilizer application details.
    Fertilization {
        fertilizer_type: String,
        amount_kg: Decimal,
    },
    /// Area worked during land preparation.
    LandPreparation { area_hectares: Decimal },
}

impl ActivityParameters {
    /// Whether this parameter shape is valid for the given activity kind.
    pub fn matches_kind(&self, kind: ActivityKind) -> bool {
        matches!(
            (self, kind),
            (
                ActivityParameters::Harvest { .. },
                ActivityKind::Harvest | ActivityKind::HarvestForecasting
            ) | (
                ActivityParameters::Fertilization { .. },
                ActivityKind::Fertilization
            ) | (
                ActivityParameters::LandPreparation { .. },
                ActivityKind::LandPreparation
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn catalog_has_eleven_kinds() {
        assert_eq!(ActivityKind::all().len(), 11);
    }

    #[test]
    fn every_kind_has_one_category() {
        for kind in ActivityKind::all() {
            // category() is total; the match below mirrors the original
            // console's grouping.
            let category = kind.category();
            match kind {
                ActivityKind::Harvest | ActivityKind::HarvestForecasting => {
                    assert_eq!(category, ActivityCategory::Harvest)
                }
                ActivityKind::ResearchDevelopment => {
                    assert_eq!(category, ActivityCategory::ResearchDevelopment)
                }
                _ => assert!(matches!(
                    category,
                    ActivityCategory::PlantingPrep | ActivityCategory::CropCare
                )),
            }
        }
    }

    #[test]
    fn parameters_reject_mismatched_kind() {
        let params = ActivityParameters::Fertilization {
            fertilizer_type: "urea".into(),
            amount_kg: Decimal::new(250, 0),
        };
        assert!(params.matches_kind(ActivityKind::Fertilization));
        assert!(!params.matches_kind(ActivityKind::Harvest));
    }

    #[test]
    fn harvest_parameters_cover_forecasting() {
        let params = ActivityParameters::Harvest {
            expected_quantity_tons: Decimal::new(65, 1),
            quality_grade: Some("A".into()),
        };
        assert!(params.matches_kind(ActivityKind::HarvestForecasting));
    }
}

//! Plan selection and context keys.
//!
//! A user's completion history is partitioned by *context*: one bucket
//! per plan variant they have ever used. For catalog plans the context
//! key is the plan id itself; for the custom plan it is derived from
//! the chosen book, so switching the custom plan from one book to
//! another switches buckets instead of mixing histories.

use serde::{Deserialize, Serialize};

pub const WHOLE_BIBLE_PLAN_ID: &str = "whole_bible";
pub const CUSTOM_PLAN_ID: &str = "custom";

/// Configuration of the custom single-book plan: which book, and over
/// how many days it should be spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPlanConfig {
    pub book_name: String,
    pub days: u32,
}

/// The user's active reading plan.
///
/// Modeled as a tagged enum rather than an id plus an optional config,
/// so "custom mode" cannot be half-selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlanSelectionRepr", into = "PlanSelectionRepr")]
pub enum PlanSelection {
    WholeBible,
    /// One of the fixed catalog plans (gospels, pentateuch, ...).
    Fixed(String),
    Custom(CustomPlanConfig),
}

impl PlanSelection {
    /// Rebuild a selection from its stored parts (remote profile row or
    /// a serialized snapshot). A "custom" id without a config falls
    /// back to the id itself, matching how the data was written.
    pub fn from_parts(plan_id: &str, custom: Option<CustomPlanConfig>) -> Self {
        match (plan_id, custom) {
            (CUSTOM_PLAN_ID, Some(config)) => PlanSelection::Custom(config),
            (WHOLE_BIBLE_PLAN_ID, _) | ("", _) => PlanSelection::WholeBible,
            (id, _) => PlanSelection::Fixed(id.to_string()),
        }
    }

    pub fn plan_id(&self) -> &str {
        match self {
            PlanSelection::WholeBible => WHOLE_BIBLE_PLAN_ID,
            PlanSelection::Fixed(id) => id,
            PlanSelection::Custom(_) => CUSTOM_PLAN_ID,
        }
    }

    pub fn custom_config(&self) -> Option<&CustomPlanConfig> {
        match self {
            PlanSelection::Custom(config) => Some(config),
            _ => None,
        }
    }

    /// The partition key for this selection's completion bucket,
    /// e.g. `whole_bible`, `gospels`, `custom_Ester`.
    pub fn context_key(&self) -> String {
        match self {
            PlanSelection::Custom(config) => format!("custom_{}", config.book_name),
            other => other.plan_id().to_string(),
        }
    }
}

impl Default for PlanSelection {
    fn default() -> Self {
        PlanSelection::WholeBible
    }
}

/// Wire/storage form: the plain id plus an optional custom config, as
/// written by earlier versions of the app.
#[derive(Serialize, Deserialize)]
struct PlanSelectionRepr {
    #[serde(default)]
    selected_plan_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_plan_config: Option<CustomPlanConfig>,
}

impl From<PlanSelectionRepr> for PlanSelection {
    fn from(repr: PlanSelectionRepr) -> Self {
        PlanSelection::from_parts(&repr.selected_plan_id, repr.custom_plan_config)
    }
}

impl From<PlanSelection> for PlanSelectionRepr {
    fn from(selection: PlanSelection) -> Self {
        PlanSelectionRepr {
            selected_plan_id: selection.plan_id().to_string(),
            custom_plan_config: selection.custom_config().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_key_for_catalog_plans_is_the_plan_id() {
        assert_eq!(PlanSelection::WholeBible.context_key(), "whole_bible");
        assert_eq!(
            PlanSelection::Fixed("gospels".to_string()).context_key(),
            "gospels"
        );
    }

    #[test]
    fn context_key_for_custom_plan_includes_the_book() {
        let selection = PlanSelection::Custom(CustomPlanConfig {
            book_name: "Ester".to_string(),
            days: 10,
        });
        assert_eq!(selection.context_key(), "custom_Ester");
    }

    #[test]
    fn custom_id_without_config_degrades_to_fixed() {
        let selection = PlanSelection::from_parts("custom", None);
        assert_eq!(selection, PlanSelection::Fixed("custom".to_string()));
        assert_eq!(selection.context_key(), "custom");
    }

    #[test]
    fn selection_roundtrips_through_stored_form() {
        let selection = PlanSelection::Custom(CustomPlanConfig {
            book_name: "Rute".to_string(),
            days: 4,
        });
        let json = serde_json::to_string(&selection).unwrap();
        let back: PlanSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);

        let json = serde_json::to_string(&PlanSelection::WholeBible).unwrap();
        let back: PlanSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlanSelection::WholeBible);
    }
}

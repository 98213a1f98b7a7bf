use crate::shared::serde_ext::non_empty_string;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

pub mod error;
pub mod load;
pub mod paths;
pub mod target;

pub use crate::shared::ids::{PopupKey, StepId, START_STEP_ID};
pub use error::RulesError;
pub use load::{parse_document, read_document, DocumentFormat};
pub use paths::{DEFAULT_RULES_PATH, DEFAULT_SCHEMA_PATH};
pub use target::{is_sentinel, Target, BACK_SENTINEL, RESET_SENTINEL};

pub const BUNDLED_RULES_JSON: &str = include_str!("../../data/rules.v1.json");

const NO_LINK_PLACEHOLDER: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMeta {
    pub version: String,
    pub last_reviewed: NaiveDate,
    pub approved_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PopupContent {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StepButton {
    #[serde(deserialize_with = "non_empty_string")]
    pub label: String,
    pub next: Target,
}

impl StepButton {
    pub fn new(label: impl Into<String>, next: Target) -> Self {
        Self {
            label: label.into(),
            next,
        }
    }

    pub fn back() -> Self {
        Self::new("Back", Target::Back)
    }

    pub fn is_back(&self) -> bool {
        self.next == Target::Back
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Step {
    pub id: StepId,
    pub title: String,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub buttons: Vec<StepButton>,
}

impl Step {
    pub fn is_start(&self) -> bool {
        self.id.is_start()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResources {
    #[serde(default)]
    pub step_external: BTreeMap<StepId, String>,
    #[serde(default)]
    pub popups: BTreeMap<PopupKey, PopupContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rules {
    pub meta: RuleMeta,
    #[serde(default)]
    pub resources: RuleResources,
    pub steps: Vec<Step>,
}

impl Rules {
    pub fn from_path(path: &Path) -> Result<Self, RulesError> {
        let value = read_document(path)?;
        let rules = Self::from_value(value)?;
        tracing::info!(
            path = %path.display(),
            version = %rules.meta.version,
            steps = rules.steps.len(),
            "loaded rules document"
        );
        Ok(rules)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RulesError> {
        let value = parse_document(raw, DocumentFormat::Json, "<inline>")?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_value(value).map_err(RulesError::Shape)?;
        rules.check_step_ids()?;
        Ok(rules)
    }

    pub fn bundled() -> Result<Self, RulesError> {
        Self::from_json_str(BUNDLED_RULES_JSON)
    }

    fn check_step_ids(&self) -> Result<(), RulesError> {
        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id.as_str()) {
                return Err(RulesError::DuplicateStep {
                    step_id: step.id.to_string(),
                });
            }
        }
        if !seen.contains(START_STEP_ID) {
            return Err(RulesError::MissingStart);
        }
        Ok(())
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id.as_str() == id)
    }

    pub fn start_step(&self) -> Option<&Step> {
        self.step(START_STEP_ID)
    }

    pub fn guidance_url(&self, step_id: &str) -> Option<&str> {
        self.resources
            .step_external
            .get(step_id)
            .map(String::as_str)
            .filter(|url| is_usable_link(url))
    }

    pub fn popup(&self, key: &str) -> Option<&PopupContent> {
        self.resources.popups.get(key)
    }
}

pub fn is_usable_link(url: &str) -> bool {
    let trimmed = url.trim();
    !trimmed.is_empty() && url != NO_LINK_PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(steps: &str) -> String {
        format!(
            r##"{{
  "meta": {{"version": "1.0.0", "lastReviewed": "2024-05-01", "approvedBy": "Ops"}},
  "resources": {{"stepExternal": {{"start": "https://example.org/help", "s2": "#", "s3": "   "}}, "popups": {{}}}},
  "steps": {steps}
}}"##
        )
    }

    #[test]
    fn guidance_url_skips_placeholder_and_blank_links() {
        let rules = Rules::from_json_str(&minimal(
            r#"[{"id": "start", "title": "Start", "instruction": "Go"},
                {"id": "s2", "title": "Two", "instruction": "Go"},
                {"id": "s3", "title": "Three", "instruction": "Go"}]"#,
        ))
        .expect("parse rules");

        assert_eq!(rules.guidance_url("start"), Some("https://example.org/help"));
        assert_eq!(rules.guidance_url("s2"), None);
        assert_eq!(rules.guidance_url("s3"), None);
        assert_eq!(rules.guidance_url("missing"), None);
    }

    #[test]
    fn duplicate_step_ids_fail_to_load() {
        let err = Rules::from_json_str(&minimal(
            r#"[{"id": "start", "title": "A", "instruction": "x"},
                {"id": "start", "title": "B", "instruction": "y"}]"#,
        ))
        .expect_err("duplicate ids");
        assert!(matches!(err, RulesError::DuplicateStep { step_id } if step_id == "start"));
    }

    #[test]
    fn missing_start_fails_to_load() {
        let err = Rules::from_json_str(&minimal(
            r#"[{"id": "intro", "title": "A", "instruction": "x"}]"#,
        ))
        .expect_err("no start");
        assert!(matches!(err, RulesError::MissingStart));
    }

    #[test]
    fn empty_button_label_is_a_shape_error() {
        let err = Rules::from_json_str(&minimal(
            r#"[{"id": "start", "title": "A", "instruction": "x",
                 "buttons": [{"label": "  ", "next": "start"}]}]"#,
        ))
        .expect_err("empty label");
        assert!(matches!(err, RulesError::Shape(_)));
    }
}

use crate::rules::{parse_document, DocumentFormat, RulesError};
use serde_json::Value;

pub mod graph;
pub mod report;
pub mod schema;

pub use graph::check_graph;
pub use report::{GraphIssue, SchemaViolation, ValidationReport, ValidationStage};
pub use schema::check_schema;

pub const BUNDLED_SCHEMA_JSON: &str = include_str!("../../data/rules.schema.json");

pub fn bundled_schema() -> Result<Value, RulesError> {
    parse_document(BUNDLED_SCHEMA_JSON, DocumentFormat::Json, "<bundled schema>")
}

pub fn validate(document: &Value, schema: &Value) -> Result<(), ValidationReport> {
    let report = ValidationReport {
        schema: check_schema(document, schema),
        graph: check_graph(document),
    };
    tracing::debug!(
        schema_violations = report.schema.len(),
        graph_issues = report.graph.len(),
        "validated rules document"
    );
    if report.is_clean() {
        Ok(())
    } else {
        Err(report)
    }
}

use super::CliError;
use crate::rules::{read_document, DEFAULT_RULES_PATH, DEFAULT_SCHEMA_PATH};
use crate::validation::{validate, ValidationReport};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "validate-rules",
    about = "Check a guidance rules document against its schema and step graph"
)]
pub struct ValidateArgs {
    #[arg(long, default_value = DEFAULT_RULES_PATH)]
    pub rules: PathBuf,
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn success_line(rules_path: &Path) -> String {
    format!("{} validation passed", display_name(rules_path))
}

pub fn report_lines(rules_path: &Path, report: &ValidationReport) -> Vec<String> {
    let name = display_name(rules_path);
    let mut lines = Vec::new();
    if !report.schema.is_empty() {
        lines.push(format!("{name} failed schema validation"));
        lines.extend(
            report
                .schema
                .iter()
                .map(|violation| format!("  {violation}")),
        );
    }
    if !report.graph.is_empty() {
        lines.push(format!("{name} has invalid step transitions:"));
        lines.extend(report.graph.iter().map(|issue| format!("  {issue}")));
    }
    lines
}

pub fn run_validate(args: &ValidateArgs) -> Result<String, CliError> {
    let document = read_document(&args.rules)?;
    let schema = read_document(&args.schema)?;
    tracing::info!(
        rules = %args.rules.display(),
        schema = %args.schema.display(),
        "validating rules document"
    );
    match validate(&document, &schema) {
        Ok(()) => Ok(success_line(&args.rules)),
        Err(report) => {
            for stage in report.failed_stages() {
                tracing::warn!(%stage, "validation stage failed");
            }
            Err(CliError::ValidationFailed {
                lines: report_lines(&args.rules, &report),
            })
        }
    }
}

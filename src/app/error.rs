use crate::navigation::NavigationError;
use crate::rules::RulesError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("{0}")]
    Script(String),
    #[error("{}", .lines.join("\n"))]
    ValidationFailed { lines: Vec<String> },
}

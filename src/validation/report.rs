use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    Schema,
    Graph,
}

impl ValidationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Graph => "graph",
        }
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    DanglingTarget { from: String, to: String },
    UnknownSentinel { from: String, to: String },
    DanglingPopup { from: String, key: String },
    DuplicateStep { id: String },
    MissingStart,
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingTarget { from, to } => write!(f, "{from} -> {to}"),
            Self::UnknownSentinel { from, to } => {
                write!(f, "{from} -> {to} (unknown control target)")
            }
            Self::DanglingPopup { from, key } => write!(f, "{from} -> popup `{key}` (not declared)"),
            Self::DuplicateStep { id } => write!(f, "step `{id}` is declared more than once"),
            Self::MissingStart => f.write_str("no step has id `start`"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error(
    "rules document failed validation: {} schema violation(s), {} graph issue(s)",
    .schema.len(),
    .graph.len()
)]
pub struct ValidationReport {
    pub schema: Vec<SchemaViolation>,
    pub graph: Vec<GraphIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.schema.is_empty() && self.graph.is_empty()
    }

    pub fn failed_stages(&self) -> Vec<ValidationStage> {
        let mut stages = Vec::new();
        if !self.schema.is_empty() {
            stages.push(ValidationStage::Schema);
        }
        if !self.graph.is_empty() {
            stages.push(ValidationStage::Graph);
        }
        stages
    }

    pub fn dangling_targets(&self) -> Vec<(&str, &str)> {
        self.graph
            .iter()
            .filter_map(|issue| match issue {
                GraphIssue::DanglingTarget { from, to } => Some((from.as_str(), to.as_str())),
                _ => None,
            })
            .collect()
    }
}

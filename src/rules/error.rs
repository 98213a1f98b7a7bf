#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    ParseYaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("rules document has an invalid shape: {0}")]
    Shape(#[source] serde_json::Error),
    #[error("rules document has no `start` step")]
    MissingStart,
    #[error("rules document declares step `{step_id}` more than once")]
    DuplicateStep { step_id: String },
}

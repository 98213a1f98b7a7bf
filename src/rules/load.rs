use super::RulesError;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

pub fn read_document(path: &Path) -> Result<Value, RulesError> {
    let raw = fs::read_to_string(path).map_err(|source| RulesError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&raw, DocumentFormat::from_path(path), &path.display().to_string())
}

pub fn parse_document(raw: &str, format: DocumentFormat, origin: &str) -> Result<Value, RulesError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(raw).map_err(|source| RulesError::ParseJson {
            path: origin.to_string(),
            source,
        }),
        DocumentFormat::Yaml => serde_yaml::from_str(raw).map_err(|source| RulesError::ParseYaml {
            path: origin.to_string(),
            source,
        }),
    }
}

use crate::rules::StepId;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const EMPTY_AUDIT_PLACEHOLDER: &str = "Started · Session initialised";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub step_id: String,
    pub title: String,
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn display_line(&self) -> String {
        format!("{} – {}", self.title, self.label)
    }
}

pub fn audit_display_lines(audit: &[AuditEntry]) -> Vec<String> {
    if audit.is_empty() {
        return vec![EMPTY_AUDIT_PLACEHOLDER.to_string()];
    }
    audit.iter().map(AuditEntry::display_line).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    current: StepId,
    history: Vec<StepId>,
    audit: Vec<AuditEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            current: StepId::start(),
            history: Vec::new(),
            audit: Vec::new(),
        }
    }

    pub fn current_id(&self) -> &StepId {
        &self.current
    }

    pub fn history(&self) -> &[StepId] {
        &self.history
    }

    pub fn audit(&self) -> &[AuditEntry] {
        &self.audit
    }

    pub fn is_initial(&self) -> bool {
        self.current.is_start() && self.history.is_empty() && self.audit.is_empty()
    }

    pub(crate) fn record(&mut self, title: &str, label: &str) -> AuditEntry {
        let entry = AuditEntry {
            step_id: self.current.to_string(),
            title: title.to_string(),
            label: label.to_string(),
            timestamp: Utc::now(),
        };
        self.audit.push(entry.clone());
        entry
    }

    pub(crate) fn advance(&mut self, next: StepId) -> StepId {
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous.clone());
        previous
    }

    pub(crate) fn retreat(&mut self) -> StepId {
        let previous = self.history.pop().unwrap_or_else(StepId::start);
        std::mem::replace(&mut self.current, previous)
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_audit_renders_placeholder() {
        assert_eq!(audit_display_lines(&[]), vec![EMPTY_AUDIT_PLACEHOLDER]);
    }

    #[test]
    fn retreat_on_empty_history_lands_on_start() {
        let mut session = Session::new();
        let left = session.retreat();
        assert!(left.is_start());
        assert!(session.current_id().is_start());
        assert!(session.history().is_empty());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("rules document has no `start` step")]
    MissingStart,
    #[error("step `{step_id}` has no guidance link")]
    NoGuidanceLink { step_id: String },
}

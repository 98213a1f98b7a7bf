pub mod engine;
pub mod error;
pub mod session;

pub use engine::{NavEffect, NavigationEngine, StepView, Transition};
pub use error::NavigationError;
pub use session::{audit_display_lines, AuditEntry, Session, EMPTY_AUDIT_PLACEHOLDER};

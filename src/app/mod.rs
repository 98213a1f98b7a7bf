pub mod error;
pub mod validate;
pub mod walk;

pub use error::CliError;
pub use validate::{run_validate, ValidateArgs};
pub use walk::{run_walk, Walk, WalkArgs};

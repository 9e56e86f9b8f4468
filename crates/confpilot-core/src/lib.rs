pub mod app;
pub mod config;
pub mod error;
pub mod patch;
pub mod prompt;
pub mod validate;

pub use app::{AppName, KNOWN_APPS};
pub use config::{CoordinatorConfig, OracleConfig, SourceConfig};
pub use error::{PatchError, ValidationError};
pub use patch::{PatchInstruction, coerce_value};
pub use validate::validate_document;

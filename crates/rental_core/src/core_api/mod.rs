mod engine;
mod error;
mod types;

pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode};
pub use types::{DEFAULT_DELIMITER, MalformedPolicy, MergeReport, ParseOptions, SkippedBlock};

// Public modules
pub mod artifact_name;
pub mod config;
pub mod emit;
pub mod error;
pub mod flags;
pub mod generate;
pub mod output;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{EmitItem, EmitReport, EmitStatus};

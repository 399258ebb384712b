//! Shared structures of pxvw: transform options and error severity.

mod error;
mod options;

pub use error::{ConfigError, Severity, SeverityLevel};
pub use options::{ExcludeOption, PxToViewportOptions, SelectorMatcher};

use thiserror::Error;

pub trait Severity {
    fn get_severity(&self) -> SeverityLevel;

    /// Returns `true` if the severity level is [`RecoverableError`].
    ///
    /// [`RecoverableError`]: SeverityLevel::RecoverableError
    #[must_use]
    fn is_recoverable_error(&self) -> bool {
        matches!(self.get_severity(), SeverityLevel::RecoverableError)
    }

    /// Returns `true` if the severity level is [`UnrecoverableError`].
    ///
    /// [`UnrecoverableError`]: SeverityLevel::UnrecoverableError
    #[must_use]
    fn is_unrecoverable_error(&self) -> bool {
        matches!(self.get_severity(), SeverityLevel::UnrecoverableError)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SeverityLevel {
    UnrecoverableError,
    RecoverableError,
}

/// Invalid options. Reported when options are resolved,
/// before any stylesheet is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `exclude` is neither a pattern nor an array of patterns
    #[error("options.exclude should be RegExp or Array of RegExp.")]
    InvalidExclude,
    /// An element of the `exclude` array is not a pattern
    #[error("options.exclude should be RegExp.")]
    InvalidExcludeEntry,
    /// A `selectorBlackList` entry is neither a string nor `{ "pattern": string }`
    #[error("options.selectorBlackList entries should be strings or {{ \"pattern\": string }} objects.")]
    InvalidBlacklistEntry,
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
}

impl Severity for ConfigError {
    fn get_severity(&self) -> SeverityLevel {
        SeverityLevel::UnrecoverableError
    }
}

use crate::version::Version;

/// Errors raised while parsing versions or evaluating module requirements.
#[derive(Debug, thiserror::Error)]
pub enum CompatError {
    /// The input is not a `major.minor.patch` version.
    #[error("invalid version {input:?}: {reason}")]
    InvalidVersion { input: String, reason: String },

    /// The input is not a valid constraint expression.
    #[error("invalid constraint {input:?}: {reason}")]
    InvalidConstraint { input: String, reason: String },

    /// A `*.api.json` file or directory could not be loaded.
    #[error("failed to load API definitions: {0}")]
    LoadFailed(String),

    /// An `*.api.json` file is not valid JSON or lacks `options.version`.
    #[error("invalid API definition: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The registry has no version for the module.
    #[error("unknown API module: {0}")]
    UnknownModule(String),

    /// The module version does not satisfy the constraint.
    #[error("module {module} {} does not satisfy {constraint}", found.as_ref().map(ToString::to_string).unwrap_or_else(|| "(absent)".to_string()))]
    Unsatisfied {
        module: String,
        constraint: String,
        found: Option<Version>,
    },
}

pub type Result<T> = std::result::Result<T, CompatError>;

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for iiifgen operations.
///
/// Every setter fails fast and synchronously with one of these variants;
/// the only deferred check is [`Error::MissingRequiredField`], raised when a
/// strict-mode serialization reaches a field whose Required marker was never
/// resolved by a setter.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required field `{field}`: {message}")]
    MissingRequiredField {
        field: String,
        message: &'static str,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed URI `{uri}`: {reason}")]
    MalformedUri { uri: String, reason: String },

    #[error("invalid language tag `{0}`: must be a BCP 47 primary language subtag or \"none\"")]
    InvalidLanguage(String),

    #[error("invalid media type `{value}`: {reason}")]
    InvalidMediaType { value: String, reason: String },

    #[error("invalid behavior `{value}`: {reason}")]
    InvalidBehavior { value: String, reason: String },

    #[error("a {child} cannot be added to {parent}")]
    WrongChildType { parent: String, child: String },

    #[error("field `{field}` is immutable on {kind}: {reason}")]
    ImmutableField {
        kind: String,
        field: &'static str,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inspection found {missing_required} missing required field(s) and {missing_recommended} missing recommended field(s)")]
    InspectionFailed {
        missing_required: usize,
        missing_recommended: usize,
    },
}

use thiserror::Error;

/// Errors collecting raw parameters at the command-line boundary.
///
/// The engine itself never fails; bad values inside a well-formed input fall
/// back to defaults.
#[derive(Error, Debug)]
pub enum ParamError {
    #[error("malformed parameter {0:?}: expected key=value")]
    MalformedPair(String),

    #[error("parameters in {path} must be a JSON object")]
    NotAnObject { path: String },

    #[error("failed to read parameters file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

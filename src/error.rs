use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the configuration boundary.
///
/// The simulation itself never fails: stale entity references are no-ops and numeric edge
/// cases are guarded where they are computed.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings value out of range or inconsistent.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Reading or writing a settings file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for `Settings`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

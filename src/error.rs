//! Error type for the strict (non fail-soft) operations of this crate.
//!
//! `CoreError` serializes as `{ "kind": "...", "message": "..." }` so a host
//! can forward it over IPC and still tell failure categories apart.

use serde::ser::SerializeStruct;

/// Failure reported by the strict icon-extraction path and the data-URI helpers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input rejected before any work was done (empty path, wrong extension).
    #[error("{0}")]
    InvalidInput(String),

    /// The external tool could not be launched or its output could not be read.
    #[error("{0}")]
    Io(String),

    /// The external tool did not finish within the configured bound.
    #[error("{0}")]
    Timeout(String),

    /// Icon data was not valid base64.
    #[error("{0}")]
    Decode(String),
}

impl CoreError {
    /// Returns the error kind as a string matching the variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::InvalidInput(_) => "InvalidInput",
            CoreError::Io(_) => "Io",
            CoreError::Timeout(_) => "Timeout",
            CoreError::Decode(_) => "Decode",
        }
    }
}

impl serde::Serialize for CoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("CoreError", 2)?;
        s.serialize_field("kind", self.kind())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Io(err.to_string())
    }
}

impl From<base64::DecodeError> for CoreError {
    fn from(err: base64::DecodeError) -> Self {
        CoreError::Decode(err.to_string())
    }
}

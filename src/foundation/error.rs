/// Convenience result type used across gridplay.
pub type PlayResult<T> = Result<T, PlayError>;

/// Top-level error taxonomy used by editor, export and persistence APIs.
#[derive(thiserror::Error, Debug)]
pub enum PlayError {
    /// Invalid user-provided input (empty play name, malformed ratio, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A save was attempted without an authenticated context.
    #[error("sign-in required")]
    SignInRequired,

    /// Rasterization or image encoding failed.
    #[error("export error: {0}")]
    Export(String),

    /// The external play store rejected a save.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Errors when serializing or deserializing play records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlayError {
    /// Build a [`PlayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlayError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`PlayError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`PlayError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PlayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

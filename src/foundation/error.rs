/// Convenience result type used across textfx.
pub type FxResult<T> = Result<T, FxError>;

/// Top-level error taxonomy used by the catalog, controller and session stores.
///
/// Rendering and extraction are total and never produce an `FxError`.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// Selection or lookup of an effect name absent from the registry.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// Edit of a parameter the selected effect does not declare.
    #[error("unknown parameter '{param}' for effect '{effect}'")]
    UnknownParam {
        /// Effect the edit was addressed to.
        effect: String,
        /// Parameter name that was not found in the schema.
        param: String,
    },

    /// Invalid catalog data or parameter values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The session store failed to load or save.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    /// Build a [`FxError::UnknownEffect`] value.
    pub fn unknown_effect(name: impl Into<String>) -> Self {
        Self::UnknownEffect(name.into())
    }

    /// Build a [`FxError::UnknownParam`] value.
    pub fn unknown_param(effect: impl Into<String>, param: impl Into<String>) -> Self {
        Self::UnknownParam {
            effect: effect.into(),
            param: param.into(),
        }
    }

    /// Build a [`FxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FxError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`FxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

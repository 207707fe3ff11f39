//! Plugin registration errors.

use thiserror::Error;

use testhost_core::error::AppError;

use crate::kinds::ExtensionKind;

/// Result alias for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors raised while loading or finalizing plugins.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A contribution does not have the shape its kind requires.
    #[error("unsupported plugin shape: {detail}")]
    UnsupportedShape {
        /// The offending extension kind.
        kind: ExtensionKind,
        /// What was expected, naming the export.
        detail: String,
    },

    /// A root-hook factory failed. The underlying error is kept as-is.
    #[error(transparent)]
    Contribution(AppError),
}

impl PluginError {
    /// Creates a shape error for `kind`.
    pub fn unsupported_shape(kind: ExtensionKind, detail: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            kind,
            detail: detail.into(),
        }
    }

    /// The extension kind a shape error refers to.
    pub fn kind(&self) -> Option<ExtensionKind> {
        match self {
            Self::UnsupportedShape { kind, .. } => Some(*kind),
            Self::Contribution(_) => None,
        }
    }
}

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::UnsupportedShape { .. } => AppError::plugin(err.to_string()),
            PluginError::Contribution(inner) => inner,
        }
    }
}

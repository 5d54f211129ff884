/// Convenience result type used across the recipe crate.
pub type RecipeResult<T> = Result<T, RecipeError>;

/// Top-level error taxonomy for recipe construction and script parsing.
///
/// Messages are rendered verbatim; no variant adds a prefix of its own.
#[derive(thiserror::Error, Debug)]
pub enum RecipeError {
    /// A recipe invariant was violated (pipeline, buffer or script state).
    #[error("{0}")]
    Validation(String),

    /// Encoding, decoding or format-description failure.
    #[error("{0}")]
    Codec(String),

    /// Script diagnostic tied to a source line.
    #[error("{line}: {message}")]
    Parse {
        /// 1-based line the failure was detected on.
        line: usize,
        /// Diagnostic text without the line prefix.
        message: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RecipeError {
    /// Build a [`RecipeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RecipeError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`RecipeError::Parse`] value.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Message without any line prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(m) | Self::Codec(m) => m.clone(),
            Self::Parse { message, .. } => message.clone(),
            Self::Other(e) => e.to_string(),
        }
    }

    /// Attach a source line to an error raised below the parser.
    ///
    /// Errors that already carry a line keep it.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Parse { .. } => self,
            other => Self::parse(line, other.message()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

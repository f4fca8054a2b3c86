use thiserror::Error;

/// Core error types for magik-lsp.
///
/// Benign conditions (a document that is not open, a feature that does not
/// apply to a document kind) are never errors; they are answered with a
/// neutral value by the dispatcher. What remains here are the fail-fast
/// cases.
///
/// # Examples
///
/// ```
/// use magik_core::error::{MagikError, Result};
///
/// fn require_magik(language_id: &str) -> Result<()> {
///     if language_id != "magik" {
///         return Err(MagikError::UnsupportedLanguage(language_id.into()));
///     }
///     Ok(())
/// }
///
/// assert!(require_magik("python").is_err());
/// ```
#[derive(Error, Debug)]
pub enum MagikError {
    #[error("unsupported language id: {0}")]
    UnsupportedLanguage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for `Result<T, MagikError>`.
pub type Result<T> = std::result::Result<T, MagikError>;

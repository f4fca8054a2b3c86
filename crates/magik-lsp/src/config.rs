use magik_core::{AnalysisConfiguration, Result};
use serde::Deserialize;

/// Root configuration for the magik-lsp server.
///
/// Provided by the LSP client via initialization options. All fields use
/// defaults if not specified.
///
/// # Examples
///
/// ```
/// use magik_lsp::config::MagikConfig;
///
/// let json = r#"{
///     "diagnostics": { "enabled": false },
///     "analysis": { "typing_show_inlay_hints": true }
/// }"#;
///
/// let config: MagikConfig = serde_json::from_str(json).unwrap();
/// assert!(!config.diagnostics.enabled);
/// assert!(config.formatting.enabled);
/// assert!(config.analysis.typing_show_inlay_hints);
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MagikConfig {
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub formatting: FormattingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfiguration,
}

impl MagikConfig {
    /// Parses initialization options.
    ///
    /// `null` yields the default configuration.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Configuration for diagnostics publication.
///
/// # Defaults
///
/// - `enabled`: `true`
///
/// When disabled, opening or changing a magik source publishes nothing.
/// Closing a document still clears whatever was published before.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration for document formatting.
///
/// # Defaults
///
/// - `enabled`: `true`
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

const fn default_true() -> bool {
    true
}

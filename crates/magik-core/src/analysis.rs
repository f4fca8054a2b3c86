//! Analysis context carried by typed magik sources.
//!
//! The server itself never looks inside this context; it builds it when a
//! document is classified and hands it to capability providers untouched.

use crate::position::Position;
use serde::Deserialize;
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings that shape typed analysis of magik sources.
///
/// Supplied by the client through the `analysis` section of the
/// initialization options.
///
/// # Examples
///
/// ```
/// use magik_core::AnalysisConfiguration;
///
/// let config: AnalysisConfiguration =
///     serde_json::from_str(r#"{"typing_show_inlay_hints": true}"#).unwrap();
///
/// assert!(config.typing_enable_checks);
/// assert!(config.typing_show_inlay_hints);
/// assert!(config.lint_override_config_file.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisConfiguration {
    #[serde(default = "default_true")]
    pub typing_enable_checks: bool,
    #[serde(default)]
    pub typing_show_inlay_hints: bool,
    #[serde(default)]
    pub lint_override_config_file: Option<PathBuf>,
}

impl Default for AnalysisConfiguration {
    fn default() -> Self {
        Self {
            typing_enable_checks: true,
            typing_show_inlay_hints: false,
            lint_override_config_file: None,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Workspace-wide index of definitions, shared by every opened document.
///
/// Implementations are owned by the embedding application; providers
/// downcast through [`DefinitionKeeper::as_any`] to reach the concrete index.
pub trait DefinitionKeeper: Send + Sync {
    /// Downcast to concrete type
    fn as_any(&self) -> &dyn Any;
}

/// Definition index that knows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyDefinitionKeeper;

impl DefinitionKeeper for EmptyDefinitionKeeper {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Byte offsets of line starts, for converting between offsets and positions.
///
/// Columns count UTF-16 code units from the start of the line, the unit
/// clients use for protocol positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(idx, _)| idx + 1),
        );
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into a position. Offsets past the end clamp to
    /// the end of the text; offsets inside a character snap back to its start.
    pub fn position(&self, text: &str, offset: usize) -> Position {
        let mut offset = offset.min(self.len).min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = text[line_start..offset].chars().map(char::len_utf16).sum();
        Position::new(line, column)
    }

    /// Converts a position into a byte offset, or `None` if the position is
    /// not inside the text or splits a surrogate pair. The column just past
    /// the last character of a line is valid.
    pub fn offset(&self, text: &str, position: Position) -> Option<usize> {
        let line_start = *self.line_starts.get(position.line)?;
        let line_end = self
            .line_starts
            .get(position.line + 1)
            .copied()
            .unwrap_or(self.len);
        let line = text.get(line_start..line_end)?;
        let line = line.strip_suffix('\n').unwrap_or(line);

        let mut units = 0;
        for (idx, ch) in line.char_indices() {
            if units == position.column {
                return Some(line_start + idx);
            }
            if units > position.column {
                return None;
            }
            units += ch.len_utf16();
        }
        (units == position.column).then_some(line_start + line.len())
    }
}

/// Derived analysis state owned by a typed magik source.
#[derive(Clone)]
pub struct AnalysisContext {
    configuration: Arc<AnalysisConfiguration>,
    line_index: LineIndex,
    definitions: Arc<dyn DefinitionKeeper>,
}

impl AnalysisContext {
    pub fn new(
        configuration: Arc<AnalysisConfiguration>,
        text: &str,
        definitions: Arc<dyn DefinitionKeeper>,
    ) -> Self {
        Self {
            configuration,
            line_index: LineIndex::new(text),
            definitions,
        }
    }

    pub fn configuration(&self) -> &AnalysisConfiguration {
        &self.configuration
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn definitions(&self) -> &dyn DefinitionKeeper {
        self.definitions.as_ref()
    }
}

impl std::fmt::Debug for AnalysisContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisContext")
            .field("configuration", &self.configuration)
            .field("line_count", &self.line_index.line_count())
            .finish_non_exhaustive()
    }
}

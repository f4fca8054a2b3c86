//! Opened document model.
//!
//! Documents are immutable snapshots. An edit builds a new [`OpenedDocument`]
//! and replaces the stored one; anything still holding the old value keeps
//! seeing the old text.

use crate::analysis::{AnalysisContext, DefinitionKeeper};
use std::sync::Arc;
use tower_lsp_server::ls_types::Uri;

/// Document kind, fixed by the language id the client declared at open.
///
/// # Examples
///
/// ```
/// use magik_core::DocumentKind;
///
/// assert_eq!(DocumentKind::from_language_id("magik"), Some(DocumentKind::TypedSource));
/// assert_eq!(DocumentKind::from_language_id("product.def"), Some(DocumentKind::ProductDefinition));
/// assert_eq!(DocumentKind::from_language_id("module.def"), Some(DocumentKind::ModuleDefinition));
/// assert_eq!(DocumentKind::from_language_id("python"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `product.def` file
    ProductDefinition,
    /// `module.def` file
    ModuleDefinition,
    /// `.magik` source with typed analysis
    TypedSource,
}

impl DocumentKind {
    /// Detects the document kind from a protocol language id.
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id {
            "product.def" => Some(Self::ProductDefinition),
            "module.def" => Some(Self::ModuleDefinition),
            "magik" => Some(Self::TypedSource),
            _ => None,
        }
    }

    /// The protocol language id for this kind.
    pub const fn language_id(self) -> &'static str {
        match self {
            Self::ProductDefinition => "product.def",
            Self::ModuleDefinition => "module.def",
            Self::TypedSource => "magik",
        }
    }
}

/// Attributes shared by every document kind.
#[derive(Clone)]
pub struct SourceFile {
    uri: Uri,
    text: Arc<str>,
    definitions: Arc<dyn DefinitionKeeper>,
}

impl SourceFile {
    pub fn new(uri: Uri, text: impl Into<Arc<str>>, definitions: Arc<dyn DefinitionKeeper>) -> Self {
        Self {
            uri,
            text: text.into(),
            definitions,
        }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn definitions(&self) -> &dyn DefinitionKeeper {
        self.definitions.as_ref()
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("uri", &self.uri.as_str())
            .field("text_len", &self.text.len())
            .finish_non_exhaustive()
    }
}

/// An opened `product.def` file.
#[derive(Debug, Clone)]
pub struct ProductDefFile {
    source: SourceFile,
}

impl ProductDefFile {
    pub fn new(source: SourceFile) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }
}

/// An opened `module.def` file.
#[derive(Debug, Clone)]
pub struct ModuleDefFile {
    source: SourceFile,
}

impl ModuleDefFile {
    pub fn new(source: SourceFile) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }
}

/// An opened magik source together with its analysis context.
#[derive(Debug, Clone)]
pub struct MagikTypedFile {
    source: SourceFile,
    context: AnalysisContext,
}

impl MagikTypedFile {
    pub fn new(source: SourceFile, context: AnalysisContext) -> Self {
        Self { source, context }
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn uri(&self) -> &Uri {
        self.source.uri()
    }

    pub fn text(&self) -> &str {
        self.source.text()
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.context
    }
}

/// A document held by the server, one variant per [`DocumentKind`].
///
/// Cloning is cheap: every variant is reference counted, so a clone is a
/// snapshot handle rather than a copy of the text.
#[derive(Debug, Clone)]
pub enum OpenedDocument {
    ProductDefinition(Arc<ProductDefFile>),
    ModuleDefinition(Arc<ModuleDefFile>),
    TypedSource(Arc<MagikTypedFile>),
}

impl OpenedDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::ProductDefinition(_) => DocumentKind::ProductDefinition,
            Self::ModuleDefinition(_) => DocumentKind::ModuleDefinition,
            Self::TypedSource(_) => DocumentKind::TypedSource,
        }
    }

    pub fn language_id(&self) -> &'static str {
        self.kind().language_id()
    }

    pub fn source(&self) -> &SourceFile {
        match self {
            Self::ProductDefinition(file) => file.source(),
            Self::ModuleDefinition(file) => file.source(),
            Self::TypedSource(file) => file.source(),
        }
    }

    pub fn uri(&self) -> &Uri {
        self.source().uri()
    }

    pub fn text(&self) -> &str {
        self.source().text()
    }

    /// Returns the typed source, if this document is one.
    pub fn as_typed(&self) -> Option<&Arc<MagikTypedFile>> {
        match self {
            Self::TypedSource(file) => Some(file),
            _ => None,
        }
    }
}

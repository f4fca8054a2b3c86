//! Core abstractions for magik-lsp.
//!
//! This crate provides the document model and the collaborator contracts
//! shared by the language server and by capability implementations.
//!
//! # Architecture
//!
//! magik-core defines:
//! - **Documents**: `OpenedDocument`, a sum type over the three file kinds the
//!   server distinguishes (`product.def`, `module.def`, typed magik source)
//! - **Classification**: `ContentClassifier`, building documents from a
//!   declared language id
//! - **Coordinates**: the internal `Position`/`Range`/`Location` model that
//!   analysis code works in
//! - **Providers**: one trait per language feature, plus `NullProvider`
//! - **Error Types**: `MagikError`
//!
//! # Examples
//!
//! ```
//! use magik_core::{ContentClassifier, DocumentKind};
//! use tower_lsp_server::ls_types::Uri;
//!
//! let classifier = ContentClassifier::default();
//! let uri = Uri::from_file_path("/src/a.magik").unwrap();
//! let document = classifier.classify("magik", uri, "_package sw\n".into()).unwrap();
//!
//! assert_eq!(document.kind(), DocumentKind::TypedSource);
//! assert_eq!(document.text(), "_package sw\n");
//! ```

pub mod analysis;
pub mod classify;
pub mod document;
pub mod error;
pub mod position;
pub mod provider;

// Re-export commonly used types
pub use analysis::{
    AnalysisConfiguration, AnalysisContext, DefinitionKeeper, EmptyDefinitionKeeper, LineIndex,
};
pub use classify::ContentClassifier;
pub use document::{
    DocumentKind, MagikTypedFile, ModuleDefFile, OpenedDocument, ProductDefFile, SourceFile,
};
pub use error::{MagikError, Result};
pub use position::{CodeAction, Location, Position, Range, TextEdit};
pub use provider::{
    CapabilityProvider, CodeActionProvider, CompletionProvider, DefinitionsProvider,
    DiagnosticsProvider, DocumentSymbolProvider, FoldingRangeProvider, FormattingProvider,
    HoverProvider, ImplementationProvider, InlayHintProvider, NullProvider, ReferencesProvider,
    RenameProvider, SelectionRangeProvider, SemanticTokenProvider, SignatureHelpProvider,
    TypeHierarchyProvider,
};

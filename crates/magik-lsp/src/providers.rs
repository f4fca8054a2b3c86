//! The set of capability providers a server instance dispatches to.

use magik_core::{
    CodeActionProvider, CompletionProvider, DefinitionsProvider, DiagnosticsProvider,
    DocumentSymbolProvider, FoldingRangeProvider, FormattingProvider, HoverProvider,
    ImplementationProvider, InlayHintProvider, NullProvider, ReferencesProvider, RenameProvider,
    SelectionRangeProvider, SemanticTokenProvider, SignatureHelpProvider, TypeHierarchyProvider,
};
use std::sync::Arc;
use tower_lsp_server::ls_types::ServerCapabilities;

/// One provider per language feature.
///
/// Every slot defaults to [`NullProvider`], which declares nothing and answers
/// with empty results. Embedders replace the slots they implement:
///
/// ```
/// use magik_core::NullProvider;
/// use magik_lsp::providers::Providers;
/// use std::sync::Arc;
///
/// let providers = Providers {
///     hover: Arc::new(NullProvider),
///     ..Providers::default()
/// };
/// # let _ = providers;
/// ```
#[derive(Clone)]
pub struct Providers {
    pub diagnostics: Arc<dyn DiagnosticsProvider>,
    pub hover: Arc<dyn HoverProvider>,
    pub implementation: Arc<dyn ImplementationProvider>,
    pub signature_help: Arc<dyn SignatureHelpProvider>,
    pub definitions: Arc<dyn DefinitionsProvider>,
    pub references: Arc<dyn ReferencesProvider>,
    pub completion: Arc<dyn CompletionProvider>,
    pub formatting: Arc<dyn FormattingProvider>,
    pub folding: Arc<dyn FoldingRangeProvider>,
    pub semantic_tokens: Arc<dyn SemanticTokenProvider>,
    pub rename: Arc<dyn RenameProvider>,
    pub document_symbols: Arc<dyn DocumentSymbolProvider>,
    pub type_hierarchy: Arc<dyn TypeHierarchyProvider>,
    pub inlay_hints: Arc<dyn InlayHintProvider>,
    pub code_actions: Arc<dyn CodeActionProvider>,
    pub selection_ranges: Arc<dyn SelectionRangeProvider>,
}

impl Providers {
    /// Lets every provider declare its support, in a fixed order.
    ///
    /// A later provider can see, and override, what an earlier one declared.
    pub fn set_capabilities(&self, capabilities: &mut ServerCapabilities) {
        self.diagnostics.set_capabilities(capabilities);
        self.hover.set_capabilities(capabilities);
        self.implementation.set_capabilities(capabilities);
        self.signature_help.set_capabilities(capabilities);
        self.definitions.set_capabilities(capabilities);
        self.references.set_capabilities(capabilities);
        self.completion.set_capabilities(capabilities);
        self.formatting.set_capabilities(capabilities);
        self.folding.set_capabilities(capabilities);
        self.semantic_tokens.set_capabilities(capabilities);
        self.rename.set_capabilities(capabilities);
        self.document_symbols.set_capabilities(capabilities);
        self.type_hierarchy.set_capabilities(capabilities);
        self.inlay_hints.set_capabilities(capabilities);
        self.code_actions.set_capabilities(capabilities);
        self.selection_ranges.set_capabilities(capabilities);
    }
}

impl Default for Providers {
    fn default() -> Self {
        let null = Arc::new(NullProvider);
        Self {
            diagnostics: null.clone(),
            hover: null.clone(),
            implementation: null.clone(),
            signature_help: null.clone(),
            definitions: null.clone(),
            references: null.clone(),
            completion: null.clone(),
            formatting: null.clone(),
            folding: null.clone(),
            semantic_tokens: null.clone(),
            rename: null.clone(),
            document_symbols: null.clone(),
            type_hierarchy: null.clone(),
            inlay_hints: null.clone(),
            code_actions: null.clone(),
            selection_ranges: null,
        }
    }
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers").finish_non_exhaustive()
    }
}

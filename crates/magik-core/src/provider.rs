//! Capability provider contracts.
//!
//! Each language feature is implemented by an independent provider. A
//! provider declares its support once at startup through
//! [`CapabilityProvider::set_capabilities`] and afterwards answers pure
//! queries against a document snapshot.
//!
//! Providers for features that only make sense on magik sources take a
//! [`MagikTypedFile`]; providers for features that also cover definition
//! files take the [`OpenedDocument`] and match on it themselves.
//!
//! Providers are invoked from worker threads, concurrently with each other
//! and with themselves, so they must be stateless or synchronize internally.

use crate::document::{MagikTypedFile, OpenedDocument};
use crate::position::{CodeAction, Location, Position, Range, TextEdit};
use tower_lsp_server::ls_types::{
    CodeActionContext, CompletionItem, Diagnostic, DocumentSymbol, FoldingRange,
    FormattingOptions, Hover, InlayHint, PrepareRenameResponse, SelectionRange, SemanticTokens,
    ServerCapabilities, SignatureHelp, TypeHierarchyItem, WorkspaceEdit,
};

/// Declares feature support to the client.
pub trait CapabilityProvider: Send + Sync {
    /// Called once during `initialize`, after text synchronization has been set.
    fn set_capabilities(&self, capabilities: &mut ServerCapabilities);
}

pub trait DiagnosticsProvider: CapabilityProvider {
    fn provide_diagnostics(&self, file: &MagikTypedFile) -> Vec<Diagnostic>;
}

pub trait HoverProvider: CapabilityProvider {
    fn provide_hover(&self, document: &OpenedDocument, position: Position) -> Option<Hover>;
}

pub trait ImplementationProvider: CapabilityProvider {
    fn provide_implementations(&self, file: &MagikTypedFile, position: Position) -> Vec<Location>;
}

pub trait SignatureHelpProvider: CapabilityProvider {
    fn provide_signature_help(
        &self,
        file: &MagikTypedFile,
        position: Position,
    ) -> Option<SignatureHelp>;
}

pub trait DefinitionsProvider: CapabilityProvider {
    fn provide_definitions(&self, document: &OpenedDocument, position: Position) -> Vec<Location>;
}

pub trait ReferencesProvider: CapabilityProvider {
    fn provide_references(&self, document: &OpenedDocument, position: Position) -> Vec<Location>;
}

pub trait CompletionProvider: CapabilityProvider {
    fn provide_completions(&self, file: &MagikTypedFile, position: Position)
    -> Vec<CompletionItem>;
}

pub trait FormattingProvider: CapabilityProvider {
    /// Returns false when the source cannot be formatted, e.g. because it
    /// does not parse.
    fn can_format(&self, file: &MagikTypedFile) -> bool;

    fn provide_formatting(&self, file: &MagikTypedFile, options: &FormattingOptions)
    -> Vec<TextEdit>;
}

pub trait FoldingRangeProvider: CapabilityProvider {
    fn provide_folding_ranges(&self, document: &OpenedDocument) -> Vec<FoldingRange>;
}

pub trait SemanticTokenProvider: CapabilityProvider {
    fn provide_semantic_tokens_full(&self, document: &OpenedDocument) -> SemanticTokens;
}

pub trait RenameProvider: CapabilityProvider {
    fn provide_prepare_rename(
        &self,
        file: &MagikTypedFile,
        position: Position,
    ) -> Option<PrepareRenameResponse>;

    fn provide_rename(
        &self,
        file: &MagikTypedFile,
        position: Position,
        new_name: &str,
    ) -> Option<WorkspaceEdit>;
}

pub trait DocumentSymbolProvider: CapabilityProvider {
    fn provide_document_symbols(&self, file: &MagikTypedFile) -> Vec<DocumentSymbol>;
}

pub trait TypeHierarchyProvider: CapabilityProvider {
    fn prepare_type_hierarchy(
        &self,
        file: &MagikTypedFile,
        position: Position,
    ) -> Vec<TypeHierarchyItem>;

    fn type_hierarchy_subtypes(&self, item: &TypeHierarchyItem) -> Vec<TypeHierarchyItem>;

    fn type_hierarchy_supertypes(&self, item: &TypeHierarchyItem) -> Vec<TypeHierarchyItem>;
}

pub trait InlayHintProvider: CapabilityProvider {
    fn provide_inlay_hints(&self, file: &MagikTypedFile, range: Range) -> Vec<InlayHint>;
}

pub trait CodeActionProvider: CapabilityProvider {
    fn provide_code_actions(
        &self,
        file: &MagikTypedFile,
        range: Range,
        context: &CodeActionContext,
    ) -> Vec<CodeAction>;
}

pub trait SelectionRangeProvider: CapabilityProvider {
    fn provide_selection_ranges(
        &self,
        file: &MagikTypedFile,
        positions: &[Position],
    ) -> Vec<SelectionRange>;
}

/// Provider that declares nothing and answers every query with an empty
/// result.
///
/// Stands in for any capability an embedding application does not supply.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProvider;

impl CapabilityProvider for NullProvider {
    fn set_capabilities(&self, _capabilities: &mut ServerCapabilities) {}
}

impl DiagnosticsProvider for NullProvider {
    fn provide_diagnostics(&self, _file: &MagikTypedFile) -> Vec<Diagnostic> {
        Vec::new()
    }
}

impl HoverProvider for NullProvider {
    fn provide_hover(&self, _document: &OpenedDocument, _position: Position) -> Option<Hover> {
        None
    }
}

impl ImplementationProvider for NullProvider {
    fn provide_implementations(&self, _file: &MagikTypedFile, _position: Position) -> Vec<Location> {
        Vec::new()
    }
}

impl SignatureHelpProvider for NullProvider {
    fn provide_signature_help(
        &self,
        _file: &MagikTypedFile,
        _position: Position,
    ) -> Option<SignatureHelp> {
        None
    }
}

impl DefinitionsProvider for NullProvider {
    fn provide_definitions(&self, _document: &OpenedDocument, _position: Position) -> Vec<Location> {
        Vec::new()
    }
}

impl ReferencesProvider for NullProvider {
    fn provide_references(&self, _document: &OpenedDocument, _position: Position) -> Vec<Location> {
        Vec::new()
    }
}

impl CompletionProvider for NullProvider {
    fn provide_completions(
        &self,
        _file: &MagikTypedFile,
        _position: Position,
    ) -> Vec<CompletionItem> {
        Vec::new()
    }
}

impl FormattingProvider for NullProvider {
    fn can_format(&self, _file: &MagikTypedFile) -> bool {
        true
    }

    fn provide_formatting(
        &self,
        _file: &MagikTypedFile,
        _options: &FormattingOptions,
    ) -> Vec<TextEdit> {
        Vec::new()
    }
}

impl FoldingRangeProvider for NullProvider {
    fn provide_folding_ranges(&self, _document: &OpenedDocument) -> Vec<FoldingRange> {
        Vec::new()
    }
}

impl SemanticTokenProvider for NullProvider {
    fn provide_semantic_tokens_full(&self, _document: &OpenedDocument) -> SemanticTokens {
        SemanticTokens {
            result_id: None,
            data: Vec::new(),
        }
    }
}

impl RenameProvider for NullProvider {
    fn provide_prepare_rename(
        &self,
        _file: &MagikTypedFile,
        _position: Position,
    ) -> Option<PrepareRenameResponse> {
        None
    }

    fn provide_rename(
        &self,
        _file: &MagikTypedFile,
        _position: Position,
        _new_name: &str,
    ) -> Option<WorkspaceEdit> {
        None
    }
}

impl DocumentSymbolProvider for NullProvider {
    fn provide_document_symbols(&self, _file: &MagikTypedFile) -> Vec<DocumentSymbol> {
        Vec::new()
    }
}

impl TypeHierarchyProvider for NullProvider {
    fn prepare_type_hierarchy(
        &self,
        _file: &MagikTypedFile,
        _position: Position,
    ) -> Vec<TypeHierarchyItem> {
        Vec::new()
    }

    fn type_hierarchy_subtypes(&self, _item: &TypeHierarchyItem) -> Vec<TypeHierarchyItem> {
        Vec::new()
    }

    fn type_hierarchy_supertypes(&self, _item: &TypeHierarchyItem) -> Vec<TypeHierarchyItem> {
        Vec::new()
    }
}

impl InlayHintProvider for NullProvider {
    fn provide_inlay_hints(&self, _file: &MagikTypedFile, _range: Range) -> Vec<InlayHint> {
        Vec::new()
    }
}

impl CodeActionProvider for NullProvider {
    fn provide_code_actions(
        &self,
        _file: &MagikTypedFile,
        _range: Range,
        _context: &CodeActionContext,
    ) -> Vec<CodeAction> {
        Vec::new()
    }
}

impl SelectionRangeProvider for NullProvider {
    fn provide_selection_ranges(
        &self,
        _file: &MagikTypedFile,
        _positions: &[Position],
    ) -> Vec<SelectionRange> {
        Vec::new()
    }
}

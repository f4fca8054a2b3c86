//! Mock providers and helpers shared by unit tests.

use crate::dispatch::RequestDispatcher;
use crate::document::DocumentStore;
use crate::providers::Providers;
use magik_core::{
    CapabilityProvider, CodeAction, CodeActionProvider, CompletionProvider, ContentClassifier,
    DefinitionsProvider, DiagnosticsProvider, DocumentSymbolProvider, FoldingRangeProvider,
    FormattingProvider, HoverProvider, ImplementationProvider, InlayHintProvider, Location,
    MagikTypedFile, OpenedDocument, Position, Range, ReferencesProvider, RenameProvider,
    SelectionRangeProvider, SemanticTokenProvider, SignatureHelpProvider, TextEdit,
    TypeHierarchyProvider,
};
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::sync::{Arc, Mutex};
use tower_lsp_server::ls_types::{
    self as lsp, CodeActionContext, CompletionItem, Diagnostic, DocumentSymbol, FoldingRange,
    FormattingOptions, Hover, HoverContents, InlayHint, InlayHintLabel, MarkedString,
    PrepareRenameResponse, SelectionRange, SemanticToken, SemanticTokens, ServerCapabilities,
    SignatureHelp, SignatureInformation, SymbolKind, TypeHierarchyItem, Uri, WorkspaceEdit,
};

pub(crate) fn uri(path: &str) -> Uri {
    Uri::from_file_path(path).unwrap()
}

/// Classifies `text` and stores it, bypassing the lifecycle.
pub(crate) fn open(documents: &DocumentStore, language_id: &str, uri: &Uri, text: &str) {
    let document = ContentClassifier::default()
        .classify(language_id, uri.clone(), text.into())
        .unwrap();
    documents.put(uri.clone(), document);
}

pub(crate) fn dispatcher_with(providers: Providers) -> (Arc<DocumentStore>, RequestDispatcher) {
    let documents = Arc::new(DocumentStore::new());
    let dispatcher = RequestDispatcher::new(Arc::clone(&documents), providers);
    (documents, dispatcher)
}

pub(crate) fn text_hover(text: &str) -> Hover {
    Hover {
        contents: HoverContents::Scalar(MarkedString::String(text.to_string())),
        range: None,
    }
}

pub(crate) fn hover_text(hover: Option<&Hover>) -> Option<&str> {
    match hover?.contents {
        HoverContents::Scalar(MarkedString::String(ref text)) => Some(text),
        _ => None,
    }
}

pub(crate) fn type_item(uri: &Uri, name: &str) -> TypeHierarchyItem {
    TypeHierarchyItem {
        name: name.to_string(),
        kind: SymbolKind::CLASS,
        tags: None,
        detail: None,
        uri: uri.clone(),
        range: lsp::Range::default(),
        selection_range: lsp::Range::default(),
        data: None,
    }
}

fn point(position: Position) -> Range {
    Range::new(position, position)
}

fn lsp_point(position: Position) -> lsp::Range {
    let position = lsp::Position::new(position.line as u32, position.column as u32);
    lsp::Range::new(position, position)
}

/// Diagnostics provider that records every text it was asked to check.
#[derive(Default)]
pub(crate) struct RecordingDiagnostics {
    seen: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub(crate) fn diagnostics_for(text: &str) -> Vec<Diagnostic> {
        vec![Diagnostic::new_simple(
            lsp::Range::default(),
            format!("checked: {text}"),
        )]
    }

    pub(crate) fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl CapabilityProvider for RecordingDiagnostics {
    fn set_capabilities(&self, _capabilities: &mut ServerCapabilities) {}
}

impl DiagnosticsProvider for RecordingDiagnostics {
    fn provide_diagnostics(&self, file: &MagikTypedFile) -> Vec<Diagnostic> {
        self.seen.lock().unwrap().push(file.text().to_string());
        Self::diagnostics_for(file.text())
    }
}

/// Provider for every feature that answers from the document text and the
/// requested coordinates, so tests can see what reached it.
pub(crate) struct MockProvider {
    name: &'static str,
    declared: Option<Arc<Mutex<Vec<&'static str>>>>,
    can_format: bool,
}

impl MockProvider {
    pub(crate) fn echo() -> Self {
        Self {
            name: "echo",
            declared: None,
            can_format: true,
        }
    }

    /// Echo provider whose `can_format` always declines.
    pub(crate) fn unformattable() -> Self {
        Self {
            can_format: false,
            ..Self::echo()
        }
    }

    /// Uses this provider for every slot.
    pub(crate) fn providers(self) -> Providers {
        let shared = Arc::new(self);
        Providers {
            diagnostics: shared.clone(),
            hover: shared.clone(),
            implementation: shared.clone(),
            signature_help: shared.clone(),
            definitions: shared.clone(),
            references: shared.clone(),
            completion: shared.clone(),
            formatting: shared.clone(),
            folding: shared.clone(),
            semantic_tokens: shared.clone(),
            rename: shared.clone(),
            document_symbols: shared.clone(),
            type_hierarchy: shared.clone(),
            inlay_hints: shared.clone(),
            code_actions: shared.clone(),
            selection_ranges: shared,
        }
    }
}

impl CapabilityProvider for MockProvider {
    fn set_capabilities(&self, _capabilities: &mut ServerCapabilities) {
        if let Some(declared) = &self.declared {
            declared.lock().unwrap().push(self.name);
        }
    }
}

impl DiagnosticsProvider for MockProvider {
    fn provide_diagnostics(&self, file: &MagikTypedFile) -> Vec<Diagnostic> {
        RecordingDiagnostics::diagnostics_for(file.text())
    }
}

impl HoverProvider for MockProvider {
    fn provide_hover(&self, document: &OpenedDocument, _position: Position) -> Option<Hover> {
        Some(text_hover(document.text()))
    }
}

impl ImplementationProvider for MockProvider {
    fn provide_implementations(&self, file: &MagikTypedFile, position: Position) -> Vec<Location> {
        vec![Location::new(file.uri().clone(), point(position))]
    }
}

impl SignatureHelpProvider for MockProvider {
    fn provide_signature_help(
        &self,
        file: &MagikTypedFile,
        _position: Position,
    ) -> Option<SignatureHelp> {
        Some(SignatureHelp {
            signatures: vec![SignatureInformation {
                label: file.text().trim_end().to_string(),
                documentation: None,
                parameters: None,
                active_parameter: None,
            }],
            active_signature: Some(0),
            active_parameter: None,
        })
    }
}

impl DefinitionsProvider for MockProvider {
    fn provide_definitions(&self, document: &OpenedDocument, position: Position) -> Vec<Location> {
        vec![Location::new(document.uri().clone(), point(position))]
    }
}

impl ReferencesProvider for MockProvider {
    fn provide_references(&self, document: &OpenedDocument, position: Position) -> Vec<Location> {
        vec![Location::new(document.uri().clone(), point(position))]
    }
}

impl CompletionProvider for MockProvider {
    fn provide_completions(&self, file: &MagikTypedFile, _position: Position) -> Vec<CompletionItem> {
        vec![CompletionItem {
            label: file.text().to_string(),
            ..Default::default()
        }]
    }
}

impl FormattingProvider for MockProvider {
    fn can_format(&self, _file: &MagikTypedFile) -> bool {
        self.can_format
    }

    fn provide_formatting(
        &self,
        _file: &MagikTypedFile,
        options: &FormattingOptions,
    ) -> Vec<TextEdit> {
        let indent = if options.insert_spaces {
            " ".repeat(options.tab_size as usize)
        } else {
            "\t".to_string()
        };
        vec![TextEdit::new(point(Position::new(0, 0)), indent)]
    }
}

impl FoldingRangeProvider for MockProvider {
    fn provide_folding_ranges(&self, document: &OpenedDocument) -> Vec<FoldingRange> {
        vec![FoldingRange {
            start_line: 0,
            end_line: document.text().matches('\n').count() as u32,
            ..Default::default()
        }]
    }
}

impl SemanticTokenProvider for MockProvider {
    fn provide_semantic_tokens_full(&self, document: &OpenedDocument) -> SemanticTokens {
        SemanticTokens {
            result_id: None,
            data: vec![SemanticToken {
                delta_line: 0,
                delta_start: 0,
                length: document.text().len() as u32,
                token_type: 0,
                token_modifiers_bitset: 0,
            }],
        }
    }
}

impl RenameProvider for MockProvider {
    fn provide_prepare_rename(
        &self,
        file: &MagikTypedFile,
        position: Position,
    ) -> Option<PrepareRenameResponse> {
        file.context()
            .line_index()
            .offset(file.text(), position)
            .map(|_| PrepareRenameResponse::Range(lsp_point(position)))
    }

    fn provide_rename(
        &self,
        file: &MagikTypedFile,
        position: Position,
        new_name: &str,
    ) -> Option<WorkspaceEdit> {
        let mut changes = HashMap::new();
        changes.insert(
            file.uri().clone(),
            vec![lsp::TextEdit::new(lsp_point(position), new_name.to_string())],
        );
        Some(WorkspaceEdit {
            changes: Some(changes),
            ..Default::default()
        })
    }
}

impl DocumentSymbolProvider for MockProvider {
    #[allow(deprecated)]
    fn provide_document_symbols(&self, file: &MagikTypedFile) -> Vec<DocumentSymbol> {
        vec![DocumentSymbol {
            name: file.text().trim_end().to_string(),
            detail: None,
            kind: SymbolKind::MODULE,
            tags: None,
            deprecated: None,
            range: lsp::Range::default(),
            selection_range: lsp::Range::default(),
            children: None,
        }]
    }
}

impl TypeHierarchyProvider for MockProvider {
    fn prepare_type_hierarchy(
        &self,
        file: &MagikTypedFile,
        _position: Position,
    ) -> Vec<TypeHierarchyItem> {
        vec![type_item(file.uri(), "a")]
    }

    fn type_hierarchy_subtypes(&self, item: &TypeHierarchyItem) -> Vec<TypeHierarchyItem> {
        vec![type_item(&item.uri, &format!("sub_of_{}", item.name))]
    }

    fn type_hierarchy_supertypes(&self, item: &TypeHierarchyItem) -> Vec<TypeHierarchyItem> {
        vec![type_item(&item.uri, &format!("super_of_{}", item.name))]
    }
}

impl InlayHintProvider for MockProvider {
    fn provide_inlay_hints(&self, _file: &MagikTypedFile, range: Range) -> Vec<InlayHint> {
        vec![InlayHint {
            position: lsp_point(range.start).start,
            label: InlayHintLabel::String(": integer".into()),
            kind: None,
            text_edits: None,
            tooltip: None,
            padding_left: None,
            padding_right: None,
            data: None,
        }]
    }
}

impl CodeActionProvider for MockProvider {
    fn provide_code_actions(
        &self,
        file: &MagikTypedFile,
        range: Range,
        _context: &CodeActionContext,
    ) -> Vec<CodeAction> {
        vec![CodeAction::new(
            "Replace selection",
            vec![TextEdit::new(range, file.text().trim_end())],
        )]
    }
}

impl SelectionRangeProvider for MockProvider {
    fn provide_selection_ranges(
        &self,
        _file: &MagikTypedFile,
        positions: &[Position],
    ) -> Vec<SelectionRange> {
        positions
            .iter()
            .map(|position| SelectionRange {
                range: lsp_point(*position),
                parent: None,
            })
            .collect()
    }
}

/// Records the order in which providers declare their capabilities.
#[derive(Default)]
pub(crate) struct OrderRecorder {
    declared: Arc<Mutex<Vec<&'static str>>>,
}

impl OrderRecorder {
    pub(crate) fn slot(&self, name: &'static str) -> Arc<MockProvider> {
        Arc::new(MockProvider {
            name,
            declared: Some(Arc::clone(&self.declared)),
            can_format: true,
        })
    }

    pub(crate) fn order(&self) -> Vec<&'static str> {
        self.declared.lock().unwrap().clone()
    }
}

/// Hover provider whose first call signals that it started and then blocks
/// until released. Later calls answer immediately.
pub(crate) struct GatedHover {
    started: SyncSender<()>,
    gate: Mutex<Option<Receiver<()>>>,
}

impl GatedHover {
    /// Returns the provider, the "started" receiver and the release sender.
    pub(crate) fn new() -> (Arc<Self>, Receiver<()>, SyncSender<()>) {
        let (started_tx, started_rx) = sync_channel(1);
        let (release_tx, release_rx) = sync_channel(1);
        let provider = Arc::new(Self {
            started: started_tx,
            gate: Mutex::new(Some(release_rx)),
        });
        (provider, started_rx, release_tx)
    }
}

impl CapabilityProvider for GatedHover {
    fn set_capabilities(&self, capabilities: &mut ServerCapabilities) {
        capabilities.hover_provider = Some(lsp::HoverProviderCapability::Simple(true));
    }
}

impl HoverProvider for GatedHover {
    fn provide_hover(&self, document: &OpenedDocument, _position: Position) -> Option<Hover> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            self.started.send(()).unwrap();
            gate.recv().unwrap();
        }
        Some(text_hover(document.text()))
    }
}

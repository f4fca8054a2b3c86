//! Queries describing the shape of a whole document.

use super::{Pending, RequestDispatcher, neutral, spawn_instrumented};
use crate::convert::position_from_lsp;
use std::sync::Arc;
use tower_lsp_server::ls_types::{
    DocumentSymbolResponse, FoldingRange, Position, SelectionRange, SemanticTokensResult, Uri,
};

impl RequestDispatcher {
    /// `textDocument/foldingRange`, answered for every document kind.
    pub fn folding_range(&self, uri: &Uri) -> Pending<Option<Vec<FoldingRange>>> {
        const OPERATION: &str = "folding_range";

        let Some(document) = self.snapshot(uri) else {
            return neutral(OPERATION, uri, None);
        };
        let provider = Arc::clone(&self.providers.folding);

        spawn_instrumented(OPERATION, uri, move || {
            Some(provider.provide_folding_ranges(&document))
        })
    }

    /// `textDocument/semanticTokens/full`, answered for every document kind.
    pub fn semantic_tokens_full(&self, uri: &Uri) -> Pending<Option<SemanticTokensResult>> {
        const OPERATION: &str = "semantic_tokens_full";

        let Some(document) = self.snapshot(uri) else {
            return neutral(OPERATION, uri, None);
        };
        let provider = Arc::clone(&self.providers.semantic_tokens);

        spawn_instrumented(OPERATION, uri, move || {
            Some(SemanticTokensResult::Tokens(
                provider.provide_semantic_tokens_full(&document),
            ))
        })
    }

    /// `textDocument/documentSymbol`, magik sources only.
    pub fn document_symbol(&self, uri: &Uri) -> Pending<Option<DocumentSymbolResponse>> {
        const OPERATION: &str = "document_symbol";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, Some(DocumentSymbolResponse::Nested(Vec::new())));
        };
        let provider = Arc::clone(&self.providers.document_symbols);

        spawn_instrumented(OPERATION, uri, move || {
            Some(DocumentSymbolResponse::Nested(
                provider.provide_document_symbols(&file),
            ))
        })
    }

    /// `textDocument/selectionRange`, magik sources only.
    pub fn selection_range(
        &self,
        uri: &Uri,
        positions: Vec<Position>,
    ) -> Pending<Option<Vec<SelectionRange>>> {
        const OPERATION: &str = "selection_range";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, Some(Vec::new()));
        };
        let provider = Arc::clone(&self.providers.selection_ranges);
        let positions: Vec<_> = positions.into_iter().map(position_from_lsp).collect();

        spawn_instrumented(OPERATION, uri, move || {
            Some(provider.provide_selection_ranges(&file, &positions))
        })
    }
}

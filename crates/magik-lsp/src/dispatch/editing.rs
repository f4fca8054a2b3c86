//! Queries that help write or rewrite magik source.
//!
//! All of these are restricted to magik sources; definition files get the
//! neutral value.

use super::{Pending, RequestDispatcher, neutral, ready, spawn_instrumented};
use crate::convert::{code_action_to_lsp, position_from_lsp, range_from_lsp, text_edit_to_lsp};
use std::sync::Arc;
use tower_lsp_server::ls_types::{
    CodeActionContext, CodeActionResponse, CompletionResponse, FormattingOptions, InlayHint,
    Position, PrepareRenameResponse, Range, SignatureHelp, TextEdit, Uri, WorkspaceEdit,
};

fn empty_signature_help() -> SignatureHelp {
    SignatureHelp {
        signatures: Vec::new(),
        active_signature: None,
        active_parameter: None,
    }
}

impl RequestDispatcher {
    /// `textDocument/signatureHelp`.
    pub fn signature_help(&self, uri: &Uri, position: Position) -> Pending<Option<SignatureHelp>> {
        const OPERATION: &str = "signature_help";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, Some(empty_signature_help()));
        };
        let provider = Arc::clone(&self.providers.signature_help);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            provider.provide_signature_help(&file, position)
        })
    }

    /// `textDocument/completion`.
    pub fn completion(&self, uri: &Uri, position: Position) -> Pending<Option<CompletionResponse>> {
        const OPERATION: &str = "completion";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, Some(CompletionResponse::Array(Vec::new())));
        };
        let provider = Arc::clone(&self.providers.completion);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            Some(CompletionResponse::Array(
                provider.provide_completions(&file, position),
            ))
        })
    }

    /// `textDocument/formatting`.
    ///
    /// A source the provider cannot format yields no edits and a warning.
    pub fn formatting(
        &self,
        uri: &Uri,
        options: FormattingOptions,
    ) -> Pending<Option<Vec<TextEdit>>> {
        const OPERATION: &str = "formatting";

        if !self.formatting_enabled() {
            tracing::debug!(
                operation = OPERATION,
                uri = uri.as_str(),
                "formatting disabled by configuration"
            );
            return ready(Some(Vec::new()));
        }
        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, Some(Vec::new()));
        };
        let provider = Arc::clone(&self.providers.formatting);

        spawn_instrumented(OPERATION, uri, move || {
            if !provider.can_format(&file) {
                tracing::warn!("cannot format {:?}, source is not formattable", file.uri());
                return Some(Vec::new());
            }

            let edits = provider.provide_formatting(&file, &options);
            Some(edits.into_iter().map(text_edit_to_lsp).collect())
        })
    }

    /// `textDocument/prepareRename`.
    pub fn prepare_rename(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Pending<Option<PrepareRenameResponse>> {
        const OPERATION: &str = "prepare_rename";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, None);
        };
        let provider = Arc::clone(&self.providers.rename);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            provider.provide_prepare_rename(&file, position)
        })
    }

    /// `textDocument/rename`.
    pub fn rename(
        &self,
        uri: &Uri,
        position: Position,
        new_name: String,
    ) -> Pending<Option<WorkspaceEdit>> {
        const OPERATION: &str = "rename";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, None);
        };
        let provider = Arc::clone(&self.providers.rename);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            provider.provide_rename(&file, position, &new_name)
        })
    }

    /// `textDocument/inlayHint`.
    pub fn inlay_hint(&self, uri: &Uri, range: Range) -> Pending<Option<Vec<InlayHint>>> {
        const OPERATION: &str = "inlay_hint";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, Some(Vec::new()));
        };
        let provider = Arc::clone(&self.providers.inlay_hints);
        let range = range_from_lsp(range);

        spawn_instrumented(OPERATION, uri, move || {
            Some(provider.provide_inlay_hints(&file, range))
        })
    }

    /// `textDocument/codeAction`. Every action edits the requesting document.
    pub fn code_action(
        &self,
        uri: &Uri,
        range: Range,
        context: CodeActionContext,
    ) -> Pending<Option<CodeActionResponse>> {
        const OPERATION: &str = "code_action";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, Some(Vec::new()));
        };
        let provider = Arc::clone(&self.providers.code_actions);
        let range = range_from_lsp(range);
        let target = uri.clone();

        spawn_instrumented(OPERATION, uri, move || {
            let actions = provider.provide_code_actions(&file, range, &context);
            Some(
                actions
                    .into_iter()
                    .map(|action| code_action_to_lsp(&target, action))
                    .collect(),
            )
        })
    }
}

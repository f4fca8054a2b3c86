//! Document lifecycle: open, change, close and save notifications.
//!
//! Every handler here is synchronous. It finishes its store write, and the
//! diagnostics recomputation that goes with it, before returning, so the
//! store reflects the latest notification before any later request is
//! dispatched against it.

use super::store::DocumentStore;
use crate::diagnostics::{DiagnosticsPublisher, PublishDiagnostics};
use crate::error::Result;
use magik_core::{AnalysisConfiguration, ContentClassifier};
use std::sync::Arc;
use tower_lsp_server::ls_types::{TextDocumentContentChangeEvent, TextDocumentItem, Uri};

#[derive(Debug)]
pub struct DocumentLifecycle {
    documents: Arc<DocumentStore>,
    classifier: ContentClassifier,
    publisher: DiagnosticsPublisher,
}

impl DocumentLifecycle {
    pub fn new(
        documents: Arc<DocumentStore>,
        classifier: ContentClassifier,
        publisher: DiagnosticsPublisher,
    ) -> Self {
        Self {
            documents,
            classifier,
            publisher,
        }
    }

    pub fn documents(&self) -> &Arc<DocumentStore> {
        &self.documents
    }

    /// Applies configuration received from the client.
    pub fn configure(&self, analysis: AnalysisConfiguration, diagnostics_enabled: bool) {
        self.classifier.configure(analysis);
        self.publisher.set_enabled(diagnostics_enabled);
    }

    /// Handles `textDocument/didOpen`.
    ///
    /// Reopening an identity replaces the earlier document outright.
    ///
    /// # Errors
    ///
    /// Fails when the client declared a language id this server never
    /// registered for. The store is left untouched in that case.
    pub fn open(&self, item: TextDocumentItem) -> Result<Option<PublishDiagnostics>> {
        let TextDocumentItem {
            uri,
            language_id,
            text,
            ..
        } = item;

        let document = self.classifier.classify(&language_id, uri.clone(), text)?;
        tracing::info!("opened {:?} as {}", uri, document.language_id());

        if self.documents.put(uri, document.clone()).is_some() {
            tracing::debug!("reopen replaced the previous document");
        }

        Ok(self.publisher.on_opened_or_changed(&document))
    }

    /// Handles `textDocument/didChange` under full-document sync.
    ///
    /// Only the first content change is honored and its text becomes the
    /// whole document. The document kind fixed at open is kept.
    pub fn change(
        &self,
        uri: Uri,
        changes: Vec<TextDocumentContentChangeEvent>,
    ) -> Option<PublishDiagnostics> {
        let Some(change) = changes.into_iter().next() else {
            tracing::debug!("change for {:?} carried no content, ignoring", uri);
            return None;
        };

        // A close may have raced ahead of this change.
        let Some(current) = self.documents.get(&uri) else {
            tracing::debug!("change for {:?} which is not open, ignoring", uri);
            return None;
        };

        let document = self.classifier.build(current.kind(), uri.clone(), change.text);
        self.documents.put(uri, document.clone());

        self.publisher.on_opened_or_changed(&document)
    }

    /// Handles `textDocument/didClose`.
    ///
    /// Always yields a clearing publish event, even when the document was not
    /// open or was never checked.
    pub fn close(&self, uri: Uri) -> PublishDiagnostics {
        match self.documents.remove(&uri) {
            Some(document) => tracing::info!("closed {:?} ({})", uri, document.language_id()),
            None => tracing::debug!("close for {:?} which is not open", uri),
        }

        self.publisher.on_closed(uri)
    }

    /// Handles `textDocument/didSave`. Saving does not change the model.
    pub fn save(&self, uri: &Uri) {
        tracing::debug!("saved {:?}", uri);
    }
}

//! Synchronous diagnostics publication.
//!
//! Diagnostics are recomputed on the notification path itself, so a publish
//! event always describes exactly the text that triggered it.

use magik_core::{DiagnosticsProvider, OpenedDocument};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tower_lsp_server::ls_types::{Diagnostic, Uri};

/// A `textDocument/publishDiagnostics` payload waiting to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishDiagnostics {
    pub uri: Uri,
    pub diagnostics: Vec<Diagnostic>,
}

impl PublishDiagnostics {
    /// Payload clearing everything previously published for `uri`.
    pub fn clear(uri: Uri) -> Self {
        Self {
            uri,
            diagnostics: Vec::new(),
        }
    }
}

pub struct DiagnosticsPublisher {
    provider: Arc<dyn DiagnosticsProvider>,
    enabled: AtomicBool,
}

impl DiagnosticsPublisher {
    pub fn new(provider: Arc<dyn DiagnosticsProvider>) -> Self {
        Self {
            provider,
            enabled: AtomicBool::new(true),
        }
    }

    /// Turns publication on open/change on or off. Clearing on close is
    /// unaffected.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Computes diagnostics for a freshly stored document.
    ///
    /// Only magik sources are checked; definition files never produce a
    /// publish event.
    pub fn on_opened_or_changed(&self, document: &OpenedDocument) -> Option<PublishDiagnostics> {
        let file = document.as_typed()?;

        if !self.is_enabled() {
            tracing::trace!("diagnostics disabled, skipping {:?}", file.uri());
            return None;
        }

        let diagnostics = self.provider.provide_diagnostics(file);
        tracing::debug!(
            "computed {} diagnostic(s) for {:?}",
            diagnostics.len(),
            file.uri()
        );

        Some(PublishDiagnostics {
            uri: file.uri().clone(),
            diagnostics,
        })
    }

    pub fn on_closed(&self, uri: Uri) -> PublishDiagnostics {
        PublishDiagnostics::clear(uri)
    }
}

impl std::fmt::Debug for DiagnosticsPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsPublisher")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

//! Request dispatch.
//!
//! Each query resolves its document snapshot synchronously, picks the
//! provider for the document's kind and hands the computation to the
//! blocking worker pool. The returned future is never cancelled: if the
//! document is replaced or closed meanwhile, the computation still runs to
//! completion against the snapshot it captured.
//!
//! Operations are grouped by what they answer:
//! - [`navigation`]: hover, implementation, definition, references, type hierarchy
//! - [`editing`]: signature help, completion, formatting, rename, inlay hints, code actions
//! - [`structure`]: folding ranges, semantic tokens, document symbols, selection ranges

mod editing;
mod navigation;
mod structure;

use crate::document::DocumentStore;
use crate::error::{LspError, Result};
use crate::providers::Providers;
use futures::FutureExt;
use futures::future::BoxFuture;
use magik_core::OpenedDocument;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tower_lsp_server::ls_types::Uri;

/// A query result that may still be computing.
pub type Pending<T> = BoxFuture<'static, Result<T>>;

/// Tracing target for per-operation timings.
pub const DURATION_TARGET: &str = "magik_lsp::duration";

pub struct RequestDispatcher {
    documents: Arc<DocumentStore>,
    providers: Providers,
    formatting_enabled: AtomicBool,
}

impl RequestDispatcher {
    pub fn new(documents: Arc<DocumentStore>, providers: Providers) -> Self {
        Self {
            documents,
            providers,
            formatting_enabled: AtomicBool::new(true),
        }
    }

    pub fn providers(&self) -> &Providers {
        &self.providers
    }

    pub fn set_formatting_enabled(&self, enabled: bool) {
        self.formatting_enabled.store(enabled, Ordering::Relaxed);
    }

    fn formatting_enabled(&self) -> bool {
        self.formatting_enabled.load(Ordering::Relaxed)
    }

    fn snapshot(&self, uri: &Uri) -> Option<OpenedDocument> {
        self.documents.get(uri)
    }
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("documents", &self.documents.len())
            .field("formatting_enabled", &self.formatting_enabled())
            .finish_non_exhaustive()
    }
}

/// Runs `work` on the blocking pool inside a span for `operation`.
///
/// Must be called from within a tokio runtime. A panic inside `work`
/// surfaces as [`LspError::Worker`].
fn spawn_instrumented<T, F>(operation: &'static str, uri: &Uri, work: F) -> Pending<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let span = tracing::debug_span!("dispatch", operation, uri = uri.as_str());

    let handle = tokio::task::spawn_blocking(move || {
        span.in_scope(|| {
            let started = Instant::now();
            let result = work();
            tracing::trace!(
                target: DURATION_TARGET,
                operation,
                elapsed_us = started.elapsed().as_micros() as u64,
                "{operation} finished"
            );
            result
        })
    });

    async move {
        handle
            .await
            .map_err(|source| LspError::Worker { operation, source })
    }
    .boxed()
}

/// Answers `operation` with `value` without touching a worker.
fn neutral<T: Send + 'static>(operation: &'static str, uri: &Uri, value: T) -> Pending<T> {
    tracing::debug!(
        operation,
        uri = uri.as_str(),
        "document not open or kind not supported"
    );
    ready(value)
}

/// Wraps `value` in an already completed [`Pending`].
fn ready<T: Send + 'static>(value: T) -> Pending<T> {
    futures::future::ready(Ok(value)).boxed()
}

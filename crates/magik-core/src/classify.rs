//! Content classification: language id + text into a typed document.

use crate::analysis::{
    AnalysisConfiguration, AnalysisContext, DefinitionKeeper, EmptyDefinitionKeeper,
};
use crate::document::{
    DocumentKind, MagikTypedFile, ModuleDefFile, OpenedDocument, ProductDefFile, SourceFile,
};
use crate::error::{MagikError, Result};
use std::sync::{Arc, PoisonError, RwLock};
use tower_lsp_server::ls_types::Uri;

/// Builds [`OpenedDocument`]s from the language id a client declared.
///
/// Holds the workspace definition index handed to every document and the
/// analysis configuration handed to typed sources. The configuration can be
/// replaced at runtime; documents built earlier keep the configuration they
/// were built with.
pub struct ContentClassifier {
    definitions: Arc<dyn DefinitionKeeper>,
    analysis: RwLock<Arc<AnalysisConfiguration>>,
}

impl ContentClassifier {
    pub fn new(definitions: Arc<dyn DefinitionKeeper>, analysis: AnalysisConfiguration) -> Self {
        Self {
            definitions,
            analysis: RwLock::new(Arc::new(analysis)),
        }
    }

    /// Replaces the analysis configuration used for documents built from now on.
    pub fn configure(&self, analysis: AnalysisConfiguration) {
        tracing::debug!("analysis configuration replaced: {:?}", analysis);
        *self
            .analysis
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(analysis);
    }

    /// Current analysis configuration.
    pub fn analysis(&self) -> Arc<AnalysisConfiguration> {
        self.analysis
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Builds the document for `language_id`.
    ///
    /// An unrecognized language id means the client opened something the
    /// server never registered for; this is reported as
    /// [`MagikError::UnsupportedLanguage`] rather than guessed around.
    pub fn classify(&self, language_id: &str, uri: Uri, text: String) -> Result<OpenedDocument> {
        let Some(kind) = DocumentKind::from_language_id(language_id) else {
            tracing::warn!("no document kind for language id {:?}", language_id);
            return Err(MagikError::UnsupportedLanguage(language_id.to_string()));
        };
        Ok(self.build(kind, uri, text))
    }

    /// Builds a document of a known kind.
    pub fn build(&self, kind: DocumentKind, uri: Uri, text: String) -> OpenedDocument {
        let source = SourceFile::new(uri, text, Arc::clone(&self.definitions));

        match kind {
            DocumentKind::ProductDefinition => {
                OpenedDocument::ProductDefinition(Arc::new(ProductDefFile::new(source)))
            }
            DocumentKind::ModuleDefinition => {
                OpenedDocument::ModuleDefinition(Arc::new(ModuleDefFile::new(source)))
            }
            DocumentKind::TypedSource => {
                let context = AnalysisContext::new(
                    self.analysis(),
                    source.text(),
                    Arc::clone(&self.definitions),
                );
                OpenedDocument::TypedSource(Arc::new(MagikTypedFile::new(source, context)))
            }
        }
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(EmptyDefinitionKeeper), AnalysisConfiguration::default())
    }
}

impl std::fmt::Debug for ContentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentClassifier")
            .field("analysis", &self.analysis())
            .finish_non_exhaustive()
    }
}

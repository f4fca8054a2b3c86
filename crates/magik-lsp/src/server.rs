use crate::config::MagikConfig;
use crate::diagnostics::{DiagnosticsPublisher, PublishDiagnostics};
use crate::dispatch::RequestDispatcher;
use crate::document::{DocumentLifecycle, DocumentStore};
use crate::providers::Providers;
use magik_core::ContentClassifier;
use std::sync::Arc;
use tower_lsp_server::ls_types::request::{GotoImplementationParams, GotoImplementationResponse};
use tower_lsp_server::ls_types::{
    CodeActionParams, CodeActionResponse, CompletionParams, CompletionResponse,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    DidSaveTextDocumentParams, DocumentFormattingParams, DocumentSymbolParams,
    DocumentSymbolResponse, FoldingRange, FoldingRangeParams, GotoDefinitionParams,
    GotoDefinitionResponse, Hover, HoverParams, InitializeParams, InitializeResult,
    InitializedParams, InlayHint, InlayHintParams, Location, MessageType, PrepareRenameResponse,
    ReferenceParams, RenameParams, SelectionRange, SelectionRangeParams, SemanticTokensParams,
    SemanticTokensResult, ServerCapabilities, ServerInfo, SignatureHelp, SignatureHelpParams,
    TextDocumentPositionParams, TextDocumentSyncCapability, TextDocumentSyncKind, TextEdit,
    TypeHierarchyItem, TypeHierarchyPrepareParams, TypeHierarchySubtypesParams,
    TypeHierarchySupertypesParams, WorkspaceEdit,
};
use tower_lsp_server::{Client, LanguageServer, jsonrpc::Result};

pub struct Backend {
    pub(crate) client: Client,
    lifecycle: DocumentLifecycle,
    dispatcher: RequestDispatcher,
}

impl Backend {
    /// Creates a backend whose providers declare nothing and answer every
    /// query with an empty result.
    pub fn new(client: Client) -> Self {
        Self::with_providers(client, Providers::default())
    }

    /// Creates a backend dispatching to the given providers.
    pub fn with_providers(client: Client, providers: Providers) -> Self {
        let documents = Arc::new(DocumentStore::new());
        let lifecycle = DocumentLifecycle::new(
            Arc::clone(&documents),
            ContentClassifier::default(),
            DiagnosticsPublisher::new(Arc::clone(&providers.diagnostics)),
        );
        let dispatcher = RequestDispatcher::new(documents, providers);

        Self {
            client,
            lifecycle,
            dispatcher,
        }
    }

    fn apply_config(&self, config: MagikConfig) {
        tracing::debug!("applying configuration: {:?}", config);
        self.dispatcher.set_formatting_enabled(config.formatting.enabled);
        self.lifecycle
            .configure(config.analysis, config.diagnostics.enabled);
    }

    fn server_capabilities(providers: &Providers) -> ServerCapabilities {
        let mut capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            ..Default::default()
        };
        providers.set_capabilities(&mut capabilities);
        capabilities
    }

    async fn publish(&self, event: PublishDiagnostics) {
        self.client
            .publish_diagnostics(event.uri, event.diagnostics, None)
            .await;
    }
}

impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("initializing magik-lsp server");

        if let Some(init_options) = params.initialization_options {
            match MagikConfig::from_value(init_options) {
                Ok(config) => self.apply_config(config),
                Err(e) => tracing::warn!("ignoring initialization options, using defaults: {}", e),
            }
        }

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(self.dispatcher.providers()),
            server_info: Some(ServerInfo {
                name: "magik-lsp".into(),
                version: Some(env!("CARGO_PKG_VERSION").into()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("magik-lsp server initialized");
        self.client
            .log_message(MessageType::INFO, "magik-lsp ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("shutting down magik-lsp server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();

        match self.lifecycle.open(params.text_document) {
            Ok(Some(event)) => self.publish(event).await,
            Ok(None) => {}
            Err(e) => {
                tracing::error!("failed to open document {:?}: {}", uri, e);
                self.client
                    .log_message(
                        MessageType::ERROR,
                        format!("Cannot open {}: {}", uri.as_str(), e),
                    )
                    .await;
            }
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("document changed: {:?}", uri);

        if let Some(event) = self.lifecycle.change(uri, params.content_changes) {
            self.publish(event).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let event = self.lifecycle.close(params.text_document.uri);
        self.publish(event).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        self.lifecycle.save(&params.text_document.uri);
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let params = params.text_document_position_params;
        Ok(self
            .dispatcher
            .hover(&params.text_document.uri, params.position)
            .await?)
    }

    async fn goto_implementation(
        &self,
        params: GotoImplementationParams,
    ) -> Result<Option<GotoImplementationResponse>> {
        let params = params.text_document_position_params;
        Ok(self
            .dispatcher
            .implementation(&params.text_document.uri, params.position)
            .await?)
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        let params = params.text_document_position_params;
        Ok(self
            .dispatcher
            .signature_help(&params.text_document.uri, params.position)
            .await?)
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        Ok(self
            .dispatcher
            .folding_range(&params.text_document.uri)
            .await?)
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let params = params.text_document_position_params;
        Ok(self
            .dispatcher
            .definition(&params.text_document.uri, params.position)
            .await?)
    }

    async fn references(&self, params: ReferenceParams) -> Result<Option<Vec<Location>>> {
        let params = params.text_document_position;
        Ok(self
            .dispatcher
            .references(&params.text_document.uri, params.position)
            .await?)
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let params = params.text_document_position;
        Ok(self
            .dispatcher
            .completion(&params.text_document.uri, params.position)
            .await?)
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        Ok(self
            .dispatcher
            .formatting(&params.text_document.uri, params.options)
            .await?)
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        Ok(self
            .dispatcher
            .semantic_tokens_full(&params.text_document.uri)
            .await?)
    }

    async fn prepare_rename(
        &self,
        params: TextDocumentPositionParams,
    ) -> Result<Option<PrepareRenameResponse>> {
        Ok(self
            .dispatcher
            .prepare_rename(&params.text_document.uri, params.position)
            .await?)
    }

    async fn rename(&self, params: RenameParams) -> Result<Option<WorkspaceEdit>> {
        let position = params.text_document_position;
        Ok(self
            .dispatcher
            .rename(
                &position.text_document.uri,
                position.position,
                params.new_name,
            )
            .await?)
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        Ok(self
            .dispatcher
            .document_symbol(&params.text_document.uri)
            .await?)
    }

    async fn selection_range(
        &self,
        params: SelectionRangeParams,
    ) -> Result<Option<Vec<SelectionRange>>> {
        Ok(self
            .dispatcher
            .selection_range(&params.text_document.uri, params.positions)
            .await?)
    }

    async fn prepare_type_hierarchy(
        &self,
        params: TypeHierarchyPrepareParams,
    ) -> Result<Option<Vec<TypeHierarchyItem>>> {
        let params = params.text_document_position_params;
        Ok(self
            .dispatcher
            .prepare_type_hierarchy(&params.text_document.uri, params.position)
            .await?)
    }

    async fn subtypes(
        &self,
        params: TypeHierarchySubtypesParams,
    ) -> Result<Option<Vec<TypeHierarchyItem>>> {
        Ok(self.dispatcher.subtypes(params.item).await?)
    }

    async fn supertypes(
        &self,
        params: TypeHierarchySupertypesParams,
    ) -> Result<Option<Vec<TypeHierarchyItem>>> {
        Ok(self.dispatcher.supertypes(params.item).await?)
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        Ok(self
            .dispatcher
            .inlay_hint(&params.text_document.uri, params.range)
            .await?)
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        Ok(self
            .dispatcher
            .code_action(&params.text_document.uri, params.range, params.context)
            .await?)
    }
}

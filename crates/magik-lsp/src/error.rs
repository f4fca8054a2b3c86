use magik_core::MagikError;
use thiserror::Error;
use tokio::task::JoinError;
use tower_lsp_server::jsonrpc;

/// Error types for the magik-lsp server.
///
/// Only programming-error class failures end up here. A query against a
/// document that is not open, or against a document kind the feature does not
/// cover, is answered with an empty result instead.
#[derive(Error, Debug)]
pub enum LspError {
    #[error(transparent)]
    Core(#[from] MagikError),

    #[error("{operation} worker failed: {source}")]
    Worker {
        operation: &'static str,
        #[source]
        source: JoinError,
    },
}

impl From<LspError> for jsonrpc::Error {
    fn from(error: LspError) -> Self {
        let mut rpc_error = Self::internal_error();
        rpc_error.message = error.to_string().into();
        rpc_error
    }
}

/// Convenience type alias for `Result<T, LspError>`.
pub type Result<T> = std::result::Result<T, LspError>;

pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod providers;
pub mod server;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{LspError, Result};
pub use providers::Providers;
pub use server::Backend;

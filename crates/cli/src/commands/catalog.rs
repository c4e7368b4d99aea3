//! Catalog inspection command.
//!
//! # Usage
//!
//! ```bash
//! # Normalized document (falls back to the built-in one on failure)
//! bandhan catalog
//!
//! # Raw document exactly as the source serves it
//! bandhan catalog --raw --source https://example.com/current.json
//! ```

use bandhan_storefront::catalog::{CatalogError, LoadOutcome, detect_shape};
use thiserror::Error;

use super::{catalog_loader, emit};
use crate::StoreArgs;

/// Errors that can occur while printing the catalog.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Print the configuration document as pretty JSON.
///
/// # Errors
///
/// Returns an error if the loader cannot be built, if `raw` is set and the
/// source cannot be read, or if stdout is closed.
pub async fn print(store: &StoreArgs, raw: bool) -> Result<(), CatalogCommandError> {
    let loader = catalog_loader(store)?;

    let json = if raw {
        let value = loader.fetch_raw().await?;
        tracing::info!(shape = ?detect_shape(&value), "Fetched raw configuration");
        serde_json::to_string_pretty(&value)?
    } else {
        match loader.load_outcome().await {
            LoadOutcome::Loaded(document) => serde_json::to_string_pretty(&document)?,
            LoadOutcome::Fallback { document, reason } => {
                tracing::warn!(
                    source = %loader.source(),
                    error = %reason,
                    "Using default configuration data"
                );
                serde_json::to_string_pretty(&document)?
            }
        }
    };

    emit(&json)?;
    Ok(())
}

//! Static page rendering command.
//!
//! # Usage
//!
//! ```bash
//! bandhan render --out dist/index.html
//! bandhan --source https://example.com/current.json render -o index.html
//! ```

use std::path::{Path, PathBuf};

use bandhan_storefront::catalog::CatalogError;
use bandhan_storefront::routes::home::render_page;
use thiserror::Error;

use super::{catalog_loader, open_cart};
use crate::StoreArgs;

/// Errors that can occur while rendering the page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render the storefront page with the saved cart and write it to `out`.
///
/// # Errors
///
/// Returns an error if the template fails or the file cannot be written.
pub async fn render(store: &StoreArgs, out: &Path) -> Result<(), RenderError> {
    let loader = catalog_loader(store)?;
    let document = loader.load().await;
    let cart = open_cart(store);

    let html = render_page(&document, cart.lines())?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RenderError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(out, &html).map_err(|source| RenderError::Write {
        path: out.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %out.display(),
        bytes = html.len(),
        brand = %document.brand.name,
        "Page rendered"
    );
    Ok(())
}

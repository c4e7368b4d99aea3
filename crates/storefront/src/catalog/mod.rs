//! Catalog configuration loading.
//!
//! # Architecture
//!
//! - One configuration source, either an `http(s)` URL fetched with `reqwest`
//!   or a path on disk
//! - Raw JSON is normalized into a [`ConfigDocument`] (see [`normalize`])
//! - Normalized documents are cached in memory via `moka` (5 minute TTL by
//!   default); failed loads are never cached
//! - Failures never reach the page: [`CatalogLoader::load`] degrades to the
//!   built-in document, while [`CatalogLoader::load_outcome`] reports why
//!
//! # Example
//!
//! ```rust,ignore
//! use bandhan_storefront::catalog::{CatalogLoader, CatalogSettings};
//!
//! let loader = CatalogLoader::new(&CatalogSettings::default())?;
//! let document = loader.load().await;
//! println!("{}", document.brand.name);
//! ```

mod defaults;
mod hero;
pub mod normalize;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bandhan_core::ConfigDocument;
use moka::future::Cache;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

pub use defaults::builtin_document;
pub use hero::build_hero_slides;
pub use normalize::{DocumentShape, detect_shape, normalize};

/// Where the storefront looks for its configuration unless told otherwise.
pub const DEFAULT_CATALOG_SOURCE: &str = "organizations/bandhan/data/current configuration.json";

/// Errors that can occur while fetching or parsing the configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Catalog source returned HTTP {0}")]
    Status(u16),

    /// Reading the configuration file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The body is not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A configuration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched with HTTP GET.
    Http(Url),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret a source string.
    ///
    /// `http://` and `https://` URLs are fetched, `file://` URLs and anything
    /// else are treated as filesystem paths.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Http(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_or_else(|()| Self::File(PathBuf::from(source)), Self::File),
            _ => Self::File(PathBuf::from(source)),
        }
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_CATALOG_SOURCE))
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Settings for [`CatalogLoader`].
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub source: CatalogSource,
    /// How long a loaded document is reused. Zero disables caching.
    pub cache_ttl: Duration,
    /// Request timeout for HTTP sources.
    pub fetch_timeout: Duration,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            source: CatalogSource::default(),
            cache_ttl: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Result of a load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The source was read and normalized.
    Loaded(ConfigDocument),
    /// The source failed; the built-in document stands in.
    Fallback {
        document: ConfigDocument,
        reason: CatalogError,
    },
}

impl LoadOutcome {
    /// The document to render, whichever way it was obtained.
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        match self {
            Self::Loaded(document) | Self::Fallback { document, .. } => document,
        }
    }

    /// Consume the outcome and keep only the document.
    #[must_use]
    pub fn into_document(self) -> ConfigDocument {
        match self {
            Self::Loaded(document) | Self::Fallback { document, .. } => document,
        }
    }

    /// Whether the built-in document was used.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

// =============================================================================
// CatalogLoader
// =============================================================================

/// Loads and caches the storefront configuration.
///
/// Cheap to clone; clones share the HTTP client and cache.
#[derive(Clone)]
pub struct CatalogLoader {
    inner: Arc<CatalogLoaderInner>,
}

struct CatalogLoaderInner {
    client: reqwest::Client,
    source: CatalogSource,
    cache: Option<Cache<String, ConfigDocument>>,
}

impl CatalogLoader {
    /// Create a loader for the configured source.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(settings.fetch_timeout)
            .build()?;

        let cache = (!settings.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(4)
                .time_to_live(settings.cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(CatalogLoaderInner {
                client,
                source: settings.source.clone(),
                cache,
            }),
        })
    }

    /// The source this loader reads.
    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.inner.source
    }

    /// Fetch and parse the raw document, without normalizing it.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` on network, status, I/O or JSON failure.
    #[instrument(skip(self), fields(source = %self.inner.source))]
    pub async fn fetch_raw(&self) -> Result<Value, CatalogError> {
        info!("Trying to load configuration");

        let body = match &self.inner.source {
            CatalogSource::Http(url) => {
                let response = self.inner.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CatalogError::Status(status.as_u16()));
                }
                response.text().await?
            }
            CatalogSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        Ok(serde_json::from_str(&body)?)
    }

    /// Load the normalized document, reporting whether the fallback was used.
    pub async fn load_outcome(&self) -> LoadOutcome {
        let key = self.inner.source.to_string();

        if let Some(cache) = &self.inner.cache
            && let Some(document) = cache.get(&key).await
        {
            return LoadOutcome::Loaded(document);
        }

        match self.fetch_raw().await {
            Ok(raw) => {
                let document = normalize(raw);
                if let Some(cache) = &self.inner.cache {
                    cache.insert(key, document.clone()).await;
                }
                info!(source = %self.inner.source, "Configuration loaded");
                LoadOutcome::Loaded(document)
            }
            Err(reason) => LoadOutcome::Fallback {
                document: builtin_document(),
                reason,
            },
        }
    }

    /// Load the normalized document. Never fails.
    ///
    /// Any failure is logged and the built-in document is returned.
    pub async fn load(&self) -> ConfigDocument {
        let outcome = self.load_outcome().await;
        if let LoadOutcome::Fallback { reason, .. } = &outcome {
            warn!(
                source = %self.inner.source,
                error = %reason,
                "Failed to load configuration, using default configuration data"
            );
        }
        outcome.into_document()
    }

    /// Drop any cached document so the next load reads the source again.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
        }
    }
}

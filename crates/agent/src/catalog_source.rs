//! Catalog loading at the I/O edge.
//!
//! A [`CatalogCache`] fetches the storefront once, bounded by a timeout, and
//! keeps the snapshot until it is invalidated. Any failure degrades to the
//! built-in catalog so the deterministic engines stay available.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use stackcoach_core::config::{CatalogConfig, CatalogSourceKind};
use stackcoach_core::{Catalog, ExternalProduct};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CatalogSourceError {
    #[error("catalog source is misconfigured: {0}")]
    Misconfigured(String),
    #[error("catalog fetch timed out after {0:?}")]
    Timeout(Duration),
    #[error("catalog transport failure: {0}")]
    Transport(String),
    #[error("catalog source returned HTTP {status}")]
    Status { status: u16 },
    #[error("catalog payload was malformed: {0}")]
    MalformedPayload(String),
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self) -> Result<Vec<ExternalProduct>, CatalogSourceError>;
}

/// Storefront payloads come either as a bare array or wrapped in `products`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductsPayload {
    Bare(Vec<ExternalProduct>),
    Wrapped { products: Vec<ExternalProduct> },
}

impl From<ProductsPayload> for Vec<ExternalProduct> {
    fn from(payload: ProductsPayload) -> Self {
        match payload {
            ProductsPayload::Bare(products) | ProductsPayload::Wrapped { products } => products,
        }
    }
}

pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| CatalogSourceError::Transport(error.to_string()))?;
        Ok(Self { client, url: url.into() })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self) -> Result<Vec<ExternalProduct>, CatalogSourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|error| CatalogSourceError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogSourceError::Status { status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|error| CatalogSourceError::Transport(error.to_string()))?;
        serde_json::from_str::<ProductsPayload>(&body)
            .map(Into::into)
            .map_err(|error| CatalogSourceError::MalformedPayload(error.to_string()))
    }
}

/// In-memory source, mainly for tests and fixtures.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalogSource {
    products: Vec<ExternalProduct>,
}

impl StaticCatalogSource {
    pub fn new(products: Vec<ExternalProduct>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self) -> Result<Vec<ExternalProduct>, CatalogSourceError> {
        Ok(self.products.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOrigin {
    Builtin,
    Remote,
    BuiltinFallback,
}

#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
    pub catalog: Arc<Catalog>,
    pub origin: SnapshotOrigin,
    pub fetched_at: DateTime<Utc>,
    pub fallback_reason: Option<String>,
}

pub struct CatalogCache {
    source: Option<Arc<dyn CatalogSource>>,
    timeout: Duration,
    snapshot: OnceCell<Arc<CatalogSnapshot>>,
}

impl CatalogCache {
    pub fn builtin() -> Self {
        Self { source: None, timeout: Duration::from_secs(1), snapshot: OnceCell::new() }
    }

    pub fn new(source: Arc<dyn CatalogSource>, timeout: Duration) -> Self {
        Self { source: Some(source), timeout, snapshot: OnceCell::new() }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogSourceError> {
        match config.source {
            CatalogSourceKind::Builtin => Ok(Self::builtin()),
            CatalogSourceKind::Remote => {
                let url = config
                    .url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| {
                        CatalogSourceError::Misconfigured("remote catalog requires a url".to_string())
                    })?;
                let timeout = Duration::from_secs(config.timeout_secs);
                let source = HttpCatalogSource::new(url, timeout)?;
                Ok(Self::new(Arc::new(source), timeout))
            }
        }
    }

    /// The session snapshot, fetched on first use.
    pub async fn get(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.get_or_init(|| async { Arc::new(self.load().await) }).await.clone()
    }

    /// Drops the cached snapshot so the next [`get`](Self::get) fetches again.
    pub fn invalidate(&mut self) {
        self.snapshot.take();
    }

    async fn load(&self) -> CatalogSnapshot {
        let Some(source) = &self.source else {
            return snapshot(Catalog::builtin(), SnapshotOrigin::Builtin, None);
        };

        let result = match tokio::time::timeout(self.timeout, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(CatalogSourceError::Timeout(self.timeout)),
        };

        match result {
            Ok(products) => {
                let catalog = Catalog::from_external(products);
                if catalog.list_active().next().is_none() {
                    return fallback(source.name(), "storefront returned no active products");
                }

                info!(
                    event_name = "agent.catalog.fetched",
                    source = source.name(),
                    products = catalog.len(),
                    "catalog snapshot fetched"
                );
                snapshot(catalog, SnapshotOrigin::Remote, None)
            }
            Err(error) => fallback(source.name(), &error.to_string()),
        }
    }
}

fn snapshot(
    catalog: Catalog,
    origin: SnapshotOrigin,
    fallback_reason: Option<String>,
) -> CatalogSnapshot {
    CatalogSnapshot { catalog: Arc::new(catalog), origin, fetched_at: Utc::now(), fallback_reason }
}

fn fallback(source: &str, reason: &str) -> CatalogSnapshot {
    warn!(
        event_name = "agent.catalog.fetch_failed",
        source,
        reason,
        "catalog fetch failed; using built-in catalog"
    );
    snapshot(Catalog::builtin(), SnapshotOrigin::BuiltinFallback, Some(reason.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use stackcoach_core::ExternalProduct;

    use super::{
        CatalogCache, CatalogSource, CatalogSourceError, SnapshotOrigin, StaticCatalogSource,
    };

    fn product(title: &str) -> ExternalProduct {
        ExternalProduct {
            id: format!("gid://{title}"),
            title: title.to_string(),
            description: String::new(),
            price: Decimal::new(1999, 2),
            currency: "USD".to_string(),
            available: true,
            images: Vec::new(),
            tags: Vec::new(),
            product_type: None,
            variant_id: None,
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch(&self) -> Result<Vec<ExternalProduct>, CatalogSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![product("Creatine Monohydrate")])
        }
    }

    struct SlowSource;

    #[async_trait]
    impl CatalogSource for SlowSource {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn fetch(&self) -> Result<Vec<ExternalProduct>, CatalogSourceError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn remote_snapshot_is_fetched_once_until_invalidated() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let mut cache = CatalogCache::new(source.clone(), Duration::from_secs(1));

        let first = cache.get().await;
        let second = cache.get().await;
        assert_eq!(first.origin, SnapshotOrigin::Remote);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        cache.invalidate();
        let third = cache.get().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(third.catalog.by_canonical_name("Creatine Monohydrate").is_some());
        assert_eq!(second.fetched_at, first.fetched_at);
        assert!(third.fetched_at >= first.fetched_at);
    }

    #[tokio::test]
    async fn slow_source_falls_back_to_builtin() {
        let cache = CatalogCache::new(Arc::new(SlowSource), Duration::from_millis(20));

        let snapshot = cache.get().await;

        assert_eq!(snapshot.origin, SnapshotOrigin::BuiltinFallback);
        assert!(snapshot.fallback_reason.as_deref().unwrap_or_default().contains("timed out"));
        assert!(snapshot.catalog.by_canonical_name("Magnesium Glycinate").is_some());
    }

    #[tokio::test]
    async fn storefront_without_active_products_falls_back() {
        let mut sold_out = product("Melatonin");
        sold_out.available = false;
        let cache = CatalogCache::new(
            Arc::new(StaticCatalogSource::new(vec![sold_out])),
            Duration::from_secs(1),
        );

        assert_eq!(cache.get().await.origin, SnapshotOrigin::BuiltinFallback);
    }

    #[tokio::test]
    async fn builtin_cache_never_reports_a_fallback() {
        let snapshot = CatalogCache::builtin().get().await;

        assert_eq!(snapshot.origin, SnapshotOrigin::Builtin);
        assert!(snapshot.fallback_reason.is_none());
    }

    #[test]
    fn wrapped_and_bare_payloads_parse() {
        let bare: super::ProductsPayload =
            serde_json::from_str(r#"[{"id":"1","title":"Biotin","price":"9.99"}]"#).expect("bare");
        let wrapped: super::ProductsPayload =
            serde_json::from_str(r#"{"products":[{"id":"1","title":"Biotin","price":"9.99"}]}"#)
                .expect("wrapped");

        assert_eq!(Vec::<ExternalProduct>::from(bare).len(), 1);
        assert_eq!(Vec::<ExternalProduct>::from(wrapped).len(), 1);
    }
}

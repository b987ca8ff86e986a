use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::{PriceCheckError, Result};
use crate::page_fetcher::PageFetcher;
use crate::price_extractor::MetaTagPriceExtractor;
use crate::price_resolver::PriceResolver;
use crate::set_resolver::{SetCatalog, SetResolver};
use crate::utilities::retry::RetryPolicy;

pub const BASE_URL: &str = "https://store.test/";

struct CaptureLogger;

lazy_static::lazy_static! {
    static ref CAPTURED: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
}

static LOGGER: CaptureLogger = CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Installs a logger that keeps every line in memory
pub fn init_log_capture() {
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug));
}

/// Captured lines at `level` or more severe that mention `needle`
pub fn captured_lines(needle: &str, level: Level) -> Vec<String> {
    CAPTURED
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, line)| *l <= level && line.contains(needle))
        .map(|(_, line)| line.clone())
        .collect()
}

pub fn price_page(amount: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta property="og:type" content="product">
    <meta property="product:price:amount" content="{}">
    <meta property="product:price:currency" content="CAD">
  </head>
  <body><div class="price">${}</div></body>
</html>"#,
        amount, amount
    )
}

/// In-memory store: known urls answer with their page, everything else is a 404
#[derive(Clone, Default)]
pub struct FakeStore {
    pages: Arc<Mutex<HashMap<String, String>>>,
    latency: Arc<Mutex<HashMap<String, Duration>>>,
    requested: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_latency(self, url: &str, latency: Duration) -> Self {
        self.latency
            .lock()
            .unwrap()
            .insert(url.to_string(), latency);
        self
    }

    /// Every url fetched so far, in request order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeStore {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let latency = self.latency.lock().unwrap().get(url).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| PriceCheckError::NotFound(url.to_string()))
    }
}

/// Knows a handful of sets, everything else is unknown
pub struct FakeCatalog;

#[async_trait]
impl SetCatalog for FakeCatalog {
    async fn set_name(&self, code: &str) -> Result<String> {
        match code {
            "2ED" => Ok("Unlimited Edition".to_string()),
            "ATQ" => Ok("Antiquities".to_string()),
            "ICE" => Ok("Ice Age".to_string()),
            "APC" => Ok("Apocalypse".to_string()),
            _ => Err(PriceCheckError::UnknownSet(code.to_string())),
        }
    }
}

/// Catalog that is always down
pub struct DownCatalog;

#[async_trait]
impl SetCatalog for DownCatalog {
    async fn set_name(&self, _code: &str) -> Result<String> {
        Err(PriceCheckError::HttpStatus(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
        ))
    }
}

fn test_retry_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10))
}

pub fn resolver_with(store: FakeStore) -> PriceResolver {
    PriceResolver::new(
        BASE_URL,
        Arc::new(store),
        SetResolver::new(Arc::new(FakeCatalog), test_retry_policy()),
        Arc::new(MetaTagPriceExtractor::new()),
    )
}

pub fn resolver_with_failing_catalog(store: FakeStore) -> PriceResolver {
    PriceResolver::new(
        BASE_URL,
        Arc::new(store),
        SetResolver::new(Arc::new(DownCatalog), test_retry_policy()),
        Arc::new(MetaTagPriceExtractor::new()),
    )
}

/// Answers like `FakeCatalog` after a delay, counting every call
#[derive(Clone, Default)]
pub struct CountingCatalog {
    calls: Arc<AtomicUsize>,
}

impl CountingCatalog {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SetCatalog for CountingCatalog {
    async fn set_name(&self, code: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        FakeCatalog.set_name(code).await
    }
}

pub fn resolver_with_catalog(store: FakeStore, catalog: Arc<dyn SetCatalog>) -> PriceResolver {
    PriceResolver::new(
        BASE_URL,
        Arc::new(store),
        SetResolver::new(catalog, test_retry_policy()),
        Arc::new(MetaTagPriceExtractor::new()),
    )
}

/// Resolver that fetches through `fetcher` from `base_url`, with the fake catalog
pub fn resolver_with_fetcher(base_url: &str, fetcher: Arc<dyn PageFetcher>) -> PriceResolver {
    PriceResolver::new(
        base_url,
        fetcher,
        SetResolver::new(Arc::new(FakeCatalog), test_retry_policy()),
        Arc::new(MetaTagPriceExtractor::new()),
    )
}

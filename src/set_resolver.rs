use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::{Mutex, OnceCell};

use crate::error::{PriceCheckError, Result};
use crate::utilities::constants::{SCRYFALL_API_URL, SET_SLUG_OVERRIDES};
use crate::utilities::retry::RetryPolicy;
use crate::utilities::string_manipulators::normalize;

/// Looks up the full name of a set from its code
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SetCatalog: Send + Sync {
    async fn set_name(&self, code: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct ScryfallSet {
    name: String,
}

pub struct ScryfallSetCatalog {
    client: Client,
    base_url: String,
}

impl ScryfallSetCatalog {
    pub fn new(base_url: Option<&str>, client: Client) -> Self {
        ScryfallSetCatalog {
            client,
            base_url: base_url
                .unwrap_or(SCRYFALL_API_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

#[async_trait]
impl SetCatalog for ScryfallSetCatalog {
    async fn set_name(&self, code: &str) -> Result<String> {
        let url = format!(
            "{}/sets/{}",
            self.base_url,
            urlencoding::encode(&code.to_lowercase())
        );
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let set: ScryfallSet = serde_json::from_str(&response.text().await?)?;
            debug!("Set {} is '{}'", code, set.name);
            Ok(set.name)
        } else if status == StatusCode::NOT_FOUND {
            Err(PriceCheckError::UnknownSet(code.to_string()))
        } else {
            Err(PriceCheckError::HttpStatus(status))
        }
    }
}

/// Outcome of one catalog lookup: the slug, or the number of attempts made
/// before the catalog was given up on
type Lookup = std::result::Result<String, u32>;

/// Turns set codes into the set slug used in store urls
pub struct SetResolver {
    catalog: Arc<dyn SetCatalog>,
    retry: RetryPolicy,
    overrides: HashMap<String, String>,
    lookups: Mutex<HashMap<String, Arc<OnceCell<Lookup>>>>,
}

impl SetResolver {
    pub fn new(catalog: Arc<dyn SetCatalog>, retry: RetryPolicy) -> Self {
        let overrides = SET_SLUG_OVERRIDES
            .iter()
            .map(|(code, slug)| (code.to_uppercase(), slug.to_string()))
            .collect();
        SetResolver {
            catalog,
            retry,
            overrides,
            lookups: Mutex::new(HashMap::new()),
        }
    }

    /// Each set code is looked up once per run. Cards that ask for a set while
    /// its lookup is in flight wait for that lookup and share its outcome.
    pub async fn resolve_set_slug(&self, code: &str) -> Result<String> {
        let key = code.trim().to_uppercase();

        if let Some(slug) = self.overrides.get(&key) {
            return Ok(slug.clone());
        }

        let cell = self
            .lookups
            .lock()
            .await
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        match cell.get_or_init(|| self.lookup(&key)).await {
            Ok(slug) => Ok(slug.clone()),
            Err(attempts) => Err(PriceCheckError::CatalogUnavailable {
                code: key.clone(),
                attempts: *attempts,
            }),
        }
    }

    async fn lookup(&self, key: &str) -> Lookup {
        let what = format!("Set lookup for {}", key);
        match self.retry.run(&what, || self.catalog.set_name(key)).await {
            Ok(name) => Ok(normalize(&name)),
            Err((PriceCheckError::UnknownSet(_), _)) => {
                warn!("Set {} is not in the catalog, using the code as slug", key);
                Ok(normalize(key))
            }
            Err((e, attempts)) => {
                error!("Giving up on set {} after {} attempts: {}", key, attempts, e);
                Err(attempts)
            }
        }
    }
}

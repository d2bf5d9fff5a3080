//! URL-keyed page cache
//!
//! Parsed pages are kept for the lifetime of the catalog, keyed by the
//! normalized absolute URL. Entries never expire; callers that need fresh
//! content (the cart) bypass the cache.

use crate::catalog::fetcher::{fetch_bytes, post_form_bytes, post_form_status};
use crate::catalog::session::Session;
use crate::config::HttpConfig;
use crate::encoding::decode_mixed;
use crate::url::normalize_url;
use crate::CatalogError;
use reqwest::StatusCode;
use scraper::Html;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use url::Url;

/// Fetch-or-reuse access to the shop's pages
#[derive(Debug)]
pub struct PageCache {
    session: Session,
    http: HttpConfig,
    entries: Mutex<HashMap<String, Arc<Html>>>,
}

impl PageCache {
    pub fn new(session: Session, http: HttpConfig) -> Self {
        Self {
            session,
            http,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn http(&self) -> &HttpConfig {
        &self.http
    }

    /// Resolves `href` against the shop's base URL
    pub fn resolve(&self, href: &str) -> Result<Url, CatalogError> {
        Ok(normalize_url(self.session.base_url(), href)?)
    }

    /// Returns the parsed page at `href`
    ///
    /// With `use_cache`, a page fetched earlier is returned without any
    /// network call. Otherwise the page is fetched, decoded, parsed and
    /// stored, replacing any earlier entry for the same URL.
    pub async fn document(&self, href: &str, use_cache: bool) -> Result<Arc<Html>, CatalogError> {
        let url = self.resolve(href)?;
        let key = url.to_string();

        if use_cache {
            if let Some(doc) = self.lookup(&key) {
                debug!("Cache hit: {}", key);
                return Ok(doc);
            }
        }

        let bytes = fetch_bytes(self.session.client(), &self.http, &url).await?;
        let doc = Arc::new(parse_page(&bytes));
        self.store(key, Arc::clone(&doc));
        Ok(doc)
    }

    /// POSTs a form to `href` and returns the parsed response page
    ///
    /// Form responses depend on the body, so they are never cached.
    pub async fn document_with_form(&self, href: &str, form: &[(&str, &str)]) -> Result<Html, CatalogError> {
        let url = self.resolve(href)?;
        let bytes = post_form_bytes(self.session.client(), &self.http, &url, form).await?;
        Ok(parse_page(&bytes))
    }

    /// POSTs a form to `href` once and returns the status
    pub async fn submit_form(&self, href: &str, form: &[(&str, &str)]) -> Result<StatusCode, CatalogError> {
        let url = self.resolve(href)?;
        post_form_status(self.session.client(), &url, form).await
    }

    /// True if `href` has a cached page
    pub fn contains(&self, href: &str) -> bool {
        match self.resolve(href) {
            Ok(url) => self.lookup(url.as_str()).is_some(),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lookup(&self, key: &str) -> Option<Arc<Html>> {
        self.lock().get(key).cloned()
    }

    fn store(&self, key: String, doc: Arc<Html>) {
        self.lock().insert(key, doc);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Html>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Decodes a response body with Latin-1 recovery and parses it
pub fn parse_page(bytes: &[u8]) -> Html {
    Html::parse_document(&decode_mixed(bytes))
}

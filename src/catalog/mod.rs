//! The catalog client
//!
//! This module contains the scraping engine, including:
//! - Session login and the shared cookie-bearing client
//! - The URL-keyed page cache
//! - Category tree discovery
//! - Product extraction in quick and full mode
//! - Paginated listing traversal
//! - Lazy upgrade of summary products
//!
//! [`Catalog`] ties them together and is cheap to clone; clones share the
//! session, the page cache and the product registry.

mod cache;
mod cart;
mod categories;
mod extract;
mod fetcher;
mod lazy;
mod pagination;
mod session;

pub use cache::{parse_page, PageCache};
pub use cart::{ADD_TO_CART_PATH, CART_PATH};
pub use categories::{build_category_tree, menu_path, parse_category_tree};
pub use extract::{
    decode_entities, extract_cart_urls, extract_details, extract_listing, extract_listing_urls,
    parse_price, ListingEntry,
};
pub use fetcher::{classify_error, fetch_bytes, with_retry};
pub use lazy::LazyProduct;
pub use pagination::page_links;
pub use session::{build_http_client, Session, LOGIN_PATH};

use crate::config::Config;
use crate::model::{CategoryTree, Product, ProductDetails};
use crate::CatalogError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use url::Url;

/// How much of each product a listing extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMode {
    /// Name, price and URL from the listing page only
    #[default]
    Quick,
    /// Every field, from each product's detail page
    Full,
}

/// Product catalog for one logged-in session
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    pages: PageCache,
    products: Mutex<HashMap<String, Arc<Product>>>,
    categories: CategoryTree,
}

impl Catalog {
    /// Logs in and loads the category tree
    ///
    /// # Arguments
    ///
    /// * `config` - Site and transport configuration
    /// * `username` - Shop account name
    /// * `password` - Shop account password
    ///
    /// # Returns
    ///
    /// * `Ok(Catalog)` - Logged in, categories discovered
    /// * `Err(CatalogError::Auth)` - Login request failed or was refused
    /// * `Err(CatalogError)` - The front page could not be fetched or its menu parsed
    pub async fn connect(config: &Config, username: &str, password: &str) -> Result<Self, CatalogError> {
        let session = Session::open(config, username, password).await?;
        Self::from_session(session, config).await
    }

    /// Builds a catalog on an existing session and loads the category tree
    pub async fn from_session(session: Session, config: &Config) -> Result<Self, CatalogError> {
        let pages = PageCache::new(session, config.http.clone());
        let categories = build_category_tree(&pages).await?;

        Ok(Self {
            inner: Arc::new(Inner {
                pages,
                products: Mutex::new(HashMap::new()),
                categories,
            }),
        })
    }

    /// The category tree discovered at startup
    pub fn categories(&self) -> &CategoryTree {
        &self.inner.categories
    }

    /// The page cache every fetch goes through
    pub fn pages(&self) -> &PageCache {
        &self.inner.pages
    }

    pub fn base_url(&self) -> &Url {
        self.inner.pages.session().base_url()
    }

    /// Number of distinct products seen so far
    pub fn known_products(&self) -> usize {
        self.registry().len()
    }

    /// Fetches one product in full
    ///
    /// With `use_cache`, a product seen before is returned as the same
    /// instance (upgraded in place if it was a summary). Without it the
    /// detail page is fetched again and a fresh record replaces the old one.
    pub async fn get_product(&self, href: &str, use_cache: bool) -> Result<LazyProduct, CatalogError> {
        let url = self.pages().resolve(href)?.to_string();

        if use_cache {
            if let Some(existing) = self.registered(&url) {
                let product = LazyProduct::new(existing, self.clone());
                product.ensure_full().await?;
                return Ok(product);
            }
        }

        let doc = self.pages().document(&url, use_cache).await?;
        let details = extract_details(&doc, self.base_url())?;
        drop(doc);

        let product = Arc::new(Product::full(url.clone(), details));
        self.registry().insert(url, Arc::clone(&product));
        Ok(LazyProduct::new(product, self.clone()))
    }

    /// Searches the shop and returns the matches, cheapest first
    pub async fn search(&self, query: &str, mode: ExtractMode) -> Result<Vec<LazyProduct>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::Validation("Search query is empty".to_string()));
        }
        let url = crate::url::search_url(self.base_url(), query)?;
        info!("Searching for '{}'", query);
        self.crawl_listing(&url, mode).await
    }

    /// Fetches and extracts the detail fields for `url`
    pub(crate) async fn fetch_details(&self, url: &str) -> Result<ProductDetails, CatalogError> {
        debug!("Loading details for {}", url);
        let doc = self.pages().document(url, true).await?;
        Ok(extract_details(&doc, self.base_url())?)
    }

    /// Returns the registered instance for the product's URL, registering
    /// `product` if the URL is new
    pub(crate) fn intern(&self, product: Product) -> LazyProduct {
        let shared = Arc::clone(
            self.registry()
                .entry(product.url().to_string())
                .or_insert_with(|| Arc::new(product)),
        );
        LazyProduct::new(shared, self.clone())
    }

    fn registered(&self, url: &str) -> Option<Arc<Product>> {
        self.registry().get(url).cloned()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, Arc<Product>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.inner
            .products
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

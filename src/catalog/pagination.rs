//! Paginated listing traversal
//!
//! Listings carry a `div.paginationControl` when they span several pages.
//! Its first two and last two anchors are the first/previous/next/last
//! controls; the anchors in between link the numbered pages, the first of
//! which is the page already fetched.

use crate::catalog::extract::{extract_listing, extract_listing_urls};
use crate::catalog::{Catalog, ExtractMode, LazyProduct};
use crate::model::Product;
use crate::{CatalogError, ScrapeError};
use futures::stream::{self, StreamExt, TryStreamExt};
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

const PAGINATION: &str = "div.paginationControl";
const PAGE_LINK: &str = "a";

/// Fixed controls on each side of the numbered page links
const CONTROL_LINKS: usize = 2;

/// Page links to fetch after the first page, in page order
///
/// `None` when the page has no pagination control.
pub fn page_links(doc: &Html) -> Result<Option<Vec<String>>, ScrapeError> {
    let pagination = selector(PAGINATION)?;
    let link = selector(PAGE_LINK)?;

    let Some(control) = doc.select(&pagination).next() else {
        return Ok(None);
    };

    let anchors: Vec<_> = control.select(&link).collect();
    if anchors.len() <= CONTROL_LINKS * 2 {
        return Ok(Some(Vec::new()));
    }

    anchors[CONTROL_LINKS..anchors.len() - CONTROL_LINKS]
        .iter()
        .skip(1)
        .map(|a| {
            a.value()
                .attr("href")
                .map(str::to_string)
                .ok_or_else(|| ScrapeError::missing("page link", "div.paginationControl a[href]"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

impl Catalog {
    /// Lists every product in a category, across all listing pages
    ///
    /// Results are sorted by `discount_price`, ascending; products with the
    /// same price keep the order they were extracted in.
    pub async fn list_products(
        &self,
        category: &str,
        subcategory: &str,
        subsubcategory: Option<&str>,
        mode: ExtractMode,
    ) -> Result<Vec<LazyProduct>, CatalogError> {
        let url = crate::url::listing_url(self.base_url(), category, subcategory, subsubcategory)?;
        debug!("Listing url: {}", url);
        self.crawl_listing(&url, mode).await
    }

    /// Walks a listing starting at `first_page` and aggregates its products
    pub(crate) async fn crawl_listing(&self, first_page: &Url, mode: ExtractMode) -> Result<Vec<LazyProduct>, CatalogError> {
        let doc = self.pages().document(first_page.as_str(), true).await?;
        let links = page_links(&doc)?;
        let mut products = self.extract_page(&doc, mode).await?;
        drop(doc);

        if let Some(links) = links {
            info!("{} spans {} pages", first_page, links.len() + 1);

            let concurrency = self.pages().http().max_concurrent_pages.max(1);
            let rest: Vec<Vec<LazyProduct>> = stream::iter(links)
                .map(|href| async move {
                    let doc = self.pages().document(&href, true).await?;
                    self.extract_page(&doc, mode).await
                })
                // buffered yields results in input order, not completion order
                .buffered(concurrency)
                .try_collect()
                .await?;

            products.extend(rest.into_iter().flatten());
        }

        products.sort_by_key(|p| p.discount_price());
        info!("{} products at {}", products.len(), first_page);
        Ok(products)
    }

    /// Extracts one listing page's products in the given mode
    async fn extract_page(&self, doc: &Html, mode: ExtractMode) -> Result<Vec<LazyProduct>, CatalogError> {
        match mode {
            ExtractMode::Quick => {
                let entries = extract_listing(doc, self.base_url())?;
                Ok(entries
                    .into_iter()
                    .map(|e| self.intern(Product::summary(e.url, e.name, e.discount_price)))
                    .collect())
            }
            ExtractMode::Full => {
                let urls = extract_listing_urls(doc, self.base_url())?;
                let mut products = Vec::with_capacity(urls.len());
                for url in urls {
                    products.push(self.get_product(&url, true).await?);
                }
                Ok(products)
            }
        }
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::missing("selector", css))
}

//! On-demand upgrade of summary products
//!
//! A [`LazyProduct`] pairs a shared [`Product`] with the catalog that can
//! fetch its detail page. Every detail accessor goes through
//! [`LazyProduct::ensure_full`], which fetches at most once per product
//! instance: concurrent callers wait on the same fetch, and once the detail
//! cell is filled no accessor touches the network again.

use crate::catalog::Catalog;
use crate::model::{Product, ProductDetails};
use crate::CatalogError;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A product handle that loads its detail page when first needed
#[derive(Debug, Clone)]
pub struct LazyProduct {
    product: Arc<Product>,
    catalog: Catalog,
}

impl LazyProduct {
    pub(crate) fn new(product: Arc<Product>, catalog: Catalog) -> Self {
        Self { product, catalog }
    }

    /// The shared product record
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// True if both handles point at the same product instance
    pub fn same_instance(&self, other: &LazyProduct) -> bool {
        Arc::ptr_eq(&self.product, &other.product)
    }

    /// Loads the detail page unless it is already loaded
    ///
    /// A failed fetch stores nothing, so the next call tries again.
    pub async fn ensure_full(&self) -> Result<&ProductDetails, CatalogError> {
        self.product
            .details_cell()
            .get_or_try_init(|| self.catalog.fetch_details(self.product.url()))
            .await
    }

    pub async fn common_price(&self) -> Result<u64, CatalogError> {
        Ok(self.ensure_full().await?.common_price)
    }

    pub async fn model_no(&self) -> Result<&str, CatalogError> {
        Ok(&self.ensure_full().await?.model_no)
    }

    pub async fn catalog_no(&self) -> Result<&str, CatalogError> {
        Ok(&self.ensure_full().await?.catalog_no)
    }

    pub async fn description(&self) -> Result<&str, CatalogError> {
        Ok(&self.ensure_full().await?.description)
    }

    pub async fn add_to_cart_id(&self) -> Result<&str, CatalogError> {
        Ok(&self.ensure_full().await?.add_to_cart_id)
    }

    pub async fn image_url(&self) -> Result<&str, CatalogError> {
        Ok(&self.ensure_full().await?.image_url)
    }
}

impl Deref for LazyProduct {
    type Target = Product;

    fn deref(&self) -> &Product {
        &self.product
    }
}

impl fmt::Display for LazyProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.product, f)
    }
}

//! Cart view and cart additions
//!
//! The cart is per-session state that changes between calls, so the cart
//! page is always fetched fresh.

use crate::catalog::extract::extract_cart_urls;
use crate::catalog::{Catalog, LazyProduct};
use crate::CatalogError;
use tracing::info;

pub const CART_PATH: &str = "/karfa";
pub const ADD_TO_CART_PATH: &str = "/karfa/add_to_cart";

impl Catalog {
    /// Products currently in the session's cart, fully loaded
    pub async fn get_cart(&self) -> Result<Vec<LazyProduct>, CatalogError> {
        let urls = {
            let doc = self.pages().document(CART_PATH, false).await?;
            extract_cart_urls(&doc, self.base_url())?
        };

        let mut products = Vec::with_capacity(urls.len());
        for url in urls {
            products.push(self.get_product(&url, true).await?);
        }
        Ok(products)
    }

    /// Adds one of `product` to the session's cart
    ///
    /// Loads the product's detail page first if its cart token is not known
    /// yet. Any status of 300 or above is reported as a failure.
    pub async fn add_to_cart(&self, product: &LazyProduct) -> Result<(), CatalogError> {
        let id = product.add_to_cart_id().await?;
        let status = self
            .pages()
            .submit_form(ADD_TO_CART_PATH, &[("varaId", id)])
            .await?;

        if status.as_u16() >= 300 {
            return Err(CatalogError::Cart {
                product: product.to_string(),
                status: status.as_u16(),
            });
        }

        info!("Added {} to cart", product);
        Ok(())
    }
}

//! Product records
//!
//! A product starts life either as a summary (from a listing page) or as a
//! full record (from its detail page). Summaries are upgraded in place: the
//! detail fields sit in a write-once cell, so every `Arc<Product>` holder
//! sees the upgrade and a product can only be upgraded once.
use std::fmt;
use tokio::sync::OnceCell;

/// Fields that only the product's own detail page carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    /// Name as printed on the detail page
    pub name: String,

    /// Current (possibly discounted) price in whole krónur
    pub discount_price: u64,

    /// Undiscounted price in whole krónur
    pub common_price: u64,

    /// Manufacturer model number
    pub model_no: String,

    /// Retailer catalog number
    pub catalog_no: String,

    /// Free-text description
    pub description: String,

    /// Opaque token the cart endpoint expects
    pub add_to_cart_id: String,

    /// Absolute URL of the main product image
    pub image_url: String,
}

/// One catalog item, identified by its URL
#[derive(Debug)]
pub struct Product {
    url: String,
    name: String,
    discount_price: u64,
    details: OnceCell<ProductDetails>,
}

impl Product {
    /// Creates a summary product from listing data
    pub fn summary(url: impl Into<String>, name: impl Into<String>, discount_price: u64) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            discount_price,
            details: OnceCell::new(),
        }
    }

    /// Creates a full product from detail page data
    pub fn full(url: impl Into<String>, details: ProductDetails) -> Self {
        Self {
            url: url.into(),
            name: details.name.clone(),
            discount_price: details.discount_price,
            details: OnceCell::new_with(Some(details)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Detail page name once loaded, listing name before that
    pub fn name(&self) -> &str {
        self.details
            .get()
            .map(|d| d.name.as_str())
            .unwrap_or(&self.name)
    }

    /// Detail page price once loaded, listing price before that
    pub fn discount_price(&self) -> u64 {
        self.details
            .get()
            .map(|d| d.discount_price)
            .unwrap_or(self.discount_price)
    }

    /// Detail fields, or `None` while the product is a summary
    pub fn details(&self) -> Option<&ProductDetails> {
        self.details.get()
    }

    pub fn is_full(&self) -> bool {
        self.details.initialized()
    }

    /// The write-once cell the lazy loader fills
    pub(crate) fn details_cell(&self) -> &OnceCell<ProductDetails> {
        &self.details
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
            && self.name() == other.name()
            && self.discount_price() == other.discount_price()
            && self.details() == other.details()
    }
}

impl Eq for Product {}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} kr.", self.name(), self.discount_price())
    }
}

//! URL handling module for Tolvu-Catalog
//!
//! Every URL the catalog touches goes through [`normalize_url`] before it is
//! fetched or used as a cache key, so that `/vorur/x`, `vorur/x?` and the
//! absolute form all end up as the same key.

mod normalize;

pub use normalize::{listing_url, normalize_url, search_url};

//! Catalog data types
//!
//! - [`Product`]: one catalog item, summary or full
//! - [`CategoryTree`]: the shop's three-level taxonomy

mod category_tree;
mod product;

pub use category_tree::{
    exclude_cooling, Category, CategoryTree, Subcategory, COMPONENTS_CATEGORY, COOLING_EXCLUSIONS,
    CPU_SUBCATEGORY, RAM_SUBCATEGORY,
};
pub use product::{Product, ProductDetails};

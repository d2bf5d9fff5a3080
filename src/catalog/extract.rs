//! Product extraction from listing, detail and cart pages
//!
//! Extraction is all-or-nothing: if any expected element is missing the
//! whole product fails with a [`ScrapeError`] naming the field and the
//! selector it was looked up with.
//!
//! # Page shapes
//!
//! | Page | Selector | Field |
//! |------|----------|-------|
//! | listing | `div.box-middle` | one product block |
//! | listing block | `a[href]` | url, name (anchor text) |
//! | listing block | `div.price` | discount_price |
//! | detail | `div.rightcontent span.modelnr` (1st, 2nd, 3rd) | model_no, catalog_no, common_price |
//! | detail | `div.rightcontent h2` | name |
//! | detail | `div.rightcontent div.price` | discount_price |
//! | detail | `div.rightcontent div.boxinfo` | description |
//! | detail | `div.rightcontent input[name="varaId"]` | add_to_cart_id |
//! | detail | `div.leftcontent a[rel="prettyPhoto"]` | image_url |
//! | cart | `div.details a[href]` | product url |

use crate::model::ProductDetails;
use crate::url::normalize_url;
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub const LISTING_BLOCK: &str = "div.box-middle";
pub const CART_BLOCK: &str = "div.details";
const BLOCK_LINK: &str = "a[href]";
const PRICE: &str = "div.price";
const RIGHT_CONTENT: &str = "div.rightcontent";
const LEFT_CONTENT: &str = "div.leftcontent";
const MODEL_INFO: &str = "span.modelnr";
const NAME: &str = "h2";
const DESCRIPTION: &str = "div.boxinfo";
const CART_INPUT: &str = "input[name=\"varaId\"]";
const IMAGE_LINK: &str = "a[rel=\"prettyPhoto\"]";

/// Currency suffix the shop appends to every price
const CURRENCY_SUFFIX: &str = "kr.";

/// Minimal product data from one listing block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub url: String,
    pub name: String,
    pub discount_price: u64,
}

/// Extracts every listing block on the page in quick mode
pub fn extract_listing(doc: &Html, base: &Url) -> Result<Vec<ListingEntry>, ScrapeError> {
    let block = selector(LISTING_BLOCK, "listing block")?;
    doc.select(&block)
        .map(|element| extract_listing_entry(element, base))
        .collect()
}

/// Extracts only the product URLs of every listing block
pub fn extract_listing_urls(doc: &Html, base: &Url) -> Result<Vec<String>, ScrapeError> {
    extract_block_urls(doc, base, LISTING_BLOCK)
}

/// Extracts the product URLs on the cart page
pub fn extract_cart_urls(doc: &Html, base: &Url) -> Result<Vec<String>, ScrapeError> {
    extract_block_urls(doc, base, CART_BLOCK)
}

fn extract_block_urls(doc: &Html, base: &Url, block_css: &str) -> Result<Vec<String>, ScrapeError> {
    let block = selector(block_css, "product block")?;
    doc.select(&block)
        .map(|element| {
            let link = select_first(element, BLOCK_LINK, "url")?;
            attr_url(link, "href", "url", BLOCK_LINK, base)
        })
        .collect()
}

fn extract_listing_entry(block: ElementRef<'_>, base: &Url) -> Result<ListingEntry, ScrapeError> {
    let link = select_first(block, BLOCK_LINK, "url")?;
    let url = attr_url(link, "href", "url", BLOCK_LINK, base)?;
    let name = clean_text(link);
    let price = select_first(block, PRICE, "discount_price")?;

    Ok(ListingEntry {
        url,
        name,
        discount_price: parse_price(&clean_text(price))?,
    })
}

/// Extracts every field from a product detail page
pub fn extract_details(doc: &Html, base: &Url) -> Result<ProductDetails, ScrapeError> {
    let root = doc.root_element();
    let right = select_first(root, RIGHT_CONTENT, "product panel")?;
    let left = select_first(root, LEFT_CONTENT, "image panel")?;

    let info_selector = selector(MODEL_INFO, "model info")?;
    let info: Vec<ElementRef<'_>> = right.select(&info_selector).collect();
    let info_at = |index: usize, field: &str| {
        info.get(index)
            .copied()
            .ok_or_else(|| ScrapeError::missing(field, &format!("{} {}:nth({})", RIGHT_CONTENT, MODEL_INFO, index + 1)))
    };

    let model_no = labeled_value(&clean_text(info_at(0, "model_no")?));
    let catalog_no = labeled_value(&clean_text(info_at(1, "catalog_no")?));
    let common_price = parse_price(&labeled_value(&clean_text(info_at(2, "common_price")?)))?;

    let name = clean_text(select_first(right, NAME, "name")?);
    let discount_price = parse_price(&clean_text(select_first(right, PRICE, "discount_price")?))?;
    let description = direct_text(select_first(right, DESCRIPTION, "description")?);

    let cart_input = select_first(right, CART_INPUT, "add_to_cart_id")?;
    let add_to_cart_id = cart_input
        .value()
        .attr("value")
        .map(|v| v.trim().to_string())
        .ok_or_else(|| ScrapeError::missing("add_to_cart_id", &format!("{}[value]", CART_INPUT)))?;

    let image = select_first(left, IMAGE_LINK, "image_url")?;
    let image_url = attr_url(image, "href", "image_url", IMAGE_LINK, base)?;

    Ok(ProductDetails {
        name,
        discount_price,
        common_price,
        model_no,
        catalog_no,
        description,
        add_to_cart_id,
        image_url,
    })
}

/// Converts shop price text to whole krónur
///
/// Strips the `kr.` suffix and the `.` thousand separators:
/// `"123.456 kr."` becomes `123456`.
pub fn parse_price(text: &str) -> Result<u64, ScrapeError> {
    let trimmed = text.trim();
    let amount = trimmed
        .strip_suffix(CURRENCY_SUFFIX)
        .or_else(|| trimmed.strip_suffix("kr"))
        .unwrap_or(trimmed)
        .trim();

    let digits: String = amount.chars().filter(|c| *c != '.').collect();
    digits.parse::<u64>().map_err(|_| ScrapeError::InvalidPrice {
        text: text.to_string(),
    })
}

/// Decodes entities left over after the parser's own decoding pass
///
/// Some free-text fields are escaped twice on the shop's side
/// (`&amp;quot;`); the parser undoes one level and this undoes the other.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    Html::parse_fragment(text).root_element().text().collect()
}

/// `"Vörunúmer: ABC-1"` → `"ABC-1"`; text without a label is returned trimmed
fn labeled_value(text: &str) -> String {
    match text.split_once(':') {
        Some((_, value)) => value.trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// All text inside `element`, entity-decoded and trimmed
fn clean_text(element: ElementRef<'_>) -> String {
    decode_entities(&element.text().collect::<String>())
        .trim()
        .to_string()
}

/// Text nodes directly under `element`, skipping headings and other child elements
fn direct_text(element: ElementRef<'_>) -> String {
    let joined = element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    decode_entities(&joined).trim().to_string()
}

fn attr_url(
    element: ElementRef<'_>,
    attr: &str,
    field: &str,
    css: &str,
    base: &Url,
) -> Result<String, ScrapeError> {
    let value = element
        .value()
        .attr(attr)
        .ok_or_else(|| ScrapeError::missing(field, css))?;
    normalize_url(base, value)
        .map(|url| url.to_string())
        .map_err(|_| ScrapeError::missing(field, css))
}

fn selector(css: &str, field: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::missing(field, css))
}

fn select_first<'a>(scope: ElementRef<'a>, css: &str, field: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let sel = selector(css, field)?;
    scope
        .select(&sel)
        .next()
        .ok_or_else(|| ScrapeError::missing(field, css))
}

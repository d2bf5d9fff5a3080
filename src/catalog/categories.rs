//! Category tree discovery from the navigation menu
//!
//! The menu is `ul#valmynd`; each direct `li` is a category whose first
//! anchor links to `/vorur/{category}` and whose `ul.submenu` lists anchors to
//! `/vorur/{category}/{subcategory}` and
//! `/vorur/{category}/{subcategory}/{subsubcategory}`.

use crate::catalog::cache::PageCache;
use crate::model::CategoryTree;
use crate::{CatalogError, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

const MENU: &str = "ul#valmynd";
const MENU_LINK: &str = "a[href]";
const SUBMENU: &str = "ul.submenu";
const PRODUCT_PREFIX: &str = "vorur";

/// Fetches the front page and builds the category tree from its menu
pub async fn build_category_tree(pages: &PageCache) -> Result<CategoryTree, CatalogError> {
    let doc = pages.document("/", true).await?;
    let tree = parse_category_tree(&doc)?;
    info!("Discovered {} categories", tree.categories().len());
    Ok(tree)
}

/// Builds the category tree from a parsed front page
pub fn parse_category_tree(doc: &Html) -> Result<CategoryTree, ScrapeError> {
    let menu_sel = selector(MENU)?;
    let link_sel = selector(MENU_LINK)?;
    let submenu_sel = selector(SUBMENU)?;

    let menu = doc
        .select(&menu_sel)
        .next()
        .ok_or_else(|| ScrapeError::missing("navigation menu", MENU))?;

    let mut tree = CategoryTree::new();

    for item in menu
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "li")
    {
        let href = item
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| ScrapeError::missing("category link", "ul#valmynd > li a[href]"))?;

        let Some(category) = menu_path(href).into_iter().next() else {
            debug!("Skipping menu entry without a category path: {}", href);
            continue;
        };
        tree.add_category(&category);

        let submenu = item
            .select(&submenu_sel)
            .next()
            .ok_or_else(|| ScrapeError::missing("submenu", "ul#valmynd > li ul.submenu"))?;

        for anchor in submenu.select(&link_sel) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            match menu_path(href).as_slice() {
                [_, sub] => tree.insert(&category, sub, None),
                [_, sub, subsub] => tree.insert(&category, sub, Some(subsub.as_str())),
                other => debug!("Ignoring submenu link {} ({} segments)", href, other.len()),
            }
        }
    }

    Ok(tree)
}

/// Path segments of a menu link with the `/vorur/` prefix and query removed
///
/// `/vorur/tolvuihlutir/orgjorvar?` → `["tolvuihlutir", "orgjorvar"]`
pub fn menu_path(href: &str) -> Vec<String> {
    // Absolute links are reduced to their path; relative ones fail to parse
    // on their own and are used as they are.
    let path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
    if segments.peek() == Some(&PRODUCT_PREFIX) {
        segments.next();
    }
    segments.map(str::to_string).collect()
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::missing("selector", css))
}

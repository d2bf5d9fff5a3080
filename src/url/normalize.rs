use crate::UrlError;
use url::Url;

/// Normalizes a possibly relative URL against the shop's base URL
///
/// # Normalization Steps
///
/// 1. Resolve `href` against `base` (absolute hrefs are parsed as-is)
/// 2. Reject anything that is not HTTP(S) or has no host
/// 3. Lowercase the host
/// 4. Remove the fragment
/// 5. Drop an empty query string (a bare trailing `?`)
///
/// Path case and query parameter order are left alone; the shop serves
/// different pages for them.
///
/// # Examples
///
/// ```
/// use tolvu_catalog::url::normalize_url;
/// use url::Url;
///
/// let base = Url::parse("http://tolvutek.is").unwrap();
/// let url = normalize_url(&base, "/vorur/tolvuihlutir/orgjorvar?").unwrap();
/// assert_eq!(url.as_str(), "http://tolvutek.is/vorur/tolvuihlutir/orgjorvar");
/// ```
pub fn normalize_url(base: &Url, href: &str) -> Result<Url, UrlError> {
    let href = href.trim();

    let mut url = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let Some(host) = url.host_str() else {
        return Err(UrlError::MissingDomain);
    };
    let host = host.to_lowercase();
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Parse(format!("Failed to set host: {}", e)))?;

    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Builds the listing URL for a category path
///
/// `/vorur/{category}/{subcategory}[/{subsubcategory}]`, with each
/// segment percent-encoded.
pub fn listing_url(
    base: &Url,
    category: &str,
    subcategory: &str,
    subsubcategory: Option<&str>,
) -> Result<Url, UrlError> {
    let mut url = normalize_url(base, "/")?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| UrlError::Parse(format!("{} cannot be a base", base)))?;
        segments.clear().push("vorur").push(category).push(subcategory);
        if let Some(subsub) = subsubcategory {
            segments.push(subsub);
        }
    }
    Ok(url)
}

/// Builds the search URL `/leita/{query}` with the query percent-encoded
pub fn search_url(base: &Url, query: &str) -> Result<Url, UrlError> {
    let mut url = normalize_url(base, "/")?;
    url.path_segments_mut()
        .map_err(|_| UrlError::Parse(format!("{} cannot be a base", base)))?
        .clear()
        .push("leita")
        .push(query);
    Ok(url)
}

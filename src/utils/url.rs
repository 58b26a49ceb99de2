// src/utils/url.rs

//! URL string helpers.

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Whether a link target is an absolute http(s) URL.
pub fn is_absolute_http(href: &str) -> bool {
    SCHEMES.iter().any(|scheme| href.starts_with(*scheme))
}

/// File name used for a page's link cache: the bare host.
///
/// Strips the scheme and truncates at the first `/` after it.
/// Returns `None` for other schemes or an empty host.
///
/// # Examples
/// ```
/// use sitewatch::utils::url::cache_file_name;
///
/// assert_eq!(
///     cache_file_name("https://example.com/path"),
///     Some("example.com".to_string())
/// );
/// ```
pub fn cache_file_name(url: &str) -> Option<String> {
    let rest = SCHEMES
        .iter()
        .find_map(|scheme| url.strip_prefix(*scheme))?;
    let host = rest.split('/').next().unwrap_or_default();

    if host.is_empty() || host == "." || host == ".." {
        return None;
    }
    Some(host.to_string())
}

pub(crate) mod html;

use common::constants::STORE_ORIGIN;

/// Product links come back relative to the site root; prefix the store
/// origin so records carry usable URLs.
pub(crate) fn absolutize(href: &str) -> String {
    if href.starts_with('/') {
        format!("{STORE_ORIGIN}{href}")
    } else {
        href.to_string()
    }
}

//! Mapping from page identifiers to fragment URLs and document titles.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::config::SiteConfig;

/// Relative URL of the fragment for `page`.
#[must_use]
pub fn fragment_url(config: &SiteConfig, page: &str) -> String {
    if page == config.home_page {
        return format!("{}/{}", config.fragment_dir, config.home_fragment);
    }
    format!("{}/{page}.html", config.fragment_dir)
}

/// Human-readable title for `page`, or the fallback for unknown identifiers.
#[must_use]
pub fn page_title<'a>(config: &'a SiteConfig, page: &str) -> &'a str {
    config.page_titles.get(page).map_or(config.fallback_title.as_str(), String::as_str)
}

/// Full document title: page title suffixed with the site owner's name.
#[must_use]
pub fn document_title(config: &SiteConfig, page: &str) -> String {
    format!("{} - {}", page_title(config, page), config.owner_name)
}

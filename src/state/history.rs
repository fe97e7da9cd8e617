//! State object attached to pushed history entries.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};

/// `{ "page": "<identifier>" }` as stored by `history.pushState`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub page: String,
}

impl HistoryState {
    pub fn new(page: impl Into<String>) -> Self {
        Self { page: page.into() }
    }

    /// Serialize for the browser history API.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::json!({ "page": self.page }).to_string()
    }

    /// Parse a state recorded by this application.
    ///
    /// Foreign or empty states (other scripts, the landing entry before it is
    /// tagged) yield `None` so back/forward handling can ignore them.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(state) if !state.page.is_empty() => Some(state),
            _ => None,
        }
    }

    /// Hash-fragment URL used when pushing this state.
    #[must_use]
    pub fn url(&self) -> String {
        format!("#{}", self.page)
    }
}

/// Extract a page identifier from a location hash such as `#projets`.
#[must_use]
pub fn page_from_hash(hash: &str) -> Option<String> {
    let page = hash.trim().trim_start_matches('#');
    if page.is_empty() {
        return None;
    }
    if !page.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return None;
    }
    Some(page.to_owned())
}

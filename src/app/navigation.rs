//! Page swap navigation.
//!
//! A load fetches `pages/<name>.html`, fades the content region out, swaps its
//! markup after the settle delay, fades it back in on the next frame, then
//! updates active links, history, the current page and the reveal observer.
//!
//! Every load takes a navigation token. Only the newest token may touch the
//! content region, the session or the loading indicator, so a slow response
//! to an older click can never overwrite a newer page.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use super::Portfolio;
use crate::dom::markers::{ACTIVE_CLASS, CONTENT_ID, LOADER_ID, NAV_LINK_CLASS, PAGE_ATTR};
use crate::dom::{Dom, DomEvent};
use crate::error::LoadError;
use crate::pages::catalog::{document_title, fragment_url, page_title};
use crate::pages::fallback::LOAD_ERROR_FRAGMENT;
use crate::platform::Platform;
use crate::state::HistoryState;

/// How a page load ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fragment is displayed and the session updated.
    Loaded,
    /// The load failed and the error fragment is displayed.
    Failed(LoadError),
    /// A newer load superseded this one, or there is no content region.
    Discarded,
}

impl<D: Dom, P: Platform> Portfolio<D, P> {
    /// Navigate to `page` unless it is already displayed and no other load
    /// is in flight.
    pub fn navigate_to(&self, page: &str) {
        log::info!("navigating to {page}");
        if self.session().is_settled_on(page) {
            log::debug!("{page} is already active, navigation skipped");
            return;
        }
        let app = self.clone();
        let page = page.to_owned();
        self.platform().spawn(async move {
            app.load_page(&page, true).await;
        });
    }

    /// Fetch and display `page`, optionally recording a history entry.
    pub async fn load_page(&self, page: &str, record_history: bool) -> LoadOutcome {
        let token = self.session_mut().next_nav_token(page);
        log::info!("loading page {page}");
        self.set_loading(true);

        let outcome = match self.swap_page(page, record_history, token).await {
            Ok(true) => LoadOutcome::Loaded,
            Ok(false) => LoadOutcome::Discarded,
            Err(err) if self.session().is_current_nav(token) => {
                log::error!("failed to load page {page}: {err}");
                self.show_load_error();
                LoadOutcome::Failed(err)
            }
            Err(err) => {
                log::debug!("ignoring failure of superseded load of {page}: {err}");
                LoadOutcome::Discarded
            }
        };

        if self.session().is_current_nav(token) {
            self.session_mut().finish_nav(token);
            self.set_loading(false);
        }
        outcome
    }

    /// Load the page shown at startup and tag the landing history entry.
    ///
    /// The landing entry keeps its URL (no hash for the default page) but
    /// receives `{page}` state so Back can return to it.
    pub async fn load_initial_page(&self, page: &str) -> LoadOutcome {
        let outcome = self.load_page(page, false).await;
        if outcome == LoadOutcome::Loaded {
            self.platform().replace_history(&HistoryState::new(page), page_title(self.config(), page));
        }
        outcome
    }

    /// Back/forward: reload the page recorded in the entry, without pushing.
    pub(crate) fn handle_pop_state(&self, event: &DomEvent<D::Node>) {
        let Some(state) = event.history_state.as_deref().and_then(HistoryState::from_json) else {
            log::debug!("ignoring history entry without page state");
            return;
        };
        log::info!("history navigation to {}", state.page);
        let app = self.clone();
        self.platform().spawn(async move {
            app.load_page(&state.page, false).await;
        });
    }

    async fn swap_page(&self, page: &str, record_history: bool, token: u64) -> Result<bool, LoadError> {
        let url = fragment_url(self.config(), page);
        let html = self.platform().fetch_text(&url).await?;

        if !self.session().is_current_nav(token) {
            log::debug!("discarding superseded response for {page}");
            return Ok(false);
        }
        if !self.replace_content_animated(&html, token).await {
            return Ok(false);
        }

        self.update_active_links(page);

        self.dom().set_title(&document_title(self.config(), page));
        if record_history {
            let state = HistoryState::new(page);
            self.platform().push_history(&state, page_title(self.config(), page), &state.url());
        }

        self.session_mut().current_page = Some(page.to_owned());

        self.reinit_animations();
        self.platform().scroll_to_top();

        log::info!("page {page} loaded");
        Ok(true)
    }

    /// Fade out, wait for the settle delay, swap markup, fade in next frame.
    async fn replace_content_animated(&self, html: &str, token: u64) -> bool {
        let Some(content) = self.dom().element_by_id(CONTENT_ID) else {
            log::error!("content region #{CONTENT_ID} not found");
            return false;
        };

        self.dom().set_style(&content, "opacity", "0");
        self.dom().set_style(&content, "transform", "translateY(20px)");

        self.platform().sleep(self.config().timings.swap_settle_ms).await;
        if !self.session().is_current_nav(token) {
            log::debug!("swap superseded during settle delay");
            return false;
        }
        self.dom().set_inner_html(&content, html);

        self.platform().next_frame().await;
        self.dom().set_style(&content, "opacity", "1");
        self.dom().set_style(&content, "transform", "translateY(0)");
        true
    }

    /// Move the active marker to the navigation links targeting `page`.
    pub fn update_active_links(&self, page: &str) {
        let dom = self.dom();
        let links = dom.elements_with_class(NAV_LINK_CLASS);
        for link in &links {
            dom.remove_class(link, ACTIVE_CLASS);
        }
        for link in &links {
            if dom.attribute(link, PAGE_ATTR).as_deref() == Some(page) {
                dom.add_class(link, ACTIVE_CLASS);
            }
        }
    }

    fn set_loading(&self, visible: bool) {
        if let Some(loader) = self.dom().element_by_id(LOADER_ID) {
            self.dom().set_style(&loader, "display", if visible { "flex" } else { "none" });
        }
    }

    fn show_load_error(&self) {
        match self.dom().element_by_id(CONTENT_ID) {
            Some(content) => self.dom().set_inner_html(&content, LOAD_ERROR_FRAGMENT),
            None => log::error!("content region #{CONTENT_ID} not found, cannot show load error"),
        }
    }
}

//! Mutable state for one page session.

use std::rc::Rc;

use crate::dom::Dom;

/// A live "feature unavailable" modal.
pub struct ModalInstance<D: Dom> {
    pub overlay: D::Node,
    pub close_button: D::Node,
    /// Listeners registered for this instance (overlay, close button, Escape).
    pub listeners: Vec<D::Listener>,
    /// Bumped on every open so a stale removal timer can recognise itself.
    pub generation: u64,
    pub closing: bool,
}

/// Session state owned by the controller; lives as long as the page.
pub struct Session<D: Dom> {
    /// Last successfully loaded page; `None` until the first load succeeds.
    pub current_page: Option<String>,
    /// Target of the newest load still in flight.
    pub pending_page: Option<String>,
    pub menu_open: bool,
    /// Latest page-load request; older requests discard their results.
    pub nav_token: u64,
    pub observer: Option<Rc<D::Observer>>,
    pub modal: Option<ModalInstance<D>>,
    pub modal_generation: u64,
}

impl<D: Dom> Session<D> {
    pub fn new() -> Self {
        Self {
            current_page: None,
            pending_page: None,
            menu_open: false,
            nav_token: 0,
            observer: None,
            modal: None,
            modal_generation: 0,
        }
    }

    /// Start a new page-load request for `page` and return its token.
    pub fn next_nav_token(&mut self, page: &str) -> u64 {
        self.nav_token += 1;
        self.pending_page = Some(page.to_owned());
        self.nav_token
    }

    /// Close the request `token` if it is still the newest one.
    pub fn finish_nav(&mut self, token: u64) {
        if self.is_current_nav(token) {
            self.pending_page = None;
        }
    }

    /// Whether navigating to `page` would change nothing: it is displayed
    /// and no other load is in flight.
    #[must_use]
    pub fn is_settled_on(&self, page: &str) -> bool {
        self.current_page.as_deref() == Some(page)
            && self.pending_page.as_deref().is_none_or(|pending| pending == page)
    }

    #[must_use]
    pub fn is_current_nav(&self, token: u64) -> bool {
        self.nav_token == token
    }
}

impl<D: Dom> Default for Session<D> {
    fn default() -> Self {
        Self::new()
    }
}

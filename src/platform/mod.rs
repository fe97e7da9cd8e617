//! Browser services outside the document tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! Storage, history, scrolling, network, clipboard and timers. The browser
//! implementation lives in [`web`]; tests use a virtual-clock double.

#[cfg(feature = "hydrate")]
pub mod web;

use std::future::Future;

use crate::error::{ClipboardError, LoadError};
use crate::state::HistoryState;

/// Non-DOM browser capabilities used by the controllers.
///
/// Futures are `!Send`; everything runs on the page's single event loop.
pub trait Platform: 'static {
    fn storage_get(&self, key: &str) -> Option<String>;

    fn storage_set(&self, key: &str, value: &str);

    /// `history.pushState(state, title, url)`.
    fn push_history(&self, state: &HistoryState, title: &str, url: &str);

    /// `history.replaceState(state, title)`, keeping the current URL.
    fn replace_history(&self, state: &HistoryState, title: &str);

    /// Current `location.hash`, including the leading `#` when present.
    fn location_hash(&self) -> String;

    fn reload(&self);

    /// Smoothly scroll the viewport back to the top.
    fn scroll_to_top(&self);

    /// GET `url` and return the body as text.
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, LoadError>>;

    fn write_clipboard(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;

    fn sleep(&self, ms: u32) -> impl Future<Output = ()>;

    /// Resolve on the next animation frame.
    fn next_frame(&self) -> impl Future<Output = ()>;

    /// Run `task` on the event loop without waiting for it.
    fn spawn(&self, task: impl Future<Output = ()> + 'static);
}

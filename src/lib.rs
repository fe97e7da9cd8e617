//! # portfolio
//!
//! WASM behavior layer for a single-page personal portfolio: fragment-based
//! page swaps with history support, a persisted light/dark theme, scroll
//! reveal animations, a mobile navigation menu, toast notifications, and a
//! modal for unpublished project links.
//!
//! The static shell page, the HTML fragments under `pages/` and the
//! stylesheet are external. This crate only reads the ids, classes and
//! attributes listed in [`dom::markers`].
//!
//! Controllers are written against the [`dom::Dom`] and
//! [`platform::Platform`] seams. The `hydrate` feature provides the browser
//! implementations and the `#[wasm_bindgen(start)]` entry point in [`boot`].

pub mod app;
#[cfg(feature = "hydrate")]
pub mod boot;
pub mod config;
pub mod dom;
pub mod error;
pub mod pages;
pub mod platform;
pub mod state;

#[cfg(test)]
mod testing;

pub use app::{LoadOutcome, NotificationKind, Portfolio, ScriptHelper};
pub use config::SiteConfig;
pub use error::{ClipboardError, ConfigError, LoadError};
pub use state::Theme;

//! Site configuration with defaults matching the shipped markup.
//!
//! The shell page may embed a JSON object in
//! `<script type="application/json" id="portfolio-config">` to override any
//! subset of fields; everything absent keeps its default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_OWNER_NAME: &str = "Ephraim Wayanga Bolingo";
pub const DEFAULT_HOME_PAGE: &str = "accueil";
pub const DEFAULT_FRAGMENT_DIR: &str = "pages";
pub const DEFAULT_THEME_STORAGE_KEY: &str = "theme-portfolio";
pub const DEFAULT_FALLBACK_TITLE: &str = "Portfolio";

/// Id of the inline JSON element the shell page may provide.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// Top-level site configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Appended to every document title.
    pub owner_name: String,
    /// Page identifier shown at startup and mapped to `home_fragment`.
    pub home_page: String,
    /// File name of the home fragment inside `fragment_dir`.
    pub home_fragment: String,
    /// Directory (relative URL) holding the fragment files.
    pub fragment_dir: String,
    pub theme_storage_key: String,
    /// Title used for identifiers missing from `page_titles`.
    pub fallback_title: String,
    pub page_titles: BTreeMap<String, String>,
    /// `log` level name for the console backend (`error` .. `trace`).
    pub log_level: String,
    pub timings: Timings,
    pub observer: ObserverOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let page_titles = [
            ("accueil", "Accueil"),
            ("apropos", "À propos"),
            ("competences", "Compétences"),
            ("projets", "Projets"),
            ("experience", "Expérience"),
            ("contact", "Contact"),
        ]
        .into_iter()
        .map(|(page, title)| (page.to_owned(), title.to_owned()))
        .collect();

        Self {
            owner_name: DEFAULT_OWNER_NAME.to_owned(),
            home_page: DEFAULT_HOME_PAGE.to_owned(),
            home_fragment: format!("{DEFAULT_HOME_PAGE}.html"),
            fragment_dir: DEFAULT_FRAGMENT_DIR.to_owned(),
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_owned(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_owned(),
            page_titles,
            log_level: "info".to_owned(),
            timings: Timings::default(),
            observer: ObserverOptions::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `raw` is not a valid JSON object
    /// matching the configuration shape.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolve the console log level, falling back to `Info` for unknown names.
    #[must_use]
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.trim().parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Level for the console logger, or `None` when logging is `off`.
    #[must_use]
    pub fn console_level(&self) -> Option<log::Level> {
        self.log_level().to_level()
    }
}

/// Fixed delays used by the animated flows, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Pause between fading the content out and swapping its markup.
    pub swap_settle_ms: u32,
    /// Pause before the reveal observer is rebuilt after a swap.
    pub reveal_rebuild_ms: u32,
    /// How long the body keeps its theme transition.
    pub theme_transition_ms: u32,
    /// How long a toast stays on screen before sliding out.
    pub toast_visible_ms: u32,
    /// Slide-out duration before a toast is removed.
    pub toast_exit_ms: u32,
    /// Close animation duration before the modal is removed.
    pub modal_exit_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            swap_settle_ms: 200,
            reveal_rebuild_ms: 100,
            theme_transition_ms: 300,
            toast_visible_ms: 3000,
            toast_exit_ms: 300,
            modal_exit_ms: 220,
        }
    }
}

/// Visibility observer tuning for reveal animations.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// CSS margin applied to the viewport; negative shrinks it.
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self { threshold: 0.1, root_margin: "-50px".to_owned() }
    }
}

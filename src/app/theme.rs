//! Light/dark theme toggle persisted in local storage.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use super::Portfolio;
use crate::dom::markers::{THEME_ATTR, THEME_BUTTON_ID};
use crate::dom::{Dom, EventKind, ListenTarget, Propagation};
use crate::platform::Platform;
use crate::state::Theme;

const BODY_THEME_TRANSITION: &str = "all 0.3s ease-in-out";

impl<D: Dom, P: Platform> Portfolio<D, P> {
    /// Apply the stored preference (light when absent) and wire the toggle button.
    pub fn init_theme(&self) -> Theme {
        log::info!("initializing theme");
        let stored = self.platform().storage_get(&self.config().theme_storage_key);
        let theme = stored.as_deref().and_then(Theme::from_token).unwrap_or_default();
        self.apply_theme(theme);

        match self.dom().element_by_id(THEME_BUTTON_ID) {
            Some(button) => {
                self.listen(ListenTarget::Node(button), EventKind::Click, |app, _| {
                    app.toggle_theme();
                    Propagation::PROCEED
                });
            }
            None => log::debug!("no #{THEME_BUTTON_ID} in page, theme toggle not wired"),
        }
        theme
    }

    /// Theme currently applied to the document root.
    pub fn current_theme(&self) -> Theme {
        self.dom()
            .root()
            .and_then(|root| self.dom().attribute(&root, THEME_ATTR))
            .as_deref()
            .and_then(Theme::from_token)
            .unwrap_or_default()
    }

    /// Flip between light and dark, apply and persist the result.
    pub fn toggle_theme(&self) -> Theme {
        let current = self.current_theme();
        let next = current.toggled();
        log::info!("switching theme: {} -> {}", current.token(), next.token());
        self.apply_theme(next);
        self.platform().storage_set(&self.config().theme_storage_key, next.token());
        next
    }

    /// Set the root theme attribute with a short body transition.
    pub fn apply_theme(&self, theme: Theme) {
        let dom = self.dom();
        if let Some(root) = dom.root() {
            dom.set_attribute(&root, THEME_ATTR, theme.token());
        }
        if let Some(body) = dom.body() {
            dom.set_style(&body, "transition", BODY_THEME_TRANSITION);
            let app = self.clone();
            self.platform().spawn(async move {
                app.platform().sleep(app.config().timings.theme_transition_ms).await;
                app.dom().remove_style(&body, "transition");
            });
        }
        log::debug!("theme applied: {}", theme.token());
    }
}

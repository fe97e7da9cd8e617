//! Mobile navigation panel.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use super::Portfolio;
use crate::dom::markers::{MENU_BUTTON_ID, MENU_OPEN_CLASS, MENU_PANEL_CLASS};
use crate::dom::{Dom, EventKind, ListenTarget, Propagation};
use crate::platform::Platform;

/// Inline layout applied to the panel while open; all removed on close.
pub const OPEN_MENU_STYLES: [(&str, &str); 10] = [
    ("display", "flex"),
    ("flex-direction", "column"),
    ("position", "absolute"),
    ("top", "100%"),
    ("left", "0"),
    ("right", "0"),
    ("background", "var(--fond-navigation)"),
    ("box-shadow", "var(--ombre-moyenne)"),
    ("padding", "var(--espacement-lg)"),
    ("gap", "var(--espacement-md)"),
];

impl<D: Dom, P: Platform> Portfolio<D, P> {
    /// Wire the menu button. Closing on link clicks is handled by click routing.
    pub fn init_mobile_menu(&self) {
        log::info!("initializing mobile menu");
        match self.dom().element_by_id(MENU_BUTTON_ID) {
            Some(button) => {
                self.listen(ListenTarget::Node(button), EventKind::Click, |app, _| {
                    app.toggle_mobile_menu();
                    Propagation::PROCEED
                });
            }
            None => log::debug!("no #{MENU_BUTTON_ID} in page, mobile menu not wired"),
        }
    }

    /// Open or close the panel; returns the new open state.
    pub fn toggle_mobile_menu(&self) -> bool {
        let open = {
            let mut session = self.session_mut();
            session.menu_open = !session.menu_open;
            session.menu_open
        };

        let dom = self.dom();
        let button = dom.element_by_id(MENU_BUTTON_ID);
        if let Some(panel) = dom.elements_with_class(MENU_PANEL_CLASS).into_iter().next() {
            for (property, value) in OPEN_MENU_STYLES {
                if open {
                    dom.set_style(&panel, property, value);
                } else {
                    dom.remove_style(&panel, property);
                }
            }
            if let Some(button) = &button {
                if open {
                    dom.add_class(button, MENU_OPEN_CLASS);
                } else {
                    dom.remove_class(button, MENU_OPEN_CLASS);
                }
            }
        }

        log::info!("mobile menu {}", if open { "opened" } else { "closed" });
        open
    }
}

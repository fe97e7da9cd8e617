//! Toast notifications, clipboard copy, and smooth section scrolling.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use super::Portfolio;
use crate::dom::Dom;
use crate::pages::fallback::{COPY_FAILURE_MESSAGE, COPY_SUCCESS_MESSAGE};
use crate::platform::Platform;

/// Severity of a toast; selects its class and background color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Stylesheet suffix used in `notification-<suffix>`.
    #[must_use]
    pub const fn class_suffix(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "succes",
            Self::Warning => "avertissement",
            Self::Error => "erreur",
        }
    }

    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Info => "var(--couleur-primaire)",
            Self::Success => "var(--couleur-succes)",
            Self::Warning => "var(--couleur-avertissement)",
            Self::Error => "var(--couleur-erreur)",
        }
    }
}

const TOAST_STYLES: [(&str, &str); 12] = [
    ("position", "fixed"),
    ("top", "20px"),
    ("right", "20px"),
    ("padding", "var(--espacement-md) var(--espacement-lg)"),
    ("border-radius", "var(--rayon-moyen)"),
    ("box-shadow", "var(--ombre-forte)"),
    ("z-index", "10001"),
    ("color", "white"),
    ("font-weight", "500"),
    ("transform", "translateX(100%)"),
    ("transition", "transform var(--transition-normale)"),
    ("max-width", "300px"),
];

impl<D: Dom, P: Platform> Portfolio<D, P> {
    /// Show a toast that slides in, stays for a few seconds, then slides out.
    pub fn show_notification(&self, message: &str, kind: NotificationKind) -> Option<D::Node> {
        let dom = self.dom();
        let body = dom.body()?;
        let Some(toast) = dom.create_element("div") else {
            log::warn!("could not create notification element");
            return None;
        };
        dom.set_attribute(&toast, "class", &format!("notification notification-{}", kind.class_suffix()));
        dom.set_text(&toast, message);
        for (property, value) in TOAST_STYLES {
            dom.set_style(&toast, property, value);
        }
        dom.set_style(&toast, "background", kind.background());
        dom.append_child(&body, &toast);

        let app = self.clone();
        let node = toast.clone();
        self.platform().spawn(async move {
            let timings = app.config().timings;
            app.platform().next_frame().await;
            app.dom().set_style(&node, "transform", "translateX(0)");

            app.platform().sleep(timings.toast_visible_ms).await;
            app.dom().set_style(&node, "transform", "translateX(100%)");

            app.platform().sleep(timings.toast_exit_ms).await;
            if app.dom().is_attached(&node) {
                app.dom().remove(&node);
            }
        });
        Some(toast)
    }

    /// Copy `text` and report the outcome with a toast.
    pub async fn copy_to_clipboard(&self, text: &str) {
        match self.platform().write_clipboard(text).await {
            Ok(()) => {
                log::info!("copied {} characters to the clipboard", text.chars().count());
                self.show_notification(COPY_SUCCESS_MESSAGE, NotificationKind::Success);
            }
            Err(err) => {
                log::error!("clipboard copy failed: {err}");
                self.show_notification(COPY_FAILURE_MESSAGE, NotificationKind::Error);
            }
        }
    }

    /// Smoothly scroll the first element matching `selector` into view.
    ///
    /// A bare word is tried as an element id first, so `contact` and
    /// `#contact` are equivalent; `footer` still falls back to the tag.
    pub fn scroll_to_section(&self, selector: &str) -> bool {
        let selector = selector.trim();
        let bare_word = !selector.is_empty()
            && selector.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        let by_id = if bare_word { self.dom().element_by_id(selector) } else { None };
        match by_id.or_else(|| self.dom().query_selector(selector)) {
            Some(element) => {
                self.dom().scroll_into_view(&element);
                true
            }
            None => {
                log::warn!("no element matches {selector:?}, nothing to scroll to");
                false
            }
        }
    }
}

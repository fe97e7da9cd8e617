//! "Update in progress" modal shown for unpublished project links.
//!
//! At most one overlay exists, keyed by its element id. Each open registers
//! three listeners (overlay background, close button, Escape on the document)
//! which are all removed as soon as the modal starts closing. The element
//! itself is removed once the close animation has had time to run, unless the
//! modal was reopened in the meantime.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use super::Portfolio;
use crate::dom::markers::{MODAL_CLOSE_CLASS, MODAL_ID, MODAL_OVERLAY_CLASS, VISIBLE_CLASS};
use crate::dom::{Dom, EventKind, ListenTarget, Propagation};
use crate::pages::fallback::{MODAL_CLOSE_ARIA, MODAL_CLOSE_LABEL, MODAL_MESSAGE, MODAL_TITLE, MODAL_TITLE_ID};
use crate::platform::Platform;
use crate::state::ModalInstance;

impl<D: Dom, P: Platform> Portfolio<D, P> {
    /// Show the modal, creating it on first use. Returns the overlay element.
    pub fn open_update_modal(&self) -> Option<D::Node> {
        let existing = self
            .session()
            .modal
            .as_ref()
            .map(|modal| (modal.overlay.clone(), modal.close_button.clone(), modal.closing));

        if let Some((overlay, close_button, closing)) = existing {
            if closing {
                log::debug!("reopening modal during its close animation");
                self.activate_modal(overlay.clone(), close_button);
            }
            return Some(overlay);
        }

        if let Some(foreign) = self.dom().element_by_id(MODAL_ID) {
            log::debug!("#{MODAL_ID} already present in markup");
            return Some(foreign);
        }

        let (overlay, close_button) = self.build_modal()?;
        if let Some(body) = self.dom().body() {
            self.dom().append_child(&body, &overlay);
        }
        self.activate_modal(overlay.clone(), close_button);
        log::info!("update modal opened");
        Some(overlay)
    }

    /// Start the close animation and schedule removal of the overlay.
    pub fn close_update_modal(&self) {
        let closing = {
            let mut session = self.session_mut();
            match session.modal.as_mut() {
                Some(modal) if !modal.closing => {
                    modal.closing = true;
                    Some((modal.overlay.clone(), std::mem::take(&mut modal.listeners), modal.generation))
                }
                _ => None,
            }
        };
        let Some((overlay, listeners, generation)) = closing else {
            return;
        };

        let dom = self.dom();
        for listener in &listeners {
            dom.unlisten(listener);
        }
        dom.remove_class(&overlay, VISIBLE_CLASS);
        if let Some(body) = dom.body() {
            dom.remove_style(&body, "overflow");
        }

        let app = self.clone();
        self.platform().spawn(async move {
            app.platform().sleep(app.config().timings.modal_exit_ms).await;
            let expired = {
                let mut session = app.session_mut();
                let still_closing = session
                    .modal
                    .as_ref()
                    .is_some_and(|modal| modal.closing && modal.generation == generation);
                if still_closing { session.modal.take() } else { None }
            };
            if let Some(modal) = expired {
                if app.dom().is_attached(&modal.overlay) {
                    app.dom().remove(&modal.overlay);
                }
                log::debug!("update modal removed");
            }
        });
    }

    /// Whether a modal instance exists and is not closing.
    pub fn modal_open(&self) -> bool {
        self.session().modal.as_ref().is_some_and(|modal| !modal.closing)
    }

    fn build_modal(&self) -> Option<(D::Node, D::Node)> {
        let dom = self.dom();
        let element = |tag: &str| {
            let node = dom.create_element(tag);
            if node.is_none() {
                log::warn!("could not create <{tag}> for the update modal");
            }
            node
        };

        let overlay = element("div")?;
        dom.set_attribute(&overlay, "id", MODAL_ID);
        dom.set_attribute(&overlay, "class", MODAL_OVERLAY_CLASS);

        let dialog = element("div")?;
        dom.set_attribute(&dialog, "class", "modal-box");
        dom.set_attribute(&dialog, "role", "dialog");
        dom.set_attribute(&dialog, "aria-modal", "true");
        dom.set_attribute(&dialog, "aria-labelledby", MODAL_TITLE_ID);

        let heading = element("h3")?;
        dom.set_attribute(&heading, "id", MODAL_TITLE_ID);
        dom.set_text(&heading, MODAL_TITLE);

        let message = element("p")?;
        dom.set_text(&message, MODAL_MESSAGE);

        let actions = element("div")?;
        dom.set_style(&actions, "text-align", "center");

        let close_button = element("button")?;
        dom.set_attribute(&close_button, "class", MODAL_CLOSE_CLASS);
        dom.set_attribute(&close_button, "aria-label", MODAL_CLOSE_ARIA);
        dom.set_text(&close_button, MODAL_CLOSE_LABEL);

        dom.append_child(&actions, &close_button);
        dom.append_child(&dialog, &heading);
        dom.append_child(&dialog, &message);
        dom.append_child(&dialog, &actions);
        dom.append_child(&overlay, &dialog);
        Some((overlay, close_button))
    }

    /// Register the instance's listeners and show it.
    fn activate_modal(&self, overlay: D::Node, close_button: D::Node) {
        let mut listeners = Vec::with_capacity(3);

        let background = overlay.clone();
        listeners.extend(self.listen(ListenTarget::Node(overlay.clone()), EventKind::Click, move |app, event| {
            if event.target.as_ref() == Some(&background) {
                app.close_update_modal();
            }
            Propagation::PROCEED
        }));
        listeners.extend(self.listen(ListenTarget::Node(close_button.clone()), EventKind::Click, |app, _| {
            app.close_update_modal();
            Propagation::PROCEED
        }));
        listeners.extend(self.listen(ListenTarget::Document, EventKind::KeyDown, |app, event| {
            if event.key.as_deref() == Some("Escape") {
                app.close_update_modal();
            }
            Propagation::PROCEED
        }));

        let generation = {
            let mut session = self.session_mut();
            session.modal_generation += 1;
            let generation = session.modal_generation;
            session.modal = Some(ModalInstance {
                overlay: overlay.clone(),
                close_button: close_button.clone(),
                listeners,
                generation,
                closing: false,
            });
            generation
        };

        let dom = self.dom();
        if let Some(body) = dom.body() {
            dom.set_style(&body, "overflow", "hidden");
        }
        dom.focus(&close_button);

        let app = self.clone();
        self.platform().spawn(async move {
            app.platform().next_frame().await;
            let showing = app
                .session()
                .modal
                .as_ref()
                .is_some_and(|modal| !modal.closing && modal.generation == generation);
            if showing {
                app.dom().add_class(&overlay, VISIBLE_CLASS);
            }
        });
    }
}

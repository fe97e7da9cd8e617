//! Scroll-triggered reveal animations.
//!
//! Elements marked `.animation-entree` get the `visible` class while they
//! intersect the viewport and lose it when they leave, so the transition
//! replays on every pass. The observer is replaced wholesale after each page
//! swap; swapped-in elements are unknown to the previous instance.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::rc::Rc;

use super::Portfolio;
use crate::dom::markers::{REVEAL_CLASS, REVEAL_DELAY_ATTR, REVEAL_KIND_ATTR, VISIBLE_CLASS};
use crate::dom::{Dom, IntersectionCallback, RevealObserver};
use crate::platform::Platform;

impl<D: Dom, P: Platform> Portfolio<D, P> {
    /// Create the observer and register every marked element.
    pub fn init_animations(&self) {
        log::info!("initializing reveal animations");
        self.install_observer();
    }

    /// Observe every marked element with the current observer.
    ///
    /// Returns the number of registered elements.
    pub fn register_animated_elements(&self) -> usize {
        let observer = self.session().observer.clone();
        let Some(observer) = observer else {
            log::warn!("no reveal observer installed, skipping registration");
            return 0;
        };
        let dom = self.dom();
        let elements = dom.elements_with_class(REVEAL_CLASS);
        for element in &elements {
            if let Some(raw) = dom.attribute(element, REVEAL_DELAY_ATTR) {
                match raw.trim().parse::<u32>() {
                    Ok(delay) => dom.set_style(element, "transition-delay", &format!("{delay}ms")),
                    Err(err) => log::warn!("ignoring invalid {REVEAL_DELAY_ATTR}={raw:?}: {err}"),
                }
            }
            observer.observe(element);
        }
        log::debug!("{} elements observed for reveal animations", elements.len());
        elements.len()
    }

    /// Drop the current observer and rebuild registration after a short delay.
    pub fn reinit_animations(&self) {
        let previous = self.session_mut().observer.take();
        if let Some(observer) = previous {
            observer.disconnect();
        }
        let app = self.clone();
        self.platform().spawn(async move {
            app.platform().sleep(app.config().timings.reveal_rebuild_ms).await;
            app.install_observer();
        });
    }

    /// Log every marked element with its animation attributes.
    pub fn debug_animations(&self) {
        let dom = self.dom();
        let elements = dom.elements_with_class(REVEAL_CLASS);
        log::info!("{} elements carry reveal animations", elements.len());
        for (index, element) in elements.iter().enumerate() {
            log::info!(
                "{}. <{}> class={:?} animation={:?} delay={:?} visible={}",
                index + 1,
                dom.tag_name(element),
                dom.attribute(element, "class").unwrap_or_default(),
                dom.attribute(element, REVEAL_KIND_ATTR),
                dom.attribute(element, REVEAL_DELAY_ATTR),
                dom.has_class(element, VISIBLE_CLASS),
            );
        }
    }

    fn install_observer(&self) {
        let observer = self.dom().create_observer(&self.config().observer, self.visibility_callback());
        let previous = self.session_mut().observer.take();
        if let Some(previous) = previous {
            previous.disconnect();
        }
        let Some(observer) = observer else {
            log::warn!("visibility observer unavailable, reveal animations disabled");
            return;
        };
        self.session_mut().observer = Some(Rc::new(observer));
        self.register_animated_elements();
    }

    fn visibility_callback(&self) -> IntersectionCallback<D::Node> {
        let weak = self.downgrade();
        Rc::new(move |entries: &[(D::Node, bool)]| {
            let Some(app) = Self::upgrade(&weak) else {
                return;
            };
            for (element, intersecting) in entries {
                if *intersecting {
                    app.dom().add_class(element, VISIBLE_CLASS);
                } else {
                    app.dom().remove_class(element, VISIBLE_CLASS);
                }
            }
        })
    }
}

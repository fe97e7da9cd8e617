//! The portfolio controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `Portfolio` instance exists per page session. It owns the document and
//! platform seams, the site configuration and the mutable [`Session`]. The
//! behavior is split by concern across the submodules, each adding methods
//! to `Portfolio`:
//!
//! - `navigation`: fragment fetch, animated swap, history, active links
//! - `reveal`: scroll-triggered reveal animations
//! - `theme`: persisted light/dark theme
//! - `menu`: mobile navigation panel
//! - `notify`: toasts, clipboard, smooth section scrolling
//! - `modal`: "update in progress" overlay for placeholder project links
//! - `dispatch`: the document-level click route table
//! - `scripting`: helpers exposed to page scripts and the console
//!
//! Event handlers hold a weak reference to the controller; spawned tasks hold
//! a strong clone for their own duration only.

pub mod dispatch;
pub mod menu;
pub mod modal;
pub mod navigation;
pub mod notify;
pub mod reveal;
pub mod scripting;
pub mod theme;


use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use crate::config::SiteConfig;
use crate::dom::{Dom, DomEvent, EventKind, ListenTarget, Propagation};
use crate::platform::Platform;
use crate::state::Session;
use crate::state::history::page_from_hash;

pub use navigation::LoadOutcome;
pub use notify::NotificationKind;
pub use scripting::ScriptHelper;

struct Host<D: Dom, P: Platform> {
    dom: D,
    platform: P,
    config: SiteConfig,
    session: RefCell<Session<D>>,
}

/// Client behavior controller for the portfolio shell page.
pub struct Portfolio<D: Dom, P: Platform> {
    host: Rc<Host<D, P>>,
}

impl<D: Dom, P: Platform> Clone for Portfolio<D, P> {
    fn clone(&self) -> Self {
        Self { host: Rc::clone(&self.host) }
    }
}

impl<D: Dom, P: Platform> Portfolio<D, P> {
    pub fn new(dom: D, platform: P, config: SiteConfig) -> Self {
        let session = RefCell::new(Session::new());
        Self { host: Rc::new(Host { dom, platform, config, session }) }
    }

    pub fn dom(&self) -> &D {
        &self.host.dom
    }

    pub fn platform(&self) -> &P {
        &self.host.platform
    }

    pub fn config(&self) -> &SiteConfig {
        &self.host.config
    }

    /// Identifier of the last fully loaded page, if any load succeeded yet.
    pub fn current_page(&self) -> Option<String> {
        self.session().current_page.clone()
    }

    pub fn menu_open(&self) -> bool {
        self.session().menu_open
    }

    /// Wire every controller and load the initial page.
    ///
    /// The initial page is the one named by the location hash, or the home
    /// page when the hash is empty.
    pub fn start(&self) {
        log::info!("starting portfolio of {}", self.config().owner_name);

        self.init_navigation();
        self.init_theme();
        self.init_animations();
        self.init_mobile_menu();

        let hash = self.platform().location_hash();
        let initial = page_from_hash(&hash).unwrap_or_else(|| self.config().home_page.clone());
        let app = self.clone();
        self.platform().spawn(async move {
            app.load_initial_page(&initial).await;
        });

        log::info!("portfolio started");
    }

    fn init_navigation(&self) {
        log::debug!("wiring click routing and history navigation");
        self.listen(ListenTarget::Document, EventKind::Click, |app, event| app.handle_click(event));
        self.listen(ListenTarget::Window, EventKind::PopState, |app, event| {
            app.handle_pop_state(event);
            Propagation::PROCEED
        });
    }

    /// Register a handler that runs against this controller while it lives.
    fn listen(
        &self,
        target: ListenTarget<D::Node>,
        kind: EventKind,
        handler: impl Fn(&Self, &DomEvent<D::Node>) -> Propagation + 'static,
    ) -> Option<D::Listener> {
        let weak = self.downgrade();
        let listener = self.dom().listen(
            target,
            kind,
            Rc::new(move |event: &DomEvent<D::Node>| {
                let Some(app) = Self::upgrade(&weak) else {
                    return Propagation::PROCEED;
                };
                handler(&app, event)
            }),
        );
        if listener.is_none() {
            log::warn!("could not register {} listener", kind.name());
        }
        listener
    }

    fn downgrade(&self) -> Weak<Host<D, P>> {
        Rc::downgrade(&self.host)
    }

    fn upgrade(weak: &Weak<Host<D, P>>) -> Option<Self> {
        weak.upgrade().map(|host| Self { host })
    }

    fn session(&self) -> Ref<'_, Session<D>> {
        self.host.session.borrow()
    }

    fn session_mut(&self) -> RefMut<'_, Session<D>> {
        self.host.session.borrow_mut()
    }
}

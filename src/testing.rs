//! Shared fixture for controller tests: a minimal shell page on the
//! in-memory document, routed fragments, and a virtual clock driver.

use std::collections::BTreeMap;

use futures::executor::LocalPool;

use crate::app::Portfolio;
use crate::config::SiteConfig;
use crate::dom::Dom;
use crate::dom::markers::{
    CONTENT_ID, LOADER_ID, MENU_BUTTON_ID, MENU_PANEL_CLASS, NAV_LINK_CLASS, PAGE_ATTR, THEME_BUTTON_ID,
};
use crate::dom::memory::{MemoryDom, NodeId};
use crate::pages::catalog::fragment_url;
use crate::platform::memory::MemoryPlatform;

pub const PAGES: [&str; 6] = ["accueil", "apropos", "competences", "projets", "experience", "contact"];

pub type TestApp = Portfolio<MemoryDom, MemoryPlatform>;

/// Markup served for `page` by the default routes.
pub fn fragment_for(page: &str) -> String {
    format!("<section data-fragment=\"{page}\"></section>")
}

pub struct Harness {
    pub dom: MemoryDom,
    pub platform: MemoryPlatform,
    pub app: TestApp,
    pub content: NodeId,
    pub loader: NodeId,
    pub theme_button: NodeId,
    pub menu_button: NodeId,
    pub menu_panel: NodeId,
    nav_links: BTreeMap<String, NodeId>,
    pool: LocalPool,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(SiteConfig::default())
    }

    /// Build the shell without starting the controller.
    pub fn with_config(config: SiteConfig) -> Self {
        let pool = LocalPool::new();
        let dom = MemoryDom::new();
        let platform = MemoryPlatform::new(pool.spawner());
        let body = dom.body_id();

        let header = dom.element(body, "header");
        let theme_button = dom.element(header, "button");
        dom.set_attribute(&theme_button, "id", THEME_BUTTON_ID);
        let menu_button = dom.element(header, "button");
        dom.set_attribute(&menu_button, "id", MENU_BUTTON_ID);

        let menu_panel = dom.element(header, "ul");
        dom.set_attribute(&menu_panel, "class", MENU_PANEL_CLASS);
        let nav_links = PAGES
            .iter()
            .map(|page| {
                let item = dom.element(menu_panel, "li");
                let link = dom.element(item, "a");
                dom.set_attribute(&link, "class", NAV_LINK_CLASS);
                dom.set_attribute(&link, PAGE_ATTR, page);
                dom.set_attribute(&link, "href", &format!("#{page}"));
                ((*page).to_owned(), link)
            })
            .collect();

        let loader = dom.element(body, "div");
        dom.set_attribute(&loader, "id", LOADER_ID);
        let content = dom.element(body, "main");
        dom.set_attribute(&content, "id", CONTENT_ID);

        for page in PAGES {
            platform.route(&fragment_url(&config, page), 0, &fragment_for(page));
        }

        let app = Portfolio::new(dom.clone(), platform.clone(), config);
        Self { dom, platform, app, content, loader, theme_button, menu_button, menu_panel, nav_links, pool }
    }

    /// Start the controller and let the initial page load settle.
    pub fn started() -> Self {
        let mut harness = Self::new();
        harness.app.start();
        harness.run_idle();
        harness
    }

    pub fn nav_link(&self, page: &str) -> NodeId {
        self.nav_links[page]
    }

    pub fn content_html(&self) -> String {
        self.dom.inner_html(self.content)
    }

    /// Run every task that can make progress without the clock moving.
    pub fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Move the virtual clock forward by `ms`, firing due timers in order.
    pub fn advance(&mut self, ms: u64) {
        let target = self.platform.now() + ms;
        loop {
            self.pool.run_until_stalled();
            if !self.platform.fire_next_due(target) {
                break;
            }
        }
        self.platform.set_now(target);
    }

    /// Fire every pending timer until no task is waiting.
    pub fn run_idle(&mut self) {
        loop {
            self.pool.run_until_stalled();
            if !self.platform.fire_next_due(u64::MAX) {
                break;
            }
        }
    }
}

//! Document-level click routing.
//!
//! One listener on the document resolves every click against a fixed
//! priority table. Each route tests the target and its ancestors for a
//! marker; exclusive routes end evaluation once they match.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use super::Portfolio;
use crate::dom::markers::{
    ACTION_ATTR, DISABLED_ATTR, NAV_LINK_CLASS, PAGE_ATTR, PLACEHOLDER_LINK_ID, PROJECT_LINK_CLASS, RELOAD_ACTION,
    UPDATE_ATTR,
};
use crate::dom::{Dom, DomEvent, Propagation};
use crate::platform::Platform;

/// Effect requested by a routed click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    OpenUpdateModal,
    Reload,
    Navigate(String),
    CloseMenu,
}

/// Marker-matching routes, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickRoute {
    /// Unpublished project link: opens the modal instead of following it.
    PlaceholderLink,
    /// Reload button of the load error fragment.
    ReloadAction,
    /// Any element naming a target page.
    PageLink,
    /// Navigation bar link; closes the mobile menu.
    NavLink,
}

impl ClickRoute {
    pub const PRIORITY: [Self; 4] = [Self::PlaceholderLink, Self::ReloadAction, Self::PageLink, Self::NavLink];

    /// Whether a match stops evaluation of lower-priority routes.
    #[must_use]
    pub const fn exclusive(self) -> bool {
        matches!(self, Self::PlaceholderLink | Self::ReloadAction)
    }

    #[must_use]
    pub const fn propagation(self) -> Propagation {
        match self {
            Self::PlaceholderLink => Propagation::SWALLOW,
            Self::ReloadAction | Self::PageLink => Propagation::PREVENT,
            Self::NavLink => Propagation::PROCEED,
        }
    }

    /// Whether `node` itself carries this route's marker.
    pub fn matches<D: Dom>(self, dom: &D, node: &D::Node) -> bool {
        match self {
            Self::PlaceholderLink => is_placeholder_link(dom, node),
            Self::ReloadAction => dom.attribute(node, ACTION_ATTR).as_deref() == Some(RELOAD_ACTION),
            Self::PageLink => dom.attribute(node, PAGE_ATTR).is_some_and(|page| !page.is_empty()),
            Self::NavLink => dom.has_class(node, NAV_LINK_CLASS),
        }
    }

    fn action<D: Dom>(self, dom: &D, matched: &D::Node) -> ClickAction {
        match self {
            Self::PlaceholderLink => ClickAction::OpenUpdateModal,
            Self::ReloadAction => ClickAction::Reload,
            Self::PageLink => ClickAction::Navigate(dom.attribute(matched, PAGE_ATTR).unwrap_or_default()),
            Self::NavLink => ClickAction::CloseMenu,
        }
    }
}

fn is_placeholder_link<D: Dom>(dom: &D, node: &D::Node) -> bool {
    if dom.attribute(node, "id").as_deref() == Some(PLACEHOLDER_LINK_ID) {
        return true;
    }
    if dom.tag_name(node) != "a" {
        return false;
    }
    let flagged = |name: &str| dom.attribute(node, name).as_deref() == Some("true");
    (dom.has_class(node, PROJECT_LINK_CLASS) && flagged(UPDATE_ATTR)) || flagged(DISABLED_ATTR)
}

/// Result of routing one click.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickDispatch {
    pub actions: Vec<ClickAction>,
    pub propagation: Propagation,
}

/// Evaluate the route table against `target` and its ancestors.
pub fn route_click<D: Dom>(dom: &D, target: &D::Node) -> ClickDispatch {
    let mut dispatch = ClickDispatch::default();
    for route in ClickRoute::PRIORITY {
        let Some(matched) = dom.closest(target, &|node: &D::Node| route.matches(dom, node)) else {
            continue;
        };
        dispatch.actions.push(route.action(dom, &matched));
        dispatch.propagation = dispatch.propagation.merge(route.propagation());
        if route.exclusive() {
            break;
        }
    }
    dispatch
}

impl<D: Dom, P: Platform> Portfolio<D, P> {
    /// Route a document click and perform the resulting actions.
    pub(crate) fn handle_click(&self, event: &DomEvent<D::Node>) -> Propagation {
        let Some(target) = event.target.as_ref() else {
            return Propagation::PROCEED;
        };
        let dispatch = route_click(self.dom(), target);
        for action in dispatch.actions {
            self.perform(action);
        }
        dispatch.propagation
    }

    fn perform(&self, action: ClickAction) {
        match action {
            ClickAction::OpenUpdateModal => {
                self.open_update_modal();
            }
            ClickAction::Reload => {
                log::info!("reloading page");
                self.platform().reload();
            }
            ClickAction::Navigate(page) => self.navigate_to(&page),
            ClickAction::CloseMenu => {
                if self.menu_open() {
                    self.toggle_mobile_menu();
                }
            }
        }
    }
}

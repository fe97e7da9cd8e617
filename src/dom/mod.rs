//! Document access seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers never touch `web-sys` directly. They talk to a [`Dom`]
//! implementation: [`web::WebDom`] in the browser (`hydrate`), and an
//! in-memory document in unit tests. Node handles are cheap clones.

pub mod markers;
#[cfg(test)]
pub mod memory;
#[cfg(feature = "hydrate")]
pub mod web;

use std::rc::Rc;

use crate::config::ObserverOptions;

/// Browser events the controllers subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
    PopState,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::PopState => "popstate",
        }
    }
}

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenTarget<N> {
    Document,
    Window,
    Node(N),
}

/// The parts of a DOM event the controllers read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomEvent<N> {
    /// Element the event was dispatched to, if it is an element.
    pub target: Option<N>,
    /// `KeyboardEvent.key` for key events.
    pub key: Option<String>,
    /// Serialized `PopStateEvent.state` (JSON) for history events.
    pub history_state: Option<String>,
}

impl<N> DomEvent<N> {
    pub fn click(target: N) -> Self {
        Self { target: Some(target), key: None, history_state: None }
    }

    pub fn key(key: &str) -> Self {
        Self { target: None, key: Some(key.to_owned()), history_state: None }
    }

    pub fn pop_state(state: Option<String>) -> Self {
        Self { target: None, key: None, history_state: state }
    }
}

/// What a handler asks the browser to do with the event afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Propagation {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl Propagation {
    pub const PROCEED: Self = Self { prevent_default: false, stop_propagation: false };
    pub const PREVENT: Self = Self { prevent_default: true, stop_propagation: false };
    pub const SWALLOW: Self = Self { prevent_default: true, stop_propagation: true };

    /// Combine two responses; a request from either side wins.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            prevent_default: self.prevent_default || other.prevent_default,
            stop_propagation: self.stop_propagation || other.stop_propagation,
        }
    }
}

/// Event callback registered through [`Dom::listen`].
pub type Handler<N> = Rc<dyn Fn(&DomEvent<N>) -> Propagation>;

/// Intersection callback: each observed node with its intersecting flag.
pub type IntersectionCallback<N> = Rc<dyn Fn(&[(N, bool)])>;

/// Visibility observer handle.
pub trait RevealObserver {
    type Node;

    fn observe(&self, node: &Self::Node);

    /// Stop delivering callbacks for every observed node.
    fn disconnect(&self);
}

/// Document operations used by the controllers.
///
/// Mutating calls are infallible from the caller's point of view; browser
/// implementations log failures instead of surfacing them.
pub trait Dom: 'static {
    type Node: Clone + PartialEq + std::fmt::Debug + 'static;
    type Observer: RevealObserver<Node = Self::Node>;
    type Listener: Clone + std::fmt::Debug + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First attached element matching the CSS `selector`. An invalid
    /// selector matches nothing.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// Attached elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Lower-case tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Inline style property value, `None` when unset.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Remove an inline property so the stylesheet value applies again.
    fn remove_style(&self, node: &Self::Node, property: &str);

    fn set_inner_html(&self, node: &Self::Node, html: &str);

    fn set_text(&self, node: &Self::Node, text: &str);

    fn text(&self, node: &Self::Node) -> Option<String>;

    fn create_element(&self, tag: &str) -> Option<Self::Node>;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Detach `node` from the document.
    fn remove(&self, node: &Self::Node);

    fn is_attached(&self, node: &Self::Node) -> bool;

    fn focus(&self, node: &Self::Node);

    fn scroll_into_view(&self, node: &Self::Node);

    fn body(&self) -> Option<Self::Node>;

    /// The `<html>` element.
    fn root(&self) -> Option<Self::Node>;

    fn title(&self) -> String;

    fn set_title(&self, title: &str);

    fn listen(
        &self,
        target: ListenTarget<Self::Node>,
        kind: EventKind,
        handler: Handler<Self::Node>,
    ) -> Option<Self::Listener>;

    fn unlisten(&self, listener: &Self::Listener);

    fn create_observer(
        &self,
        options: &ObserverOptions,
        on_change: IntersectionCallback<Self::Node>,
    ) -> Option<Self::Observer>;

    /// Walk from `node` up through its ancestors, returning the first match.
    fn closest(&self, node: &Self::Node, matches: &dyn Fn(&Self::Node) -> bool) -> Option<Self::Node> {
        let mut current = Some(node.clone());
        while let Some(candidate) = current {
            if matches(&candidate) {
                return Some(candidate);
            }
            current = self.parent(&candidate);
        }
        None
    }
}

//! In-memory document used by the controller tests.
//!
//! Markup assigned through `set_inner_html` is stored verbatim and not parsed;
//! tests build the element structure they need with [`MemoryDom::element`].
//! Events are dispatched synchronously with bubbling from the target through
//! its ancestors to the document and the window.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{
    Dom, DomEvent, EventKind, Handler, IntersectionCallback, ListenTarget, Propagation, RevealObserver,
};
use crate::config::ObserverOptions;

const HTML: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(usize);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    inner_html: String,
    text: Option<String>,
    parent: Option<NodeId>,
}

struct ObserverRecord {
    options: ObserverOptions,
    callback: IntersectionCallback<NodeId>,
    targets: Vec<NodeId>,
    connected: bool,
}

struct ListenerRecord {
    target: ListenTarget<NodeId>,
    kind: EventKind,
    handler: Handler<NodeId>,
}

#[derive(Default)]
struct Inner {
    nodes: Vec<NodeData>,
    observers: Vec<ObserverRecord>,
    listeners: Vec<Option<ListenerRecord>>,
    title: String,
    focused: Option<NodeId>,
    scrolled_into_view: Vec<NodeId>,
    observe_hook: Option<Rc<dyn Fn(NodeId)>>,
}

/// Shared handle to an in-memory document containing `<html><body>`.
#[derive(Clone)]
pub struct MemoryDom {
    inner: Rc<RefCell<Inner>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let mut inner = Inner::default();
        inner.nodes.push(NodeData { tag: "html".to_owned(), ..NodeData::default() });
        inner.nodes.push(NodeData { tag: "body".to_owned(), parent: Some(HTML), ..NodeData::default() });
        Self { inner: Rc::new(RefCell::new(inner)) }
    }

    /// Create an attached element under `parent`.
    pub fn element(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        inner.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            ..NodeData::default()
        });
        NodeId(inner.nodes.len() - 1)
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    pub fn html_id(&self) -> NodeId {
        HTML
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        self.inner.borrow().nodes.get(node.0).map(|n| n.inner_html.clone()).unwrap_or_default()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.inner.borrow().focused
    }

    pub fn scrolled_into_view(&self) -> Vec<NodeId> {
        self.inner.borrow().scrolled_into_view.clone()
    }

    /// Number of attached elements whose `id` attribute equals `id`.
    pub fn count_with_id(&self, id: &str) -> usize {
        let count = self
            .inner
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.attrs.get("id").is_some_and(|v| v == id))
            .map(|(index, _)| NodeId(index))
            .collect::<Vec<_>>();
        count.into_iter().filter(|node| self.is_attached(node)).count()
    }

    /// Live (not disconnected) observers.
    pub fn live_observer_count(&self) -> usize {
        self.inner.borrow().observers.iter().filter(|o| o.connected).count()
    }

    /// Whether any live observer currently watches `node`.
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.inner
            .borrow()
            .observers
            .iter()
            .any(|o| o.connected && o.targets.contains(&node))
    }

    /// Options of the most recently created observer.
    pub fn last_observer_options(&self) -> Option<ObserverOptions> {
        self.inner.borrow().observers.last().map(|o| o.options.clone())
    }

    /// Deliver an intersection change for `node` to every live observer of it.
    pub fn fire_intersection(&self, node: NodeId, intersecting: bool) {
        let callbacks = self
            .inner
            .borrow()
            .observers
            .iter()
            .filter(|o| o.connected && o.targets.contains(&node))
            .map(|o| Rc::clone(&o.callback))
            .collect::<Vec<_>>();
        for callback in callbacks {
            callback(&[(node, intersecting)]);
        }
    }

    /// Run `hook` synchronously every time an observer starts watching a node.
    pub fn on_observe(&self, hook: impl Fn(NodeId) + 'static) {
        self.inner.borrow_mut().observe_hook = Some(Rc::new(hook));
    }

    /// Live listeners registered for `target` and `kind`.
    pub fn listener_count(&self, target: &ListenTarget<NodeId>, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .flatten()
            .filter(|l| &l.target == target && l.kind == kind)
            .count()
    }

    /// Click `node`, bubbling through its ancestors, the document and the window.
    pub fn click(&self, node: NodeId) -> Propagation {
        let mut path = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            path.push(ListenTarget::Node(id));
            current = self.parent(&id);
        }
        if self.is_attached(&node) {
            path.push(ListenTarget::Document);
            path.push(ListenTarget::Window);
        }
        self.dispatch_along(&path, EventKind::Click, &DomEvent::click(node))
    }

    /// Press a key with focus on the document body.
    pub fn press_key(&self, key: &str) -> Propagation {
        let path = [ListenTarget::Node(BODY), ListenTarget::Node(HTML), ListenTarget::Document, ListenTarget::Window];
        self.dispatch_along(&path, EventKind::KeyDown, &DomEvent::key(key))
    }

    /// Fire `popstate` on the window with an optional serialized state.
    pub fn pop_state(&self, state: Option<&str>) -> Propagation {
        let event = DomEvent::pop_state(state.map(str::to_owned));
        self.dispatch_along(&[ListenTarget::Window], EventKind::PopState, &event)
    }

    fn dispatch_along(&self, path: &[ListenTarget<NodeId>], kind: EventKind, event: &DomEvent<NodeId>) -> Propagation {
        let mut outcome = Propagation::PROCEED;
        for level in path {
            let handlers = self
                .inner
                .borrow()
                .listeners
                .iter()
                .flatten()
                .filter(|l| &l.target == level && l.kind == kind)
                .map(|l| Rc::clone(&l.handler))
                .collect::<Vec<_>>();
            for handler in handlers {
                outcome = outcome.merge(handler(event));
            }
            if outcome.stop_propagation {
                break;
            }
        }
        outcome
    }

    fn with_node<R>(&self, node: NodeId, f: impl FnOnce(&NodeData) -> R) -> Option<R> {
        self.inner.borrow().nodes.get(node.0).map(f)
    }

    fn with_node_mut(&self, node: NodeId, f: impl FnOnce(&mut NodeData)) {
        if let Some(data) = self.inner.borrow_mut().nodes.get_mut(node.0) {
            f(data);
        }
    }

    fn detach_children(&self, node: NodeId) {
        for data in &mut self.inner.borrow_mut().nodes {
            if data.parent == Some(node) {
                data.parent = None;
            }
        }
    }
}

enum SimpleSelector {
    Id(String),
    Class(String),
    Tag(String),
    Attr(String, Option<String>),
}

impl SimpleSelector {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let word = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if let Some(id) = raw.strip_prefix('#') {
            return word(id).then(|| Self::Id(id.to_owned()));
        }
        if let Some(class) = raw.strip_prefix('.') {
            return word(class).then(|| Self::Class(class.to_owned()));
        }
        if let Some(body) = raw.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            return match body.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
                    word(name.trim()).then(|| Self::Attr(name.trim().to_owned(), Some(value.to_owned())))
                }
                None => word(body.trim()).then(|| Self::Attr(body.trim().to_owned(), None)),
            };
        }
        word(raw).then(|| Self::Tag(raw.to_ascii_lowercase()))
    }

    fn matches(&self, node: &NodeData) -> bool {
        match self {
            Self::Id(id) => node.attrs.get("id") == Some(id),
            Self::Class(class) => node.classes.contains(class),
            Self::Tag(tag) => &node.tag == tag,
            Self::Attr(name, None) => node.attrs.contains_key(name),
            Self::Attr(name, Some(value)) => node.attrs.get(name) == Some(value),
        }
    }
}

pub struct MemoryObserver {
    dom: MemoryDom,
    index: usize,
}

impl RevealObserver for MemoryObserver {
    type Node = NodeId;

    fn observe(&self, node: &NodeId) {
        let hook = {
            let mut inner = self.dom.inner.borrow_mut();
            if let Some(record) = inner.observers.get_mut(self.index) {
                if !record.targets.contains(node) {
                    record.targets.push(*node);
                }
                record.connected = true;
            }
            inner.observe_hook.clone()
        };
        if let Some(hook) = hook {
            hook(*node);
        }
    }

    fn disconnect(&self) {
        if let Some(record) = self.dom.inner.borrow_mut().observers.get_mut(self.index) {
            record.targets.clear();
            record.connected = false;
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;
    type Observer = MemoryObserver;
    type Listener = ListenerId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let candidates = self
            .inner
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.attrs.get("id").is_some_and(|v| v == id))
            .map(|(index, _)| NodeId(index))
            .collect::<Vec<_>>();
        candidates.into_iter().find(|node| self.is_attached(node))
    }

    /// Supports the simple selectors `#id`, `.class`, `tag`, `[attr]` and
    /// `[attr=value]` (value optionally quoted).
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = SimpleSelector::parse(selector)?;
        let candidates = self
            .inner
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| selector.matches(n))
            .map(|(index, _)| NodeId(index))
            .collect::<Vec<_>>();
        candidates.into_iter().find(|node| self.is_attached(node))
    }

    fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        let candidates = self
            .inner
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.classes.iter().any(|c| c == class))
            .map(|(index, _)| NodeId(index))
            .collect::<Vec<_>>();
        candidates.into_iter().filter(|node| self.is_attached(node)).collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.with_node(*node, |n| n.parent).flatten()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.with_node(*node, |n| n.tag.clone()).unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        if name == "class" {
            return self.with_node(*node, |n| n.classes.join(" "));
        }
        self.with_node(*node, |n| n.attrs.get(name).cloned()).flatten()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if name == "class" {
            let classes = value.split_whitespace().map(str::to_owned).collect();
            self.with_node_mut(*node, |n| n.classes = classes);
            return;
        }
        self.with_node_mut(*node, |n| {
            n.attrs.insert(name.to_owned(), value.to_owned());
        });
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.with_node(*node, |n| n.classes.iter().any(|c| c == class)).unwrap_or(false)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(*node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(*node, |n| n.classes.retain(|c| c != class));
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.with_node(*node, |n| n.styles.get(property).cloned()).flatten()
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_node_mut(*node, |n| {
            n.styles.insert(property.to_owned(), value.to_owned());
        });
    }

    fn remove_style(&self, node: &NodeId, property: &str) {
        self.with_node_mut(*node, |n| {
            n.styles.remove(property);
        });
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        self.detach_children(*node);
        self.with_node_mut(*node, |n| {
            n.inner_html = html.to_owned();
            n.text = None;
        });
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.detach_children(*node);
        self.with_node_mut(*node, |n| {
            n.inner_html = text.to_owned();
            n.text = Some(text.to_owned());
        });
    }

    fn text(&self, node: &NodeId) -> Option<String> {
        self.with_node(*node, |n| n.text.clone()).flatten()
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut inner = self.inner.borrow_mut();
        inner.nodes.push(NodeData { tag: tag.to_ascii_lowercase(), ..NodeData::default() });
        Some(NodeId(inner.nodes.len() - 1))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let parent = *parent;
        self.with_node_mut(*child, |n| n.parent = Some(parent));
    }

    fn remove(&self, node: &NodeId) {
        self.with_node_mut(*node, |n| n.parent = None);
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == HTML {
                return true;
            }
            current = self.parent(&id);
        }
        false
    }

    fn focus(&self, node: &NodeId) {
        if self.is_attached(node) {
            self.inner.borrow_mut().focused = Some(*node);
        }
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.inner.borrow_mut().scrolled_into_view.push(*node);
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn root(&self) -> Option<NodeId> {
        Some(HTML)
    }

    fn title(&self) -> String {
        self.inner.borrow().title.clone()
    }

    fn set_title(&self, title: &str) {
        title.clone_into(&mut self.inner.borrow_mut().title);
    }

    fn listen(&self, target: ListenTarget<NodeId>, kind: EventKind, handler: Handler<NodeId>) -> Option<ListenerId> {
        let mut inner = self.inner.borrow_mut();
        inner.listeners.push(Some(ListenerRecord { target, kind, handler }));
        Some(ListenerId(inner.listeners.len() - 1))
    }

    fn unlisten(&self, listener: &ListenerId) {
        if let Some(slot) = self.inner.borrow_mut().listeners.get_mut(listener.0) {
            *slot = None;
        }
    }

    fn create_observer(
        &self,
        options: &ObserverOptions,
        on_change: IntersectionCallback<NodeId>,
    ) -> Option<MemoryObserver> {
        let mut inner = self.inner.borrow_mut();
        inner.observers.push(ObserverRecord {
            options: options.clone(),
            callback: on_change,
            targets: Vec::new(),
            connected: true,
        });
        Some(MemoryObserver { dom: self.clone(), index: inner.observers.len() - 1 })
    }
}

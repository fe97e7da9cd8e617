//! `web-sys` implementation of the document seam.
//!
//! Listener closures are owned by a registry keyed by listener id. Removal
//! detaches the closure immediately but drops it from a microtask, since a
//! handler may deregister itself while it is running.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, PopStateEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use super::{Dom, DomEvent, EventKind, Handler, IntersectionCallback, ListenTarget, RevealObserver};
use crate::config::ObserverOptions;

fn warn_on_err<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err:?}");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

struct Registration {
    target: EventTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(Event)>,
}

pub struct WebDom {
    document: Document,
    listeners: RefCell<HashMap<ListenerId, Registration>>,
    next_listener: Cell<u32>,
}

impl WebDom {
    /// Bind to the current window's document.
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document, listeners: RefCell::new(HashMap::new()), next_listener: Cell::new(0) })
    }

    fn event_target(&self, target: &ListenTarget<Element>) -> Option<EventTarget> {
        match target {
            ListenTarget::Document => Some(self.document.clone().into()),
            ListenTarget::Window => web_sys::window().map(Into::into),
            ListenTarget::Node(element) => Some(element.clone().into()),
        }
    }

    fn html(node: &Element) -> Option<&HtmlElement> {
        node.dyn_ref::<HtmlElement>()
    }
}

fn translate(event: &Event) -> DomEvent<Element> {
    let target = event.target().and_then(|t| t.dyn_ref::<Element>().cloned());
    let key = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key);
    let history_state = event
        .dyn_ref::<PopStateEvent>()
        .map(PopStateEvent::state)
        .filter(|state| !state.is_null() && !state.is_undefined())
        .and_then(|state| match js_sys::JSON::stringify(&state) {
            Ok(json) => json.as_string(),
            Err(err) => {
                log::debug!("history state is not serializable: {err:?}");
                None
            }
        });
    DomEvent { target, key, history_state }
}

pub struct WebObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl RevealObserver for WebObserver {
    type Node = Element;

    fn observe(&self, node: &Element) {
        self.observer.observe(node);
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Dom for WebDom {
    type Node = Element;
    type Observer = WebObserver;
    type Listener = ListenerId;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {err:?}");
                None
            }
        }
    }

    fn elements_with_class(&self, class: &str) -> Vec<Element> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length()).filter_map(|i| collection.item(i)).collect()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        warn_on_err(node.set_attribute(name, value), "setAttribute");
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        warn_on_err(node.class_list().add_1(class), "classList.add");
    }

    fn remove_class(&self, node: &Element, class: &str) {
        warn_on_err(node.class_list().remove_1(class), "classList.remove");
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        match Self::html(node)?.style().get_property_value(property) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(html) = Self::html(node) {
            warn_on_err(html.style().set_property(property, value), "style.setProperty");
        }
    }

    fn remove_style(&self, node: &Element, property: &str) {
        if let Some(html) = Self::html(node) {
            warn_on_err(html.style().remove_property(property), "style.removeProperty");
        }
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn text(&self, node: &Element) -> Option<String> {
        node.text_content()
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(err) => {
                log::warn!("createElement({tag}) failed: {err:?}");
                None
            }
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        warn_on_err(parent.append_child(child), "appendChild");
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn is_attached(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn focus(&self, node: &Element) {
        if let Some(html) = Self::html(node) {
            warn_on_err(html.focus(), "focus");
        }
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn listen(&self, target: ListenTarget<Element>, kind: EventKind, handler: Handler<Element>) -> Option<ListenerId> {
        let event_target = self.event_target(&target)?;
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let response = handler(&translate(&event));
            if response.prevent_default {
                event.prevent_default();
            }
            if response.stop_propagation {
                event.stop_propagation();
            }
        });
        if let Err(err) = event_target.add_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref()) {
            log::warn!("addEventListener({}) failed: {err:?}", kind.name());
            return None;
        }

        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0.wrapping_add(1));
        self.listeners.borrow_mut().insert(id, Registration { target: event_target, kind, closure });
        Some(id)
    }

    fn unlisten(&self, listener: &ListenerId) {
        let Some(registration) = self.listeners.borrow_mut().remove(listener) else {
            return;
        };
        warn_on_err(
            registration
                .target
                .remove_event_listener_with_callback(registration.kind.name(), registration.closure.as_ref().unchecked_ref()),
            "removeEventListener",
        );
        wasm_bindgen_futures::spawn_local(async move {
            drop(registration);
        });
    }

    fn create_observer(
        &self,
        options: &ObserverOptions,
        on_change: IntersectionCallback<Element>,
    ) -> Option<WebObserver> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let changes = entries
                    .iter()
                    .filter_map(|entry| {
                        let entry = entry.dyn_ref::<IntersectionObserverEntry>()?;
                        Some((entry.target(), entry.is_intersecting()))
                    })
                    .collect::<Vec<_>>();
                on_change(&changes);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => Some(WebObserver { observer, _callback: callback }),
            Err(err) => {
                log::warn!("IntersectionObserver unavailable: {err:?}");
                None
            }
        }
    }
}

impl Drop for WebDom {
    fn drop(&mut self) {
        for (_, registration) in self.listeners.get_mut().drain() {
            warn_on_err(
                registration
                    .target
                    .remove_event_listener_with_callback(registration.kind.name(), registration.closure.as_ref().unchecked_ref()),
                "removeEventListener",
            );
        }
    }
}

//! Browser entry point and functions exported to page scripts.
//!
//! The module instance starts the controller as soon as the WASM module is
//! instantiated (the shell loads it as a deferred module script, after the
//! DOM is parsed). Every [`ScriptHelper`] is reachable twice: as a module
//! export and as a `window` global under its French name, for inline
//! handlers in fragments and for the console.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::{Portfolio, ScriptHelper};
use crate::config::{CONFIG_ELEMENT_ID, SiteConfig};
use crate::dom::Dom;
use crate::dom::web::WebDom;
use crate::platform::web::WebPlatform;

type WebPortfolio = Portfolio<WebDom, WebPlatform>;

thread_local! {
    static APP: RefCell<Option<WebPortfolio>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let (Some(dom), Some(platform)) = (WebDom::new(), WebPlatform::new()) else {
        web_sys::console::error_1(&"portfolio: no window or document available".into());
        return;
    };

    let config = read_config(&dom);
    match config.console_level() {
        Some(level) => {
            if let Err(err) = console_log::init_with_level(level) {
                web_sys::console::warn_1(&format!("portfolio: logger already installed: {err}").into());
            }
        }
        None => log::set_max_level(log::LevelFilter::Off),
    }

    let app = Portfolio::new(dom, platform, config);
    app.start();
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    install_globals();
}

/// Publish every helper on `window` for inline handlers and the console.
fn install_globals() {
    let Some(window) = web_sys::window() else {
        return;
    };
    for helper in ScriptHelper::ALL {
        let closure = Closure::<dyn Fn(JsValue) -> JsValue>::new(move |argument: JsValue| {
            JsValue::from_bool(call(helper, argument.as_string().as_deref()))
        });
        match js_sys::Reflect::set(&window, &JsValue::from_str(helper.global_name()), closure.as_ref()) {
            Ok(true) => closure.forget(),
            Ok(false) => log::warn!("window.{} is read-only", helper.global_name()),
            Err(err) => log::warn!("could not install window.{}: {err:?}", helper.global_name()),
        }
    }
}

/// Read the optional inline JSON configuration, falling back to defaults.
fn read_config(dom: &WebDom) -> SiteConfig {
    let Some(raw) = dom.element_by_id(CONFIG_ELEMENT_ID).and_then(|el| dom.text(&el)) else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            web_sys::console::warn_1(&format!("portfolio: {err}, using defaults").into());
            SiteConfig::default()
        }
    }
}

fn call(helper: ScriptHelper, argument: Option<&str>) -> bool {
    let app = APP.with(|slot| slot.borrow().clone());
    match app {
        Some(app) => app.call_helper(helper, argument),
        None => {
            log::warn!("portfolio is not started");
            false
        }
    }
}

/// Navigate to a page by identifier (e.g. `"projets"`).
#[wasm_bindgen(js_name = navigateTo)]
pub fn navigate_to(page: &str) {
    call(ScriptHelper::NavigateTo, Some(page));
}

/// Copy text to the clipboard and report the result with a toast.
#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(text: &str) {
    call(ScriptHelper::CopyToClipboard, Some(text));
}

/// Smoothly scroll the first element matching a CSS selector into view.
#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(selector: &str) -> bool {
    call(ScriptHelper::ScrollTo, Some(selector))
}

/// Log every reveal-animated element and its state.
#[wasm_bindgen(js_name = debugAnimations)]
pub fn debug_animations() {
    call(ScriptHelper::DebugAnimations, None);
}

/// Open the "update in progress" modal.
#[wasm_bindgen(js_name = openUpdateModal)]
pub fn open_update_modal() {
    call(ScriptHelper::OpenUpdateModal, None);
}

//! Browser implementation of [`Platform`] on `web-sys`, `gloo-net` and
//! `gloo-timers`.

use std::future::Future;
use std::time::Duration;

use futures::channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{ScrollBehavior, ScrollToOptions, Storage, Window};

use super::Platform;
use crate::error::{ClipboardError, LoadError};
use crate::state::HistoryState;

#[derive(Clone)]
pub struct WebPlatform {
    window: Window,
}

impl WebPlatform {
    pub fn new() -> Option<Self> {
        Some(Self { window: web_sys::window()? })
    }

    fn storage(&self) -> Option<Storage> {
        match self.window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage unavailable: {err:?}");
                None
            }
        }
    }

    fn history_state(state: &HistoryState) -> JsValue {
        js_sys::JSON::parse(&state.to_json()).unwrap_or(JsValue::NULL)
    }
}

impl Platform for WebPlatform {
    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).unwrap_or_default()
    }

    fn storage_set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("could not persist {key}: {err:?}");
        }
    }

    fn push_history(&self, state: &HistoryState, title: &str, url: &str) {
        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&Self::history_state(state), title, Some(url)));
        if let Err(err) = pushed {
            log::warn!("history.pushState failed: {err:?}");
        }
    }

    fn replace_history(&self, state: &HistoryState, title: &str) {
        let replaced = self
            .window
            .history()
            .and_then(|history| history.replace_state(&Self::history_state(state), title));
        if let Err(err) = replaced {
            log::warn!("history.replaceState failed: {err:?}");
        }
    }

    fn location_hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn reload(&self) {
        if let Err(err) = self.window.location().reload() {
            log::error!("location.reload failed: {err:?}");
        }
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, LoadError>> {
        let url = url.to_owned();
        async move {
            let resp = gloo_net::http::Request::get(&url)
                .send()
                .await
                .map_err(|e| LoadError::Transport(e.to_string()))?;
            let status = resp.status();
            if !(200..300).contains(&status) {
                return Err(LoadError::Status(status));
            }
            resp.text().await.map_err(|e| LoadError::Body(e.to_string()))
        }
    }

    fn write_clipboard(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> {
        let clipboard = Option::<web_sys::Clipboard>::from(self.window.navigator().clipboard());
        let pending = clipboard.map(|clipboard| JsFuture::from(clipboard.write_text(text)));
        async move {
            let Some(pending) = pending else {
                return Err(ClipboardError::Unavailable);
            };
            pending
                .await
                .map(|_| ())
                .map_err(|err| ClipboardError::Rejected(format!("{err:?}")))
        }
    }

    fn sleep(&self, ms: u32) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(Duration::from_millis(u64::from(ms)))
    }

    fn next_frame(&self) -> impl Future<Output = ()> {
        let (tx, rx) = oneshot::channel::<()>();
        let callback = Closure::once(move |_timestamp: f64| {
            if tx.send(()).is_err() {
                log::debug!("animation frame waiter dropped");
            }
        });
        let requested = self.window.request_animation_frame(callback.as_ref().unchecked_ref());
        async move {
            if let Err(err) = requested {
                log::warn!("requestAnimationFrame failed: {err:?}");
                return;
            }
            rx.await.unwrap_or_default();
            drop(callback);
        }
    }

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

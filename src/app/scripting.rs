//! Helpers callable from page scripts and the browser console.
//!
//! Fragments may call these from inline handlers, so each helper is
//! installed on `window` under its French name in addition to the module
//! export. Both surfaces go through [`Portfolio::call_helper`].

#[cfg(test)]
#[path = "scripting_test.rs"]
mod scripting_test;

use super::Portfolio;
use crate::dom::Dom;
use crate::platform::Platform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptHelper {
    NavigateTo,
    CopyToClipboard,
    ScrollTo,
    DebugAnimations,
    OpenUpdateModal,
}

impl ScriptHelper {
    pub const ALL: [Self; 5] =
        [Self::NavigateTo, Self::CopyToClipboard, Self::ScrollTo, Self::DebugAnimations, Self::OpenUpdateModal];

    /// Property name on `window`.
    #[must_use]
    pub const fn global_name(self) -> &'static str {
        match self {
            Self::NavigateTo => "naveguerVers",
            Self::CopyToClipboard => "copierDansPressePapiers",
            Self::ScrollTo => "faireDefilerVers",
            Self::DebugAnimations => "debuggerAnimations",
            Self::OpenUpdateModal => "ouvrirModalMiseAJour",
        }
    }

    #[must_use]
    pub const fn takes_argument(self) -> bool {
        matches!(self, Self::NavigateTo | Self::CopyToClipboard | Self::ScrollTo)
    }
}

impl<D: Dom, P: Platform> Portfolio<D, P> {
    /// Run `helper` with its optional string argument.
    ///
    /// Returns `false` when a required argument is missing or the helper
    /// reports that nothing happened (e.g. no element to scroll to).
    pub fn call_helper(&self, helper: ScriptHelper, argument: Option<&str>) -> bool {
        if helper.takes_argument() && argument.is_none() {
            log::warn!("{}() needs a string argument", helper.global_name());
            return false;
        }
        let argument = argument.unwrap_or_default();
        match helper {
            ScriptHelper::NavigateTo => self.navigate_to(argument),
            ScriptHelper::CopyToClipboard => {
                let app = self.clone();
                let text = argument.to_owned();
                self.platform().spawn(async move {
                    app.copy_to_clipboard(&text).await;
                });
            }
            ScriptHelper::ScrollTo => return self.scroll_to_section(argument),
            ScriptHelper::DebugAnimations => self.debug_animations(),
            ScriptHelper::OpenUpdateModal => return self.open_update_modal().is_some(),
        }
        true
    }
}

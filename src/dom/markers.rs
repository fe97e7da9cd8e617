//! Ids, classes and attributes the shell page and fragments provide.

/// Main content region replaced on every page swap.
pub const CONTENT_ID: &str = "contenuPrincipal";
pub const LOADER_ID: &str = "indicateurChargement";
pub const THEME_BUTTON_ID: &str = "boutonTheme";
pub const MENU_BUTTON_ID: &str = "boutonMenuMobile";
pub const MENU_PANEL_CLASS: &str = "menu-navigation";
/// Added to the menu button while the panel is open.
pub const MENU_OPEN_CLASS: &str = "ouvert";

/// Target page of a navigation element.
pub const PAGE_ATTR: &str = "data-page";
pub const NAV_LINK_CLASS: &str = "lien-navigation";
pub const ACTIVE_CLASS: &str = "actif";

pub const THEME_ATTR: &str = "data-theme";

pub const REVEAL_CLASS: &str = "animation-entree";
pub const REVEAL_DELAY_ATTR: &str = "data-delay";
pub const REVEAL_KIND_ATTR: &str = "data-animation";
pub const VISIBLE_CLASS: &str = "visible";

pub const PROJECT_LINK_CLASS: &str = "lien-projet";
pub const UPDATE_ATTR: &str = "data-update";
pub const DISABLED_ATTR: &str = "data-disabled";
/// Legacy id of the first placeholder project link.
pub const PLACEHOLDER_LINK_ID: &str = "lienUpdateX937";

pub const MODAL_ID: &str = "modal-mise-a-jour";
pub const MODAL_OVERLAY_CLASS: &str = "modal-overlay";
pub const MODAL_CLOSE_CLASS: &str = "modal-close";

/// `data-action` value carried by the error fragment's reload button.
pub const ACTION_ATTR: &str = "data-action";
pub const RELOAD_ACTION: &str = "reload";

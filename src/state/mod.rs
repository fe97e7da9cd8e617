//! Session state owned by the single `Portfolio` controller.
//!
//! DESIGN
//! ======
//! Everything that would otherwise be ambient (current page, menu flag,
//! observer handle, modal instance) lives in one `Session` value behind the
//! controller's `RefCell`, so every write goes through one owner.

pub mod history;
pub mod session;
pub mod theme;

pub use history::HistoryState;
pub use session::{ModalInstance, Session};
pub use theme::Theme;

//! Page identifiers, fragment addresses, titles, and built-in markup.

pub mod catalog;
pub mod fallback;

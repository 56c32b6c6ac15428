//! Videotex page composition and rendering.
//!
//! Build a [`VideotexPage`] with the drawing primitives, then call
//! [`VideotexPage::render`] to obtain the bytes for a session's `send`.

pub mod encoder;
pub mod page;

pub use encoder::render;
pub use page::{Cell, GridError, VideotexPage, COLUMNS, ROWS};

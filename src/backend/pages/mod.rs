//! Pages Module
//!
//! Server-rendered HTML for browsers. Views are maud templates in `views`;
//! `handlers` wires them to the store, the session and flash messages.

/// maud templates
pub mod views;

/// HTML route handlers and `PageError`
pub mod handlers;

pub use handlers::{render_error_pages, PageError};

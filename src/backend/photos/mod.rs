//! Photos Module
//!
//! JSON API for photos and their comments. Records and validation live in
//! `shared::photo`; persistence goes through the `PhotoStore` trait.

/// Photo and comment handlers
pub mod handlers;

pub use handlers::{create_comment, create_photo, get_photo, list_photos, PhotoList};

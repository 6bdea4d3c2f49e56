//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, fallback and layers
//! ├── api_routes.rs   - JSON API endpoints
//! └── page_routes.rs  - HTML pages and form posts
//! ```
//!
//! JSON and HTML views of a photo live at different paths:
//! `/api/photos/{id}` answers JSON, `/photos/{id}` renders the page.

/// Main router creation
pub mod router;

/// JSON API routes
pub mod api_routes;

/// HTML page routes
pub mod page_routes;

pub use router::create_router;

//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A test server over the in-memory store
//! - PostgreSQL fixtures (used only when `DATABASE_URL` is set)
//! - Authentication test helpers
//! - Custom assertion macros

pub mod assertions;
#[cfg(feature = "ssr")]
pub mod auth_helpers;
#[cfg(feature = "ssr")]
pub mod server;

#[cfg(feature = "ssr")]
pub use auth_helpers::*;
#[cfg(feature = "ssr")]
pub use database::*;
#[cfg(feature = "ssr")]
pub use server::*;

//! Integration tests
//!
//! Drive the full router: JSON API, HTML pages, configuration loading and,
//! when a database is available, the PostgreSQL store.

mod config_test;
mod database;

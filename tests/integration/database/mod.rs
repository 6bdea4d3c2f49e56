//! PostgreSQL store tests
//!
//! Skipped unless `DATABASE_URL` points at a disposable database.

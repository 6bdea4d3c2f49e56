//! Test suite for SnapShare
//!
//! This module organizes all integration and property tests into a single
//! test binary.

pub mod common;
#[cfg(feature = "ssr")]
pub mod integration;
pub mod property;

//! Core types shared across borrowbot facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! logging macros in `borrowbot-core` and by the store's instrumentation.

pub mod schema;

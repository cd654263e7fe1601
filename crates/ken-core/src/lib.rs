//! Core types and rules for the Ken fact-learning engine.
//!
//! This crate is deliberately free of database dependencies. All other crates
//! depend on it; it depends on nothing proprietary. Storage is abstracted
//! behind [`store::ProfileStore`]; the rules themselves live in small, pure
//! modules ([`progress`], [`streak`], [`badge`], [`eligibility`], [`shuffle`])
//! that [`engine::Engine`] composes into persisted state transitions.

pub mod badge;
pub mod category;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod fact;
pub mod prefs;
pub mod progress;
pub mod quiz;
pub mod shuffle;
pub mod stats;
pub mod store;
pub mod streak;

pub use error::{Error, Result};

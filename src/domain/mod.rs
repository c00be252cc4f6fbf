//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Canonical types and the field priority lists that feed them
//! - `wire.rs` — Raw serde envelopes matching backend responses
//! - `convert.rs` — Schema-tolerant normalization from raw JSON
//! - `state.rs` — State containers with update methods
//! - `client.rs` — Sub-client with HTTP methods and caching
//!
//! `chart` has no wire format of its own; it owns the polling state machine
//! and the candlestick layout engine.

pub mod asset;
pub mod bar;
pub mod chart;
pub mod mover;

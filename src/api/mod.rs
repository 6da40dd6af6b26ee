// src/api/mod.rs
//! Smartling API interaction: transport, envelope decoding, pagination.
//!
//! `client` owns the HTTP plumbing and the per-endpoint surface,
//! `envelope` models the wire-level response wrapper, `models` the
//! domain payloads, and `pagination` the lazy offset/limit fetch engine
//! that everything paginated is built on.

pub mod client;
pub mod envelope;
pub mod models;
pub mod pagination;

pub use client::SmartlingClient;
pub use pagination::{paginate, OffsetPager};

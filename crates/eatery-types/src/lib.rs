//! Shared domain types for Eatery.
//!
//! This crate contains the domain types used across the restaurant catalog:
//! Restaurant, its request/patch payloads, pagination envelopes, global
//! configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod pagination;
pub mod restaurant;

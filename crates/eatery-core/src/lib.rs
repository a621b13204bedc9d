//! Business logic and repository trait definitions for Eatery.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the validation schemas for every caller payload, and the
//! restaurant service that ties them together. It depends only on
//! `eatery-types` -- never on `eatery-infra` or any database/IO crate.

pub mod repository;
pub mod schema;
pub mod service;

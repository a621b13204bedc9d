//! Infrastructure layer for Eatery.
//!
//! Contains the SQLite implementation of the restaurant repository trait
//! defined in `eatery-core`, plus data-directory resolution and
//! `config.toml` loading.

pub mod config;
pub mod sqlite;

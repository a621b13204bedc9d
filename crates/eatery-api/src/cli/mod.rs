//! CLI command definitions for the `eatery` binary.
//!
//! Uses clap derive macros for argument parsing. Every command maps onto one
//! restaurant service operation.

pub mod restaurant;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use eatery_types::restaurant::{
    CreateRestaurantRequest, RestaurantId, RestaurantSearch, UpdateRestaurantRequest,
};

/// Manage a restaurant catalog.
#[derive(Parser)]
#[command(name = "eatery", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Bridge spans to the OpenTelemetry stdout exporter (overrides config.toml).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a restaurant.
    Create {
        #[command(flatten)]
        fields: RestaurantFields,
    },

    /// Show one restaurant.
    Show {
        /// Restaurant ID.
        id: RestaurantId,
    },

    /// List restaurants. Passing --page or --size returns one page.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Update fields of a restaurant.
    Update {
        /// Restaurant ID.
        id: RestaurantId,

        #[command(flatten)]
        fields: RestaurantFields,
    },

    /// Delete a restaurant (soft unless --hard).
    #[command(alias = "rm")]
    Delete {
        /// Restaurant ID.
        id: RestaurantId,

        /// Remove the row permanently instead of marking it deleted.
        #[arg(long)]
        hard: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Business fields shared by `create` and `update`.
///
/// Values are passed through unvalidated; the service reports violations.
#[derive(Args, Debug, Default)]
pub struct RestaurantFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub cuisine: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Price level from 1 (cheap) to 4 (expensive).
    #[arg(long, allow_negative_numbers = true)]
    pub price_level: Option<i64>,
}

impl From<RestaurantFields> for CreateRestaurantRequest {
    fn from(f: RestaurantFields) -> Self {
        Self {
            name: f.name,
            description: f.description,
            cuisine: f.cuisine,
            address: f.address,
            phone: f.phone,
            price_level: f.price_level,
        }
    }
}

impl From<RestaurantFields> for UpdateRestaurantRequest {
    fn from(f: RestaurantFields) -> Self {
        Self {
            name: f.name,
            description: f.description,
            cuisine: f.cuisine,
            address: f.address,
            phone: f.phone,
            price_level: f.price_level,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive substring of the name.
    #[arg(long)]
    pub name: Option<String>,

    /// Exact cuisine, case-insensitive.
    #[arg(long)]
    pub cuisine: Option<String>,

    /// Include soft-deleted restaurants.
    #[arg(long)]
    pub include_deleted: bool,

    /// 1-based page number.
    #[arg(long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Page size (1-100).
    #[arg(long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Sort column: name, cuisine, created_at, updated_at.
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction: asc or desc.
    #[arg(long)]
    pub sort_order: Option<String>,
}

impl ListArgs {
    /// Whether a windowed listing was requested.
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.size.is_some()
    }

    /// Build the search, or `None` when no flag was given so the store
    /// applies its own defaults.
    pub fn into_search(self) -> Option<RestaurantSearch> {
        let search = RestaurantSearch {
            name: self.name,
            cuisine: self.cuisine,
            include_deleted: self.include_deleted.then_some(true),
            page: self.page,
            size: self.size,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        };

        let untouched = search.name.is_none()
            && search.cuisine.is_none()
            && search.include_deleted.is_none()
            && search.page.is_none()
            && search.size.is_none()
            && search.sort_by.is_none()
            && search.sort_order.is_none();

        (!untouched).then_some(search)
    }
}

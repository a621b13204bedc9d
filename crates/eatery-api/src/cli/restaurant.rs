//! Restaurant CLI commands: create, show, list, update, delete.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use eatery_types::restaurant::{Restaurant, RestaurantId};

use crate::cli::{ListArgs, RestaurantFields};
use crate::state::AppState;

/// Create a restaurant from flags.
///
/// ```bash
/// eatery create --name "Pasta House" --cuisine italian --price-level 2
/// ```
pub async fn create_restaurant(state: &AppState, fields: RestaurantFields, json: bool) -> Result<()> {
    let id = state.restaurant_service.create(fields.into()).await?;

    if json {
        println!("{}", serde_json::json!({ "id": id }));
        return Ok(());
    }

    println!();
    println!("  {} Restaurant created", style("✓").green().bold());
    println!("  {}  {}", style("ID:").bold(), style(id.to_string()).dim());
    println!();

    Ok(())
}

/// Show the full record of an active restaurant.
pub async fn show_restaurant(state: &AppState, id: &RestaurantId, json: bool) -> Result<()> {
    let restaurant = state.restaurant_service.get(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&restaurant)?);
        return Ok(());
    }

    let dash = || style("-").dim().to_string();

    println!();
    println!("  {}", style(&restaurant.name).cyan().bold());
    if let Some(description) = &restaurant.description {
        println!("  {}", style(description).dim());
    }
    println!();

    println!("  {}", style("── Details ──").dim());
    println!(
        "  {}   {}",
        style("Cuisine:").bold(),
        restaurant.cuisine.clone().unwrap_or_else(dash)
    );
    println!("  {}     {}", style("Price:").bold(), format_price(restaurant.price_level));
    println!(
        "  {}   {}",
        style("Address:").bold(),
        restaurant.address.clone().unwrap_or_else(dash)
    );
    println!(
        "  {}     {}",
        style("Phone:").bold(),
        restaurant.phone.clone().unwrap_or_else(dash)
    );
    println!(
        "  {}        {}",
        style("ID:").bold(),
        style(restaurant.id.to_string()).dim()
    );
    println!();

    println!("  {}", style("── Timestamps ──").dim());
    println!("  {}   {}", style("Created:").bold(), format_millis(restaurant.created_at));
    println!("  {}   {}", style("Updated:").bold(), format_millis(restaurant.updated_at));
    println!();

    Ok(())
}

/// List restaurants; `--page`/`--size` switch to a paginated listing.
pub async fn list_restaurants(state: &AppState, args: ListArgs, json: bool) -> Result<()> {
    let paginated = args.is_paginated();
    let search = args.into_search();

    if paginated {
        let page = state.restaurant_service.paginated_list(search).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&page)?);
            return Ok(());
        }

        print_table(&page.items);
        println!(
            "  page {} of {} ({} restaurant{})",
            style(page.page).bold(),
            page.total_pages(),
            style(page.total).bold(),
            if page.total == 1 { "" } else { "s" }
        );
        println!();
        return Ok(());
    }

    let restaurants = state.restaurant_service.list(search).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&restaurants)?);
        return Ok(());
    }

    print_table(&restaurants);
    println!(
        "  {} restaurant{}",
        style(restaurants.len()).bold(),
        if restaurants.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Apply the given fields to an active restaurant.
pub async fn update_restaurant(
    state: &AppState,
    id: &RestaurantId,
    fields: RestaurantFields,
    json: bool,
) -> Result<()> {
    let updated = state.restaurant_service.update(id, fields.into()).await?;

    if json {
        println!("{}", serde_json::json!({ "id": id, "updated": updated }));
    } else if updated {
        println!("  {} Restaurant {} updated.", style("✓").green().bold(), id);
    } else {
        println!("  {} Restaurant {} unchanged.", style("i").blue().bold(), id);
    }

    Ok(())
}

/// Soft-delete a restaurant, or remove it permanently with `--hard`.
pub async fn delete_restaurant(
    state: &AppState,
    id: &RestaurantId,
    hard: bool,
    json: bool,
) -> Result<()> {
    let deleted = state.restaurant_service.delete(id, hard).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "id": id, "deleted": deleted, "hard": hard })
        );
    } else if hard {
        println!("  {} Restaurant {} permanently deleted.", style("✓").red().bold(), id);
    } else {
        println!("  {} Restaurant {} deleted.", style("✓").red().bold(), id);
    }

    Ok(())
}

fn print_table(restaurants: &[Restaurant]) {
    if restaurants.is_empty() {
        println!();
        println!(
            "  {} No restaurants found. Create one with: {}",
            style("i").blue().bold(),
            style("eatery create --name <NAME>").yellow()
        );
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Cuisine").fg(Color::White),
        Cell::new("Price").fg(Color::White),
        Cell::new("Address").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for r in restaurants {
        let name = if r.is_deleted {
            Cell::new(format!("{} (deleted)", r.name)).fg(Color::DarkGrey)
        } else {
            Cell::new(&r.name).fg(Color::Cyan)
        };

        table.add_row(vec![
            name,
            Cell::new(r.cuisine.as_deref().unwrap_or("-")),
            Cell::new(format_price(r.price_level)).fg(Color::Green),
            Cell::new(truncate(r.address.as_deref().unwrap_or("-"), 40)),
            Cell::new(format_millis(r.updated_at)).fg(Color::DarkGrey),
            Cell::new(r.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
}

/// `$` repeated once per price level.
fn format_price(level: Option<u8>) -> String {
    match level {
        Some(level) => "$".repeat(usize::from(level)),
        None => "-".to_string(),
    }
}

fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

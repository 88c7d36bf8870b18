//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod categories;

use clap::Args;
use storefront_commerce::search::SortMode;
use storefront_commerce::ProductId;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Feed file (overrides `[feed] path`).
    #[arg(long)]
    pub feed: Option<String>,

    /// Category to show ("All" for everything).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort order: none, price-asc, price-desc, rating-asc, rating-desc.
    #[arg(short, long, default_value = "none")]
    pub sort: SortMode,

    /// Lowest price, in dollars.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, in dollars.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Lowest rating (0-5).
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Highest rating (0-5).
    #[arg(long)]
    pub max_rating: Option<f64>,

    /// Case-insensitive title search.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Page to show.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Number of infinite-scroll loads to apply after jumping to the page.
    #[arg(long, default_value = "0")]
    pub load_more: usize,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Feed file (overrides `[feed] path`).
    #[arg(long)]
    pub feed: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Feed file (overrides `[feed] path`).
    #[arg(long)]
    pub feed: Option<String>,

    /// Cart file to read before and write after the changes.
    #[arg(long)]
    pub cart: Option<String>,

    /// Add a product: ID or ID:QTY. Repeatable.
    #[arg(short, long, value_parser = parse_line_spec)]
    pub add: Vec<LineSpec>,

    /// Set a line's quantity: ID:QTY. Repeatable.
    #[arg(short, long, value_parser = parse_line_spec)]
    pub set: Vec<LineSpec>,

    /// Remove a product by ID. Repeatable.
    #[arg(short, long)]
    pub remove: Vec<u64>,

    /// Empty the cart before applying changes.
    #[arg(long)]
    pub clear: bool,
}

/// A product id with a quantity, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpec {
    pub id: ProductId,
    pub quantity: i64,
}

/// Parse `ID` or `ID:QTY`; a bare id means a quantity of 1.
pub fn parse_line_spec(s: &str) -> Result<LineSpec, String> {
    let (id, quantity) = match s.split_once(':') {
        Some((id, qty)) => (
            id,
            qty.trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid quantity in '{}'", s))?,
        ),
        None => (s, 1),
    };
    let id = id
        .trim()
        .parse::<ProductId>()
        .map_err(|_| format!("invalid product id in '{}'", s))?;
    Ok(LineSpec { id, quantity })
}

//! Category listing command.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::catalog::{CatalogState, CategoryFilter};

use super::CategoriesArgs;
use crate::context::Context;

#[derive(Debug, Serialize, PartialEq)]
struct CategoryInfo {
    label: String,
    products: usize,
}

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let state = ctx.load_catalog(args.feed.as_deref()).await?;
    let categories = summarize(&state);

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output
            .list_item(&format!("{} ({})", category.label, category.products));
    }
    Ok(())
}

fn summarize(state: &CatalogState) -> Vec<CategoryInfo> {
    state
        .categories()
        .into_iter()
        .map(|category| CategoryInfo {
            products: count(state, &category),
            label: category.label().to_string(),
        })
        .collect()
}

fn count(state: &CatalogState, category: &CategoryFilter) -> usize {
    state
        .items()
        .iter()
        .filter(|p| category.matches(p))
        .count()
}

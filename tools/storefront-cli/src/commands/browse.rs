//! Catalog browsing command.

use anyhow::Result;
use serde_json::json;
use storefront_commerce::catalog::{CatalogState, CategoryFilter};
use storefront_commerce::money::{Currency, Money};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{format_rating, status_badge, truncate};

const COLUMNS: [usize; 5] = [5, 36, 18, 10, 8];

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let mut state = ctx.load_catalog(args.feed.as_deref()).await?;
    apply_args(&mut state, &args)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "status": state.status(),
            "criteria": state.criteria(),
            "window": state.window(),
            "pagination": state.pagination(),
            "has_more": state.has_more(),
            "products": state.paginated(),
        }));
        return Ok(());
    }

    print_listing(&state, ctx);
    Ok(())
}

/// Apply the command-line criteria, then move the window.
pub(crate) fn apply_args(state: &mut CatalogState, args: &BrowseArgs) -> Result<()> {
    if let Some(ref category) = args.category {
        state.set_category(CategoryFilter::from_label(category));
    }
    state.set_sort_mode(args.sort);

    if args.min_price.is_some() || args.max_price.is_some() {
        // An open upper bound covers everything observed, but never drops
        // below the requested minimum.
        let min = args
            .min_price
            .map(dollars)
            .unwrap_or_else(|| Money::zero(Currency::USD));
        let max = match args.max_price {
            Some(max) => dollars(max),
            None => match state.price_bounds() {
                Some((_, hi)) if hi.amount_cents > min.amount_cents => hi,
                _ => min,
            },
        };
        state.set_price_range(min, max)?;
    }

    if args.min_rating.is_some() || args.max_rating.is_some() {
        state.set_rating_range(args.min_rating.unwrap_or(0.0), args.max_rating.unwrap_or(5.0))?;
    }

    if let Some(ref query) = args.search {
        state.set_search(query.as_str());
    }

    state.set_page(args.page);
    for _ in 0..args.load_more {
        if state.load_more() == 0 {
            break;
        }
    }
    Ok(())
}

fn dollars(amount: f64) -> Money {
    Money::from_decimal(amount, Currency::USD)
}

fn print_listing(state: &CatalogState, ctx: &Context) {
    let out = &ctx.output;
    let criteria = state.criteria();

    out.header(&format!(
        "{} ({})",
        criteria.category,
        criteria.sort.display_name()
    ));

    if state.paginated().is_empty() {
        out.info("No products match the current filters.");
    } else {
        out.table_row(&["ID", "TITLE", "CATEGORY", "PRICE", "RATING"], &COLUMNS);
        for product in state.paginated() {
            let id = product.id.to_string();
            let title = truncate(&product.title, COLUMNS[1]);
            let category = truncate(&product.category, COLUMNS[2]);
            let price = product.price.display();
            let rating = format_rating(product.rating);
            out.table_row(&[&id, &title, &category, &price, &rating], &COLUMNS);
        }
    }

    let pagination = state.pagination();
    out.info("");
    out.kv("showing", &showing(state));
    if state.window().is_scroll() {
        out.kv("mode", "infinite scroll");
    } else {
        let pages: Vec<String> = pagination
            .page_numbers(7)
            .iter()
            .map(|&n| {
                if n == pagination.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        out.kv(
            "page",
            &format!(
                "{} of {}  {}",
                pagination.page,
                state.total_pages(),
                pages.join(" ")
            ),
        );
    }
    if state.has_more() {
        out.kv("more", "yes (use --load-more or --page)");
    }
    out.kv("status", &status_badge(state.status()));
}

/// Item range of the visible window, e.g. `9-16 of 20 matching (24 in catalog)`.
fn showing(state: &CatalogState) -> String {
    let pagination = state.pagination();
    let matching = state.filtered().len();
    if state.paginated().is_empty() {
        return format!("0 of {} matching ({} in catalog)", matching, state.items().len());
    }
    let end = if state.window().is_scroll() {
        pagination.offset() + state.paginated().len()
    } else {
        pagination.end_item()
    };
    format!(
        "{}-{} of {} matching ({} in catalog)",
        pagination.start_item(),
        end,
        matching,
        state.items().len()
    )
}

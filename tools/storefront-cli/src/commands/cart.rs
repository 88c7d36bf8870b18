//! Cart command.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde_json::json;
use storefront_commerce::cart::Cart;
use storefront_commerce::catalog::CatalogState;
use storefront_commerce::ProductId;

use super::CartArgs;
use crate::context::Context;
use crate::output::truncate;

const COLUMNS: [usize; 4] = [5, 36, 5, 12];

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let state = ctx.load_catalog(args.feed.as_deref()).await?;
    let cart_path = args.cart.as_deref().map(|p| ctx.resolve_path(p));

    let mut cart = match cart_path {
        Some(ref path) if path.exists() => read_cart(path)?,
        _ => Cart::new(),
    };

    for note in apply_changes(&mut cart, &state, &args)? {
        ctx.output.warn(&note);
    }

    if let Some(ref path) = cart_path {
        write_cart(&cart, path)?;
        ctx.output
            .success(&format!("Saved cart to {}", path.display()));
    }

    let pricing = cart.calculate_pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "lines": cart.lines(),
            "item_count": cart.total_item_count(),
            "unique_items": cart.unique_item_count(),
            "pricing": pricing,
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "TITLE", "QTY", "TOTAL"], &COLUMNS);
    for line in &pricing.lines {
        let title = cart
            .get_line(line.product_id)
            .map(|l| truncate(&l.product.title, COLUMNS[1]))
            .unwrap_or_default();
        ctx.output.table_row(
            &[
                &line.product_id.to_string(),
                &title,
                &line.quantity.to_string(),
                &line.total.display(),
            ],
            &COLUMNS,
        );
    }
    ctx.output.info("");
    ctx.output.kv("items", &cart.total_item_count().to_string());
    ctx.output.kv("subtotal", &pricing.subtotal.display());
    Ok(())
}

/// Apply clear, adds, sets and removes in that order. Unknown products are
/// an error; updates and removals for lines not in the cart are reported
/// back as notes.
pub(crate) fn apply_changes(
    cart: &mut Cart,
    state: &CatalogState,
    args: &CartArgs,
) -> Result<Vec<String>> {
    let mut notes = Vec::new();

    if args.clear {
        cart.clear_cart();
    }

    for spec in &args.add {
        let Some(product) = state.product(spec.id) else {
            bail!("Product {} is not in the catalog", spec.id);
        };
        cart.add_to_cart(product, spec.quantity);
    }

    for spec in &args.set {
        if !cart.update_quantity(spec.id, spec.quantity) {
            notes.push(format!("Product {} is not in the cart; nothing to update", spec.id));
        }
    }

    for &id in &args.remove {
        let id = ProductId::new(id);
        if !cart.remove_from_cart(id) {
            notes.push(format!("Product {} is not in the cart; nothing to remove", id));
        }
    }

    Ok(notes)
}

fn read_cart(path: &Path) -> Result<Cart> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse cart file: {}", path.display()))
}

fn write_cart(cart: &Cart, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(cart)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write cart file: {}", path.display()))
}

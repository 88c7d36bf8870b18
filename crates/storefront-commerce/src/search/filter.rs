//! Filter/sort pipeline over the catalog.

use crate::catalog::Product;
use crate::search::{FilterCriteria, SortMode};
use std::cmp::Ordering;

/// Apply criteria to a product list.
///
/// Stages run in a fixed order: category, title search, price, rating, then
/// sort. Filtering keeps source order and the sort is stable, so products with
/// equal keys stay in feed order. The input is never modified and no product
/// is duplicated or invented.
pub fn apply(items: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let needle = criteria.search.as_deref().map(str::to_lowercase);

    let mut result: Vec<Product> = items
        .iter()
        .filter(|p| criteria.category.matches(p))
        .filter(|p| match &needle {
            Some(needle) => p.title_contains_lower(needle),
            None => true,
        })
        .filter(|p| criteria.price.map_or(true, |range| range.contains(p.price)))
        .filter(|p| criteria.rating.contains(p.rating))
        .cloned()
        .collect();

    sort_products(&mut result, criteria.sort);
    result
}

/// Stable in-place sort by the given mode. `SortMode::None` leaves order as is.
pub fn sort_products(products: &mut [Product], mode: SortMode) {
    let compare: fn(&Product, &Product) -> Ordering = match mode {
        SortMode::None => return,
        SortMode::PriceAsc => |a, b| a.price.amount_cents.cmp(&b.price.amount_cents),
        SortMode::PriceDesc => |a, b| b.price.amount_cents.cmp(&a.price.amount_cents),
        SortMode::RatingAsc => |a, b| a.rating.total_cmp(&b.rating),
        SortMode::RatingDesc => |a, b| b.rating.total_cmp(&a.rating),
    };
    // slice::sort_by is stable
    products.sort_by(compare);
}

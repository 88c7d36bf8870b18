//! Cross-module properties of the catalog and cart engines, checked over
//! generated catalogs.

use std::collections::HashSet;

use proptest::prelude::*;
use storefront_commerce::prelude::*;
use storefront_commerce::search::apply;

const CATEGORIES: [&str; 4] = ["electronics", "jewelery", "men's clothing", "women's clothing"];

/// Catalogs with sequential ids and few distinct prices and ratings, so ties
/// are common.
fn arb_catalog(max_len: usize) -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec((0..CATEGORIES.len(), 1..=6i64, 0..=10u32), 0..max_len).prop_map(
        |fields| {
            fields
                .into_iter()
                .enumerate()
                .map(|(i, (category, price, half_stars))| {
                    Product::new(
                        i as u64 + 1,
                        format!("Item {}", i + 1),
                        CATEGORIES[category],
                        Money::usd(price * 500),
                        half_stars as f64 / 2.0,
                    )
                })
                .collect()
        },
    )
}

fn arb_category() -> impl Strategy<Value = CategoryFilter> {
    prop_oneof![
        Just(CategoryFilter::All),
        prop::sample::select(CATEGORIES.to_vec()).prop_map(CategoryFilter::named),
        Just(CategoryFilter::named("missing")),
    ]
}

fn arb_sort() -> impl Strategy<Value = SortMode> {
    prop::sample::select(SortMode::ALL.to_vec())
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        arb_category(),
        arb_sort(),
        prop::option::of(0..=6i64),
        prop::option::of(0..=8u32),
    )
        .prop_map(|(category, sort, price_lo, rating_lo)| {
            let mut criteria = FilterCriteria::new().with_category(category).with_sort(sort);
            if let Some(lo) = price_lo {
                let range = PriceRange::new(Money::usd(lo * 500), Money::usd(lo * 500 + 1500));
                criteria = criteria.with_price(range.unwrap());
            }
            if let Some(lo) = rating_lo {
                let lo = lo as f64 / 2.0;
                criteria = criteria.with_rating(RatingRange::new(lo, (lo + 1.0).min(5.0)).unwrap());
            }
            criteria
        })
}

#[derive(Debug, Clone)]
enum Op {
    Category(CategoryFilter),
    Sort(SortMode),
    Price(i64),
    Rating(u32),
    Page(usize),
    LoadMore,
    Reset,
    Fetch { fail: bool },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_category().prop_map(Op::Category),
        arb_sort().prop_map(Op::Sort),
        (0..4i64).prop_map(Op::Price),
        (0..6u32).prop_map(Op::Rating),
        (0..10usize).prop_map(Op::Page),
        Just(Op::LoadMore),
        Just(Op::Reset),
        any::<bool>().prop_map(|fail| Op::Fetch { fail }),
    ]
}

fn ids(products: &[Product]) -> Vec<u64> {
    products.iter().map(|p| p.id.get()).collect()
}

fn loaded(items: Vec<Product>, config: CatalogConfig) -> CatalogState {
    let mut state = CatalogState::new(config);
    state.fetch_requested().unwrap();
    state.fetch_succeeded(items).unwrap();
    state
}

proptest! {
    #[test]
    fn test_filter_never_invents_or_duplicates(items in arb_catalog(40), criteria in arb_criteria()) {
        let source: HashSet<u64> = ids(&items).into_iter().collect();
        let result_ids = ids(&apply(&items, &criteria));
        let unique: HashSet<u64> = result_ids.iter().copied().collect();

        prop_assert_eq!(unique.len(), result_ids.len());
        prop_assert!(unique.is_subset(&source));
    }

    #[test]
    fn test_apply_is_idempotent_and_pure(items in arb_catalog(30), criteria in arb_criteria()) {
        let snapshot = ids(&items);
        let first = apply(&items, &criteria);
        let second = apply(&items, &criteria);

        prop_assert_eq!(ids(&first), ids(&second));
        prop_assert_eq!(ids(&items), snapshot);
    }

    #[test]
    fn test_engine_reapplying_criteria_is_stable(items in arb_catalog(25), sort in arb_sort()) {
        let mut state = loaded(items, CatalogConfig::new(4, 4));
        state.set_sort_mode(sort);
        let first = ids(state.filtered());
        state.set_sort_mode(sort);

        prop_assert_eq!(ids(state.filtered()), first);
        prop_assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn test_pages_cover_filtered_exactly(
        items in arb_catalog(40),
        criteria in arb_criteria(),
        per_page in 1..=9usize,
    ) {
        let mut state = loaded(items, CatalogConfig::new(per_page, 3));
        state.set_criteria(criteria);

        let mut concatenated = Vec::new();
        for page in 1..=state.total_pages() {
            state.set_page(page);
            prop_assert!(state.paginated().len() <= per_page);
            concatenated.extend(ids(state.paginated()));
        }
        prop_assert_eq!(concatenated, ids(state.filtered()));
    }

    #[test]
    fn test_load_more_is_monotonic_and_converges(items in arb_catalog(30), batch in 1..=50usize) {
        let mut state = loaded(items, CatalogConfig::new(4, batch));
        let mut previous = ids(state.paginated());

        for _ in 0..=state.filtered().len() {
            state.load_more();
            let current = ids(state.paginated());
            prop_assert!(current.len() >= previous.len());
            prop_assert_eq!(&current[..previous.len()], &previous[..]);
            prop_assert_eq!(state.current_page(), 1);
            previous = current;
        }
        prop_assert_eq!(previous, ids(state.filtered()));
        prop_assert_eq!(state.load_more(), 0);
    }

    #[test]
    fn test_sort_keeps_relative_order_of_ties(items in arb_catalog(60), sort in arb_sort()) {
        let sorted = apply(&items, &FilterCriteria::new().with_sort(sort));
        for pair in sorted.windows(2) {
            let tied = match sort {
                SortMode::PriceAsc | SortMode::PriceDesc => pair[0].price == pair[1].price,
                SortMode::RatingAsc | SortMode::RatingDesc => pair[0].rating == pair[1].rating,
                _ => true,
            };
            if tied {
                // ids were assigned in source order
                prop_assert!(pair[0].id < pair[1].id, "unstable tie under {}", sort);
            }
        }
    }

    #[test]
    fn test_cart_merge_law(a in 1..=5000i64, b in 1..=5000i64) {
        let product = Product::new(7, "Ring", "jewelery", Money::usd(16800), 3.9);
        let mut cart = Cart::new();
        cart.add_to_cart(&product, a);
        cart.add_to_cart(&product, b);

        prop_assert_eq!(cart.unique_item_count(), 1);
        prop_assert_eq!(cart.lines()[0].quantity, (a + b).min(MAX_QUANTITY_PER_LINE));
        prop_assert_eq!(cart.total_item_count(), (a + b).min(MAX_QUANTITY_PER_LINE));
    }

    #[test]
    fn test_interleaved_operations_keep_invariants(
        items in arb_catalog(33),
        ops in prop::collection::vec(arb_op(), 1..120),
    ) {
        let mut state = loaded(items.clone(), CatalogConfig::new(5, 2));

        for op in ops {
            match op {
                Op::Category(category) => state.set_category(category),
                Op::Sort(sort) => state.set_sort_mode(sort),
                Op::Price(lo) => {
                    let _ = state.set_price_range(Money::usd(lo * 500), Money::usd(lo * 500 + 1500));
                }
                Op::Rating(lo) => {
                    let _ = state.set_rating_range(lo as f64, (lo + 1).min(5) as f64);
                }
                Op::Page(page) => {
                    state.set_page(page);
                }
                Op::LoadMore => {
                    state.load_more();
                }
                Op::Reset => state.reset_filters(),
                Op::Fetch { fail } => {
                    state.fetch_requested().unwrap();
                    if fail {
                        state.fetch_failed("flaky").unwrap();
                    } else {
                        state.fetch_succeeded(items.clone()).unwrap();
                    }
                }
            }
            prop_assert_eq!(state.check_invariants(), Ok(()));
            prop_assert_ne!(state.status(), FetchStatus::Loading);
        }
    }
}

//! Catalog state engine.
//!
//! Owns the product collection and everything derived from it. Every mutation
//! goes through `&mut self` and finishes by rebuilding the derived fields
//! together, so `filtered`, `total_pages` and `paginated` are never observed
//! out of step with each other.

use crate::catalog::{category_list, CatalogConfig, CategoryFilter, FetchStatus, FetchTracker, Product};
use crate::ids::ProductId;
use crate::money::Money;
use crate::search::{
    apply, normalize_search, total_pages, FilterCriteria, Pagination, PriceRange, RatingRange,
    SortMode, Window,
};
use crate::CommerceError;
use std::collections::HashSet;

/// The catalog browsing state: products, criteria, derived results and window.
#[derive(Debug, Clone)]
pub struct CatalogState {
    items: Vec<Product>,
    filtered: Vec<Product>,
    paginated: Vec<Product>,
    fetch: FetchTracker,
    criteria: FilterCriteria,
    window: Window,
    config: CatalogConfig,
    total_pages: usize,
}

impl CatalogState {
    /// Create an empty catalog.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            paginated: Vec::new(),
            fetch: FetchTracker::new(),
            criteria: FilterCriteria::default(),
            window: Window::FIRST_PAGE,
            config: config.normalized(),
            total_pages: 0,
        }
    }

    // ----- fetch lifecycle -----

    /// A fetch has been issued.
    pub fn fetch_requested(&mut self) -> Result<(), CommerceError> {
        self.fetch.request()
    }

    /// The in-flight fetch returned `items`. Replaces the catalog, keeps the
    /// current criteria, and resets the window to page 1.
    pub fn fetch_succeeded(&mut self, items: Vec<Product>) -> Result<(), CommerceError> {
        self.fetch.succeed()?;
        self.replace_items(items);
        tracing::info!(
            items = self.items.len(),
            filtered = self.filtered.len(),
            "catalog loaded"
        );
        Ok(())
    }

    /// The in-flight fetch failed. The previously loaded catalog stays as is.
    pub fn fetch_failed(&mut self, reason: impl Into<String>) -> Result<(), CommerceError> {
        let reason = reason.into();
        self.fetch.fail(reason.clone())?;
        tracing::warn!(%reason, attempts = self.fetch.attempts(), "catalog fetch failed");
        Ok(())
    }

    /// Load products directly, without going through the fetch lifecycle.
    pub fn set_products_local(&mut self, items: Vec<Product>) {
        self.replace_items(items);
    }

    /// Add products to the end of the catalog. Products whose id is already
    /// present are skipped. The window is kept where it is so a scrolled list
    /// keeps its position. Returns how many products were added.
    pub fn append_products(&mut self, items: Vec<Product>) -> usize {
        let mut seen: HashSet<ProductId> = self.items.iter().map(|p| p.id).collect();
        let before = self.items.len();
        self.items
            .extend(items.into_iter().filter(|p| seen.insert(p.id)));
        let added = self.items.len() - before;
        if added > 0 {
            self.recompute();
        }
        added
    }

    fn replace_items(&mut self, items: Vec<Product>) {
        self.items = dedupe_by_id(items);
        self.window = Window::FIRST_PAGE;
        self.recompute();
    }

    // ----- criteria -----

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.criteria.category = category;
        self.criteria_changed();
    }

    pub fn set_sort_mode(&mut self, sort: SortMode) {
        self.criteria.sort = sort;
        self.criteria_changed();
    }

    /// Restrict prices to `[min, max]`. Rejected ranges leave the state unchanged.
    pub fn set_price_range(&mut self, min: Money, max: Money) -> Result<(), CommerceError> {
        let range = PriceRange::new(min, max)?;
        self.criteria.price = Some(range);
        self.criteria_changed();
        Ok(())
    }

    /// Drop the price restriction (full observed range).
    pub fn clear_price_range(&mut self) {
        self.criteria.price = None;
        self.criteria_changed();
    }

    /// Restrict ratings to `[min, max]`. Rejected ranges leave the state unchanged.
    pub fn set_rating_range(&mut self, min: f64, max: f64) -> Result<(), CommerceError> {
        let range = RatingRange::new(min, max)?;
        self.criteria.rating = range;
        self.criteria_changed();
        Ok(())
    }

    /// Filter by title text. Blank text clears the search.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.criteria.search = normalize_search(query.into());
        self.criteria_changed();
    }

    /// Replace all criteria at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.criteria_changed();
    }

    /// Restore default criteria: all categories, no sort, full price and
    /// rating ranges, no search.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.criteria_changed();
    }

    fn criteria_changed(&mut self) {
        self.window = Window::FIRST_PAGE;
        self.recompute();
    }

    // ----- window -----

    /// Jump to page `page`, clamped to `[1, max(total_pages, 1)]`. Returns the
    /// page actually shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        let page = page.clamp(1, self.total_pages.max(1));
        self.window = Window::Page { page };
        self.refresh_window();
        page
    }

    /// Append the next batch to the visible window. Returns how many products
    /// were appended; zero once the window reaches the end of the results.
    pub fn load_more(&mut self) -> usize {
        let before = self.paginated.len();
        match self.window.grow(
            self.filtered.len(),
            self.config.items_per_page,
            self.config.infinite_batch_size,
        ) {
            Some(window) => {
                self.window = window;
                self.refresh_window();
                self.paginated.len() - before
            }
            None => 0,
        }
    }

    // ----- derived state -----

    fn recompute(&mut self) {
        self.filtered = apply(&self.items, &self.criteria);
        self.total_pages = total_pages(self.filtered.len(), self.config.items_per_page);
        tracing::debug!(
            items = self.items.len(),
            filtered = self.filtered.len(),
            total_pages = self.total_pages,
            "catalog recomputed"
        );
        self.refresh_window();
    }

    fn refresh_window(&mut self) {
        self.paginated = self
            .window
            .slice(&self.filtered, self.config.items_per_page)
            .to_vec();
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }

    /// Verify that the derived fields agree with the catalog and criteria.
    pub fn check_invariants(&self) -> Result<(), String> {
        let expected = apply(&self.items, &self.criteria);
        if !same_ids(&expected, &self.filtered) {
            return Err("filtered does not match the pipeline output".to_string());
        }
        let pages = total_pages(self.filtered.len(), self.config.items_per_page);
        if pages != self.total_pages {
            return Err(format!(
                "total_pages is {} but {} items need {}",
                self.total_pages,
                self.filtered.len(),
                pages
            ));
        }
        let range = self
            .window
            .range(self.filtered.len(), self.config.items_per_page);
        if !same_ids(&self.filtered[range], &self.paginated) {
            return Err("paginated is not the window's slice of filtered".to_string());
        }
        Ok(())
    }

    // ----- reads -----

    /// The full, unfiltered catalog.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// The catalog after the current criteria.
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// The visible window of `filtered`.
    pub fn paginated(&self) -> &[Product] {
        &self.paginated
    }

    pub fn status(&self) -> FetchStatus {
        self.fetch.status()
    }

    /// Reason for the most recent failed fetch, if the last fetch failed.
    pub fn last_error(&self) -> Option<&str> {
        self.fetch.last_error()
    }

    pub fn fetch_tracker(&self) -> &FetchTracker {
        &self.fetch
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn current_page(&self) -> usize {
        self.window.page()
    }

    pub fn items_per_page(&self) -> usize {
        self.config.items_per_page
    }

    pub fn infinite_batch_size(&self) -> usize {
        self.config.infinite_batch_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether `load_more` would append anything.
    pub fn has_more(&self) -> bool {
        self.window
            .range(self.filtered.len(), self.config.items_per_page)
            .end
            < self.filtered.len()
    }

    /// Page metadata for the current page.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.current_page(),
            self.config.items_per_page,
            self.filtered.len(),
        )
    }

    /// `All` followed by each distinct category in first-observed order.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        category_list(&self.items)
    }

    /// Lowest and highest price in the catalog, `None` when empty.
    pub fn price_bounds(&self) -> Option<(Money, Money)> {
        let min = self.items.iter().map(|p| p.price).min_by_key(|m| m.amount_cents)?;
        let max = self.items.iter().map(|p| p.price).max_by_key(|m| m.amount_cents)?;
        Some((min, max))
    }

    /// Look up a product by id in the full catalog.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

/// Keep the first product for each id.
fn dedupe_by_id(items: Vec<Product>) -> Vec<Product> {
    let total = items.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Product> = items.into_iter().filter(|p| seen.insert(p.id)).collect();
    if unique.len() < total {
        tracing::warn!(dropped = total - unique.len(), "dropped products with duplicate ids");
    }
    unique
}

fn same_ids(a: &[Product], b: &[Product]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, category: &str, cents: i64, rating: f64) -> Product {
        Product::new(id, format!("Product {}", id), category, Money::usd(cents), rating)
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    fn loaded(config: CatalogConfig, items: Vec<Product>) -> CatalogState {
        let mut state = CatalogState::new(config);
        state.fetch_requested().unwrap();
        state.fetch_succeeded(items).unwrap();
        state
    }

    fn five() -> Vec<Product> {
        (1..=5).map(|i| product(i, "A", i as i64 * 100, 3.0)).collect()
    }

    #[test]
    fn test_starts_empty_and_idle() {
        let state = CatalogState::default();
        assert!(state.items().is_empty());
        assert!(state.paginated().is_empty());
        assert_eq!(state.status(), FetchStatus::Idle);
        assert_eq!(state.total_pages(), 0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_fetch_success_populates_first_page() {
        let state = loaded(CatalogConfig::new(2, 2), five());
        assert_eq!(state.status(), FetchStatus::Idle);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(ids(state.paginated()), vec![1, 2]);
    }

    #[test]
    fn test_fetch_failure_keeps_previous_catalog() {
        let mut state = loaded(CatalogConfig::default(), five());
        state.set_category(CategoryFilter::named("A"));
        state.fetch_requested().unwrap();
        assert_eq!(state.status(), FetchStatus::Loading);
        state.fetch_failed("timeout").unwrap();

        assert_eq!(state.status(), FetchStatus::Failed);
        assert_eq!(state.last_error(), Some("timeout"));
        assert_eq!(state.items().len(), 5);
        assert_eq!(state.filtered().len(), 5);
    }

    #[test]
    fn test_fetch_succeeded_without_request_is_rejected() {
        let mut state = CatalogState::default();
        let err = state.fetch_succeeded(five()).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidFetchTransition { .. }));
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_refetch_resets_window_and_keeps_criteria() {
        let mut state = loaded(CatalogConfig::new(2, 2), five());
        state.set_sort_mode(SortMode::PriceDesc);
        state.set_page(3);
        assert_eq!(state.current_page(), 3);

        state.fetch_requested().unwrap();
        state.fetch_succeeded(five()).unwrap();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.criteria().sort, SortMode::PriceDesc);
        assert_eq!(ids(state.paginated()), vec![5, 4]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut items = five();
        items.push(product(3, "B", 9999, 1.0));
        let state = loaded(CatalogConfig::default(), items);
        assert_eq!(state.items().len(), 5);
        assert_eq!(state.product(ProductId::new(3)).unwrap().category, "A");
    }

    #[test]
    fn test_set_page_example() {
        let mut state = loaded(CatalogConfig::new(2, 2), five());
        assert_eq!(state.set_page(3), 3);
        assert_eq!(ids(state.paginated()), vec![5]);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut state = loaded(CatalogConfig::new(2, 2), five());
        assert_eq!(state.set_page(0), 1);
        assert_eq!(ids(state.paginated()), vec![1, 2]);
        assert_eq!(state.set_page(42), 3);
        assert_eq!(ids(state.paginated()), vec![5]);

        let mut empty = CatalogState::default();
        assert_eq!(empty.set_page(4), 1);
        assert!(empty.paginated().is_empty());
    }

    #[test]
    fn test_criteria_change_resets_to_page_one() {
        let mut state = loaded(CatalogConfig::new(2, 2), five());
        state.set_page(2);
        state.set_sort_mode(SortMode::PriceDesc);
        assert_eq!(state.current_page(), 1);
        assert_eq!(ids(state.paginated()), vec![5, 4]);

        state.load_more();
        state.set_search("product 1");
        assert_eq!(state.window(), Window::FIRST_PAGE);
        assert_eq!(ids(state.paginated()), vec![1]);
    }

    #[test]
    fn test_load_more_until_exhausted() {
        let mut state = loaded(CatalogConfig::new(2, 2), five());
        assert!(state.has_more());
        assert_eq!(state.load_more(), 2);
        assert_eq!(ids(state.paginated()), vec![1, 2, 3, 4]);
        assert_eq!(state.load_more(), 1);
        assert_eq!(ids(state.paginated()), vec![1, 2, 3, 4, 5]);
        assert!(!state.has_more());
        assert_eq!(state.load_more(), 0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_invalid_ranges_leave_state_unchanged() {
        let mut state = loaded(CatalogConfig::new(2, 2), five());
        state.load_more();
        let before = state.paginated().len();

        assert!(state.set_price_range(Money::usd(500), Money::usd(100)).is_err());
        assert!(state.set_rating_range(4.0, 1.0).is_err());
        assert!(state.set_rating_range(0.0, 6.0).is_err());
        assert_eq!(state.paginated().len(), before);
        assert!(state.criteria().price.is_none());
        assert!(state.criteria().rating.is_full());
    }

    #[test]
    fn test_price_and_rating_ranges() {
        let items = vec![
            product(1, "A", 100, 1.0),
            product(2, "A", 200, 4.0),
            product(3, "B", 300, 4.5),
        ];
        let mut state = loaded(CatalogConfig::default(), items);
        state.set_price_range(Money::usd(150), Money::usd(300)).unwrap();
        assert_eq!(ids(state.filtered()), vec![2, 3]);
        state.set_rating_range(4.2, 5.0).unwrap();
        assert_eq!(ids(state.filtered()), vec![3]);
        state.clear_price_range();
        assert_eq!(ids(state.filtered()), vec![3]);
    }

    #[test]
    fn test_reset_filters() {
        let mut state = loaded(CatalogConfig::default(), five());
        state.set_category(CategoryFilter::named("missing"));
        state.set_sort_mode(SortMode::RatingAsc);
        state.set_rating_range(4.0, 5.0).unwrap();
        assert!(state.filtered().is_empty());
        assert_eq!(state.total_pages(), 0);

        state.reset_filters();
        assert!(state.criteria().is_default());
        assert_eq!(ids(state.filtered()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_append_keeps_window() {
        let mut state = CatalogState::new(CatalogConfig::new(2, 2));
        state.set_products_local(five());
        state.set_page(3);
        let added = state.append_products(vec![product(6, "A", 600, 3.0), product(1, "A", 1, 1.0)]);
        assert_eq!(added, 1);
        assert_eq!(state.current_page(), 3);
        assert_eq!(ids(state.paginated()), vec![5, 6]);
        assert_eq!(state.status(), FetchStatus::Idle);
    }

    #[test]
    fn test_categories_and_price_bounds() {
        let items = vec![
            product(1, "men's clothing", 2299, 3.0),
            product(2, "jewelery", 69500, 4.6),
            product(3, "men's clothing", 795, 2.1),
        ];
        let state = loaded(CatalogConfig::default(), items);
        let categories = state.categories();
        let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["All", "men's clothing", "jewelery"]);
        assert_eq!(
            state.price_bounds(),
            Some((Money::usd(795), Money::usd(69500)))
        );
        assert_eq!(CatalogState::default().price_bounds(), None);
    }

    #[test]
    fn test_pagination_metadata() {
        let mut state = loaded(CatalogConfig::new(2, 2), five());
        state.set_page(2);
        let p = state.pagination();
        assert_eq!(p.page, 2);
        assert_eq!(p.total, 5);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next && p.has_prev);
    }
}

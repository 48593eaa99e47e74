//! Page slicing for the post listing.

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub per_page: usize,
}

/// Parse a `page` query value. Missing, invalid or zero values mean page 1.
pub fn page_number(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Slice `items` into page `current_page` (1-based) of `per_page` entries.
pub fn paginate<T>(items: Vec<T>, current_page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let current_page = current_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (current_page - 1).saturating_mul(per_page);
    let items = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        total_items,
        total_pages,
        current_page,
        per_page,
    }
}

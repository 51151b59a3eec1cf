//! Cell access for a single table row.
//!
//! Both helpers are total: a missing cell or attribute reads as `""` so one
//! malformed row never aborts the rest of the page.

use scraper::{ElementRef, Selector};

/// Trimmed text of the first element in `row` matching `selector`.
pub fn text(row: ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Value of attribute `name` on the first element in `row` matching `selector`.
pub fn attr(row: ElementRef<'_>, selector: &Selector, name: &str) -> String {
    row.select(selector)
        .next()
        .and_then(|cell| cell.value().attr(name))
        .map(str::to_string)
        .unwrap_or_default()
}

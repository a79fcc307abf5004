use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One fixed-size slice of an ordered sequence, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice `items` into the requested page.
///
/// Out-of-range page numbers clamp to the nearest valid page instead of
/// erroring: 0 becomes page 1, anything past the end becomes the last page.
/// An empty sequence still yields page 1 (with no items) so callers never
/// see a zero-page state.
pub fn paginate<T>(items: Vec<T>, page_size: usize, requested: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let number = requested.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((number - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        number,
        total_pages,
        total_items,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourteen_items_split_ten_and_four() {
        let items: Vec<_> = (0..14).collect();

        let first = paginate(items.clone(), 10, 1);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0], 0);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_items, 14);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let second = paginate(items, 10, 2);
        assert_eq!(second.items, vec![10, 11, 12, 13]);
        assert!(second.has_prev());
        assert!(!second.has_next());
    }

    #[test]
    fn test_page_past_end_clamps_to_last() {
        let items: Vec<_> = (0..14).collect();
        let clamped = paginate(items.clone(), 10, 3);
        let last = paginate(items, 10, 2);
        assert_eq!(clamped, last);
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let items: Vec<_> = (0..14).collect();
        let clamped = paginate(items.clone(), 10, 0);
        let first = paginate(items, 10, 1);
        assert_eq!(clamped, first);
    }

    #[test]
    fn test_empty_sequence_yields_one_empty_page() {
        let page = paginate(Vec::<i32>::new(), 10, 1);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_exact_multiple_has_no_partial_page() {
        let items: Vec<_> = (0..20).collect();
        let page = paginate(items, 10, 2);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_stable_under_repeated_calls() {
        let items: Vec<_> = (0..14).collect();
        let a = paginate(items.clone(), 10, 2);
        let b = paginate(items, 10, 2);
        assert_eq!(a, b);
    }
}

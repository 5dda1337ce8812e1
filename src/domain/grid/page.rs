#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices one page out of `items`. Page numbers start at 1; a page past the end
/// yields an empty window rather than the last page.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> PageWindow<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let window = if start >= total_items {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(total_items);
        items[start..end].to_vec()
    };

    PageWindow {
        items: window,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_full_and_partial_pages() {
        let items: Vec<u32> = (1..=1200).collect();

        let first = paginate(&items, 500, 1);
        assert_eq!(first.items.len(), 500);
        assert_eq!(first.items[0], 1);
        assert_eq!(first.total_pages, 3);

        let last = paginate(&items, 500, 3);
        assert_eq!(last.items.len(), 200);
        assert_eq!(last.items[0], 1001);
    }

    #[test]
    fn out_of_range_pages() {
        let items: Vec<u32> = (1..=10).collect();

        assert!(paginate(&items, 5, 3).items.is_empty());
        assert_eq!(paginate(&items, 5, 0).items, vec![1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 0, 2).items, vec![2]);
    }

    #[test]
    fn empty_input_has_no_pages() {
        let window = paginate::<u32>(&[], 500, 1);

        assert!(window.items.is_empty());
        assert_eq!(window.total_pages, 0);
        assert_eq!(window.total_items, 0);
    }
}

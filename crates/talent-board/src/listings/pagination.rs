use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 8;

/// One page of a filtered listing plus the totals needed to draw a pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Slice the 1-based `page` out of `items`. Pages past the end come back empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_concatenate_to_the_full_sequence() {
        let items: Vec<u32> = (1..=19).collect();
        let pages = total_pages(items.len(), 8);
        assert_eq!(pages, 3);

        let rebuilt: Vec<u32> = (1..=pages)
            .flat_map(|page| paginate(&items, page, 8).items)
            .collect();
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items = vec!["a", "b"];
        let page = paginate(&items, 4, 8);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn page_zero_is_treated_as_first_page() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, 0, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let items: Vec<u8> = Vec::new();
        let page = paginate(&items, 1, 8);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}

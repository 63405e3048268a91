use super::engine::{FilterContext, ListingFilter};
use super::pagination::{paginate, Page};

/// Screen-owned listing state: the active criteria and the 1-based page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingView<C> {
    criteria: C,
    page: usize,
}

impl<C: Default> Default for ListingView<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C> ListingView<C> {
    pub fn new(criteria: C) -> Self {
        Self { criteria, page: 1 }
    }

    pub fn criteria(&self) -> &C {
        &self.criteria
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the criteria. Any criteria change sends the user back to page 1.
    pub fn set_criteria(&mut self, criteria: C) {
        self.criteria = criteria;
        self.page = 1;
    }

    pub fn update_criteria<F>(&mut self, update: F)
    where
        F: FnOnce(&C) -> C,
    {
        let next = update(&self.criteria);
        self.set_criteria(next);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

impl<C: ListingFilter> ListingView<C> {
    pub fn render<'r>(
        &self,
        records: &'r [C::Record],
        context: &FilterContext<'_>,
        page_size: usize,
    ) -> Page<&'r C::Record> {
        let filtered = self.criteria.apply(records, context);
        paginate(&filtered, self.page, page_size)
    }
}

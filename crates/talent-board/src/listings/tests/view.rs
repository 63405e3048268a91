use super::common::*;

use crate::listings::catalog::Catalog;
use crate::listings::criteria::{ApplicationCriteria, JobCriteria, TimeWindow};
use crate::listings::domain::{ApplicationStatus, JobType};
use crate::listings::engine::{FilterContext, ListingFilter};
use crate::listings::pagination::total_pages;
use crate::listings::view::ListingView;

#[test]
fn view_starts_on_first_page() {
    let view: ListingView<JobCriteria> = ListingView::default();
    assert_eq!(view.page(), 1);
    assert!(!view.criteria().is_active());
}

#[test]
fn every_criteria_change_resets_to_first_page() {
    let mut view: ListingView<JobCriteria> = ListingView::default();

    view.set_page(3);
    view.update_criteria(|criteria| criteria.clone().with_query("engineer"));
    assert_eq!(view.page(), 1);

    view.set_page(2);
    view.update_criteria(|criteria| criteria.toggled_skill("React"));
    assert_eq!(view.page(), 1);
    assert!(view.criteria().skills.contains("React"));

    view.set_page(4);
    view.update_criteria(|criteria| criteria.toggled_job_type(JobType::Fresher));
    assert_eq!(view.page(), 1);

    view.set_page(2);
    view.update_criteria(|criteria| criteria.clone().with_time_window(TimeWindow::Last7Days));
    assert_eq!(view.page(), 1);

    view.set_page(5);
    view.update_criteria(|criteria| criteria.toggled_skill("React"));
    assert_eq!(view.page(), 1);
    assert!(!view.criteria().skills.contains("React"));
}

#[test]
fn page_zero_is_clamped() {
    let mut view: ListingView<ApplicationCriteria> = ListingView::default();
    view.set_page(0);
    assert_eq!(view.page(), 1);
}

#[test]
fn rendered_pages_cover_the_filtered_sequence_once() {
    let catalog = Catalog::bundled().expect("bundled catalog parses");
    let skills = viewer_skills(&["Python", "React"]);
    let context = FilterContext::new(now(), &skills);
    let criteria = ApplicationCriteria::default().with_query("e");
    let expected = criteria.apply(catalog.applications(), &context);

    let mut view = ListingView::new(criteria);
    let page_size = 3;
    let pages = total_pages(expected.len(), page_size);
    let mut rebuilt = Vec::new();
    for page in 1..=pages {
        view.set_page(page);
        let rendered = view.render(catalog.applications(), &context, page_size);
        assert_eq!(rendered.total_items, expected.len());
        assert_eq!(rendered.total_pages, pages);
        rebuilt.extend(rendered.items);
    }

    assert_eq!(rebuilt, expected);
}

#[test]
fn bundled_applications_paginate_eight_per_page() {
    let catalog = Catalog::bundled().expect("bundled catalog parses");
    let skills = viewer_skills(&[]);
    let context = FilterContext::new(now(), &skills);
    let mut view = ListingView::new(ApplicationCriteria::default());

    let first = view.render(catalog.applications(), &context, 8);
    assert_eq!(first.items.len(), 8);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next());

    view.set_page(2);
    let second = view.render(catalog.applications(), &context, 8);
    assert_eq!(second.items.len(), catalog.applications().len() - 8);

    view.set_criteria(
        ApplicationCriteria::default().with_status(Some(ApplicationStatus::Offer)),
    );
    let offers = view.render(catalog.applications(), &context, 8);
    assert_eq!(offers.page, 1);
    assert_eq!(offers.total_items, 1);
}

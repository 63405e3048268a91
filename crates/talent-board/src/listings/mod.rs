//! Job search, application tracking and invitation listings.
//!
//! Records live in an in-memory [`Catalog`]. Criteria types implement [`ListingFilter`]
//! to select and order a subsequence, and [`ListingView`] owns the criteria plus the
//! current page for a screen.

pub mod catalog;
pub mod criteria;
pub mod domain;
pub mod engine;
pub mod intake;
pub mod pagination;
pub mod recency;
pub mod router;
pub mod service;
pub mod view;

#[cfg(test)]
mod tests;

pub use catalog::{ApplicationCsvImporter, Catalog, CatalogError};
pub use criteria::{ApplicationCriteria, InvitationCriteria, JobCriteria, TimeWindow};
pub use domain::{
    Application, ApplicationId, ApplicationStatus, Invitation, InvitationId, InvitationProject,
    InvitationStatus, Job, JobId, JobType, MentorSummary, ProjectKind, UnknownVariant,
};
pub use engine::{
    application_status_counts, invitation_status_counts, rank_by_skill_overlap, FilterContext,
    ListingFilter, StatusCounts,
};
pub use intake::{
    submit_application, validate_application, Advisory, ApplicationForm, IntakeError,
    SubmissionReceipt, UploadDescriptor, UploadPolicy,
};
pub use pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use router::listing_router;
pub use service::{
    parse_as_of, ApplicationCard, InvitationListing, InvitationResponse, JobCard, ListingService,
    ListingServiceError,
};
pub use view::ListingView;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::catalog::{ApplicationCsvImporter, Catalog, CatalogError};
use super::criteria::{ApplicationCriteria, InvitationCriteria, JobCriteria};
use super::domain::{
    Application, ApplicationStatus, Invitation, InvitationId, InvitationStatus, Job, JobId,
};
use super::engine::{
    application_status_counts, invitation_status_counts, FilterContext, StatusCounts,
};
use super::intake::{
    submit_application, Advisory, ApplicationForm, IntakeError, SubmissionReceipt, UploadPolicy,
};
use super::pagination::Page;
use super::recency::{is_deadline_near, is_recent_application, posted_label};
use super::view::ListingView;
use crate::config::ListingConfig;

/// Job posting decorated with the fields a result card needs.
#[derive(Debug, Clone, Serialize)]
pub struct JobCard {
    #[serde(flatten)]
    pub job: Job,
    pub matching_skills: usize,
    pub posted_label: String,
    pub deadline_near: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationCard {
    #[serde(flatten)]
    pub application: Application,
    pub recent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvitationListing {
    pub invitations: Vec<Invitation>,
    pub counts: StatusCounts<InvitationStatus>,
}

/// Invitation after the student's reply, plus the confirmation shown to them.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    pub invitation: Invitation,
    #[serde(flatten)]
    pub advisory: Advisory,
}

/// Replies recorded during the process lifetime, layered over the catalog's statuses.
#[derive(Debug, Default, Clone)]
struct InvitationReplies {
    statuses: Arc<Mutex<HashMap<InvitationId, InvitationStatus>>>,
}

impl InvitationReplies {
    fn current(&self, invitation: &Invitation) -> InvitationStatus {
        let guard = self.statuses.lock().unwrap_or_else(PoisonError::into_inner);
        guard.get(&invitation.id).copied().unwrap_or(invitation.status)
    }

    /// Record `reply` only while the invitation is still pending. Returns the blocking
    /// status otherwise.
    fn record(
        &self,
        invitation: &Invitation,
        reply: InvitationStatus,
    ) -> Result<(), InvitationStatus> {
        let mut guard = self.statuses.lock().unwrap_or_else(PoisonError::into_inner);
        let current = guard.get(&invitation.id).copied().unwrap_or(invitation.status);
        if current != InvitationStatus::Pending {
            return Err(current);
        }
        guard.insert(invitation.id.clone(), reply);
        Ok(())
    }
}

/// Read-only facade over the catalog used by the router and the CLI.
pub struct ListingService {
    catalog: Arc<Catalog>,
    viewer_skills: Vec<String>,
    page_size: usize,
    resume_policy: UploadPolicy,
    replies: InvitationReplies,
}

impl ListingService {
    pub fn new(catalog: Arc<Catalog>, viewer_skills: Vec<String>, page_size: usize) -> Self {
        Self {
            catalog,
            viewer_skills,
            page_size: page_size.max(1),
            resume_policy: UploadPolicy::application_resume(),
            replies: InvitationReplies::default(),
        }
    }

    /// Load the configured catalog (or the bundled sample) and wrap it in a service.
    pub fn from_config(config: &ListingConfig) -> Result<Self, CatalogError> {
        let mut catalog = match &config.catalog_path {
            Some(path) => {
                info!(path = %path.display(), "loading listing catalog");
                Catalog::from_json_path(path)?
            }
            None => Catalog::bundled()?,
        };

        if let Some(path) = &config.applications_csv {
            let applications = ApplicationCsvImporter::from_path(path)?;
            info!(
                path = %path.display(),
                rows = applications.len(),
                "imported applications from CSV"
            );
            catalog = catalog.with_applications(applications)?;
        }

        info!(
            jobs = catalog.jobs().len(),
            applications = catalog.applications().len(),
            invitations = catalog.invitations().len(),
            "listing catalog ready"
        );

        Ok(Self::new(
            Arc::new(catalog),
            config.viewer_skills.clone(),
            config.page_size,
        ))
    }

    pub fn viewer_skills(&self) -> &[String] {
        &self.viewer_skills
    }

    pub fn search_jobs(
        &self,
        criteria: &JobCriteria,
        page: usize,
        now: DateTime<Utc>,
    ) -> Page<JobCard> {
        let mut view = ListingView::new(criteria.clone());
        view.set_page(page);
        let context = FilterContext::new(now, &self.viewer_skills);
        let result = view.render(self.catalog.jobs(), &context, self.page_size);

        debug!(
            query = %criteria.query,
            skills = criteria.skills.len(),
            job_types = criteria.job_types.len(),
            window = criteria.time_window.key(),
            matched = result.total_items,
            "job search evaluated"
        );

        result.map(|job| JobCard {
            matching_skills: job.skill_overlap(&self.viewer_skills),
            posted_label: posted_label(now, job.posted_date),
            deadline_near: is_deadline_near(now, job.application_deadline),
            job: job.clone(),
        })
    }

    pub fn job(&self, id: &JobId) -> Result<&Job, ListingServiceError> {
        self.catalog
            .job(id)
            .ok_or_else(|| ListingServiceError::JobNotFound(id.clone()))
    }

    pub fn applications(
        &self,
        criteria: &ApplicationCriteria,
        page: usize,
        now: DateTime<Utc>,
    ) -> Page<ApplicationCard> {
        let mut view = ListingView::new(criteria.clone());
        view.set_page(page);
        let context = FilterContext::new(now, &self.viewer_skills);

        view.render(self.catalog.applications(), &context, self.page_size)
            .map(|application| ApplicationCard {
                recent: is_recent_application(now, application.applied_date),
                application: application.clone(),
            })
    }

    pub fn application_summary(&self) -> StatusCounts<ApplicationStatus> {
        application_status_counts(self.catalog.applications())
    }

    /// Invitations with any recorded replies applied. Not paginated.
    pub fn invitations(&self, criteria: &InvitationCriteria) -> InvitationListing {
        let current: Vec<Invitation> = self
            .catalog
            .invitations()
            .iter()
            .map(|invitation| Invitation {
                status: self.replies.current(invitation),
                ..invitation.clone()
            })
            .collect();
        let counts = invitation_status_counts(&current);

        InvitationListing {
            invitations: current
                .into_iter()
                .filter(|invitation| criteria.matches(invitation))
                .collect(),
            counts,
        }
    }

    /// Accept or decline a pending invitation. Replies are final.
    pub fn respond_to_invitation(
        &self,
        id: &InvitationId,
        reply: InvitationStatus,
    ) -> Result<InvitationResponse, ListingServiceError> {
        let invitation = self
            .catalog
            .invitation(id)
            .ok_or_else(|| ListingServiceError::InvitationNotFound(id.clone()))?;
        let verb = match reply {
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Pending => {
                return Err(ListingServiceError::InvalidInvitationReply(reply));
            }
        };

        if let Err(status) = self.replies.record(invitation, reply) {
            warn!(invitation_id = %id, status = status.label(), "invitation already answered");
            return Err(ListingServiceError::InvitationClosed {
                id: id.clone(),
                status,
            });
        }
        info!(
            invitation_id = %id,
            mentor = %invitation.mentor.name,
            reply = reply.label(),
            "invitation answered"
        );

        Ok(InvitationResponse {
            advisory: Advisory {
                title: match reply {
                    InvitationStatus::Accepted => "Invitation Accepted",
                    _ => "Invitation Declined",
                },
                description: format!(
                    "You've {verb} the invitation from {}",
                    invitation.mentor.name
                ),
            },
            invitation: Invitation {
                status: reply,
                ..invitation.clone()
            },
        })
    }

    /// Validate an application for `job_id` and acknowledge it without storing anything.
    pub fn apply(
        &self,
        job_id: &JobId,
        form: &ApplicationForm,
    ) -> Result<SubmissionReceipt, ListingServiceError> {
        let job = self.job(job_id)?;
        match submit_application(job, form, &self.resume_policy) {
            Ok(receipt) => {
                info!(job_id = %job.id, company = %job.company, "application submitted");
                Ok(receipt)
            }
            Err(err) => {
                warn!(job_id = %job.id, error = %err, "application blocked");
                Err(err.into())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error("job '{0}' not found")]
    JobNotFound(JobId),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error("invitation '{0}' not found")]
    InvitationNotFound(InvitationId),
    #[error("invitation '{id}' was already {}", .status.label().to_lowercase())]
    InvitationClosed {
        id: InvitationId,
        status: InvitationStatus,
    },
    #[error("'{}' is not a reply to an invitation", .0.label())]
    InvalidInvitationReply(InvitationStatus),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Interpret an `as_of` override: RFC 3339 timestamp or a bare date at 00:00 UTC.
pub fn parse_as_of(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD or RFC 3339 ({err})"))
}

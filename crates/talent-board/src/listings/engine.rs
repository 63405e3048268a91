//! Predicate filtering and ranking over in-memory listing collections.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::criteria::{ApplicationCriteria, InvitationCriteria, JobCriteria};
use super::domain::{Application, ApplicationStatus, Invitation, InvitationStatus, Job};
use super::recency::elapsed_days;

/// Inputs that are not part of the user's criteria but still shape the result.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub now: DateTime<Utc>,
    pub viewer_skills: &'a [String],
}

impl<'a> FilterContext<'a> {
    pub fn new(now: DateTime<Utc>, viewer_skills: &'a [String]) -> Self {
        Self { now, viewer_skills }
    }
}

/// Criteria that can select and order a subsequence of their record type.
pub trait ListingFilter {
    type Record;

    fn apply<'r>(
        &self,
        records: &'r [Self::Record],
        context: &FilterContext<'_>,
    ) -> Vec<&'r Self::Record>;
}

/// Lowercased, trimmed needle, or `None` when the query imposes no constraint.
fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn job_matches_query(job: &Job, needle: &str) -> bool {
    contains_folded(&job.title, needle)
        || contains_folded(&job.company, needle)
        || contains_folded(&job.description, needle)
        || job.skills.iter().any(|skill| contains_folded(skill, needle))
}

impl JobCriteria {
    pub fn matches(&self, job: &Job, now: DateTime<Utc>) -> bool {
        if let Some(needle) = normalize_query(&self.query) {
            if !job_matches_query(job, &needle) {
                return false;
            }
        }

        if !self.skills.is_empty() && !job.skills.iter().any(|skill| self.skills.contains(skill))
        {
            return false;
        }

        if !self.job_types.is_empty() && !self.job_types.contains(&job.job_type) {
            return false;
        }

        match self.time_window.threshold_days() {
            Some(threshold) => elapsed_days(now, job.posted_date) <= threshold,
            None => true,
        }
    }
}

impl ListingFilter for JobCriteria {
    type Record = Job;

    fn apply<'r>(&self, records: &'r [Job], context: &FilterContext<'_>) -> Vec<&'r Job> {
        let mut jobs: Vec<&Job> = records
            .iter()
            .filter(|job| self.matches(job, context.now))
            .collect();
        rank_by_skill_overlap(&mut jobs, context.viewer_skills);
        jobs
    }
}

/// Order postings by how many of `viewer_skills` they list, most first.
///
/// The sort is stable so postings with equal overlap keep their relative order.
pub fn rank_by_skill_overlap(jobs: &mut [&Job], viewer_skills: &[String]) {
    jobs.sort_by_key(|job| Reverse(job.skill_overlap(viewer_skills)));
}

impl ApplicationCriteria {
    pub fn matches(&self, application: &Application) -> bool {
        let matches_query = match normalize_query(&self.query) {
            Some(needle) => {
                contains_folded(&application.job_title, &needle)
                    || contains_folded(&application.company, &needle)
            }
            None => true,
        };

        matches_query && self.status.map_or(true, |status| application.status == status)
    }
}

impl ListingFilter for ApplicationCriteria {
    type Record = Application;

    /// Most recently applied first; same-day entries keep catalog order.
    fn apply<'r>(
        &self,
        records: &'r [Application],
        _context: &FilterContext<'_>,
    ) -> Vec<&'r Application> {
        let mut applications: Vec<&Application> = records
            .iter()
            .filter(|application| self.matches(application))
            .collect();
        applications.sort_by_key(|application| Reverse(application.applied_date));
        applications
    }
}

impl InvitationCriteria {
    pub fn matches(&self, invitation: &Invitation) -> bool {
        let matches_query = match normalize_query(&self.query) {
            Some(needle) => {
                contains_folded(&invitation.mentor.name, &needle)
                    || contains_folded(&invitation.project.title, &needle)
                    || contains_folded(&invitation.mentor.company, &needle)
            }
            None => true,
        };

        matches_query && self.status.map_or(true, |status| invitation.status == status)
    }
}

impl ListingFilter for InvitationCriteria {
    type Record = Invitation;

    fn apply<'r>(
        &self,
        records: &'r [Invitation],
        _context: &FilterContext<'_>,
    ) -> Vec<&'r Invitation> {
        records
            .iter()
            .filter(|invitation| self.matches(invitation))
            .collect()
    }
}

/// Per-status badge counts. Every status is present, including those with zero entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts<S: Ord> {
    pub total: usize,
    pub by_status: BTreeMap<S, usize>,
}

impl<S: Ord + Copy> StatusCounts<S> {
    pub fn tally<I>(all: &[S], statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut by_status: BTreeMap<S, usize> = all.iter().map(|status| (*status, 0)).collect();
        let mut total = 0;
        for status in statuses {
            *by_status.entry(status).or_insert(0) += 1;
            total += 1;
        }
        Self { total, by_status }
    }

    pub fn count(&self, status: S) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

pub fn application_status_counts(applications: &[Application]) -> StatusCounts<ApplicationStatus> {
    StatusCounts::tally(
        &ApplicationStatus::ordered(),
        applications.iter().map(|application| application.status),
    )
}

pub fn invitation_status_counts(invitations: &[Invitation]) -> StatusCounts<InvitationStatus> {
    StatusCounts::tally(
        &InvitationStatus::ordered(),
        invitations.iter().map(|invitation| invitation.status),
    )
}

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationStatus, InvitationStatus, JobType, UnknownVariant};

/// Posting-age window selectable on the job search screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "last24h")]
    Last24Hours,
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeWindow {
    pub const fn ordered() -> [Self; 4] {
        [Self::All, Self::Last24Hours, Self::Last7Days, Self::Last30Days]
    }

    /// Inclusive upper bound on elapsed days, `None` for an unbounded window.
    pub const fn threshold_days(self) -> Option<i64> {
        match self {
            Self::Last24Hours => Some(1),
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::All => None,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Last24Hours => "last24h",
            Self::Last7Days => "last7days",
            Self::Last30Days => "last30days",
            Self::All => "all",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Last24Hours => "Last 24 Hours",
            Self::Last7Days => "Last 7 Days",
            Self::Last30Days => "Last 30 Days",
            Self::All => "All Time",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|window| window.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant {
                kind: "time window",
                value: trimmed.to_string(),
            })
    }
}

/// Job search filter state. Replaced wholesale whenever the user changes a control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCriteria {
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub job_types: BTreeSet<JobType>,
    #[serde(default)]
    pub time_window: TimeWindow,
    #[serde(default)]
    pub query: String,
}

impl JobCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_job_types<I>(mut self, job_types: I) -> Self
    where
        I: IntoIterator<Item = JobType>,
    {
        self.job_types = job_types.into_iter().collect();
        self
    }

    pub fn with_time_window(mut self, time_window: TimeWindow) -> Self {
        self.time_window = time_window;
        self
    }

    /// Criteria with `skill` selected if it was not, deselected otherwise.
    pub fn toggled_skill(&self, skill: &str) -> Self {
        let mut next = self.clone();
        if !next.skills.remove(skill) {
            next.skills.insert(skill.to_string());
        }
        next
    }

    pub fn toggled_job_type(&self, job_type: JobType) -> Self {
        let mut next = self.clone();
        if !next.job_types.remove(&job_type) {
            next.job_types.insert(job_type);
        }
        next
    }

    pub fn is_active(&self) -> bool {
        !self.skills.is_empty()
            || !self.job_types.is_empty()
            || self.time_window != TimeWindow::All
            || !self.query.trim().is_empty()
    }
}

/// Filter state for the "my applications" screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCriteria {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
}

impl ApplicationCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status(mut self, status: Option<ApplicationStatus>) -> Self {
        self.status = status;
        self
    }
}

/// Filter state for the invitations inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationCriteria {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub status: Option<InvitationStatus>,
}

impl InvitationCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status(mut self, status: Option<InvitationStatus>) -> Self {
        self.status = status;
        self
    }
}

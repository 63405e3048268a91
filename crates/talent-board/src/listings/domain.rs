use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for mentor invitations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for InvitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Experience band a posting is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobType {
    Fresher,
    #[serde(rename = "1+ years")]
    OneYearPlus,
    #[serde(rename = "2-3 years")]
    TwoToThreeYears,
    #[serde(rename = "3-5 years")]
    ThreeToFiveYears,
    #[serde(rename = "5+ years")]
    FiveYearsPlus,
}

impl JobType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Fresher,
            Self::OneYearPlus,
            Self::TwoToThreeYears,
            Self::ThreeToFiveYears,
            Self::FiveYearsPlus,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fresher => "Fresher",
            Self::OneYearPlus => "1+ years",
            Self::TwoToThreeYears => "2-3 years",
            Self::ThreeToFiveYears => "3-5 years",
            Self::FiveYearsPlus => "5+ years",
        }
    }
}

impl FromStr for JobType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("job type", trimmed))
    }
}

/// A job posting as advertised on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub experience: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub posted_by: String,
    pub posted_date: NaiveDate,
    pub application_deadline: NaiveDate,
    pub is_remote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_questions: Vec<String>,
}

impl Job {
    /// Number of this posting's skills that also appear in `reference`.
    pub fn skill_overlap<S: AsRef<str>>(&self, reference: &[S]) -> usize {
        self.skills
            .iter()
            .filter(|skill| reference.iter().any(|other| other.as_ref() == skill.as_str()))
            .count()
    }
}

/// Pipeline status of a submitted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Interview,
    Rejected,
    Offer,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Applied,
            Self::Shortlisted,
            Self::Interview,
            Self::Rejected,
            Self::Offer,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Shortlisted => "Shortlisted",
            Self::Interview => "Interview",
            Self::Rejected => "Rejected",
            Self::Offer => "Offer",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("application status", trimmed))
    }
}

/// Application entry with the posting's display fields denormalized for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub applied_date: NaiveDate,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Pending, Self::Accepted, Self::Declined]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Declined => "Declined",
        }
    }
}

impl FromStr for InvitationStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("invitation status", trimmed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectKind {
    Internship,
    Project,
    Mentorship,
}

/// Mentor details shown alongside an invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorSummary {
    pub id: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub skills: Vec<String>,
    pub bio: String,
    pub experience: String,
    pub rating: f32,
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationProject {
    pub title: String,
    pub kind: ProjectKind,
    pub description: String,
}

/// Mentor invitation addressed to the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub mentor: MentorSummary,
    pub project: InvitationProject,
    pub invited_at: DateTime<Utc>,
    pub status: InvitationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Raised when a label does not name any variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

//! In-memory collections backing the listing screens.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Invitation, InvitationId, Job, JobId,
};

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid application CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("application CSV row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
    #[error("duplicate job id '{0}'")]
    DuplicateJob(JobId),
    #[error("duplicate application id '{0}'")]
    DuplicateApplication(ApplicationId),
}

/// Jobs, applications and invitations available to a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    jobs: Vec<Job>,
    #[serde(default)]
    applications: Vec<Application>,
    #[serde(default)]
    invitations: Vec<Invitation>,
}

impl Catalog {
    pub fn new(
        jobs: Vec<Job>,
        applications: Vec<Application>,
        invitations: Vec<Invitation>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            jobs,
            applications,
            invitations,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Sample data shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_CATALOG.as_bytes())
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut job_ids = HashSet::new();
        for job in &self.jobs {
            if !job_ids.insert(&job.id) {
                return Err(CatalogError::DuplicateJob(job.id.clone()));
            }
        }

        let mut application_ids = HashSet::new();
        for application in &self.applications {
            if !application_ids.insert(&application.id) {
                return Err(CatalogError::DuplicateApplication(application.id.clone()));
            }
        }

        Ok(())
    }

    /// Replace the application list, e.g. with rows from a CSV export.
    pub fn with_applications(
        mut self,
        applications: Vec<Application>,
    ) -> Result<Self, CatalogError> {
        self.applications = applications;
        self.validate()?;
        Ok(self)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    pub fn job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    pub fn invitation(&self, id: &InvitationId) -> Option<&Invitation> {
        self.invitations
            .iter()
            .find(|invitation| &invitation.id == id)
    }
}

/// Reads application rows from a spreadsheet export.
pub struct ApplicationCsvImporter;

impl ApplicationCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Application>, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Application>, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut applications = Vec::new();

        for (index, record) in csv_reader.deserialize::<ApplicationRow>().enumerate() {
            let row = record?;
            applications.push(row.into_application(index + 1)?);
        }

        Ok(applications)
    }
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    #[serde(rename = "Application ID")]
    id: String,
    #[serde(rename = "Job ID")]
    job_id: String,
    #[serde(rename = "Job Title")]
    job_title: String,
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Job Type")]
    job_type: String,
    #[serde(rename = "Salary", default, deserialize_with = "empty_string_as_none")]
    salary: Option<String>,
    #[serde(rename = "Applied Date")]
    applied_date: String,
    #[serde(rename = "Status")]
    status: String,
}

impl ApplicationRow {
    fn into_application(self, row: usize) -> Result<Application, CatalogError> {
        let applied_date = NaiveDate::parse_from_str(&self.applied_date, "%Y-%m-%d").map_err(
            |err| CatalogError::InvalidRow {
                row,
                reason: format!("applied date '{}' is not YYYY-MM-DD ({err})", self.applied_date),
            },
        )?;
        let status = self
            .status
            .parse::<ApplicationStatus>()
            .map_err(|err| CatalogError::InvalidRow {
                row,
                reason: err.to_string(),
            })?;

        Ok(Application {
            id: ApplicationId(self.id),
            job_id: JobId(self.job_id),
            job_title: self.job_title,
            company: self.company,
            location: self.location,
            job_type: self.job_type,
            salary: self.salary,
            applied_date,
            status,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads() {
        let catalog = Catalog::bundled().expect("bundled catalog parses");
        assert!(!catalog.jobs().is_empty());
        assert!(catalog.applications().len() > 8);
        assert!(!catalog.invitations().is_empty());
        assert!(catalog.job(&JobId("1".to_string())).is_some());
        let invitation = catalog
            .invitation(&InvitationId("inv-2".to_string()))
            .expect("inv-2 bundled");
        assert_eq!(invitation.mentor.name, "Alex Rodriguez");
        assert!(catalog
            .invitation(&InvitationId("inv-99".to_string()))
            .is_none());
    }

    #[test]
    fn malformed_dates_are_rejected_at_load() {
        let json = r#"{"jobs":[{"id":"x","title":"t","company":"c","location":"l","type":"Fresher",
            "experience":"0-1 years","salary":"n/a","description":"d","requirements":[],"skills":[],
            "posted_by":"p","posted_date":"not-a-date","application_deadline":"2024-02-01","is_remote":false}]}"#;
        let err = Catalog::from_reader(json.as_bytes()).expect_err("bad date rejected");
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn csv_import_parses_rows_and_blank_salary() {
        let csv = "Application ID,Job ID,Job Title,Company,Location,Job Type,Salary,Applied Date,Status\n\
app-100,job-1,Backend Developer,CloudServices Co,Austin TX,Full-time,,2024-01-08,Applied\n\
app-101,job-2,Data Analyst,Numbers Inc,Remote,Internship,$20/hour,2024-01-09,interview\n";

        let applications =
            ApplicationCsvImporter::from_reader(csv.as_bytes()).expect("csv imports");
        assert_eq!(applications.len(), 2);
        assert_eq!(applications[0].salary, None);
        assert_eq!(applications[1].status, ApplicationStatus::Interview);
        assert_eq!(
            applications[1].applied_date,
            NaiveDate::from_ymd_opt(2024, 1, 9).expect("valid")
        );
    }

    #[test]
    fn csv_import_reports_row_of_bad_status() {
        let csv = "Application ID,Job ID,Job Title,Company,Location,Job Type,Salary,Applied Date,Status\n\
app-100,job-1,Backend Developer,CloudServices Co,Austin TX,Full-time,,2024-01-08,Hired\n";

        let err = ApplicationCsvImporter::from_reader(csv.as_bytes()).expect_err("bad status");
        match err {
            CatalogError::InvalidRow { row, reason } => {
                assert_eq!(row, 1);
                assert!(reason.contains("Hired"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn duplicate_application_ids_are_rejected() {
        let catalog = Catalog::bundled().expect("bundled catalog parses");
        let mut applications = catalog.applications().to_vec();
        applications.push(applications[0].clone());
        let err = catalog
            .with_applications(applications)
            .expect_err("duplicate rejected");
        assert!(matches!(err, CatalogError::DuplicateApplication(_)));
    }
}

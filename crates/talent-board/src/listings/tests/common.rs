use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::listings::catalog::Catalog;
use crate::listings::domain::{Application, ApplicationId, ApplicationStatus, Job, JobId, JobType};
use crate::listings::intake::{ApplicationForm, UploadDescriptor};
use crate::listings::service::ListingService;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 23, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn job(
    id: &str,
    title: &str,
    skills: &[&str],
    job_type: JobType,
    posted: NaiveDate,
) -> Job {
    Job {
        id: JobId(id.to_string()),
        title: title.to_string(),
        company: format!("{title} Co"),
        location: "Remote".to_string(),
        job_type,
        experience: "0-1 years".to_string(),
        salary: "$50,000".to_string(),
        description: format!("Work on {title} projects."),
        requirements: vec!["Curiosity".to_string()],
        skills: skills.iter().map(|s| s.to_string()).collect(),
        posted_by: "Recruiter".to_string(),
        posted_date: posted,
        application_deadline: date(2024, 2, 15),
        is_remote: true,
        company_logo: None,
        custom_questions: Vec::new(),
    }
}

pub(super) fn application(
    id: &str,
    title: &str,
    status: ApplicationStatus,
    applied: NaiveDate,
) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        job_id: JobId(format!("job-{id}")),
        job_title: title.to_string(),
        company: format!("{title} Inc"),
        location: "Remote".to_string(),
        job_type: "Full-time".to_string(),
        salary: None,
        applied_date: applied,
        status,
    }
}

pub(super) fn viewer_skills(skills: &[&str]) -> Vec<String> {
    skills.iter().map(|s| s.to_string()).collect()
}

pub(super) fn resume() -> UploadDescriptor {
    UploadDescriptor {
        file_name: "resume.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        size_bytes: 200 * 1024,
    }
}

pub(super) fn complete_form(job: &Job) -> ApplicationForm {
    let mut form = ApplicationForm {
        full_name: "Priya Natarajan".to_string(),
        email: "priya@example.edu".to_string(),
        phone: "+1 555 0100".to_string(),
        resume: Some(resume()),
        cover_letter: String::new(),
        ..ApplicationForm::default()
    };
    for question in &job.custom_questions {
        form.custom_answers
            .insert(question.clone(), "A thoughtful answer.".to_string());
    }
    form
}

pub(super) fn bundled_service(page_size: usize) -> Arc<ListingService> {
    let catalog = Catalog::bundled().expect("bundled catalog parses");
    Arc::new(ListingService::new(
        Arc::new(catalog),
        viewer_skills(&["JavaScript", "Python", "React", "Machine Learning", "AWS"]),
        page_size,
    ))
}

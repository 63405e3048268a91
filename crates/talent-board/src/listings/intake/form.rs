use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::upload::{UploadDescriptor, UploadPolicy};
use super::IntakeError;
use crate::listings::domain::{Job, JobId};

/// Fields collected by the apply dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub resume: Option<UploadDescriptor>,
    #[serde(default)]
    pub cover_letter: String,
    /// Answers keyed by the exact question text.
    #[serde(default)]
    pub custom_answers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub job_id: JobId,
    pub job_title: String,
    pub company: String,
    pub applicant_email: String,
    pub message: String,
}

pub fn validate_application(
    job: &Job,
    form: &ApplicationForm,
    resume_policy: &UploadPolicy,
) -> Result<(), IntakeError> {
    let missing: Vec<&'static str> = [
        ("full_name", &form.full_name),
        ("email", &form.email),
        ("phone", &form.phone),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        return Err(IntakeError::MissingInformation { fields: missing });
    }

    let resume = form.resume.as_ref().ok_or(IntakeError::ResumeRequired)?;
    resume_policy.validate(resume)?;

    for question in &job.custom_questions {
        let answered = form
            .custom_answers
            .get(question)
            .is_some_and(|answer| !answer.trim().is_empty());
        if !answered {
            return Err(IntakeError::IncompleteApplication {
                question: question.clone(),
            });
        }
    }

    Ok(())
}

/// Validate the form and acknowledge it. Nothing is persisted.
pub fn submit_application(
    job: &Job,
    form: &ApplicationForm,
    resume_policy: &UploadPolicy,
) -> Result<SubmissionReceipt, IntakeError> {
    validate_application(job, form, resume_policy)?;

    Ok(SubmissionReceipt {
        job_id: job.id.clone(),
        job_title: job.title.clone(),
        company: job.company.clone(),
        applicant_email: form.email.trim().to_string(),
        message: format!(
            "Your application for {} at {} has been submitted successfully.",
            job.title, job.company
        ),
    })
}

use super::common::*;

use crate::listings::domain::JobType;
use crate::listings::intake::{
    submit_application, validate_application, IntakeError, UploadDescriptor, UploadPolicy,
};

fn job_with_questions() -> crate::listings::domain::Job {
    let mut job = job("q", "Frontend Intern", &["React"], JobType::Fresher, date(2024, 1, 20));
    job.custom_questions = vec![
        "Why frontend?".to_string(),
        "Describe a project.".to_string(),
    ];
    job
}

#[test]
fn complete_form_yields_receipt() {
    let job = job_with_questions();
    let form = complete_form(&job);

    let receipt = submit_application(&job, &form, &UploadPolicy::application_resume())
        .expect("submission accepted");

    assert_eq!(receipt.job_id, job.id);
    assert_eq!(
        receipt.message,
        "Your application for Frontend Intern at Frontend Intern Co has been submitted successfully."
    );
}

#[test]
fn blank_required_fields_are_reported() {
    let job = job_with_questions();
    let mut form = complete_form(&job);
    form.email = "  ".to_string();
    form.phone.clear();

    let err = validate_application(&job, &form, &UploadPolicy::application_resume())
        .expect_err("missing fields rejected");

    assert_eq!(
        err,
        IntakeError::MissingInformation {
            fields: vec!["email", "phone"]
        }
    );
    assert_eq!(err.advisory().title, "Missing Information");
}

#[test]
fn resume_is_required_before_questions() {
    let job = job_with_questions();
    let mut form = complete_form(&job);
    form.resume = None;
    form.custom_answers.clear();

    let err = validate_application(&job, &form, &UploadPolicy::application_resume())
        .expect_err("resume required");
    assert_eq!(err, IntakeError::ResumeRequired);
}

#[test]
fn oversized_resume_is_rejected() {
    let job = job_with_questions();
    let mut form = complete_form(&job);
    form.resume = Some(UploadDescriptor {
        file_name: "resume.docx".to_string(),
        content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            .to_string(),
        size_bytes: 6 * 1024 * 1024,
    });

    let err = validate_application(&job, &form, &UploadPolicy::application_resume())
        .expect_err("oversized resume rejected");
    assert!(matches!(err, IntakeError::FileTooLarge { .. }));
}

#[test]
fn every_custom_question_needs_an_answer() {
    let job = job_with_questions();
    let mut form = complete_form(&job);
    form.custom_answers
        .insert("Describe a project.".to_string(), "   ".to_string());

    let err = validate_application(&job, &form, &UploadPolicy::application_resume())
        .expect_err("blank answer rejected");
    assert_eq!(
        err,
        IntakeError::IncompleteApplication {
            question: "Describe a project.".to_string()
        }
    );
    assert_eq!(
        err.advisory().description,
        "Please answer all application questions."
    );
}

#[test]
fn jobs_without_questions_need_no_answers() {
    let job = job("plain", "Analyst", &["SQL"], JobType::Fresher, date(2024, 1, 20));
    let form = complete_form(&job);
    assert!(form.custom_answers.is_empty());
    assert!(validate_application(&job, &form, &UploadPolicy::application_resume()).is_ok());
}

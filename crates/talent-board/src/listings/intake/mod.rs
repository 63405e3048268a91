//! Apply-form and file-upload checks. Nothing is stored and no file leaves the client;
//! a successful submission only yields a receipt.

mod form;
mod upload;

pub use form::{submit_application, validate_application, ApplicationForm, SubmissionReceipt};
pub use upload::{UploadDescriptor, UploadPolicy, MAX_UPLOAD_BYTES};

use serde::Serialize;

/// User-facing reason a submission or upload was blocked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("required applicant fields are missing: {}", fields.join(", "))]
    MissingInformation { fields: Vec<&'static str> },
    #[error("a resume must be attached")]
    ResumeRequired,
    #[error("custom question left unanswered: {question}")]
    IncompleteApplication { question: String },
    #[error("unsupported file type '{received}'")]
    InvalidFileType {
        received: String,
        expected: &'static str,
    },
    #[error("file of {size_bytes} bytes exceeds the {limit_bytes} byte limit")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },
}

/// Title and description pair shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub title: &'static str,
    pub description: String,
}

impl IntakeError {
    pub fn advisory(&self) -> Advisory {
        match self {
            IntakeError::MissingInformation { .. } => Advisory {
                title: "Missing Information",
                description: "Please fill in all required fields.".to_string(),
            },
            IntakeError::ResumeRequired => Advisory {
                title: "Resume Required",
                description: "Please upload your resume to apply.".to_string(),
            },
            IntakeError::IncompleteApplication { .. } => Advisory {
                title: "Incomplete Application",
                description: "Please answer all application questions.".to_string(),
            },
            IntakeError::InvalidFileType { expected, .. } => Advisory {
                title: "Invalid File Type",
                description: format!("Please upload {expected}."),
            },
            IntakeError::FileTooLarge { limit_bytes, .. } => Advisory {
                title: "File Too Large",
                description: format!(
                    "Please upload a file smaller than {}MB.",
                    limit_bytes / (1024 * 1024)
                ),
            },
        }
    }
}

use mime::Mime;
use serde::{Deserialize, Serialize};

use super::IntakeError;

pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const MSWORD: &str = "application/msword";
const WORD_OPENXML: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Metadata the client reports for a selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
enum Accepted {
    Exact(Vec<Mime>),
    TopLevel(mime::Name<'static>),
}

/// Which MIME types and sizes an upload field accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPolicy {
    accepted: Accepted,
    max_bytes: Option<u64>,
    expected: &'static str,
}

impl UploadPolicy {
    /// Resume attached to a job application: PDF or Word, up to 5 MiB.
    pub fn application_resume() -> Self {
        let accepted = [mime::APPLICATION_PDF.essence_str(), MSWORD, WORD_OPENXML]
            .iter()
            .filter_map(|raw| raw.parse::<Mime>().ok())
            .collect();
        Self {
            accepted: Accepted::Exact(accepted),
            max_bytes: Some(MAX_UPLOAD_BYTES),
            expected: "a PDF or Word document",
        }
    }

    /// Resume stored on the student profile: PDF only, up to 5 MiB.
    pub fn profile_resume() -> Self {
        Self {
            accepted: Accepted::Exact(vec![mime::APPLICATION_PDF]),
            max_bytes: Some(MAX_UPLOAD_BYTES),
            expected: "a PDF file",
        }
    }

    pub fn profile_picture() -> Self {
        Self {
            accepted: Accepted::TopLevel(mime::IMAGE),
            max_bytes: None,
            expected: "an image file",
        }
    }

    pub fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }

    fn accepts(&self, content_type: &Mime) -> bool {
        match &self.accepted {
            Accepted::Exact(types) => types
                .iter()
                .any(|allowed| allowed.essence_str() == content_type.essence_str()),
            Accepted::TopLevel(name) => content_type.type_() == *name,
        }
    }

    pub fn validate(&self, upload: &UploadDescriptor) -> Result<(), IntakeError> {
        let invalid_type = || IntakeError::InvalidFileType {
            received: upload.content_type.clone(),
            expected: self.expected,
        };

        let content_type = upload
            .content_type
            .trim()
            .parse::<Mime>()
            .map_err(|_| invalid_type())?;
        if !self.accepts(&content_type) {
            return Err(invalid_type());
        }

        if let Some(limit_bytes) = self.max_bytes {
            if upload.size_bytes > limit_bytes {
                return Err(IntakeError::FileTooLarge {
                    size_bytes: upload.size_bytes,
                    limit_bytes,
                });
            }
        }

        Ok(())
    }
}

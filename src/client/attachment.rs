//! Upload attachments and their client-side checks.

use reqwest::multipart::Part;

use crate::config::UploadPolicy;

use super::error::{ClientError, ClientResult};

/// Which size ceiling an upload falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Leave and benefit-claim supporting documents.
    Attachment,
    /// Profile photos and e-signatures.
    ProfileImage,
}

/// A file to send as one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name.
    pub file_name: String,
    /// MIME type reported for the file.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from in-memory bytes.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Checks MIME type and size against the upload policy.
    ///
    /// # Example
    ///
    /// ```
    /// use hrms_engine::client::{Attachment, UploadKind};
    /// use hrms_engine::config::PolicyConfig;
    ///
    /// let uploads = PolicyConfig::default().uploads;
    /// let scan = Attachment::new("medcert.pdf", "application/pdf", vec![0; 1024]);
    /// assert!(scan.validate(&uploads, UploadKind::Attachment).is_ok());
    ///
    /// let doc = Attachment::new("notes.docx", "application/msword", vec![0; 10]);
    /// assert!(doc.validate(&uploads, UploadKind::Attachment).is_err());
    /// ```
    pub fn validate(&self, policy: &UploadPolicy, kind: UploadKind) -> ClientResult<()> {
        let mime = self.mime_type.trim().to_ascii_lowercase();
        if !policy.allowed_mime_types.iter().any(|m| m.eq_ignore_ascii_case(&mime)) {
            return Err(ClientError::InvalidAttachment {
                file_name: self.file_name.clone(),
                message: format!(
                    "File type {} is not allowed; accepted types are {}",
                    self.mime_type,
                    policy.allowed_mime_types.join(", ")
                ),
            });
        }

        let limit = match kind {
            UploadKind::Attachment => policy.max_attachment_bytes,
            UploadKind::ProfileImage => policy.max_profile_image_bytes,
        };
        if self.bytes.len() as u64 > limit {
            return Err(ClientError::InvalidAttachment {
                file_name: self.file_name.clone(),
                message: format!("File exceeds the {} MB limit", limit / (1024 * 1024)),
            });
        }

        if kind == UploadKind::ProfileImage && mime == "application/pdf" {
            return Err(ClientError::InvalidAttachment {
                file_name: self.file_name.clone(),
                message: "Profile images must be JPEG, PNG or WebP".to_string(),
            });
        }

        Ok(())
    }

    pub(crate) fn into_part(self) -> ClientResult<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)
            .map_err(|e| ClientError::Configuration(e.to_string()))
    }
}

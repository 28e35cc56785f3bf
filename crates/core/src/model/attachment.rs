use thiserror::Error;

/// Largest accepted task attachment (5 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

const PDF_TYPES: [&str; 2] = ["application/pdf", "application/x-pdf"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttachmentError {
    #[error("Invalid file type. Please upload a PDF file.")]
    NotPdf { content_type: String },

    #[error("File size exceeds 5MB. Please upload a smaller PDF file.")]
    TooLarge { size_bytes: u64 },

    #[error("File name cannot be empty.")]
    EmptyName,
}

/// Checks a selected file before any bytes are read.
///
/// # Errors
///
/// Returns `AttachmentError::NotPdf` unless the declared type is a PDF type and
/// `AttachmentError::TooLarge` above `MAX_ATTACHMENT_BYTES`.
pub fn validate_selection(content_type: &str, size_bytes: u64) -> Result<(), AttachmentError> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !PDF_TYPES.contains(&essence.as_str()) {
        return Err(AttachmentError::NotPdf {
            content_type: content_type.to_owned(),
        });
    }
    if size_bytes > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge { size_bytes });
    }
    Ok(())
}

/// A validated PDF waiting to be uploaded with a new task.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl Attachment {
    /// # Errors
    ///
    /// Returns `AttachmentError` for an empty name, a non-PDF type or an oversize payload.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, AttachmentError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(AttachmentError::EmptyName);
        }
        let content_type = content_type.into();
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        validate_selection(&content_type, size)?;
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Best guess at a declared MIME type from a file name, for pickers that only yield paths.
#[must_use]
pub fn content_type_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

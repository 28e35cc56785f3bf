use std::path::Path;

use lms_core::model::{Attachment, AttachmentError, content_type_for_file_name, validate_selection};

/// Reads a file chosen by path for the task form.
///
/// Type and size are checked from the name and metadata before any bytes are
/// read. The outer error is I/O; the inner one is a rejected selection.
///
/// # Errors
///
/// Returns `std::io::Error` when the file cannot be inspected or read.
pub async fn read_attachment(path: &Path) -> std::io::Result<Result<Attachment, AttachmentError>> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content_type = content_type_for_file_name(&file_name);
    let metadata = tokio::fs::metadata(path).await?;
    if let Err(rejected) = validate_selection(content_type, metadata.len()) {
        return Ok(Err(rejected));
    }
    let bytes = tokio::fs::read(path).await?;
    Ok(Attachment::new(file_name, content_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lms-ui-{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn small_pdf_is_accepted() {
        let path = scratch("brief.pdf");
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();
        let attachment = read_attachment(&path).await.unwrap().unwrap();
        assert_eq!(attachment.content_type(), "application/pdf");
        assert_eq!(attachment.size_bytes(), 8);
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn oversized_and_foreign_files_are_rejected() {
        let big = scratch("big.pdf");
        let file = std::fs::File::create(&big).unwrap();
        file.set_len(6 * 1024 * 1024).unwrap();
        assert!(matches!(
            read_attachment(&big).await.unwrap(),
            Err(AttachmentError::TooLarge { .. })
        ));
        std::fs::remove_file(&big).unwrap();

        let image = scratch("photo.png");
        std::fs::write(&image, [0_u8; 4]).unwrap();
        assert!(matches!(
            read_attachment(&image).await.unwrap(),
            Err(AttachmentError::NotPdf { .. })
        ));
        std::fs::remove_file(&image).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        assert!(read_attachment(&scratch("absent.pdf")).await.is_err());
    }
}

use thiserror::Error;

use crate::model::{AttachmentError, ParseIdError, ParseKeyError, QuizError, TaskValidationErrors};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    TaskValidation(#[from] TaskValidationErrors),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error(transparent)]
    CompletionKey(#[from] ParseKeyError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}

use thiserror::Error;

use super::{FileSelection, SelectedFile, PDF_MEDIA_TYPE, TEXT_MEDIA_TYPE};
use crate::errors::ClientError;

pub(crate) const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

const REFERENCE_MEDIA_TYPES: &[&str] = &[PDF_MEDIA_TYPE, TEXT_MEDIA_TYPE];

/// First problem found in a selection. Only one is ever reported per check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum Violation {
    #[error("Please select a question file.")]
    MissingReference,
    #[error("Please select at least one student answer file.")]
    MissingStudents,
    #[error("Question file must be PDF or TXT format.")]
    ReferenceType,
    #[error("All student files must be PDF format.")]
    StudentType,
    #[error("Question file is too large. Maximum size is 50MB.")]
    ReferenceTooLarge,
    #[error("File {0} is too large. Maximum size is 50MB.")]
    StudentTooLarge(String),
}

impl From<Violation> for ClientError {
    fn from(value: Violation) -> Self {
        Self::Validation(value.to_string())
    }
}

/// A selection that passed every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValidSelection<'a> {
    pub(crate) reference: &'a SelectedFile,
    pub(crate) students: &'a [SelectedFile],
}

/// Check presence, then media types, then sizes, stopping at the first failure.
pub(crate) fn validate(selection: &FileSelection) -> Result<ValidSelection<'_>, Violation> {
    let reference = selection.reference().ok_or(Violation::MissingReference)?;
    let students = selection.students();
    if students.is_empty() {
        return Err(Violation::MissingStudents);
    }

    if !REFERENCE_MEDIA_TYPES.contains(&reference.media_type.as_str()) {
        return Err(Violation::ReferenceType);
    }

    if students.iter().any(|file| file.media_type != PDF_MEDIA_TYPE) {
        return Err(Violation::StudentType);
    }

    if reference.size > MAX_FILE_SIZE_BYTES {
        return Err(Violation::ReferenceTooLarge);
    }

    if let Some(file) = students.iter().find(|file| file.size > MAX_FILE_SIZE_BYTES) {
        return Err(Violation::StudentTooLarge(file.name.clone()));
    }

    Ok(ValidSelection { reference, students })
}

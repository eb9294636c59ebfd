pub(crate) mod drag_drop;
pub(crate) mod presenter;
pub(crate) mod validation;

use std::path::{Path, PathBuf};

pub(crate) const PDF_MEDIA_TYPE: &str = "application/pdf";
pub(crate) const TEXT_MEDIA_TYPE: &str = "text/plain";

/// The two file inputs of the evaluation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum InputSlot {
    Reference,
    Students,
}

impl InputSlot {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Students => "students",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileSource {
    Disk(PathBuf),
    #[cfg(test)]
    Memory(Vec<u8>),
}

/// One chosen file with the metadata a file picker reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectedFile {
    pub(crate) name: String,
    pub(crate) media_type: String,
    pub(crate) size: u64,
    pub(crate) source: FileSource,
}

impl SelectedFile {
    /// Reads name and size from disk and guesses the media type from the
    /// extension. Unknown extensions yield an empty media type.
    pub(crate) async fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToString::to_string)
            .unwrap_or_else(|| path.display().to_string());
        let media_type =
            mime_guess::from_path(path).first_raw().map(ToString::to_string).unwrap_or_default();

        Ok(Self { name, media_type, size: metadata.len(), source: FileSource::Disk(path.into()) })
    }

    pub(crate) async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Disk(path) => tokio::fs::read(path).await,
            #[cfg(test)]
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Current state of both inputs. Each pick or drop replaces one slot wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileSelection {
    reference: Option<SelectedFile>,
    students: Vec<SelectedFile>,
}

impl FileSelection {
    pub(crate) fn new(reference: Option<SelectedFile>, students: Vec<SelectedFile>) -> Self {
        Self { reference, students }
    }

    /// Replace the files of one input. The reference input keeps only the
    /// first file, like a single-file picker.
    pub(crate) fn assign(&mut self, slot: InputSlot, files: Vec<SelectedFile>) {
        match slot {
            InputSlot::Reference => self.reference = files.into_iter().next(),
            InputSlot::Students => self.students = files,
        }
    }

    pub(crate) fn reference(&self) -> Option<&SelectedFile> {
        self.reference.as_ref()
    }

    pub(crate) fn students(&self) -> &[SelectedFile] {
        &self.students
    }

    pub(crate) fn count(&self, slot: InputSlot) -> usize {
        match slot {
            InputSlot::Reference => usize::from(self.reference.is_some()),
            InputSlot::Students => self.students.len(),
        }
    }

    pub(crate) fn total_student_bytes(&self) -> u64 {
        self.students.iter().map(|file| file.size).sum()
    }
}

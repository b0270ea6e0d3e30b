use thiserror::Error;

#[derive(Error, Debug)]
pub enum EsxPhotosError {
    #[error("Project file not found: {path}")]
    ArchiveNotFound { path: String },

    #[error("Project file is not a readable archive: {path}")]
    ArchiveCorrupt { path: String, message: String },

    #[error("Required document missing from project file: {document}")]
    MissingRequiredData { document: String },

    #[error("Malformed document {document}")]
    MalformedDocument {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Image {image_id} referenced but not found in project file")]
    MissingImageFile { image_id: String, expected: String },

    #[error("Filesystem operation failed: {path}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl EsxPhotosError {
    pub fn filesystem<P: AsRef<std::path::Path>>(path: P, source: std::io::Error) -> Self {
        EsxPhotosError::Filesystem {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            EsxPhotosError::Config { .. } => 2,
            EsxPhotosError::ArchiveNotFound { .. } => 3,
            EsxPhotosError::ArchiveCorrupt { .. } => 4,
            EsxPhotosError::MissingRequiredData { .. } => 5,
            EsxPhotosError::MalformedDocument { .. } => 6,
            EsxPhotosError::MissingImageFile { .. } => 7,
            EsxPhotosError::Filesystem { .. } => 8,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for EsxPhotosError {
    fn user_message(&self) -> String {
        match self {
            EsxPhotosError::ArchiveNotFound { path } => {
                format!("Project file not found: {}", path)
            }
            EsxPhotosError::ArchiveCorrupt { path, message } => {
                format!("Could not read project file {}: {}", path, message)
            }
            EsxPhotosError::MissingRequiredData { document } => {
                format!("The project file does not contain {}", document)
            }
            EsxPhotosError::MalformedDocument { document, source } => {
                format!("Failed to parse {}: {}", document, source)
            }
            EsxPhotosError::MissingImageFile { image_id, expected } => {
                format!(
                    "Image {} is referenced by the project but {} is missing",
                    image_id, expected
                )
            }
            EsxPhotosError::Filesystem { path, source } => {
                format!("Filesystem error on {}: {}", path, source)
            }
            EsxPhotosError::Config { message } => {
                format!("Configuration error: {}", message)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            EsxPhotosError::ArchiveNotFound { .. } => Some(
                "Check the path to the .esx file and try again.".to_string()
            ),
            EsxPhotosError::ArchiveCorrupt { .. } => Some(
                "Make sure the file is an Ekahau project (.esx) and re-export it from Ekahau if it is damaged.".to_string()
            ),
            EsxPhotosError::MissingRequiredData { .. } => Some(
                "Only projects that contain notes can be processed. Add a note with a picture in Ekahau and save the project again.".to_string()
            ),
            EsxPhotosError::MalformedDocument { .. } => Some(
                "The project metadata could not be read. Re-save the project in Ekahau and try again.".to_string()
            ),
            EsxPhotosError::MissingImageFile { .. } => Some(
                "The project references a picture that is not stored in the file. Re-save the project in Ekahau to repair it.".to_string()
            ),
            EsxPhotosError::Filesystem { .. } => Some(
                "Ensure you have the necessary read/write permissions for the output and temporary directories.".to_string()
            ),
            EsxPhotosError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, EsxPhotosError>;

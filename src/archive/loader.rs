use crate::archive::ExpandedArchive;
use crate::config::ArchiveConfig;
use crate::documents::{AccessPointsDocument, FloorPlansDocument, NotesDocument, ProjectDocuments};
use crate::error::{EsxPhotosError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveInfo {
    pub path: PathBuf,
    pub stem: String,
    pub entry_count: usize,
    pub uncompressed_bytes: u64,
    pub has_access_points: bool,
    pub has_floor_plans: bool,
}

impl ArchiveInfo {
    pub fn display_summary(&self) -> String {
        format!(
            "Project: {}\nEntries: {}\nUncompressed: {} bytes\nAccess points: {}\nFloor plans: {}",
            self.stem,
            self.entry_count,
            self.uncompressed_bytes,
            presence(self.has_access_points),
            presence(self.has_floor_plans)
        )
    }
}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "absent"
    }
}

/// A project file that has been read and expanded to disk.
#[derive(Debug)]
pub struct LoadedArchive {
    pub info: ArchiveInfo,
    pub documents: ProjectDocuments,
    pub expanded: ExpandedArchive,
}

pub struct ArchiveLoader {
    config: ArchiveConfig,
}

impl ArchiveLoader {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedArchive> {
        let path = path.as_ref();
        let mut archive = self.open(path)?;

        let documents = self.read_documents(&mut archive, path)?;

        let stem = archive_stem(path);
        let expanded =
            ExpandedArchive::create(&stem, self.config.working_directory.as_deref())?;
        let (entry_count, uncompressed_bytes) =
            self.expand_entries(&mut archive, expanded.path(), path)?;

        let info = ArchiveInfo {
            path: path.to_path_buf(),
            stem,
            entry_count,
            uncompressed_bytes,
            has_access_points: documents.access_points.is_some(),
            has_floor_plans: documents.floor_plans.is_some(),
        };

        Ok(LoadedArchive {
            info,
            documents,
            expanded,
        })
    }

    fn open(&self, path: &Path) -> Result<ZipArchive<BufReader<File>>> {
        if !path.is_file() {
            return Err(EsxPhotosError::ArchiveNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EsxPhotosError::ArchiveNotFound {
                path: path.display().to_string(),
            },
            _ => EsxPhotosError::filesystem(path, e),
        })?;

        ZipArchive::new(BufReader::new(file)).map_err(|e| corrupt(path, e))
    }

    fn read_documents<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &Path,
    ) -> Result<ProjectDocuments> {
        let notes_name = &self.config.notes_document;
        let notes: NotesDocument = read_document(archive, notes_name, path)?.ok_or_else(|| {
            EsxPhotosError::MissingRequiredData {
                document: notes_name.clone(),
            }
        })?;

        let access_points: Option<AccessPointsDocument> =
            read_document(archive, &self.config.access_points_document, path)?;
        let floor_plans: Option<FloorPlansDocument> =
            read_document(archive, &self.config.floor_plans_document, path)?;

        Ok(ProjectDocuments::new(notes, access_points, floor_plans))
    }

    fn expand_entries<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        dest: &Path,
        path: &Path,
    ) -> Result<(usize, u64)> {
        let mut entry_count = 0;
        let mut total_bytes = 0u64;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(|e| corrupt(path, e))?;

            // Entries that would land outside the working directory are skipped.
            let relative = match entry.enclosed_name() {
                Some(relative) => relative,
                None => continue,
            };
            let output_path = dest.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&output_path)
                    .map_err(|e| EsxPhotosError::filesystem(&output_path, e))?;
                continue;
            }

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| EsxPhotosError::filesystem(parent, e))?;
            }

            let mut outfile = File::create(&output_path)
                .map_err(|e| EsxPhotosError::filesystem(&output_path, e))?;
            let written = io::copy(&mut entry, &mut outfile).map_err(|e| {
                if e.kind() == io::ErrorKind::InvalidData {
                    EsxPhotosError::ArchiveCorrupt {
                        path: path.display().to_string(),
                        message: format!("entry {} is damaged: {}", entry.name(), e),
                    }
                } else {
                    EsxPhotosError::filesystem(&output_path, e)
                }
            })?;

            entry_count += 1;
            total_bytes += written;
        }

        Ok((entry_count, total_bytes))
    }
}

fn read_document<T: DeserializeOwned, R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    path: &Path,
) -> Result<Option<T>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(corrupt(path, e)),
    };

    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|e| EsxPhotosError::ArchiveCorrupt {
            path: path.display().to_string(),
            message: format!("failed to read {}: {}", name, e),
        })?;

    serde_json::from_slice(&buffer)
        .map(Some)
        .map_err(|source| EsxPhotosError::MalformedDocument {
            document: name.to_string(),
            source,
        })
}

fn corrupt(path: &Path, error: ZipError) -> EsxPhotosError {
    EsxPhotosError::ArchiveCorrupt {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

pub fn archive_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "project".to_string())
}

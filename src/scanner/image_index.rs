use crate::error::{EsxPhotosError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub image_id: String,
    pub source_path: PathBuf,
    pub size: u64,
}

/// Images stored at the root of an expanded project, keyed by image id.
#[derive(Debug, Default)]
pub struct ImageIndex {
    prefix: String,
    images: HashMap<String, ImageFile>,
}

impl ImageIndex {
    pub fn get(&self, image_id: &str) -> Option<&ImageFile> {
        self.images.get(image_id)
    }

    pub fn resolve(&self, image_id: &str) -> Result<&ImageFile> {
        self.get(image_id)
            .ok_or_else(|| EsxPhotosError::MissingImageFile {
                image_id: image_id.to_string(),
                expected: format!("{}{}", self.prefix, image_id),
            })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.images.values().map(|i| i.size).sum()
    }

    pub fn display_summary(&self) -> String {
        format!(
            "Image index: {} files ({} bytes)",
            self.len(),
            self.total_size()
        )
    }
}

pub struct ImageScanner {
    prefix: String,
}

impl ImageScanner {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<ImageIndex> {
        let root_path = root.as_ref();
        let mut images = HashMap::new();

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root_path.to_path_buf());
                EsxPhotosError::filesystem(path, e.into())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let image_id = match entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_prefix(self.prefix.as_str()))
            {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => continue,
            };

            let size = entry
                .metadata()
                .map_err(|e| EsxPhotosError::filesystem(entry.path(), e.into()))?
                .len();

            images.insert(
                image_id.clone(),
                ImageFile {
                    image_id,
                    source_path: entry.path().to_path_buf(),
                    size,
                },
            );
        }

        Ok(ImageIndex {
            prefix: self.prefix.clone(),
            images,
        })
    }
}

use crate::error::{EsxPhotosError, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Working directory holding the expanded contents of a project file.
///
/// The directory is removed exactly once: by [`ExpandedArchive::close`] on
/// the success path, or when the value is dropped on any early return.
#[derive(Debug)]
pub struct ExpandedArchive {
    dir: TempDir,
}

impl ExpandedArchive {
    /// Creates an empty directory named after `stem` inside `working_root`,
    /// or inside the system temp directory when no root is given.
    pub fn create(stem: &str, working_root: Option<&Path>) -> Result<Self> {
        let prefix = format!("{}-", stem);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let dir = match working_root {
            Some(root) => builder
                .tempdir_in(root)
                .map_err(|e| EsxPhotosError::filesystem(root, e))?,
            None => builder
                .tempdir()
                .map_err(|e| EsxPhotosError::filesystem(std::env::temp_dir(), e))?,
        };

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| EsxPhotosError::filesystem(path, e))
    }
}

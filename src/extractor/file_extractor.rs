use crate::error::{EsxPhotosError, Result};
use crate::planner::{PlacementPlan, PlannedCopy};
use crate::scanner::{ImageFile, ImageIndex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopiedImage {
    pub image_id: String,
    pub destination: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_processed: u64,
    pub total_bytes: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub copied: Vec<CopiedImage>,
    /// Non-fatal problems, e.g. a modification time that could not be kept.
    pub warnings: Vec<String>,
}

impl ExtractionProgress {
    pub fn new(total_files: usize, total_bytes: u64) -> Self {
        Self {
            files_processed: 0,
            total_files,
            bytes_processed: 0,
            total_bytes,
            current_file: None,
            start_time: Instant::now(),
            copied: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn update_file(&mut self, image: CopiedImage) {
        self.files_processed += 1;
        self.bytes_processed += image.bytes;
        self.current_file = Some(image.destination.display().to_string());
        self.copied.push(image);
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        if self.files_processed == 0 {
            return Duration::from_secs(0);
        }

        let elapsed = self.elapsed();
        let rate = self.files_processed as f64 / elapsed.as_secs_f64();
        let remaining_files = self.total_files.saturating_sub(self.files_processed);

        if rate > 0.0 {
            Duration::from_secs_f64(remaining_files as f64 / rate)
        } else {
            Duration::from_secs(0)
        }
    }
}

/// A planned copy whose source file has been located.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCopy<'a> {
    pub planned: &'a PlannedCopy,
    pub source: &'a ImageFile,
}

pub struct ImageCopier {
    buffer_size: usize,
    preserve_mtime: bool,
}

impl ImageCopier {
    pub fn new() -> Self {
        Self {
            buffer_size: 64 * 1024,
            preserve_mtime: true,
        }
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(4096);
        self
    }

    pub fn with_preserve_mtime(mut self, preserve: bool) -> Self {
        self.preserve_mtime = preserve;
        self
    }

    /// Looks up every source image before anything is written, so a missing
    /// image fails the run with no output produced.
    pub fn resolve<'a>(
        &self,
        plan: &'a PlacementPlan,
        index: &'a ImageIndex,
    ) -> Result<Vec<ResolvedCopy<'a>>> {
        plan.copies
            .iter()
            .map(|planned| {
                index.resolve(&planned.image_id).map(|source| ResolvedCopy { planned, source })
            })
            .collect()
    }

    pub fn execute(
        &self,
        plan: &PlacementPlan,
        index: &ImageIndex,
        output_root: &Path,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionProgress> {
        let resolved = self.resolve(plan, index)?;

        let total_bytes = resolved.iter().map(|r| r.source.size).sum();
        let mut progress = ExtractionProgress::new(resolved.len(), total_bytes);

        ensure_dir(output_root)?;
        for dir in &plan.directories {
            ensure_dir(&output_root.join(dir))?;
        }

        for copy in resolved {
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let dest = output_root.join(&copy.planned.destination);
            if let Some(parent) = dest.parent() {
                ensure_dir(parent)?;
            }

            let bytes = self.copy_file_with_buffer(&copy.source.source_path, &dest)?;
            if self.preserve_mtime {
                if let Err(e) = copy_mtime(&copy.source.source_path, &dest) {
                    progress.warnings.push(format!(
                        "Could not keep the modification time of {}: {}",
                        dest.display(),
                        e
                    ));
                }
            }
            progress.update_file(CopiedImage {
                image_id: copy.planned.image_id.clone(),
                destination: copy.planned.destination.clone(),
                bytes,
            });
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        Ok(progress)
    }

    /// Copies `source` over `dest`, replacing any existing file.
    fn copy_file_with_buffer(&self, source: &Path, dest: &Path) -> Result<u64> {
        let source_file =
            fs::File::open(source).map_err(|e| EsxPhotosError::filesystem(source, e))?;
        let dest_file = fs::File::create(dest).map_err(|e| EsxPhotosError::filesystem(dest, e))?;

        let mut reader = BufReader::with_capacity(self.buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(self.buffer_size, dest_file);

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; 8192];

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| EsxPhotosError::filesystem(source, e))?;

            if bytes_read == 0 {
                break;
            }

            writer
                .write_all(&buffer[..bytes_read])
                .map_err(|e| EsxPhotosError::filesystem(dest, e))?;

            total_bytes += bytes_read as u64;
        }

        writer.flush().map_err(|e| EsxPhotosError::filesystem(dest, e))?;

        Ok(total_bytes)
    }
}

impl Default for ImageCopier {
    fn default() -> Self {
        Self::new()
    }
}

fn copy_mtime(source: &Path, dest: &Path) -> std::io::Result<()> {
    let modified = fs::metadata(source)?.modified()?;
    filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(modified))
}

/// Creates `path` and any missing parents; an existing directory is fine.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| EsxPhotosError::filesystem(path, e))?;
    }
    Ok(())
}

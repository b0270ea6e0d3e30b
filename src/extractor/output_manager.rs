use crate::archive::ArchiveInfo;
use crate::error::{EsxPhotosError, Result};
use crate::extractor::file_extractor::{ensure_dir, CopiedImage, ExtractionProgress};
use crate::planner::PlacementStrategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const REPORT_FILE_NAME: &str = "extraction_report.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub archive: ArchiveInfo,
    pub strategy: PlacementStrategy,
    pub output_directory: PathBuf,
    pub summary: ExtractionSummary,
    pub images: Vec<CopiedImage>,
    pub extraction_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub images_copied: usize,
    pub bytes_copied: u64,
    pub directories: usize,
    pub copy_duration: Duration,
}

impl ExtractionReport {
    pub fn display_summary(&self) -> String {
        format!(
            "Project: {}\nStrategy: {}\nImages copied: {}\nOutput: {}",
            self.archive.stem,
            self.strategy.name(),
            self.summary.images_copied,
            self.output_directory.display()
        )
    }
}

/// Owns the output directory that renamed pictures are written to.
pub struct OutputManager {
    output_directory: PathBuf,
    write_report: bool,
}

impl OutputManager {
    pub fn new(output_directory: PathBuf) -> Self {
        Self {
            output_directory,
            write_report: false,
        }
    }

    pub fn with_write_report(mut self, write_report: bool) -> Self {
        self.write_report = write_report;
        self
    }

    /// Creates the output directory. Existing content is kept; pictures with
    /// the same name are overwritten by the copy stage.
    pub fn initialize(&self) -> Result<()> {
        if self.output_directory.exists() && !self.output_directory.is_dir() {
            return Err(EsxPhotosError::filesystem(
                &self.output_directory,
                std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "output path exists and is not a directory",
                ),
            ));
        }

        ensure_dir(&self.output_directory)
    }

    pub fn get_output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn create_extraction_report(
        &self,
        archive: &ArchiveInfo,
        strategy: PlacementStrategy,
        directories: usize,
        progress: &ExtractionProgress,
    ) -> Result<ExtractionReport> {
        let report = ExtractionReport {
            archive: archive.clone(),
            strategy,
            output_directory: self.output_directory.clone(),
            summary: ExtractionSummary {
                images_copied: progress.files_processed,
                bytes_copied: progress.bytes_processed,
                directories,
                copy_duration: progress.elapsed(),
            },
            images: progress.copied.clone(),
            extraction_time: Utc::now(),
        };

        if self.write_report {
            self.save_report_json(&report)?;
        }

        Ok(report)
    }

    fn save_report_json(&self, report: &ExtractionReport) -> Result<()> {
        let report_path = self.output_directory.join(REPORT_FILE_NAME);
        let json_content =
            serde_json::to_string_pretty(report).map_err(|e| EsxPhotosError::Config {
                message: format!("Failed to serialize report to JSON: {}", e),
            })?;

        fs::write(&report_path, json_content)
            .map_err(|e| EsxPhotosError::filesystem(&report_path, e))?;

        Ok(())
    }
}

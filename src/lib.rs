pub mod archive;
pub mod cli;
pub mod config;
pub mod documents;
pub mod error;
pub mod extractor;
pub mod planner;
pub mod scanner;
pub mod ui;

#[cfg(test)]
mod test_utils;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{ArchiveConfig, CliOverrides, Config, OutputConfig};
pub use error::{EsxPhotosError, Result, UserFriendlyError};

// Core functionality re-exports
pub use archive::{ArchiveInfo, ArchiveLoader, ExpandedArchive, LoadedArchive};
pub use documents::ProjectDocuments;
pub use extractor::{ExtractionProgress, ExtractionReport, ImageCopier, OutputManager};
pub use planner::{slugify, NamingOptions, PlacementPlan, PlacementStrategy};
pub use scanner::{ImageIndex, ImageScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface: turns one project file into a directory of named pictures.
pub struct EsxPhotos {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl EsxPhotos {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        // Progress bars would interleave with JSON records.
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create an instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Extracts every note picture from the project at `archive_path`.
    ///
    /// The expanded copy of the project is removed before this returns,
    /// whether the run succeeds or fails.
    pub fn extract_images<P: AsRef<Path>>(&self, archive_path: P) -> Result<ExtractionReport> {
        self.output_formatter
            .start_operation("Extracting AP picture notes...");

        let LoadedArchive {
            info,
            documents,
            expanded,
        } = self.load_archive(archive_path.as_ref())?;

        let index = self.scan_images(expanded.path())?;
        let plan = self.plan_placement(&documents);

        let output_manager = self.setup_output_directory()?;
        let progress = self.copy_images(&plan, &index, output_manager.get_output_directory())?;

        expanded.close()?;

        let report = output_manager.create_extraction_report(
            &info,
            plan.strategy,
            plan.directories.len(),
            &progress,
        )?;

        self.output_formatter.print_extraction_summary(&progress);

        Ok(report)
    }

    /// Loads and plans without writing anything to the output directory.
    /// Every referenced image is still checked.
    pub fn plan_only<P: AsRef<Path>>(&self, archive_path: P) -> Result<PlacementPlan> {
        self.output_formatter
            .start_operation("Planning AP picture extraction (dry run)");

        let loaded = self.load_archive(archive_path.as_ref())?;
        let index = self.scan_images(loaded.expanded.path())?;
        let plan = self.plan_placement(&loaded.documents);

        ImageCopier::new().resolve(&plan, &index)?;
        loaded.expanded.close()?;

        Ok(plan)
    }

    fn load_archive(&self, path: &Path) -> Result<LoadedArchive> {
        let spinner = self
            .progress_manager
            .create_spinner(&format!("Reading {}", path.display()));

        let result = ArchiveLoader::new(&self.config.archive).load(path);
        spinner.finish_and_clear();

        let loaded = result?;
        self.output_formatter.debug(&loaded.info.display_summary());
        self.output_formatter.debug(&format!(
            "Expanded into {}",
            loaded.expanded.path().display()
        ));

        Ok(loaded)
    }

    fn scan_images(&self, root: &Path) -> Result<ImageIndex> {
        let index = ImageScanner::new(self.config.archive.image_prefix.as_str()).scan_directory(root)?;
        self.output_formatter.debug(&index.display_summary());
        Ok(index)
    }

    fn plan_placement(&self, documents: &ProjectDocuments) -> PlacementPlan {
        let naming = NamingOptions {
            allow_unicode: self.config.output.allow_unicode,
            extension: self.config.output.image_extension.clone(),
        };

        self.output_formatter.debug(&format!(
            "Notes reference {} picture(s)",
            documents.image_reference_count()
        ));

        let strategy = PlacementStrategy::select(documents);
        self.output_formatter.info(strategy.describe());

        let plan = strategy.plan(documents, &naming);
        self.output_formatter.info(&format!(
            "Found {} picture(s) to copy",
            plan.len()
        ));

        if plan.is_empty() {
            self.output_formatter
                .warning("No note in this project has pictures attached");
        }

        plan
    }

    fn setup_output_directory(&self) -> Result<OutputManager> {
        let manager = OutputManager::new(self.config.output_directory())
            .with_write_report(self.config.output.write_report);

        manager.initialize()?;

        self.output_formatter.info(&format!(
            "Output directory: {}",
            manager.get_output_directory().display()
        ));

        Ok(manager)
    }

    fn copy_images(
        &self,
        plan: &PlacementPlan,
        index: &ImageIndex,
        output_dir: &Path,
    ) -> Result<ExtractionProgress> {
        let file_progress = self.progress_manager.create_file_progress(plan.len() as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &ExtractionProgress| {
                ui::progress::update_file_progress(&pb, progress);
            }
        };

        let result = ImageCopier::new().execute(plan, index, output_dir, Some(&progress_callback));

        match result {
            Ok(progress) => {
                for warning in &progress.warnings {
                    self.output_formatter.debug(warning);
                }
                ui::progress::finish_progress_with_summary(
                    &file_progress,
                    &format!("Copied {} images", progress.files_processed),
                    progress.elapsed(),
                );
                Ok(progress)
            }
            Err(e) => {
                file_progress.abandon();
                Err(e)
            }
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();
        std::fs::write(output_path, Config::create_sample_config())
            .map_err(|e| EsxPhotosError::filesystem(output_path, e))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &EsxPhotosError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

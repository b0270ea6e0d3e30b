use crate::error::{EsxPhotosError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Where the project file is expanded. Defaults to the system temp dir.
    pub working_directory: Option<PathBuf>,
    pub notes_document: String,
    pub access_points_document: String,
    pub floor_plans_document: String,
    pub image_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Resolved against the current directory at run time.
    pub base_directory: PathBuf,
    pub directory_name: String,
    pub image_extension: String,
    pub allow_unicode: bool,
    pub write_report: bool,
    /// Exact output path. Takes precedence over `base_directory`/`directory_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive: ArchiveConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            working_directory: None,
            notes_document: "notes.json".to_string(),
            access_points_document: "access_points.json".to_string(),
            floor_plans_document: "floor_plans.json".to_string(),
            image_prefix: "image-".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
            directory_name: "AP-Images".to_string(),
            image_extension: "png".to_string(),
            allow_unicode: false,
            write_report: false,
            directory: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(EsxPhotosError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| EsxPhotosError::Config {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| EsxPhotosError::Config {
                message: format!("Failed to parse config file {}: {}", path.display(), e),
            })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["esx-photos.toml", ".esx-photos.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = Some(output_dir.clone());
        }

        if let Some(ref extension) = cli_args.image_extension {
            self.output.image_extension = extension.trim_start_matches('.').to_string();
        }

        if let Some(allow_unicode) = cli_args.allow_unicode {
            self.output.allow_unicode = allow_unicode;
        }

        if let Some(write_report) = cli_args.write_report {
            self.output.write_report = write_report;
        }

        if let Some(ref working_dir) = cli_args.working_directory {
            self.archive.working_directory = Some(working_dir.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.directory.is_none() && self.output.directory_name.trim().is_empty() {
            return Err(EsxPhotosError::Config {
                message: "Output directory name cannot be empty".to_string(),
            });
        }

        let extension = &self.output.image_extension;
        if extension.is_empty()
            || !extension.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(EsxPhotosError::Config {
                message: format!("Invalid image extension: {:?}", extension),
            });
        }

        for (label, name) in [
            ("notes", &self.archive.notes_document),
            ("access points", &self.archive.access_points_document),
            ("floor plans", &self.archive.floor_plans_document),
        ] {
            if name.trim().is_empty() {
                return Err(EsxPhotosError::Config {
                    message: format!("The {} document name cannot be empty", label),
                });
            }
        }

        if let Some(ref working_dir) = self.archive.working_directory {
            if !working_dir.is_dir() {
                return Err(EsxPhotosError::Config {
                    message: format!(
                        "Working directory does not exist: {}",
                        working_dir.display()
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn output_directory(&self) -> PathBuf {
        match self.output.directory {
            Some(ref directory) => directory.clone(),
            None => self.output.base_directory.join(&self.output.directory_name),
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub image_extension: Option<String>,
    pub allow_unicode: Option<bool>,
    pub write_report: Option<bool>,
    pub working_directory: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_image_extension(mut self, extension: Option<String>) -> Self {
        self.image_extension = extension;
        self
    }

    pub fn with_allow_unicode(mut self, allow_unicode: Option<bool>) -> Self {
        self.allow_unicode = allow_unicode;
        self
    }

    pub fn with_write_report(mut self, write_report: Option<bool>) -> Self {
        self.write_report = write_report;
        self
    }

    pub fn with_working_directory(mut self, working_dir: Option<PathBuf>) -> Self {
        self.working_directory = working_dir;
        self
    }
}

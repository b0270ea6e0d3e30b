pub mod file_extractor;
pub mod output_manager;

pub use file_extractor::{ensure_dir, CopiedImage, ExtractionProgress, ImageCopier, ResolvedCopy};
pub use output_manager::{ExtractionReport, ExtractionSummary, OutputManager, REPORT_FILE_NAME};

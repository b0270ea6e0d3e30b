pub mod expanded;
pub mod loader;

pub use expanded::ExpandedArchive;
pub use loader::{ArchiveInfo, ArchiveLoader, LoadedArchive};

pub mod image_index;

pub use image_index::{ImageFile, ImageIndex, ImageScanner};

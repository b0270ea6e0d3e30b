pub mod sanitize;
pub mod strategy;

pub use sanitize::slugify;
pub use strategy::{
    numbered_file_names, ImageOrigin, NamingOptions, PlacementPlan, PlacementStrategy, PlannedCopy,
};

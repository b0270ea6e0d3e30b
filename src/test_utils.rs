//! Shared fixtures: small `.esx` projects written to disk at test time.
//!
//! Compiled into the unit tests as `crate::test_utils` and into the
//! integration tests through `tests/common`.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};

pub const CLOSET_NOTES: &str =
    r#"{"notes": [{"id": "n1", "text": "Closet A", "imageIds": ["i1", "i2"]}]}"#;

pub const AP_100: &str = r#"{
    "accessPoints": [
        {"id": "ap1", "name": "AP 100", "location": {"floorPlanId": "f1"}, "noteIds": ["n1"]}
    ]
}"#;

pub const TWO_FLOORS_NOTES: &str = r#"{"notes": [
    {"id": "n1", "text": "Closet A", "imageIds": ["i1", "i2"]},
    {"id": "n2", "text": "Lobby", "imageIds": ["i3"]}
]}"#;

pub const TWO_FLOORS_APS: &str = r#"{"accessPoints": [
    {"id": "ap1", "name": "AP 100", "location": {"floorPlanId": "f1"}, "noteIds": ["n1"]},
    {"id": "ap2", "name": "AP 200", "location": {"floorPlanId": "f2"}, "noteIds": ["n2"]}
]}"#;

pub const TWO_FLOORS: &str = r#"{"floorPlans": [
    {"id": "f1", "name": "Level 1", "imageId": "bg1"},
    {"id": "f2", "name": "Level 2"}
]}"#;

/// Builds a project archive entry by entry.
pub struct ProjectBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.entries.push((name.to_string(), data.as_ref().to_vec()));
        self
    }

    /// Adds `image-<id>` entries whose content is the id itself.
    pub fn images(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self.entries
                .push((format!("image-{}", id), format!("pixels of {}", id).into_bytes()));
        }
        self
    }

    pub fn write(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default();

        for (entry, data) in &self.entries {
            zip.start_file(entry.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap();
        path
    }
}

pub fn image_content(id: &str) -> Vec<u8> {
    format!("pixels of {}", id).into_bytes()
}

pub fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}

use crate::documents::{AccessPoint, ProjectDocuments};
use crate::planner::sanitize::slugify;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// One subdirectory per floor holding its background and its access points' pictures.
    FloorAndAccessPoint,
    /// Access point pictures in the output root.
    AccessPointOnly,
    /// Floor backgrounds (when known) and every note picture, named by note text.
    FloorOrNoteOnly,
}

#[derive(Debug, Clone)]
pub struct NamingOptions {
    pub allow_unicode: bool,
    pub extension: String,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            allow_unicode: false,
            extension: "png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageOrigin {
    FloorPlan { floor_plan_id: String },
    AccessPoint { access_point_id: String, note_id: String },
    Note { note_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCopy {
    pub image_id: String,
    /// Relative to the output directory.
    pub destination: PathBuf,
    pub origin: ImageOrigin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementPlan {
    pub strategy: PlacementStrategy,
    /// Created even when nothing is copied into them.
    pub directories: Vec<PathBuf>,
    pub copies: Vec<PlannedCopy>,
}

impl PlacementPlan {
    fn new(strategy: PlacementStrategy) -> Self {
        Self {
            strategy,
            directories: Vec::new(),
            copies: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.copies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    fn push(&mut self, image_id: &str, destination: PathBuf, origin: ImageOrigin) {
        self.copies.push(PlannedCopy {
            image_id: image_id.to_string(),
            destination,
            origin,
        });
    }

    /// Adds `images` under `dir` named `<slug>.<ext>`, or `<slug>-<n>.<ext>`
    /// numbered from 1 when there is more than one.
    fn push_named<F>(&mut self, dir: &Path, slug: &str, images: &[String], ext: &str, origin: F)
    where
        F: Fn() -> ImageOrigin,
    {
        for (name, image_id) in numbered_file_names(slug, images.len(), ext)
            .into_iter()
            .zip(images)
        {
            self.push(image_id, dir.join(name), origin());
        }
    }
}

pub fn numbered_file_names(slug: &str, count: usize, ext: &str) -> Vec<String> {
    if count > 1 {
        (1..=count)
            .map(|n| format!("{}-{}.{}", slug, n, ext))
            .collect()
    } else {
        (0..count).map(|_| format!("{}.{}", slug, ext)).collect()
    }
}

impl PlacementStrategy {
    pub fn select(documents: &ProjectDocuments) -> Self {
        match (
            documents.access_points.is_some(),
            documents.floor_plans.is_some(),
        ) {
            (true, true) => PlacementStrategy::FloorAndAccessPoint,
            (true, false) => PlacementStrategy::AccessPointOnly,
            _ => PlacementStrategy::FloorOrNoteOnly,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlacementStrategy::FloorAndAccessPoint => "floor-and-access-point",
            PlacementStrategy::AccessPointOnly => "access-point-only",
            PlacementStrategy::FloorOrNoteOnly => "floor-or-note-only",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            PlacementStrategy::FloorAndAccessPoint => {
                "Pictures grouped per floor and named after access points"
            }
            PlacementStrategy::AccessPointOnly => "Pictures named after access points",
            PlacementStrategy::FloorOrNoteOnly => "Pictures named after note text",
        }
    }

    pub fn plan(&self, documents: &ProjectDocuments, naming: &NamingOptions) -> PlacementPlan {
        let mut plan = PlacementPlan::new(*self);

        match self {
            PlacementStrategy::FloorAndAccessPoint => {
                plan_per_floor(&mut plan, documents, naming)
            }
            PlacementStrategy::AccessPointOnly => plan_access_points(&mut plan, documents, naming),
            PlacementStrategy::FloorOrNoteOnly => plan_floors_and_notes(&mut plan, documents, naming),
        }

        plan
    }
}

fn plan_per_floor(plan: &mut PlacementPlan, documents: &ProjectDocuments, naming: &NamingOptions) {
    let floor_plans = documents.floor_plans.as_ref().map(|d| d.floor_plans.as_slice()).unwrap_or(&[]);
    let access_points = access_points_of(documents);

    for floor in floor_plans {
        let floor_slug = slugify(&floor.name, naming.allow_unicode);
        let floor_dir = PathBuf::from(&floor_slug);
        plan.directories.push(floor_dir.clone());

        if let Some(image_id) = floor.background_image() {
            plan.push(
                image_id,
                floor_dir.join(format!("{}.{}", floor_slug, naming.extension)),
                ImageOrigin::FloorPlan {
                    floor_plan_id: floor.id.clone(),
                },
            );
        }

        for access_point in access_points
            .iter()
            .filter(|ap| ap.floor_plan_id() == Some(floor.id.as_str()))
        {
            push_access_point(plan, documents, access_point, &floor_dir, naming);
        }
    }
}

fn plan_access_points(
    plan: &mut PlacementPlan,
    documents: &ProjectDocuments,
    naming: &NamingOptions,
) {
    for access_point in access_points_of(documents) {
        push_access_point(plan, documents, access_point, Path::new(""), naming);
    }
}

fn plan_floors_and_notes(
    plan: &mut PlacementPlan,
    documents: &ProjectDocuments,
    naming: &NamingOptions,
) {
    if let Some(ref floor_plans) = documents.floor_plans {
        for floor in &floor_plans.floor_plans {
            if let Some(image_id) = floor.background_image() {
                let floor_slug = slugify(&floor.name, naming.allow_unicode);
                plan.push(
                    image_id,
                    PathBuf::from(format!("{}.{}", floor_slug, naming.extension)),
                    ImageOrigin::FloorPlan {
                        floor_plan_id: floor.id.clone(),
                    },
                );
            }
        }
    }

    for note in documents.notes.notes.iter().filter(|n| n.has_images()) {
        let note_slug = slugify(&note.text, naming.allow_unicode);
        plan.push_named(
            Path::new(""),
            &note_slug,
            &note.image_ids,
            &naming.extension,
            || ImageOrigin::Note {
                note_id: note.id.clone(),
            },
        );
    }
}

fn push_access_point(
    plan: &mut PlacementPlan,
    documents: &ProjectDocuments,
    access_point: &AccessPoint,
    dir: &Path,
    naming: &NamingOptions,
) {
    let (Some(note_id), Some(images)) = (
        access_point.primary_note_id(),
        documents.access_point_images(access_point),
    ) else {
        return;
    };

    let ap_slug = slugify(&access_point.name, naming.allow_unicode);
    plan.push_named(dir, &ap_slug, images, &naming.extension, || {
        ImageOrigin::AccessPoint {
            access_point_id: access_point.id.clone(),
            note_id: note_id.to_string(),
        }
    });
}

fn access_points_of(documents: &ProjectDocuments) -> &[AccessPoint] {
    documents
        .access_points
        .as_ref()
        .map(|d| d.access_points.as_slice())
        .unwrap_or(&[])
}

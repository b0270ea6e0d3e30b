//! Project metadata documents stored at the root of an `.esx` file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NotesDocument {
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub text: String,
    /// Order determines the numeric suffix of the extracted files.
    #[serde(default)]
    pub image_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AccessPointsDocument {
    #[serde(default, alias = "accessPoints")]
    pub access_points: Vec<AccessPoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub note_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub floor_plan_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FloorPlansDocument {
    #[serde(default, alias = "floorPlans")]
    pub floor_plans: Vec<FloorPlan>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_id: Option<String>,
}

impl Note {
    pub fn has_images(&self) -> bool {
        !self.image_ids.is_empty()
    }
}

impl AccessPoint {
    /// Only the first linked note carries pictures for an access point.
    pub fn primary_note_id(&self) -> Option<&str> {
        self.note_ids
            .as_ref()
            .and_then(|ids| ids.first())
            .map(String::as_str)
    }

    pub fn floor_plan_id(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.floor_plan_id.as_str())
    }
}

impl FloorPlan {
    /// Background image id; an empty id counts as no image.
    pub fn background_image(&self) -> Option<&str> {
        self.image_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

/// The three documents read from a project file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDocuments {
    pub notes: NotesDocument,
    pub access_points: Option<AccessPointsDocument>,
    pub floor_plans: Option<FloorPlansDocument>,
}

impl ProjectDocuments {
    pub fn new(
        notes: NotesDocument,
        access_points: Option<AccessPointsDocument>,
        floor_plans: Option<FloorPlansDocument>,
    ) -> Self {
        Self {
            notes,
            access_points,
            floor_plans,
        }
    }

    pub fn find_note(&self, note_id: &str) -> Option<&Note> {
        self.notes.notes.iter().find(|note| note.id == note_id)
    }

    /// Images attached to the first note of an access point, if any.
    pub fn access_point_images(&self, access_point: &AccessPoint) -> Option<&[String]> {
        let note = self.find_note(access_point.primary_note_id()?)?;
        if note.has_images() {
            Some(&note.image_ids)
        } else {
            None
        }
    }

    pub fn image_reference_count(&self) -> usize {
        self.notes.notes.iter().map(|n| n.image_ids.len()).sum()
    }
}

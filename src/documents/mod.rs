pub mod models;

pub use models::{
    AccessPoint, AccessPointsDocument, FloorPlan, FloorPlansDocument, Location, Note,
    NotesDocument, ProjectDocuments,
};

//! Whole-scene JSON snapshots.
//!
//! The document stores plain parameter values. Loading goes back through
//! [`StarParameters::new`], so a hand-edited document is clamped into range
//! the same way interactive edits are.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use starkit_core::SceneError;
use starkit_settings::ObjectStyle;

use super::{Canvas, CanvasEvent, ObjectId, StarObject};
use crate::geometry::Point;
use crate::model::StarParameters;
use crate::transform::ObjectTransform;

pub const SCENE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub selected: Option<ObjectId>,
    #[serde(default)]
    pub objects: Vec<ObjectDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDocument {
    pub id: ObjectId,
    pub origin: Point,
    pub spoke_count: u32,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub roundness: f64,
    pub transform: ObjectTransform,
    #[serde(default)]
    pub style: ObjectStyle,
}

impl ObjectDocument {
    fn from_object(object: &StarObject) -> Self {
        let params = object.parameters();
        Self {
            id: object.id(),
            origin: params.origin,
            spoke_count: params.spoke_count(),
            outer_radius: params.outer_radius(),
            inner_radius: params.inner_radius(),
            roundness: params.roundness(),
            transform: object.transform(),
            style: object.style().clone(),
        }
    }

    fn into_object(self, debounce: std::time::Duration) -> StarObject {
        let params = StarParameters::new(
            self.origin,
            self.spoke_count,
            self.outer_radius,
            self.inner_radius,
            self.roundness,
        );
        StarObject::new(self.id, params, self.style, debounce).with_transform(self.transform)
    }
}

impl Canvas {
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            version: SCENE_VERSION,
            saved_at: Utc::now(),
            width: self.width,
            height: self.height,
            selected: self.selected,
            objects: self.objects.iter().map(ObjectDocument::from_object).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    /// Replace the whole scene with the one in `json`.
    ///
    /// The current objects are dropped without per-object events; a single
    /// `Loaded` event is raised. On error the canvas is left untouched.
    pub fn load_from_json(&mut self, json: &str) -> Result<(), SceneError> {
        let document: SceneDocument = serde_json::from_str(json)?;
        self.load_document(document)
    }

    pub fn load_document(&mut self, document: SceneDocument) -> Result<(), SceneError> {
        if document.version != SCENE_VERSION {
            return Err(SceneError::UnsupportedVersion {
                found: document.version,
                expected: SCENE_VERSION,
            });
        }

        let debounce = self.debounce;
        self.objects = document
            .objects
            .into_iter()
            .map(|doc| doc.into_object(debounce))
            .collect();

        if let Some(max_id) = self.objects.iter().map(|o| o.id()).max() {
            self.next_id = self.next_id.max(max_id + 1);
        }
        self.selected = document.selected.filter(|id| self.contains(*id));

        tracing::info!("Loaded scene with {} object(s)", self.objects.len());
        self.emit(CanvasEvent::Loaded {
            objects: self.objects.len(),
        });
        self.request_render();
        Ok(())
    }
}

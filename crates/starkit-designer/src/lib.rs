//! # StarKit Designer
//!
//! Parametric rounded stars on a 2D canvas, edited through draggable
//! handles, with full undo/redo.
//!
//! ## Core Components
//!
//! - **Geometry**: small vector helpers ([`interpolate`], [`remap_clamped`], ...)
//! - **Model**: [`StarParameters`] with clamping setters and snapshots
//! - **Path generation**: [`build_path`] turns parameters into an outline
//!   plus the anchors the custom handles sit on
//! - **Handles**: the eight native resize handles and the `radius`,
//!   `depth` and `spokes` handles
//! - **Transform compensation**: keeps custom handles on the shape while it
//!   is moved or scaled
//! - **History**: undo/redo stack of reversible commands
//! - **Canvas**: ordered objects, selection, events, JSON and SVG output
//! - **Scene controller**: what a UI drives
//!
//! ## Architecture
//!
//! ```text
//! SceneController
//!   ├── Canvas (objects, selection, events)
//!   │     └── StarObject (parameters, outline, transform, commit timer)
//!   ├── HistoryManager<Canvas> (commands, cursor)
//!   └── Clock (drives the debounced commits)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use starkit_designer::{HandleKey, Point, SceneController};
//! use starkit_settings::Config;
//!
//! let mut scene = SceneController::new(Config::default());
//! let id = scene.add_shape();
//!
//! scene.drag_handle(id, HandleKey::Spokes, Point::new(0.0, 2.0)).unwrap();
//! scene.flush_pending();
//! assert_eq!(scene.canvas().get(id).unwrap().parameters().spoke_count(), 7);
//!
//! scene.undo().unwrap();
//! assert_eq!(scene.canvas().get(id).unwrap().parameters().spoke_count(), 8);
//! ```

pub mod canvas;
pub mod debounce;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod model;
pub mod path_gen;
pub mod scene;
pub mod transform;

pub use canvas::{
    Canvas, CanvasEvent, EventCategory, ObjectDocument, ObjectId, SceneDocument, StarObject,
    SCENE_VERSION,
};
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock};
pub use geometry::{clamp, interpolate, remap_clamped, scale_vector_magnitude, Point};
pub use handles::{handle_at, handle_positions, GlyphShape, HandleDrag, HandleGlyph, HandleKey};
pub use history::{Action, Command, HistoryManager, HistoryTarget};
pub use model::{StarParameters, StarSnapshot};
pub use path_gen::{build_path, HandleAnchors, PathCommand, StarOutline};
pub use scene::SceneController;
pub use transform::{ObjectEvent, ObjectTransform, TransformState};

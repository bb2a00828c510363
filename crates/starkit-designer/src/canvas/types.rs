//! Canvas type definitions: StarObject, CanvasEvent, EventCategory.

use std::time::{Duration, Instant};

use starkit_core::Categorized;
use starkit_settings::ObjectStyle;

use crate::debounce::Debouncer;
use crate::geometry::Point;
use crate::model::{StarParameters, StarSnapshot};
use crate::path_gen::{build_path, StarOutline};
use crate::transform::{ObjectEvent, ObjectTransform, TransformState};

pub type ObjectId = u64;

/// Smallest scale factor a native gesture can leave on an object.
pub const MIN_SCALE: f64 = 0.01;

/// A star placed on the canvas.
///
/// The outline is rebuilt whenever the parameters change. `committed` is
/// the parameter state the history last saw; a handle drag arms the commit
/// timer and the difference is recorded once the timer fires.
///
/// Resize handle drags work the same way on the transform: the first tick
/// of a gesture remembers the transform it started from and every tick
/// re-arms `gesture_timer`.
#[derive(Debug, Clone)]
pub struct StarObject {
    id: ObjectId,
    params: StarParameters,
    outline: StarOutline,
    transform: ObjectTransform,
    compensation: TransformState,
    style: ObjectStyle,
    committed: StarSnapshot,
    commit_timer: Debouncer,
    gesture_start: Option<ObjectTransform>,
    gesture_timer: Debouncer,
}

impl StarObject {
    /// Creates a star sitting at its own origin, unscaled.
    pub fn new(id: ObjectId, params: StarParameters, style: ObjectStyle, debounce: Duration) -> Self {
        let outline = build_path(&params);
        Self {
            id,
            transform: ObjectTransform::at(params.origin),
            compensation: TransformState::default(),
            committed: params.snapshot(),
            commit_timer: Debouncer::new(debounce),
            gesture_start: None,
            gesture_timer: Debouncer::new(debounce),
            params,
            outline,
            style,
        }
    }

    /// Replace the transform and bring the handle compensation up to date.
    pub fn with_transform(mut self, transform: ObjectTransform) -> Self {
        self.set_transform(transform);
        self.fire(ObjectEvent::Refresh);
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn parameters(&self) -> &StarParameters {
        &self.params
    }

    pub fn outline(&self) -> &StarOutline {
        &self.outline
    }

    pub fn transform(&self) -> ObjectTransform {
        self.transform
    }

    pub fn compensation(&self) -> &TransformState {
        &self.compensation
    }

    pub fn style(&self) -> &ObjectStyle {
        &self.style
    }

    pub fn committed(&self) -> StarSnapshot {
        self.committed
    }

    /// Change the parameters and rebuild the outline.
    pub fn edit(&mut self, f: impl FnOnce(&mut StarParameters)) {
        f(&mut self.params);
        self.rebuild();
    }

    /// Put the parameters back to `snapshot` and treat it as committed.
    /// A pending commit is dropped.
    pub fn restore(&mut self, snapshot: &StarSnapshot) {
        self.params.restore(snapshot);
        self.committed = self.params.snapshot();
        self.commit_timer.cancel();
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.outline = build_path(&self.params);
        tracing::debug!(
            "Rebuilt star {}: spokes={} inner={:.1} roundness={:.3}",
            self.id,
            self.params.spoke_count(),
            self.params.inner_radius(),
            self.params.roundness()
        );
    }

    /// Set position and scale without notifying the compensator.
    pub fn set_transform(&mut self, transform: ObjectTransform) {
        self.transform = ObjectTransform {
            scale_x: clamp_scale(transform.scale_x),
            scale_y: clamp_scale(transform.scale_y),
            ..transform
        };
    }

    pub fn fire(&mut self, event: ObjectEvent) {
        self.compensation
            .handle(event, self.params.origin, &self.transform);
    }

    /// Shape coordinates to canvas coordinates.
    pub fn canvas_point(&self, local: Point) -> Point {
        self.transform.apply(self.params.origin, local)
    }

    /// Canvas coordinates to shape coordinates.
    pub fn local_point(&self, canvas: Point) -> Point {
        let t = &self.transform;
        Point::new(
            self.params.origin.x + (canvas.x - t.left) / t.scale_x,
            self.params.origin.y + (canvas.y - t.top) / t.scale_y,
        )
    }

    /// `(min_x, min_y, max_x, max_y)` of the outline on the canvas.
    pub fn canvas_bounds(&self) -> (f64, f64, f64, f64) {
        let (min_x, min_y, max_x, max_y) = self.outline.bounds();
        let a = self.canvas_point(Point::new(min_x, min_y));
        let b = self.canvas_point(Point::new(max_x, max_y));
        (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn contains_point(&self, canvas: Point, tolerance: f64) -> bool {
        self.outline
            .contains_point(self.local_point(canvas), tolerance)
    }

    pub fn commit_pending(&self) -> bool {
        self.commit_timer.is_pending()
    }

    pub(crate) fn arm_commit(&mut self, now: Instant) {
        self.commit_timer.arm(now);
    }

    /// If the commit timer has fired, return `(committed, current)` and make
    /// the current state the committed one.
    pub(crate) fn take_due_commit(&mut self, now: Instant) -> Option<(StarSnapshot, StarSnapshot)> {
        if self.commit_timer.take_due(now) {
            Some(self.advance_committed())
        } else {
            None
        }
    }

    /// Like [`take_due_commit`](Self::take_due_commit) without waiting for
    /// the deadline.
    pub(crate) fn take_pending_commit(&mut self) -> Option<(StarSnapshot, StarSnapshot)> {
        if self.commit_timer.is_pending() {
            self.commit_timer.cancel();
            Some(self.advance_committed())
        } else {
            None
        }
    }

    fn advance_committed(&mut self) -> (StarSnapshot, StarSnapshot) {
        let after = self.params.snapshot();
        let before = std::mem::replace(&mut self.committed, after);
        (before, after)
    }

    /// True while a resize gesture waits to be finished.
    pub fn gesture_pending(&self) -> bool {
        self.gesture_start.is_some()
    }

    /// Start a resize gesture unless one is running, and re-arm its timer.
    pub(crate) fn begin_gesture(&mut self, now: Instant) {
        if self.gesture_start.is_none() {
            self.gesture_start = Some(self.transform);
        }
        self.gesture_timer.arm(now);
    }

    /// Forget a running gesture without reporting it.
    pub(crate) fn cancel_gesture(&mut self) {
        self.gesture_start = None;
        self.gesture_timer.cancel();
    }

    /// If the gesture timer has fired, end the gesture and return
    /// `(start, current)` transforms.
    pub(crate) fn take_due_gesture(&mut self, now: Instant) -> Option<(ObjectTransform, ObjectTransform)> {
        if self.gesture_timer.take_due(now) {
            self.finish_gesture()
        } else {
            None
        }
    }

    /// End a running gesture now.
    pub(crate) fn take_pending_gesture(&mut self) -> Option<(ObjectTransform, ObjectTransform)> {
        self.gesture_timer.cancel();
        self.finish_gesture()
    }

    fn finish_gesture(&mut self) -> Option<(ObjectTransform, ObjectTransform)> {
        self.gesture_start.take().map(|start| (start, self.transform))
    }
}

fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.abs().max(MIN_SCALE)
    } else {
        1.0
    }
}

/// Notifications raised by the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ObjectAdded {
        id: ObjectId,
    },
    ObjectRemoved {
        id: ObjectId,
    },
    /// A native move or scale gesture finished. Resize drags report once,
    /// from the transform the drag started at.
    ObjectModified {
        id: ObjectId,
        before: ObjectTransform,
        after: ObjectTransform,
    },
    Moving {
        id: ObjectId,
    },
    Scaling {
        id: ObjectId,
    },
    Refresh {
        id: ObjectId,
    },
    SelectionChanged {
        id: Option<ObjectId>,
    },
    Cleared,
    Loaded {
        objects: usize,
    },
    RenderRequested,
    /// Something the user should be told about, e.g. "Nothing to undo!".
    Notice {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Object,
    Transform,
    Selection,
    Scene,
    Render,
    Notice,
}

impl Categorized for CanvasEvent {
    type Category = EventCategory;

    fn category(&self) -> EventCategory {
        match self {
            CanvasEvent::ObjectAdded { .. }
            | CanvasEvent::ObjectRemoved { .. }
            | CanvasEvent::ObjectModified { .. } => EventCategory::Object,
            CanvasEvent::Moving { .. } | CanvasEvent::Scaling { .. } | CanvasEvent::Refresh { .. } => {
                EventCategory::Transform
            }
            CanvasEvent::SelectionChanged { .. } => EventCategory::Selection,
            CanvasEvent::Cleared | CanvasEvent::Loaded { .. } => EventCategory::Scene,
            CanvasEvent::RenderRequested => EventCategory::Render,
            CanvasEvent::Notice { .. } => EventCategory::Notice,
        }
    }
}

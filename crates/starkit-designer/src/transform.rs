//! Transform compensation for the custom handles.
//!
//! The star geometry is built in local coordinates around its origin. When
//! the object is moved or scaled with the native controls, the handle
//! anchors still come from that local outline, so their on-canvas position
//! has to be corrected by the object's current translation and scale.

use serde::{Deserialize, Serialize};

use crate::geometry::{scale_vector_magnitude, Point};

/// Position and scale of an object on the canvas.
///
/// `left`/`top` is where the shape origin sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ObjectTransform {
    pub fn at(position: Point) -> Self {
        Self {
            left: position.x,
            top: position.y,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn scale(&self) -> Point {
        Point::new(self.scale_x, self.scale_y)
    }

    /// Map a point in shape coordinates onto the canvas.
    pub fn apply(&self, origin: Point, local: Point) -> Point {
        let offset = local - origin;
        Point::new(
            self.left + offset.x * self.scale_x,
            self.top + offset.y * self.scale_y,
        )
    }
}

/// Notifications an object handles synchronously while a native gesture runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectEvent {
    Moving,
    Scaling,
    Refresh,
}

/// Offsets applied to handle anchors. Never serialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub translation_offset: Point,
    pub scale_offset: Point,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            translation_offset: Point::ZERO,
            scale_offset: Point::new(1.0, 1.0),
        }
    }
}

impl TransformState {
    pub fn on_moving(&mut self, origin: Point, transform: &ObjectTransform) {
        self.translation_offset = origin - transform.position();
    }

    pub fn on_scaling(&mut self, transform: &ObjectTransform) {
        self.scale_offset = transform.scale();
    }

    /// Recompute both offsets, e.g. after undo put back an older transform.
    pub fn refresh(&mut self, origin: Point, transform: &ObjectTransform) {
        self.on_moving(origin, transform);
        self.on_scaling(transform);
    }

    pub fn handle(&mut self, event: ObjectEvent, origin: Point, transform: &ObjectTransform) {
        match event {
            ObjectEvent::Moving => self.on_moving(origin, transform),
            ObjectEvent::Scaling => self.on_scaling(transform),
            ObjectEvent::Refresh => self.refresh(origin, transform),
        }
    }

    /// On-canvas position of a handle anchored at `anchor` (shape coordinates).
    pub fn compensate(&self, origin: Point, anchor: Point) -> Point {
        origin - self.translation_offset + scale_vector_magnitude(anchor - origin, self.scale_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untransformed_anchor_is_unchanged() {
        let state = TransformState::default();
        let origin = Point::new(100.0, 100.0);
        let anchor = Point::new(100.0, -20.0);
        assert_eq!(state.compensate(origin, anchor), anchor);
    }

    #[test]
    fn test_compensation_follows_object() {
        let origin = Point::new(100.0, 100.0);
        let anchor = Point::new(130.0, 60.0);

        let mut transform = ObjectTransform::at(origin);
        transform.left = 150.0;
        transform.top = 80.0;
        transform.scale_x = 2.0;
        transform.scale_y = 0.5;

        let mut state = TransformState::default();
        state.on_moving(origin, &transform);
        assert_eq!(state.translation_offset, Point::new(-50.0, 20.0));

        state.on_scaling(&transform);
        assert_eq!(state.scale_offset, Point::new(2.0, 0.5));

        // Handles land where the object maps the anchor.
        let placed = state.compensate(origin, anchor);
        let expected = transform.apply(origin, anchor);
        assert!(placed.distance_to(&expected) < 1e-9);
    }

    #[test]
    fn test_refresh_recomputes_both_offsets() {
        let origin = Point::new(10.0, 10.0);
        let transform = ObjectTransform {
            left: 0.0,
            top: 0.0,
            scale_x: 3.0,
            scale_y: 3.0,
        };

        let mut state = TransformState::default();
        state.handle(ObjectEvent::Refresh, origin, &transform);
        assert_eq!(state.translation_offset, Point::new(10.0, 10.0));
        assert_eq!(state.scale_offset, Point::new(3.0, 3.0));

        state.handle(ObjectEvent::Refresh, origin, &ObjectTransform::at(origin));
        assert_eq!(state, TransformState::default());
    }
}

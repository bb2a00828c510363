//! Handle registry for star objects.
//!
//! A selected star shows the eight native resize handles around its padded
//! bounding box, followed by three custom handles that edit the geometry:
//!
//! - `radius` sits on the first outer tip and slides inwards as the corners
//!   get rounder. Dragging down rounds the corners, up sharpens them.
//! - `depth` sits on the first inner vertex. Dragging down makes the spokes
//!   deeper (smaller inner radius), up makes them shallower.
//! - `spokes` sits on the second outer tip. Dragging down removes spokes,
//!   up adds them.
//!
//! Custom handle positions are computed from the outline's anchors and
//! then corrected for the object's transform, see
//! [`TransformState::compensate`](crate::transform::TransformState::compensate).

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::canvas::StarObject;
use crate::geometry::{remap_clamped, Point};
use crate::model::ROUNDNESS_MAX;

const ROUNDNESS_STEP: f64 = 0.02;
const DEPTH_STEP: f64 = 4.0;
/// Above this many spokes any vertical movement changes the count.
const SPOKES_FINE_THRESHOLD: u32 = 8;
const NATIVE_FILL: &str = "rgb(178,204,255)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKey {
    Tl,
    Tr,
    Bl,
    Br,
    Ml,
    Mt,
    Mr,
    Mb,
    Radius,
    Depth,
    Spokes,
}

/// What a drag on a handle asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleDrag {
    /// The star's parameters were changed and its outline rebuilt.
    Reshape,
    /// A native handle wants the object scaled to these factors.
    Scale { scale_x: f64, scale_y: f64 },
}

impl HandleKey {
    /// Registry order, which is also paint order.
    pub const ALL: [HandleKey; 11] = [
        HandleKey::Tl,
        HandleKey::Tr,
        HandleKey::Bl,
        HandleKey::Br,
        HandleKey::Ml,
        HandleKey::Mt,
        HandleKey::Mr,
        HandleKey::Mb,
        HandleKey::Radius,
        HandleKey::Depth,
        HandleKey::Spokes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HandleKey::Tl => "tl",
            HandleKey::Tr => "tr",
            HandleKey::Bl => "bl",
            HandleKey::Br => "br",
            HandleKey::Ml => "ml",
            HandleKey::Mt => "mt",
            HandleKey::Mr => "mr",
            HandleKey::Mb => "mb",
            HandleKey::Radius => "radius",
            HandleKey::Depth => "depth",
            HandleKey::Spokes => "spokes",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, HandleKey::Radius | HandleKey::Depth | HandleKey::Spokes)
    }

    /// On-canvas position of this handle on `object`.
    pub fn position(&self, object: &StarObject) -> Point {
        let params = object.parameters();
        let anchors = &object.outline().anchors;
        let compensation = object.compensation();

        match self {
            HandleKey::Radius => {
                let slide = remap_clamped(
                    params.roundness(),
                    0.0,
                    ROUNDNESS_MAX,
                    0.0,
                    params.outer_radius(),
                );
                let anchor = Point::new(anchors.radius.x, anchors.radius.y + slide);
                compensation.compensate(params.origin, anchor)
            }
            HandleKey::Depth => compensation.compensate(params.origin, anchors.depth),
            HandleKey::Spokes => compensation.compensate(params.origin, anchors.spokes),
            native => {
                let padding = object.style().padding;
                let (min_x, min_y, max_x, max_y) = object.canvas_bounds();
                let (left, top) = (min_x - padding, min_y - padding);
                let (right, bottom) = (max_x + padding, max_y + padding);
                let (mid_x, mid_y) = ((left + right) / 2.0, (top + bottom) / 2.0);

                match native {
                    HandleKey::Tl => Point::new(left, top),
                    HandleKey::Tr => Point::new(right, top),
                    HandleKey::Bl => Point::new(left, bottom),
                    HandleKey::Br => Point::new(right, bottom),
                    HandleKey::Ml => Point::new(left, mid_y),
                    HandleKey::Mt => Point::new(mid_x, top),
                    HandleKey::Mr => Point::new(right, mid_y),
                    _ => Point::new(mid_x, bottom),
                }
            }
        }
    }

    /// Apply a drag of `delta` canvas units.
    ///
    /// Custom handles only look at the sign of `delta.y` (and, for spokes,
    /// its size) and edit the star directly. Native handles leave the
    /// object alone and return the scale it should get.
    pub fn drag(&self, object: &mut StarObject, delta: Point) -> HandleDrag {
        let dy = delta.y;
        match self {
            HandleKey::Radius => {
                object.edit(|params| {
                    if dy > 0.0 {
                        params.set_roundness(params.roundness() + ROUNDNESS_STEP);
                    }
                    if dy < 0.0 {
                        params.set_roundness(params.roundness() - ROUNDNESS_STEP);
                    }
                });
                HandleDrag::Reshape
            }
            HandleKey::Depth => {
                object.edit(|params| {
                    if dy > 0.0 {
                        params.set_inner_radius(params.inner_radius() - DEPTH_STEP);
                    }
                    if dy < 0.0 {
                        params.set_inner_radius(params.inner_radius() + DEPTH_STEP);
                    }
                });
                HandleDrag::Reshape
            }
            HandleKey::Spokes => {
                object.edit(|params| {
                    let fine = params.spoke_count() > SPOKES_FINE_THRESHOLD;
                    if dy > 1.0 || (fine && dy > 0.0) {
                        params.set_spoke_count(params.spoke_count() - 1);
                    }
                    if dy < -1.0 || (fine && dy < 0.0) {
                        params.set_spoke_count(params.spoke_count() + 1);
                    }
                });
                HandleDrag::Reshape
            }
            native => native_scale(*native, object, delta),
        }
    }

    /// Glyph drawn for this handle on `object`.
    pub fn glyph(&self, object: &StarObject) -> HandleGlyph {
        let style = object.style();
        let center = self.position(object);
        let size = style.corner_size;

        let shapes = match self {
            HandleKey::Radius => vec![
                GlyphShape::Circle {
                    center,
                    radius: size * 0.5,
                    fill: "#fff".to_string(),
                    stroke: Some(style.accent.clone()),
                },
                GlyphShape::Circle {
                    center,
                    radius: size * 0.25,
                    fill: style.accent.clone(),
                    stroke: None,
                },
            ],
            HandleKey::Depth | HandleKey::Spokes => vec![GlyphShape::Circle {
                center,
                radius: size * 0.5,
                fill: style.accent.clone(),
                stroke: None,
            }],
            _ => vec![GlyphShape::Square {
                center,
                size,
                fill: NATIVE_FILL.to_string(),
                stroke: style.stroke.clone(),
            }],
        };

        HandleGlyph { key: *self, shapes }
    }
}

impl fmt::Display for HandleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn native_scale(key: HandleKey, object: &StarObject, delta: Point) -> HandleDrag {
    let transform = object.transform();
    let (min_x, min_y, max_x, max_y) = object.canvas_bounds();

    // Scaling is about the origin, so each side moves relative to it.
    let factor = |extent: f64, moved: f64| {
        if extent > f64::EPSILON {
            (extent + moved) / extent
        } else {
            1.0
        }
    };
    let left = || factor(transform.left - min_x, -delta.x);
    let right = || factor(max_x - transform.left, delta.x);
    let top = || factor(transform.top - min_y, -delta.y);
    let bottom = || factor(max_y - transform.top, delta.y);

    let (fx, fy) = match key {
        HandleKey::Tl => (left(), top()),
        HandleKey::Tr => (right(), top()),
        HandleKey::Bl => (left(), bottom()),
        HandleKey::Br => (right(), bottom()),
        HandleKey::Ml => (left(), 1.0),
        HandleKey::Mr => (right(), 1.0),
        HandleKey::Mt => (1.0, top()),
        HandleKey::Mb => (1.0, bottom()),
        _ => (1.0, 1.0),
    };

    HandleDrag::Scale {
        scale_x: transform.scale_x * fx,
        scale_y: transform.scale_y * fy,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlyphShape {
    Square {
        center: Point,
        size: f64,
        fill: String,
        stroke: String,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: String,
        stroke: Option<String>,
    },
}

impl GlyphShape {
    pub fn contains(&self, point: Point) -> bool {
        match self {
            GlyphShape::Square { center, size, .. } => {
                (point.x - center.x).abs() <= size / 2.0 && (point.y - center.y).abs() <= size / 2.0
            }
            GlyphShape::Circle { center, radius, .. } => point.distance_to(center) <= *radius,
        }
    }

    fn write_svg(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = match self {
            GlyphShape::Square {
                center,
                size,
                fill,
                stroke,
            } => write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"/>"#,
                center.x - size / 2.0,
                center.y - size / 2.0,
                size,
                size,
                fill,
                stroke
            ),
            GlyphShape::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let stroke = stroke
                    .as_deref()
                    .map(|s| format!(r#" stroke="{}" stroke-width="1""#, s))
                    .unwrap_or_default();
                write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
                    center.x, center.y, radius, fill, stroke
                )
            }
        };
    }
}

/// The drawing of one handle.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleGlyph {
    pub key: HandleKey,
    pub shapes: Vec<GlyphShape>,
}

impl HandleGlyph {
    pub fn contains(&self, point: Point) -> bool {
        self.shapes.iter().any(|shape| shape.contains(point))
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for shape in &self.shapes {
            shape.write_svg(&mut out);
        }
        out
    }
}

/// Every handle of `object` with its position, in registry order.
pub fn handle_positions(object: &StarObject) -> Vec<(HandleKey, Point)> {
    HandleKey::ALL
        .into_iter()
        .map(|key| (key, key.position(object)))
        .collect()
}

/// The topmost handle under `point`. Custom handles are painted last and
/// therefore win over native ones.
pub fn handle_at(object: &StarObject, point: Point) -> Option<HandleKey> {
    HandleKey::ALL
        .into_iter()
        .rev()
        .find(|key| key.glyph(object).contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StarParameters;
    use starkit_settings::ObjectStyle;
    use std::time::Duration;

    fn object(spokes: u32) -> StarObject {
        StarObject::new(
            1,
            StarParameters::new(Point::new(200.0, 200.0), spokes, 120.0, 80.0, 0.0),
            ObjectStyle::default(),
            Duration::from_millis(500),
        )
    }

    #[test]
    fn test_names_round_trip() {
        for key in HandleKey::ALL {
            assert_eq!(HandleKey::from_name(key.name()), Some(key));
        }
        assert_eq!(HandleKey::from_name("spin"), None);
        assert_eq!(HandleKey::ALL.iter().filter(|k| k.is_custom()).count(), 3);
    }

    #[test]
    fn test_radius_handle_slides_with_roundness() {
        let mut obj = object(8);
        assert_eq!(HandleKey::Radius.position(&obj), Point::new(200.0, 80.0));

        obj.edit(|p| p.set_roundness(ROUNDNESS_MAX));
        let pos = HandleKey::Radius.position(&obj);
        assert!((pos.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_spokes_dead_zone() {
        // At 8 spokes a one unit movement is ignored.
        let mut obj = object(8);
        HandleKey::Spokes.drag(&mut obj, Point::new(0.0, 1.0));
        assert_eq!(obj.parameters().spoke_count(), 8);
        HandleKey::Spokes.drag(&mut obj, Point::new(0.0, -1.0));
        // 8 is not above the threshold, so -1 does not add a spoke either.
        assert_eq!(obj.parameters().spoke_count(), 8);

        // Above 8 any movement counts.
        let mut obj = object(9);
        HandleKey::Spokes.drag(&mut obj, Point::new(0.0, 0.5));
        assert_eq!(obj.parameters().spoke_count(), 8);
    }

    #[test]
    fn test_native_glyphs_are_squares() {
        let obj = object(8);
        let glyph = HandleKey::Tl.glyph(&obj);
        assert!(matches!(glyph.shapes.as_slice(), [GlyphShape::Square { size, .. }] if *size == 12.0));
        assert!(glyph.to_svg().starts_with("<rect"));
    }
}

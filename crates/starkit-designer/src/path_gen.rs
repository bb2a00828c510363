//! Star outline construction.
//!
//! [`build_path`] walks the star's vertices starting straight up from the
//! origin (`3π/2`, y grows downwards) and alternates outer and inner radii
//! in steps of `π / spoke_count`. With `roundness > 0` every vertex is cut
//! back along both of its edges by `roundness` of the edge length and the
//! cuts are joined by a quadratic curve that uses the vertex as control
//! point.

use std::f64::consts::PI;
use std::fmt::Write as _;

use lyon::algorithms::aabb::bounding_box;
use lyon::algorithms::hit_test::hit_test_path;
use lyon::path::{FillRule, Path};

use crate::geometry::{interpolate, Point};
use crate::model::StarParameters;

/// Sub-segments per quadratic curve when flattening.
const CURVE_STEPS: usize = 8;
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    Close,
}

/// Raw points the custom handles are positioned from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleAnchors {
    /// Straight above the origin by the outer radius.
    pub radius: Point,
    /// First inner vertex.
    pub depth: Point,
    /// Second outer vertex.
    pub spokes: Point,
}

/// A closed star outline plus the handle anchors recorded while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct StarOutline {
    pub commands: Vec<PathCommand>,
    pub anchors: HandleAnchors,
}

pub fn build_path(params: &StarParameters) -> StarOutline {
    let origin = params.origin;
    let spokes = params.spoke_count();
    let outer = params.outer_radius();
    let inner = params.inner_radius();
    let roundness = params.roundness();

    let mut rot = PI / 2.0 * 3.0;
    let step = PI / spokes as f64;

    let anchors = HandleAnchors {
        radius: Point::new(origin.x, origin.y - outer),
        depth: origin.polar(inner, rot + step),
        spokes: origin.polar(outer, rot + step * 2.0),
    };

    let mut commands = Vec::with_capacity(spokes as usize * 4 + 2);

    if roundness == 0.0 {
        for i in 0..spokes {
            let outer_vertex = origin.polar(outer, rot);
            commands.push(if i == 0 {
                PathCommand::MoveTo(outer_vertex)
            } else {
                PathCommand::LineTo(outer_vertex)
            });
            rot += step;

            commands.push(PathCommand::LineTo(origin.polar(inner, rot)));
            rot += step;
        }
        commands.push(PathCommand::Close);

        return StarOutline { commands, anchors };
    }

    for i in 0..spokes {
        let p1 = origin.polar(outer, rot);
        let p2 = origin.polar(inner, rot + step);
        let p3 = origin.polar(outer, rot + step * 2.0);

        let near = interpolate(p1, p2, roundness);
        commands.push(if i == 0 {
            PathCommand::MoveTo(near)
        } else {
            PathCommand::QuadTo { ctrl: p1, to: near }
        });
        commands.push(PathCommand::LineTo(interpolate(p1, p2, 1.0 - roundness)));
        commands.push(PathCommand::QuadTo {
            ctrl: p2,
            to: interpolate(p2, p3, roundness),
        });
        commands.push(PathCommand::LineTo(interpolate(p2, p3, 1.0 - roundness)));

        rot += step * 2.0;
    }

    // Round the first outer corner, which the loop only opened.
    let p1 = origin.polar(outer, rot);
    let p2 = origin.polar(inner, rot + step);
    commands.push(PathCommand::QuadTo {
        ctrl: p1,
        to: interpolate(p1, p2, roundness),
    });
    commands.push(PathCommand::Close);

    StarOutline { commands, anchors }
}

impl StarOutline {
    /// End points of every drawing command, in path order.
    pub fn vertices(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|cmd| match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
                PathCommand::QuadTo { to, .. } => Some(to),
                PathCommand::Close => None,
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    pub fn render(&self) -> Path {
        let mut builder = Path::builder();
        let mut open = false;

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(p.to_lyon());
                    open = true;
                }
                PathCommand::LineTo(p) => {
                    builder.line_to(p.to_lyon());
                }
                PathCommand::QuadTo { ctrl, to } => {
                    builder.quadratic_bezier_to(ctrl.to_lyon(), to.to_lyon());
                }
                PathCommand::Close => {
                    if open {
                        builder.close();
                        open = false;
                    }
                }
            }
        }
        if open {
            builder.end(false);
        }

        builder.build()
    }

    /// SVG path data (`M x y L x y Q cx cy x y Z`).
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for cmd in &self.commands {
            if !data.is_empty() {
                data.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = match *cmd {
                PathCommand::MoveTo(p) => write!(data, "M {} {}", p.x, p.y),
                PathCommand::LineTo(p) => write!(data, "L {} {}", p.x, p.y),
                PathCommand::QuadTo { ctrl, to } => {
                    write!(data, "Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y)
                }
                PathCommand::Close => write!(data, "Z"),
            };
        }
        data
    }

    /// The outline as a closed polyline. Curves are split into a fixed
    /// number of chords; the closing point is not repeated.
    pub fn flatten(&self) -> Vec<Point> {
        fn push(p: Point, points: &mut Vec<Point>) {
            if points.last().is_none_or(|last| last.distance_to(&p) > EPSILON) {
                points.push(p);
            }
        }

        let mut points: Vec<Point> = Vec::new();

        let mut current = Point::ZERO;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    push(p, &mut points);
                    current = p;
                }
                PathCommand::QuadTo { ctrl, to } => {
                    for step in 1..=CURVE_STEPS {
                        let t = step as f64 / CURVE_STEPS as f64;
                        let a = interpolate(current, ctrl, t);
                        let b = interpolate(ctrl, to, t);
                        push(interpolate(a, b, t), &mut points);
                    }
                    current = to;
                }
                PathCommand::Close => {}
            }
        }

        if points.len() > 1 && points[0].distance_to(&points[points.len() - 1]) <= EPSILON {
            points.pop();
        }
        points
    }

    /// `(min_x, min_y, max_x, max_y)` of the outline.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let path = self.render();
        let bb = bounding_box(path.iter());
        (
            bb.min.x as f64,
            bb.min.y as f64,
            bb.max.x as f64,
            bb.max.y as f64,
        )
    }

    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let path = self.render();
        hit_test_path(&p.to_lyon(), path.iter(), FillRule::NonZero, tolerance as f32)
    }

    /// True when no two non-adjacent edges of the flattened outline cross.
    pub fn is_simple(&self) -> bool {
        let points = self.flatten();
        let n = points.len();
        if n < 3 {
            return false;
        }

        let mut edges: Vec<(usize, Point, Point)> = (0..n)
            .map(|i| (i, points[i], points[(i + 1) % n]))
            .collect();
        edges.sort_by(|a, b| a.1.x.min(a.2.x).total_cmp(&b.1.x.min(b.2.x)));

        for (k, &(i, a, b)) in edges.iter().enumerate() {
            let max_x = a.x.max(b.x);
            for &(j, c, d) in &edges[k + 1..] {
                if c.x.min(d.x) > max_x {
                    break;
                }
                let gap = i.abs_diff(j);
                if gap <= 1 || gap == n - 1 {
                    continue;
                }
                if segments_cross(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

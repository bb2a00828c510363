use serde::{Deserialize, Serialize};

use crate::geometry::{clamp, Point};

pub const SPOKES_MIN: u32 = 3;
pub const SPOKES_MAX: u32 = 200;
pub const INNER_RADIUS_MIN: f64 = 3.0;
/// Corner cuts at 0.5 would meet in the middle of each edge.
pub const ROUNDNESS_MAX: f64 = 0.499;

/// Parameters of a rounded star.
///
/// Setters clamp into range instead of failing; `inner_radius` never
/// exceeds `outer_radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarParameters {
    pub origin: Point,
    spoke_count: u32,
    outer_radius: f64,
    inner_radius: f64,
    roundness: f64,
}

/// The mutable part of [`StarParameters`], captured for history diffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarSnapshot {
    pub spoke_count: u32,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub roundness: f64,
}

impl StarParameters {
    pub fn new(
        origin: Point,
        spoke_count: u32,
        outer_radius: f64,
        inner_radius: f64,
        roundness: f64,
    ) -> Self {
        let mut params = Self {
            origin,
            spoke_count: SPOKES_MIN,
            outer_radius: outer_radius.max(f64::EPSILON),
            inner_radius: INNER_RADIUS_MIN,
            roundness: 0.0,
        };
        params.set_spoke_count(spoke_count);
        params.set_inner_radius(inner_radius);
        params.set_roundness(roundness);
        params
    }

    /// 8 spokes, radii 120/80, sharp corners.
    pub fn with_origin(origin: Point) -> Self {
        Self::new(origin, 8, 120.0, 80.0, 0.0)
    }

    pub fn spoke_count(&self) -> u32 {
        self.spoke_count
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn roundness(&self) -> f64 {
        self.roundness
    }

    pub fn set_spoke_count(&mut self, spoke_count: u32) {
        self.spoke_count = spoke_count.clamp(SPOKES_MIN, SPOKES_MAX);
    }

    pub fn set_inner_radius(&mut self, inner_radius: f64) {
        self.inner_radius = clamp(inner_radius, INNER_RADIUS_MIN, self.outer_radius);
    }

    pub fn set_roundness(&mut self, roundness: f64) {
        self.roundness = clamp(roundness, 0.0, ROUNDNESS_MAX);
    }

    pub fn snapshot(&self) -> StarSnapshot {
        StarSnapshot {
            spoke_count: self.spoke_count,
            outer_radius: self.outer_radius,
            inner_radius: self.inner_radius,
            roundness: self.roundness,
        }
    }

    /// Overwrite the mutable fields from a snapshot. The origin is kept.
    pub fn restore(&mut self, snapshot: &StarSnapshot) {
        self.outer_radius = snapshot.outer_radius.max(f64::EPSILON);
        self.set_spoke_count(snapshot.spoke_count);
        self.set_inner_radius(snapshot.inner_radius);
        self.set_roundness(snapshot.roundness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let params = StarParameters::new(Point::ZERO, 1, 50.0, 90.0, 0.7);
        assert_eq!(params.spoke_count(), SPOKES_MIN);
        assert_eq!(params.inner_radius(), 50.0);
        assert_eq!(params.roundness(), ROUNDNESS_MAX);

        let params = StarParameters::new(Point::ZERO, 900, 50.0, 0.0, -1.0);
        assert_eq!(params.spoke_count(), SPOKES_MAX);
        assert_eq!(params.inner_radius(), INNER_RADIUS_MIN);
        assert_eq!(params.roundness(), 0.0);
    }

    #[test]
    fn test_snapshot_restore_keeps_origin() {
        let mut params = StarParameters::with_origin(Point::new(10.0, 20.0));
        let before = params.snapshot();

        params.set_spoke_count(12);
        params.set_roundness(0.3);
        assert_ne!(params.snapshot(), before);

        params.restore(&before);
        assert_eq!(params.snapshot(), before);
        assert_eq!(params.origin, Point::new(10.0, 20.0));
    }
}

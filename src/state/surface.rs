//! Screen geometry for the chart: wedge arcs, label anchors, the visibility rule and
//! pointer hit-testing. Angles follow the chart convention (0 at twelve o'clock before the
//! whole chart is turned a quarter turn counter-clockwise, increasing clockwise).

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::layout::{Layout, LayoutNode};
use crate::scale::Scales;

pub const LABEL_OFFSET_PX: f64 = 8.0;
/// The chart sits slightly below the vertical center.
pub const CENTER_DROP_PX: f64 = 10.0;

pub fn is_revealed(depth: usize, ceiling: usize) -> bool {
    depth <= ceiling
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0 + CENTER_DROP_PX)
    }

    pub fn radius(&self, fraction: f64) -> f64 {
        self.width.min(self.height).max(0.0) * fraction
    }

    /// Canvas pixel position to chart polar coordinates `(angle, radius)`.
    pub fn to_polar(&self, px: f64, py: f64) -> (f64, f64) {
        let (cx, cy) = self.center();
        let dx = px - cx;
        let dy = py - cy;
        let angle = (-dy).atan2(-dx).rem_euclid(TAU);
        (angle, dx.hypot(dy))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
    pub inner: f64,
    pub outer: f64,
}

impl Wedge {
    pub fn of(node: &LayoutNode, scales: &Scales) -> Self {
        let max_r = scales.radius().max(0.0);
        let angle = |v: f64| scales.x.apply(v).clamp(0.0, TAU);
        let radius = |v: f64| scales.y.apply(v).clamp(0.0, max_r);
        Self {
            start: angle(node.angle_start),
            end: angle(node.angle_end()),
            inner: radius(node.radius_start),
            outer: radius(node.radius_end()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start || self.outer <= self.inner
    }

    pub fn contains(&self, angle: f64, r: f64) -> bool {
        !self.is_empty() && angle >= self.start && angle < self.end && r >= self.inner && r < self.outer
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    /// Rotation (radians) applied before drawing along the x axis.
    pub rotation: f64,
    /// Distance from the center to the start of the text.
    pub x: f64,
}

impl LabelPlacement {
    pub fn of(node: &LayoutNode, scales: &Scales) -> Self {
        let mid = node.angle_start + node.angle_span / 2.0;
        Self {
            rotation: scales.x.apply(mid) - FRAC_PI_2,
            x: scales.y.apply(node.radius_start).max(0.0) + LABEL_OFFSET_PX,
        }
    }
}

/// Topmost revealed wedge under the pointer. Later nodes paint over earlier ones.
pub fn hit_test(layout: &Layout, scales: &Scales, ceiling: usize, angle: f64, r: f64) -> Option<usize> {
    layout
        .nodes
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, n)| is_revealed(n.depth, ceiling))
        .find(|(_, n)| Wedge::of(n, scales).contains(angle, r))
        .map(|(i, _)| i)
}

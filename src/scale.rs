// Scales mapping layout units onto screen geometry, plus the interpolation used by drill-down.
use std::f64::consts::TAU;

use crate::layout::LayoutNode;

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_pair(a: [f64; 2], b: [f64; 2], t: f64) -> [f64; 2] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t)]
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 1.0 - t;
        1.0 - 4.0 * u * u * u
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn apply(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        if d1 == d0 {
            return self.range[0];
        }
        lerp(self.range[0], self.range[1], (v - d0) / (d1 - d0))
    }
}

/// Square-root scale, sign preserving so values left of the domain stay monotonic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

fn signed_sqrt(v: f64) -> f64 {
    if v < 0.0 { -(-v).sqrt() } else { v.sqrt() }
}

impl SqrtScale {
    pub fn apply(&self, v: f64) -> f64 {
        let d0 = signed_sqrt(self.domain[0]);
        let d1 = signed_sqrt(self.domain[1]);
        if d1 == d0 {
            return self.range[0];
        }
        lerp(self.range[0], self.range[1], (signed_sqrt(v) - d0) / (d1 - d0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: SqrtScale,
}

impl Scales {
    pub fn full(radius: f64) -> Self {
        Self {
            x: LinearScale { domain: [0.0, TAU], range: [0.0, TAU] },
            y: SqrtScale { domain: [0.0, 1.0], range: [0.0, radius] },
        }
    }

    /// Target scales for a drill-down on `node`: its slice fills the circle and its band
    /// becomes the innermost ring. A non-root focus keeps a small hole of `inner` px.
    pub fn focused(node: &LayoutNode, radius: f64, inner: f64) -> Self {
        let floor = if node.radius_start > 0.0 { inner } else { 0.0 };
        Self {
            x: LinearScale { domain: [node.angle_start, node.angle_end()], range: [0.0, TAU] },
            y: SqrtScale { domain: [node.radius_start, 1.0], range: [floor, radius] },
        }
    }

    pub fn lerp(&self, to: &Scales, t: f64) -> Scales {
        Scales {
            x: LinearScale {
                domain: lerp_pair(self.x.domain, to.x.domain, t),
                range: lerp_pair(self.x.range, to.x.range, t),
            },
            y: SqrtScale {
                domain: lerp_pair(self.y.domain, to.y.domain, t),
                range: lerp_pair(self.y.range, to.y.range, t),
            },
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.y.range[1] = radius;
        self
    }

    pub fn radius(&self) -> f64 {
        self.y.range[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!((ease_cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert_eq!(ease_cubic_in_out(2.0), 1.0);
    }

    #[test]
    fn sqrt_scale_maps_area_not_radius() {
        let y = SqrtScale { domain: [0.0, 1.0], range: [0.0, 100.0] };
        assert_eq!(y.apply(0.25), 50.0);
        assert_eq!(y.apply(1.0), 100.0);
        assert!(y.apply(-0.25) < 0.0);
    }

    #[test]
    fn degenerate_domain_collapses_to_range_start() {
        let x = LinearScale { domain: [1.0, 1.0], range: [3.0, 9.0] };
        assert_eq!(x.apply(5.0), 3.0);
    }

    #[test]
    fn lerp_between_full_and_focus() {
        let full = Scales::full(200.0);
        let node = LayoutNode {
            name: "n".into(),
            size: None,
            depth: 1,
            angle_start: 1.0,
            angle_span: 2.0,
            radius_start: 0.5,
            radius_span: 0.25,
            parent: Some(0),
            children: vec![],
            path: vec![0],
        };
        let target = Scales::focused(&node, 200.0, 20.0);
        assert_eq!(target.x.domain, [1.0, 3.0]);
        assert_eq!(target.y.range, [20.0, 200.0]);
        assert_eq!(full.lerp(&target, 0.0), full);
        assert_eq!(full.lerp(&target, 1.0), target);
        let mid = full.lerp(&target, 0.5);
        assert_eq!(mid.x.domain[0], 0.5);
        assert!((mid.x.domain[1] - (TAU + 3.0) / 2.0).abs() < 1e-12);
        assert_eq!(mid.y.range, [10.0, 200.0]);
    }
}

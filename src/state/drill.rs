//! Drill-down controller.
//!
//! Selecting a node sets the visible depth ceiling from the node's own depth, retargets
//! the angular/radial scales onto the node, and animates from wherever the scales are at
//! click time. Every selection bumps a generation counter and replaces the running
//! transition wholesale, so an older transition can never write into a newer one.
//!
//! Label timeline of a transition (milliseconds since the click):
//! `[0, fade_out)` labels fade from their current alpha to 0, `[fade_out, duration)` all
//! labels stay hidden, then labels that start inside the focal window fade back in over
//! `fade_in`, placed against the finished scales.

use tracing::debug;

use crate::config::ChartConfig;
use crate::layout::Layout;
use crate::scale::{ease_cubic_in_out, Scales};
use crate::state::surface::is_revealed;

/// Deepest node whose selection still moves the ceiling.
pub const MAX_CEILING_SOURCE_DEPTH: usize = 3;

/// Ceiling produced by selecting a node at `depth`; `None` leaves the ceiling untouched.
pub fn ceiling_for(depth: usize) -> Option<usize> {
    (depth <= MAX_CEILING_SOURCE_DEPTH).then_some(depth + 1)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration: f64,
    pub fade_out: f64,
    pub fade_in: f64,
    pub focus_inner_radius: f64,
    pub serialize: bool,
}

impl From<&ChartConfig> for Timing {
    fn from(cfg: &ChartConfig) -> Self {
        Self {
            duration: cfg.transition_ms.max(0.0),
            fade_out: cfg.label_fade_out_ms.max(0.0),
            fade_in: cfg.label_fade_in_ms.max(0.0),
            focus_inner_radius: cfg.focus_inner_radius,
            serialize: cfg.serialize_transitions,
        }
    }
}

fn progress(elapsed: f64, span: f64) -> f64 {
    if span <= 0.0 { 1.0 } else { (elapsed / span).clamp(0.0, 1.0) }
}

#[derive(Clone, Debug, PartialEq)]
struct Transition {
    started_at: f64,
    from: Scales,
    to: Scales,
    timing: Timing,
    alpha_from: Vec<f64>,
}

impl Transition {
    fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    fn is_running(&self, now: f64) -> bool {
        self.elapsed(now) < self.timing.duration
    }

    fn sample(&self, now: f64) -> Scales {
        let t = progress(self.elapsed(now), self.timing.duration);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, ease_cubic_in_out(t))
    }

    fn ends_at(&self) -> f64 {
        self.started_at + self.timing.duration + self.timing.fade_in
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrillDown {
    /// `None` while the root is in focus.
    pub focus: Option<usize>,
    pub ceiling: usize,
    pub generation: u64,
    base: Scales,
    transition: Option<Transition>,
    labels_shown: Vec<bool>,
}

impl DrillDown {
    pub fn new(layout: &Layout, radius: f64) -> Self {
        let ceiling = 1;
        Self {
            focus: None,
            ceiling,
            generation: 0,
            base: Scales::full(radius),
            transition: None,
            labels_shown: layout.nodes.iter().map(|n| is_revealed(n.depth, ceiling)).collect(),
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.transition.as_ref().is_some_and(|t| t.is_running(now))
    }

    /// True until the last label fade-in has finished; the frame loop idles afterwards.
    pub fn needs_frames(&self, now: f64) -> bool {
        self.transition.as_ref().is_some_and(|t| now < t.ends_at())
    }

    pub fn is_revealed(&self, depth: usize) -> bool {
        is_revealed(depth, self.ceiling)
    }

    /// Scales wedges are drawn with at `now`.
    pub fn scales_at(&self, now: f64) -> Scales {
        match &self.transition {
            Some(t) => t.sample(now),
            None => self.base,
        }
    }

    /// Scales labels are placed with: the old ones while hidden mid-sweep, the target after.
    pub fn label_scales_at(&self, now: f64) -> Scales {
        match &self.transition {
            Some(t) if t.is_running(now) => t.from,
            Some(t) => t.to,
            None => self.base,
        }
    }

    pub fn label_alpha(&self, idx: usize, now: f64) -> f64 {
        let shown = self.labels_shown.get(idx).copied().unwrap_or(false);
        let Some(t) = &self.transition else {
            return if shown { 1.0 } else { 0.0 };
        };
        let elapsed = t.elapsed(now);
        if elapsed < t.timing.fade_out {
            let from = t.alpha_from.get(idx).copied().unwrap_or(0.0);
            return from * (1.0 - ease_cubic_in_out(progress(elapsed, t.timing.fade_out)));
        }
        if elapsed < t.timing.duration || !shown {
            return 0.0;
        }
        ease_cubic_in_out(progress(elapsed - t.timing.duration, t.timing.fade_in))
    }

    /// Drill into `idx`. Returns the new generation, or `None` when the selection is ignored
    /// (unknown node, or a transition is still running with serialization on).
    pub fn select(&mut self, layout: &Layout, idx: usize, now: f64, timing: Timing) -> Option<u64> {
        let node = layout.get(idx)?;
        if timing.serialize && self.is_animating(now) {
            debug!(idx, "drill-down ignored while a transition is running");
            return None;
        }

        let from = self.scales_at(now);
        let alpha_from: Vec<f64> = (0..layout.len()).map(|i| self.label_alpha(i, now)).collect();

        if let Some(ceiling) = ceiling_for(node.depth) {
            self.ceiling = ceiling;
        }
        self.focus = node.parent.map(|_| idx);
        self.generation += 1;

        let to = Scales::focused(node, from.radius(), timing.focus_inner_radius);
        self.labels_shown = (0..layout.len())
            .map(|i| is_revealed(layout.nodes[i].depth, self.ceiling) && layout.is_in_window(i, node))
            .collect();
        self.base = to;
        self.transition = Some(Transition {
            started_at: now,
            from,
            to,
            timing,
            alpha_from,
        });
        debug!(
            idx,
            depth = node.depth,
            ceiling = self.ceiling,
            generation = self.generation,
            "drill-down"
        );
        Some(self.generation)
    }

    pub fn resize(&mut self, radius: f64) {
        self.base = self.base.with_radius(radius);
        if let Some(t) = &mut self.transition {
            t.from = t.from.with_radius(radius);
            t.to = t.to.with_radius(radius);
        }
    }
}

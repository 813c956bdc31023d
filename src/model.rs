//! Chart data model: the input hierarchy and the reducer state that owns the
//! current layout, branch filter and view.

use serde::Deserialize;
use std::rc::Rc;
use tracing::{debug, info, warn};
use yew::Reducible;

use crate::commands::Command;
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::layout::{partition, Layout};
use crate::palette::{paint, Palette};
use crate::state::{BranchFilter, Timing, ViewState, Viewport};

/// One node of the input JSON. Leaves carry `size`; on internal nodes `size` is kept for
/// display only.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Follows child indices from this node.
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        let mut node = self;
        for &i in path {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

#[cfg(test)]
impl TreeNode {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn leaf(name: &str, size: f64) -> Self {
        Self {
            name: name.to_string(),
            size: Some(size),
            children: Vec::new(),
        }
    }

    pub fn branch(name: &str, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.to_string(),
            size: None,
            children,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartState {
    pub version: u64,
    pub config: Rc<ChartConfig>,
    /// Full tree as loaded, including click increments.
    pub source: Rc<TreeNode>,
    pub filter: BranchFilter,
    /// Source index of each root child present in `layout`.
    branch_map: Vec<usize>,
    pub layout: Rc<Layout>,
    pub fills: Rc<Vec<&'static str>>,
    pub view: ViewState,
    pub viewport: Viewport,
    pub error: Option<ChartError>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartAction {
    /// Pointer selection of a layout node at `now` (milliseconds, performance clock).
    Select { index: usize, now: f64 },
    Apply(Command),
    Resize(Viewport),
    Fail(ChartError),
    DismissError,
}

impl ChartState {
    /// Lays out the whole tree. A root whose children are not all covered by a checkbox
    /// still draws; the binding error is carried in `error` and blocks filtering.
    pub fn new(tree: TreeNode, config: Rc<ChartConfig>, viewport: Viewport) -> Result<Self, ChartError> {
        let filter = BranchFilter::bind(&tree);
        let binding = filter.check().err();
        if let Some(err) = &binding {
            warn!(%err, "branch checkboxes do not cover every child");
        }
        let branch_map = (0..tree.children.len()).collect();
        let layout = partition(&tree, config.child_order)?;
        let radius = viewport.radius(config.radius_fraction);
        let view = ViewState::new(&layout, radius, &config);
        let fills = paint(&layout, view.palette);
        info!(nodes = layout.len(), max_depth = layout.max_depth, "chart laid out");
        Ok(Self {
            version: 0,
            config,
            source: Rc::new(tree),
            filter,
            branch_map,
            layout: Rc::new(layout),
            fills: Rc::new(fills),
            view,
            viewport,
            error: binding.map(ChartError::from),
        })
    }

    pub fn radius(&self) -> f64 {
        self.viewport.radius(self.config.radius_fraction)
    }

    pub fn timing(&self) -> Timing {
        Timing::from(&*self.config)
    }

    /// Re-runs filter and layout from the source tree and starts over with a fresh view.
    /// On failure the previous chart stays up.
    fn rebuild(&mut self) -> Result<(), ChartError> {
        self.filter.check()?;
        let (filtered, branch_map) = self.filter.apply(&self.source);
        self.relayout(&filtered, branch_map)
    }

    /// Like `rebuild`, but falls back to the whole tree when the checkboxes cannot filter.
    fn restart(&mut self) -> Result<(), ChartError> {
        if self.filter.check().is_ok() {
            return self.rebuild();
        }
        let source = self.source.clone();
        self.relayout(&source, (0..source.children.len()).collect())
    }

    fn relayout(&mut self, tree: &TreeNode, branch_map: Vec<usize>) -> Result<(), ChartError> {
        let layout = partition(tree, self.config.child_order)?;
        self.view = ViewState::new(&layout, self.radius(), &self.config);
        self.fills = Rc::new(paint(&layout, self.view.palette));
        self.branch_map = branch_map;
        info!(nodes = layout.len(), max_depth = layout.max_depth, "chart rebuilt");
        self.layout = Rc::new(layout);
        Ok(())
    }

    fn repaint(&mut self, palette: Palette) {
        self.view.palette = palette;
        self.fills = Rc::new(paint(&self.layout, palette));
        debug!(palette = palette.key(), "palette switched");
    }

    /// Adds the click increment to a selected node that carries a size.
    fn bump_size(&mut self, index: usize) {
        let Some(increment) = self.config.click_weight_increment else {
            return;
        };
        let Some(node) = self.layout.get(index) else {
            return;
        };
        let Some(size) = node.size else {
            return;
        };
        let bumped = size + increment;
        let source_path: Vec<usize> = match node.path.split_first() {
            Some((&first, rest)) => match self.branch_map.get(first) {
                Some(&src) => std::iter::once(src).chain(rest.iter().copied()).collect(),
                None => return,
            },
            None => Vec::new(),
        };
        if let Some(src) = Rc::make_mut(&mut self.source).node_at_mut(&source_path) {
            src.size = Some(bumped);
        }
        if let Some(n) = Rc::make_mut(&mut self.layout).nodes.get_mut(index) {
            n.size = Some(bumped);
        }
    }

    fn apply(&mut self, command: Command) -> Result<(), ChartError> {
        match command {
            Command::UpdateVisualization => self.rebuild()?,
            Command::GoToVisualization => self.restart()?,
            Command::IncreaseTextSize => self.view.text.increase(),
            Command::DecreaseTextSize => self.view.text.decrease(),
            Command::BoldText => self.view.text.bold(),
            Command::DefaultText => self.view.text.reset(&self.config),
            Command::ColorScheme(palette) => self.repaint(palette),
            Command::ToggleBranch { checkbox, checked } => self.filter.set_checked(checkbox, checked)?,
            Command::GoToDescription => {}
        }
        Ok(())
    }
}

impl Reducible for ChartState {
    type Action = ChartAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            ChartAction::Select { index, now } => {
                let timing = new.timing();
                let layout = new.layout.clone();
                if new.view.drill.select(&layout, index, now, timing).is_none() {
                    return self;
                }
                new.bump_size(index);
            }
            ChartAction::Apply(command) => {
                if let Err(err) = new.apply(command) {
                    warn!(%err, "command failed");
                    new.error = Some(err);
                }
            }
            ChartAction::Resize(viewport) => {
                if viewport == new.viewport {
                    return self;
                }
                new.viewport = viewport;
                let radius = new.radius();
                new.view.drill.resize(radius);
            }
            ChartAction::Fail(err) => {
                warn!(%err, "chart error");
                new.error = Some(err);
            }
            ChartAction::DismissError => new.error = None,
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ControlBindingError;
    use std::f64::consts::TAU;

    fn tree() -> TreeNode {
        TreeNode::branch(
            "root",
            vec![
                TreeNode::branch("a", vec![TreeNode::leaf("a1", 10.0)]),
                TreeNode::leaf("b", 30.0),
                TreeNode::leaf("c", 20.0),
                TreeNode::leaf("d", 40.0),
            ],
        )
    }

    fn state() -> Rc<ChartState> {
        let viewport = Viewport { width: 400.0, height: 300.0 };
        Rc::new(ChartState::new(tree(), Rc::new(ChartConfig::default()), viewport).unwrap())
    }

    fn apply(s: Rc<ChartState>, command: Command) -> Rc<ChartState> {
        s.reduce(ChartAction::Apply(command))
    }

    #[test]
    fn single_branch_takes_the_whole_circle() {
        let mut s = state();
        for checkbox in [0, 2, 3] {
            s = apply(s, Command::ToggleBranch { checkbox, checked: false });
        }
        // Toggling alone does not re-layout.
        assert_eq!(s.layout.len(), 6);
        s = apply(s, Command::UpdateVisualization);
        assert_eq!(s.layout.len(), 2);
        let b = &s.layout.nodes[1];
        assert_eq!(b.name, "b");
        assert!((b.angle_span - TAU).abs() < 1e-9);
        assert_eq!(s.error, None);
    }

    #[test]
    fn palette_switch_keeps_geometry_and_drill_state() {
        let s = state().reduce(ChartAction::Select { index: 1, now: 0.0 });
        let before = s.clone();
        let s = apply(s, Command::ColorScheme(Palette::Achromatopsia));
        assert_eq!(*s.layout, *before.layout);
        assert_eq!(s.view.drill, before.view.drill);
        assert_ne!(s.fills, before.fills);
        assert_eq!(s.fills[0], "#CCCCCC");
        assert_eq!(s.view.palette, Palette::Achromatopsia);
    }

    #[test]
    fn clicking_a_leaf_drills_and_bumps_its_size() {
        let s = state().reduce(ChartAction::Select { index: 3, now: 0.0 });
        let b = &s.layout.nodes[3];
        assert_eq!(b.name, "b");
        assert_eq!(s.view.visible_depth_ceiling(), 2);
        assert_eq!(s.view.current_focus(), Some(3));
        assert_eq!(b.size, Some(130.0));
        assert_eq!(s.source.children[1].size, Some(130.0));
        // Spans wait for the next re-layout.
        assert!((b.angle_span - TAU * 30.0 / 100.0).abs() < 1e-9);
    }

    #[test]
    fn bump_follows_source_index_after_filtering() {
        let mut s = state();
        s = apply(s, Command::ToggleBranch { checkbox: 2, checked: false });
        s = apply(s, Command::UpdateVisualization);
        // checkbox-2 governs child 2 ("c").
        let names: Vec<&str> = s.layout.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["root", "a", "a1", "b", "d"]);
        let d = names.iter().position(|n| *n == "d").unwrap();
        s = s.reduce(ChartAction::Select { index: d, now: 0.0 });
        assert_eq!(s.source.children[3].size, Some(140.0));
        assert_eq!(s.source.children[2].size, Some(20.0));
    }

    #[test]
    fn branches_without_size_are_not_bumped() {
        let s = state().reduce(ChartAction::Select { index: 1, now: 0.0 });
        assert_eq!(s.layout.nodes[1].size, None);
        assert_eq!(*s.source, tree());
    }

    #[test]
    fn disabled_increment_leaves_sizes_alone() {
        let cfg = ChartConfig { click_weight_increment: None, ..ChartConfig::default() };
        let viewport = Viewport { width: 400.0, height: 300.0 };
        let s = Rc::new(ChartState::new(tree(), Rc::new(cfg), viewport).unwrap());
        let s = s.reduce(ChartAction::Select { index: 3, now: 0.0 });
        assert_eq!(s.layout.nodes[3].size, Some(30.0));
        assert_eq!(s.view.visible_depth_ceiling(), 2);
    }

    #[test]
    fn update_discards_view_state() {
        let mut s = state().reduce(ChartAction::Select { index: 1, now: 0.0 });
        s = apply(s, Command::IncreaseTextSize);
        s = apply(s, Command::ColorScheme(Palette::Protanopia));
        s = apply(s, Command::UpdateVisualization);
        assert_eq!(s.view.current_focus(), None);
        assert_eq!(s.view.visible_depth_ceiling(), 1);
        assert_eq!(s.view.text.size, 20.0);
        assert_eq!(s.view.palette, Palette::default());
    }

    #[test]
    fn text_commands_adjust_shared_style() {
        let mut s = state();
        for _ in 0..3 {
            s = apply(s, Command::IncreaseTextSize);
        }
        s = apply(s, Command::DecreaseTextSize);
        s = apply(s, Command::BoldText);
        assert_eq!(s.view.text.font(), "bold 22px sans-serif");
        s = apply(s, Command::DefaultText);
        assert_eq!(s.view.text.font(), "normal 20px sans-serif");
        assert_eq!(s.view.text.color, "#f7f7f7");
    }

    #[test]
    fn unknown_checkbox_surfaces_error() {
        let s = apply(state(), Command::ToggleBranch { checkbox: 7, checked: true });
        assert_eq!(
            s.error,
            Some(ChartError::Binding(ControlBindingError::UnknownControl("checkbox-7".into())))
        );
        let s = s.reduce(ChartAction::DismissError);
        assert_eq!(s.error, None);
    }

    #[test]
    fn two_branches_draw_but_report_uncovered_checkboxes() {
        let tree = TreeNode::branch("root", vec![TreeNode::leaf("A", 10.0), TreeNode::leaf("B", 30.0)]);
        let viewport = Viewport { width: 100.0, height: 100.0 };
        let s = Rc::new(ChartState::new(tree, Rc::new(ChartConfig::default()), viewport).unwrap());
        assert_eq!(s.layout.len(), 3);
        assert!((s.layout.nodes[1].angle_span - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert_eq!(
            s.error,
            Some(ChartError::Binding(ControlBindingError::MissingCheckbox { index: 0, available: 2 }))
        );

        // Drilling still works; filtering stays blocked and keeps the chart up.
        let s = s.reduce(ChartAction::DismissError);
        let s = s.reduce(ChartAction::Select { index: 2, now: 0.0 });
        assert_eq!(s.view.visible_depth_ceiling(), 2);
        let s = apply(s, Command::UpdateVisualization);
        assert!(matches!(s.error, Some(ChartError::Binding(ControlBindingError::MissingCheckbox { .. }))));
        assert_eq!(s.layout.len(), 3);
        assert_eq!(s.view.current_focus(), Some(2));

        // Coming back from the description page redraws the whole tree.
        let s = apply(s.reduce(ChartAction::DismissError), Command::GoToVisualization);
        assert_eq!(s.error, None);
        assert_eq!(s.layout.len(), 3);
        assert_eq!(s.view.current_focus(), None);
        assert_eq!(s.source.children[1].size, Some(130.0));
    }

    #[test]
    fn three_branches_report_the_first_uncovered_index() {
        let tree = TreeNode::branch("root", ["x", "y", "z"].iter().map(|n| TreeNode::leaf(n, 1.0)).collect());
        let viewport = Viewport { width: 100.0, height: 100.0 };
        let s = ChartState::new(tree, Rc::new(ChartConfig::default()), viewport).unwrap();
        assert_eq!(s.layout.len(), 4);
        assert_eq!(
            s.error,
            Some(ChartError::Binding(ControlBindingError::MissingCheckbox { index: 1, available: 3 }))
        );
    }

    #[test]
    fn four_branches_start_without_error() {
        assert_eq!(state().error, None);
    }

    #[test]
    fn resize_rescales_the_view() {
        let s = state();
        let v0 = s.version;
        let s = s.reduce(ChartAction::Resize(Viewport { width: 200.0, height: 500.0 }));
        assert_eq!(s.radius(), 96.0);
        assert_eq!(s.view.drill.scales_at(0.0).radius(), 96.0);
        assert_eq!(s.version, v0 + 1);
    }

    #[test]
    fn node_paths_and_counts() {
        let mut t = tree();
        assert_eq!(t.count(), 6);
        assert_eq!(t.node_at_mut(&[0, 0]).map(|n| n.name.clone()), Some("a1".to_string()));
        assert!(t.node_at_mut(&[9]).is_none());
    }
}

use crate::config::ChartConfig;
use crate::layout::Layout;
use crate::palette::Palette;

use super::{DrillDown, TextStyle};

/// Interaction state of one rendered chart. Rebuilt from scratch on every re-layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub drill: DrillDown,
    pub text: TextStyle,
    pub palette: Palette,
}

impl ViewState {
    pub fn new(layout: &Layout, radius: f64, config: &ChartConfig) -> Self {
        Self {
            drill: DrillDown::new(layout, radius),
            text: TextStyle::from_config(config),
            palette: Palette::default(),
        }
    }

    pub fn current_focus(&self) -> Option<usize> {
        self.drill.focus
    }

    pub fn visible_depth_ceiling(&self) -> usize {
        self.drill.ceiling
    }
}

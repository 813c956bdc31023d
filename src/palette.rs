//! Color palettes, including the color-vision-deficiency friendly tables, and the
//! ordinal lookup that hands out colors to branch names in first-seen order.

use std::str::FromStr;

use crate::error::ControlBindingError;
use crate::layout::Layout;

const CATEGORY20: &[&str] = &[
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];
// Red-weak
const PROTANOMALY: &[&str] = &["#009E73", "#F0E442", "#0072B2", "#D55E00", "#CC79A7"];
// Green-weak
const DEUTERANOMALY: &[&str] = &["#0072B2", "#F0E442", "#009E73", "#D55E00", "#CC79A7"];
// Blue-weak
const TRITANOMALY: &[&str] = &["#D55E00", "#F0E442", "#0072B2", "#009E73", "#CC79A7"];
const PROTANOPIA: &[&str] = &["#009E73", "#E69F00", "#56B4E9", "#D55E00", "#CC79A7"];
const DEUTERANOPIA: &[&str] = &["#0072B2", "#E69F00", "#56B4E9", "#D55E00", "#CC79A7"];
const TRITANOPIA: &[&str] = &["#D55E00", "#E69F00", "#56B4E9", "#009E73", "#CC79A7"];
const ACHROMATOPSIA: &[&str] = &["#CCCCCC", "#999999", "#666666", "#333333", "#000000"];
const BLUE_CONE_MONOCHROMACY: &[&str] = &["#AA00AA", "#550055", "#AADDAA", "#558855", "#999999"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Default,
    Protanomaly,
    Deuteranomaly,
    Tritanomaly,
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Achromatopsia,
    BlueConeMonochromacy,
}

impl Palette {
    pub const ALL: [Palette; 9] = [
        Palette::Default,
        Palette::Protanomaly,
        Palette::Deuteranomaly,
        Palette::Tritanomaly,
        Palette::Protanopia,
        Palette::Deuteranopia,
        Palette::Tritanopia,
        Palette::Achromatopsia,
        Palette::BlueConeMonochromacy,
    ];

    /// Value used by the `color-scheme` select.
    pub fn key(self) -> &'static str {
        match self {
            Palette::Default => "default",
            Palette::Protanomaly => "protanomaly",
            Palette::Deuteranomaly => "deuteranomaly",
            Palette::Tritanomaly => "tritanomaly",
            Palette::Protanopia => "protanopia",
            Palette::Deuteranopia => "deuteranopia",
            Palette::Tritanopia => "tritanopia",
            Palette::Achromatopsia => "achromatopsia",
            Palette::BlueConeMonochromacy => "blueConeMonochromacy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Palette::Default => "Default",
            Palette::Protanomaly => "Protanomaly (red-weak)",
            Palette::Deuteranomaly => "Deuteranomaly (green-weak)",
            Palette::Tritanomaly => "Tritanomaly (blue-weak)",
            Palette::Protanopia => "Protanopia (red-blind)",
            Palette::Deuteranopia => "Deuteranopia (green-blind)",
            Palette::Tritanopia => "Tritanopia (blue-blind)",
            Palette::Achromatopsia => "Achromatopsia",
            Palette::BlueConeMonochromacy => "Blue cone monochromacy",
        }
    }

    pub fn colors(self) -> &'static [&'static str] {
        match self {
            Palette::Default => CATEGORY20,
            Palette::Protanomaly => PROTANOMALY,
            Palette::Deuteranomaly => DEUTERANOMALY,
            Palette::Tritanomaly => TRITANOMALY,
            Palette::Protanopia => PROTANOPIA,
            Palette::Deuteranopia => DEUTERANOPIA,
            Palette::Tritanopia => TRITANOPIA,
            Palette::Achromatopsia => ACHROMATOPSIA,
            Palette::BlueConeMonochromacy => BLUE_CONE_MONOCHROMACY,
        }
    }
}

impl FromStr for Palette {
    type Err = ControlBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| ControlBindingError::UnknownPalette(s.to_string()))
    }
}

/// Ordinal scale with an implicit domain: each new key takes the next color, wrapping.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
    range: &'static [&'static str],
    domain: Vec<String>,
}

impl OrdinalScale {
    pub fn new(palette: Palette) -> Self {
        Self { range: palette.colors(), domain: Vec::new() }
    }

    pub fn color(&mut self, key: &str) -> &'static str {
        let pos = match self.domain.iter().position(|k| k == key) {
            Some(pos) => pos,
            None => {
                self.domain.push(key.to_string());
                self.domain.len() - 1
            }
        };
        self.range[pos % self.range.len()]
    }
}

/// Fill for every node, in layout order.
pub fn paint(layout: &Layout, palette: Palette) -> Vec<&'static str> {
    let mut scale = OrdinalScale::new(palette);
    (0..layout.len()).map(|i| scale.color(layout.color_key(i))).collect()
}

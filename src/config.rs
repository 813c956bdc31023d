//! Chart tuning knobs. Defaults reproduce the stock visualization; a host page
//! can override any subset with an inline JSON block:
//! `<script id="sunburst-config" type="application/json">{ "transitionMs": 400 }</script>`

use serde::Deserialize;
use tracing::{debug, warn};

use crate::layout::ChildOrder;

pub const CONFIG_ELEMENT_ID: &str = "sunburst-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub data_url: String,
    pub transition_ms: f64,
    pub label_fade_out_ms: f64,
    pub label_fade_in_ms: f64,
    pub tooltip_fade_in_ms: u32,
    pub tooltip_fade_out_ms: u32,
    /// Added to a clicked node's size. `null` turns the side effect off.
    pub click_weight_increment: Option<f64>,
    /// Ignore clicks while a drill-down transition is still running.
    pub serialize_transitions: bool,
    /// Inner radius (px) used when the focus is not the root.
    pub focus_inner_radius: f64,
    pub radius_fraction: f64,
    pub child_order: ChildOrder,
    pub default_text_size: f64,
    pub default_text_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_url: "data/data.json".to_string(),
            transition_ms: 750.0,
            label_fade_out_ms: 250.0,
            label_fade_in_ms: 750.0,
            tooltip_fade_in_ms: 200,
            tooltip_fade_out_ms: 500,
            click_weight_increment: Some(100.0),
            serialize_transitions: false,
            focus_inner_radius: 20.0,
            radius_fraction: 0.48,
            child_order: ChildOrder::Preserve,
            default_text_size: 20.0,
            default_text_color: "#f7f7f7".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the inline override block if the page has one. Bad JSON falls back to defaults.
    pub fn from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(cfg) => {
                    debug!(?cfg, "loaded inline chart config");
                    cfg
                }
                Err(err) => {
                    warn!(%err, "ignoring malformed inline chart config");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = ChartConfig::from_json(r#"{ "transitionMs": 300, "childOrder": "weightDescending" }"#)
            .unwrap();
        assert_eq!(cfg.transition_ms, 300.0);
        assert_eq!(cfg.child_order, ChildOrder::WeightDescending);
        assert_eq!(cfg.data_url, "data/data.json");
        assert_eq!(cfg.click_weight_increment, Some(100.0));
    }

    #[test]
    fn null_increment_disables_click_side_effect() {
        let cfg = ChartConfig::from_json(r#"{ "clickWeightIncrement": null }"#).unwrap();
        assert_eq!(cfg.click_weight_increment, None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ChartConfig::from_json("{ transitionMs: }").is_err());
    }
}

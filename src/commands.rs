//! Control ids and the table translating a control event into a [`Command`].

use crate::error::ControlBindingError;
use crate::palette::Palette;
use crate::state::filter::{element_id, BranchFilter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlId {
    UpdateVisualization,
    IncreaseTextSize,
    DecreaseTextSize,
    BoldText,
    DefaultText,
    ColorScheme,
    GoToDescription,
    GoToVisualization,
}

impl ControlId {
    pub const ALL: [ControlId; 8] = [
        ControlId::UpdateVisualization,
        ControlId::IncreaseTextSize,
        ControlId::DecreaseTextSize,
        ControlId::BoldText,
        ControlId::DefaultText,
        ControlId::ColorScheme,
        ControlId::GoToDescription,
        ControlId::GoToVisualization,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ControlId::UpdateVisualization => "update-btn",
            ControlId::IncreaseTextSize => "increase-text-size",
            ControlId::DecreaseTextSize => "decrease-text-size",
            ControlId::BoldText => "bold-text",
            ControlId::DefaultText => "default-text",
            ControlId::ColorScheme => "color-scheme",
            ControlId::GoToDescription => "go-to-description",
            ControlId::GoToVisualization => "go-to-visualization",
        }
    }

    /// Controls rendered on the chart page. The "go to visualization" trigger lives on
    /// the description page.
    pub fn on_chart_page(self) -> bool {
        self != ControlId::GoToVisualization
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    UpdateVisualization,
    IncreaseTextSize,
    DecreaseTextSize,
    BoldText,
    DefaultText,
    ColorScheme(Palette),
    ToggleBranch { checkbox: usize, checked: bool },
    GoToDescription,
    GoToVisualization,
}

impl Command {
    /// `value` carries the select value or the checkbox state ("true"/"false").
    pub fn from_control(id: &str, value: Option<&str>) -> Result<Command, ControlBindingError> {
        if let Some(n) = id.strip_prefix("checkbox-") {
            let checkbox = n
                .parse()
                .map_err(|_| ControlBindingError::UnknownControl(id.to_string()))?;
            return Ok(Command::ToggleBranch {
                checkbox,
                checked: value == Some("true"),
            });
        }
        let control = ControlId::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| ControlBindingError::UnknownControl(id.to_string()))?;
        Ok(match control {
            ControlId::UpdateVisualization => Command::UpdateVisualization,
            ControlId::IncreaseTextSize => Command::IncreaseTextSize,
            ControlId::DecreaseTextSize => Command::DecreaseTextSize,
            ControlId::BoldText => Command::BoldText,
            ControlId::DefaultText => Command::DefaultText,
            ControlId::ColorScheme => {
                let v = value.ok_or_else(|| ControlBindingError::Unbound(id.to_string()))?;
                Command::ColorScheme(v.parse()?)
            }
            ControlId::GoToDescription => Command::GoToDescription,
            ControlId::GoToVisualization => Command::GoToVisualization,
        })
    }
}

/// Checks that every control the chart page dispatches from is present, so a missing
/// element is reported at startup rather than on first click.
pub fn verify_bindings(
    filter: &BranchFilter,
    has_element: impl Fn(&str) -> bool,
) -> Result<(), ControlBindingError> {
    for control in ControlId::ALL.into_iter().filter(|c| c.on_chart_page()) {
        if !has_element(control.id()) {
            return Err(ControlBindingError::Unbound(control.id().to_string()));
        }
    }
    for cb in filter.checkboxes() {
        let id = element_id(cb.id);
        if !has_element(&id) {
            return Err(ControlBindingError::Unbound(id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;

    #[test]
    fn every_control_id_round_trips() {
        for control in ControlId::ALL {
            let value = (control == ControlId::ColorScheme).then_some("tritanopia");
            assert!(Command::from_control(control.id(), value).is_ok(), "{}", control.id());
        }
        assert_eq!(
            Command::from_control("color-scheme", Some("tritanopia")),
            Ok(Command::ColorScheme(Palette::Tritanopia))
        );
    }

    #[test]
    fn checkbox_events_carry_state() {
        assert_eq!(
            Command::from_control("checkbox-3", Some("false")),
            Ok(Command::ToggleBranch { checkbox: 3, checked: false })
        );
        assert!(matches!(
            Command::from_control("checkbox-x", None),
            Err(ControlBindingError::UnknownControl(_))
        ));
    }

    #[test]
    fn unknown_controls_and_values_fail() {
        assert_eq!(
            Command::from_control("reset-all", None),
            Err(ControlBindingError::UnknownControl("reset-all".into()))
        );
        assert_eq!(
            Command::from_control("color-scheme", Some("neon")),
            Err(ControlBindingError::UnknownPalette("neon".into()))
        );
    }

    #[test]
    fn missing_elements_fail_fast() {
        let root = TreeNode::branch(
            "r",
            ["a", "b", "c", "d"].iter().map(|n| TreeNode::leaf(n, 1.0)).collect(),
        );
        let filter = BranchFilter::bind(&root);
        let all_present = |_: &str| true;
        assert_eq!(verify_bindings(&filter, all_present), Ok(()));
        let no_bold = |id: &str| id != "bold-text";
        assert_eq!(
            verify_bindings(&filter, no_bold),
            Err(ControlBindingError::Unbound("bold-text".into()))
        );
        let no_box = |id: &str| id != "checkbox-1";
        assert_eq!(
            verify_bindings(&filter, no_box),
            Err(ControlBindingError::Unbound("checkbox-1".into()))
        );
    }
}

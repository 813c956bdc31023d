use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::commands::{Command, ControlId};
use crate::error::ControlBindingError;
use crate::palette::Palette;
use crate::state::filter::{element_id, Checkbox};

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub checkboxes: Vec<Checkbox>,
    pub palette: Palette,
    pub on_command: Callback<Command>,
    pub on_error: Callback<ControlBindingError>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    // Every control event goes through the id table so unknown ids surface as errors.
    let emit = {
        let on_command = props.on_command.clone();
        let on_error = props.on_error.clone();
        Callback::from(move |(id, value): (String, Option<String>)| {
            match Command::from_control(&id, value.as_deref()) {
                Ok(cmd) => on_command.emit(cmd),
                Err(err) => on_error.emit(err),
            }
        })
    };
    let button = |control: ControlId, label: &'static str| {
        let emit = emit.clone();
        let onclick = Callback::from(move |_: MouseEvent| emit.emit((control.id().to_string(), None)));
        html! { <button id={control.id()} {onclick}>{ label }</button> }
    };

    let boxes = props.checkboxes.iter().map(|cb| {
        let id = element_id(cb.id);
        let onchange = {
            let emit = emit.clone();
            let id = id.clone();
            Callback::from(move |e: Event| {
                let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
                emit.emit((id.clone(), Some(checked.to_string())));
            })
        };
        html! {
            <label style="display:flex; align-items:center; gap:6px; cursor:pointer;">
                <input type="checkbox" id={id.clone()} checked={cb.checked} {onchange} />
                <span>{ cb.label.clone() }</span>
            </label>
        }
    });

    let on_palette = {
        let emit = emit.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            emit.emit((ControlId::ColorScheme.id().to_string(), Some(value)));
        })
    };
    let options = Palette::ALL.iter().map(|p| {
        html! { <option value={p.key()} selected={*p == props.palette}>{ p.label() }</option> }
    });

    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <div class="checkbox-container" style="display:flex; flex-direction:column; gap:4px;">{ for boxes }</div>
        { button(ControlId::UpdateVisualization, "Update Visualization") }
        <div style="display:flex; gap:6px;">
            { button(ControlId::IncreaseTextSize, "A+") }
            { button(ControlId::DecreaseTextSize, "A-") }
            { button(ControlId::BoldText, "Bold") }
            { button(ControlId::DefaultText, "Reset") }
        </div>
        <label style="display:flex; flex-direction:column; gap:4px; font-size:12px;">
            <span>{"Color scheme"}</span>
            <select id={ControlId::ColorScheme.id()} onchange={on_palette}>{ for options }</select>
        </label>
        { button(ControlId::GoToDescription, "About this chart") }
    </div>}
}

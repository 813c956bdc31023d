use yew::prelude::*;

use crate::error::ChartError;

#[derive(Properties, PartialEq, Clone)]
pub struct ErrorPanelProps {
    pub error: ChartError,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component]
pub fn ErrorPanel(props: &ErrorPanelProps) -> Html {
    let dismiss = props.on_dismiss.clone().map(|cb| {
        let onclick = Callback::from(move |_| cb.emit(()));
        html! { <button {onclick} style="align-self:flex-end;">{"Dismiss"}</button> }
    });
    html! {
        <div role="alert" style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; min-width:320px; max-width:560px; display:flex; flex-direction:column; gap:12px; z-index:40;">
            <h2 style="margin:0; color:#f85149;">{ props.error.title() }</h2>
            <p style="margin:0; font-family:monospace; font-size:13px; word-break:break-word;">{ props.error.to_string() }</p>
            { for dismiss }
        </div>
    }
}

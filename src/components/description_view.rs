use yew::prelude::*;

use crate::commands::ControlId;

#[derive(Properties, PartialEq, Clone)]
pub struct DescriptionViewProps {
    pub to_visualization: Callback<()>,
}

#[function_component]
pub fn DescriptionView(props: &DescriptionViewProps) -> Html {
    let back = {
        let cb = props.to_visualization.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="max-width:720px; margin:48px auto; padding:0 20px; line-height:1.5;">
            <h1>{"Sunburst Explorer"}</h1>
            <p>{"Each ring of the chart is one level of the hierarchy. A wedge's angle is proportional to the total size of everything beneath it, so large branches take up more of the circle."}</p>
            <h3>{"Exploring"}</h3>
            <ul>
                <li>{"Click a wedge to zoom into it. The next level down is revealed as you go deeper."}</li>
                <li>{"Click the center to zoom back out to the whole tree."}</li>
                <li>{"Hover a wedge to see its name and size."}</li>
            </ul>
            <h3>{"Controls"}</h3>
            <ul>
                <li>{"Tick or untick top-level branches, then press Update Visualization to redraw with just those branches."}</li>
                <li>{"A+ and A- change the label size, Bold makes labels bold, Reset restores the default text style."}</li>
                <li>{"The color scheme menu offers palettes for several kinds of color vision deficiency."}</li>
            </ul>
            <button id={ControlId::GoToVisualization.id()} onclick={back}>{"Back to the chart"}</button>
        </div>
    }
}

use std::rc::Rc;
use tracing::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{
    chart_view::{window_viewport, ChartView},
    controls_panel::ControlsPanel,
    description_view::DescriptionView,
    error_panel::ErrorPanel,
};
use crate::commands::{verify_bindings, Command};
use crate::config::ChartConfig;
use crate::error::{ChartError, ControlBindingError};
use crate::loader::fetch_tree;
use crate::model::{ChartAction, ChartState};
use crate::util::has_element;

#[derive(PartialEq, Clone)]
enum Load {
    Pending,
    Ready(Rc<ChartState>),
    Failed(ChartError),
}

#[derive(PartialEq, Clone, Copy)]
enum View {
    Visualization,
    Description,
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ChartConfig::from_document());
    let load = use_state(|| Load::Pending);

    {
        let load = load.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let started = fetch_tree(&config.data_url)
                    .await
                    .map_err(ChartError::from)
                    .and_then(|tree| ChartState::new(tree, config.clone(), window_viewport()));
                match started {
                    Ok(state) => load.set(Load::Ready(Rc::new(state))),
                    Err(err) => {
                        error!(%err, "chart failed to start");
                        load.set(Load::Failed(err));
                    }
                }
            });
            || ()
        });
    }

    match &*load {
        Load::Pending => html! {
            <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); opacity:0.7;">{"Loading…"}</div>
        },
        Load::Failed(err) => html! { <ErrorPanel error={err.clone()} /> },
        Load::Ready(initial) => html! { <Explorer initial={initial.clone()} /> },
    }
}

#[derive(Properties, PartialEq, Clone)]
struct ExplorerProps {
    initial: Rc<ChartState>,
}

#[function_component]
fn Explorer(props: &ExplorerProps) -> Html {
    let view = use_state(|| View::Visualization);
    let state = {
        let initial = props.initial.clone();
        use_reducer(move || (*initial).clone())
    };

    // Controls are rendered by this component, so they exist once the effect runs.
    {
        let state = state.clone();
        use_effect_with(*view, move |view| {
            if *view == View::Visualization {
                if let Err(err) = verify_bindings(&state.filter, has_element) {
                    state.dispatch(ChartAction::Fail(err.into()));
                }
            }
            || ()
        });
    }

    let on_command = {
        let view = view.clone();
        let state = state.clone();
        Callback::from(move |cmd: Command| match cmd {
            Command::GoToDescription => view.set(View::Description),
            Command::GoToVisualization => {
                view.set(View::Visualization);
                state.dispatch(ChartAction::Apply(cmd));
            }
            other => state.dispatch(ChartAction::Apply(other)),
        })
    };
    let on_error = {
        let state = state.clone();
        Callback::from(move |err: ControlBindingError| state.dispatch(ChartAction::Fail(err.into())))
    };
    let on_dismiss = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(ChartAction::DismissError))
    };

    match *view {
        View::Visualization => html! {
            <>
                <ChartView state={state.clone()} />
                <ControlsPanel
                    checkboxes={state.filter.checkboxes().to_vec()}
                    palette={state.view.palette}
                    on_command={on_command}
                    {on_error}
                />
                { for state.error.clone().map(|error| html! { <ErrorPanel {error} on_dismiss={Some(on_dismiss.clone())} /> }) }
            </>
        },
        View::Description => {
            let to_visualization = Callback::from(move |_| on_command.emit(Command::GoToVisualization));
            html! { <DescriptionView {to_visualization} /> }
        }
    }
}

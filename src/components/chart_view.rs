use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

use crate::layout::Layout;
use crate::model::{ChartAction, ChartState};
use crate::state::surface::hit_test;
use crate::state::{LabelPlacement, Viewport, Wedge};
use crate::util::now_ms;

const WEDGE_STROKE: &str = "#ffffff";
const FALLBACK_FILL: &str = "#cccccc";
const TOOLTIP_OFFSET_PX: f64 = 12.0;

/// Hover tooltip. `x`/`y` are the pointer offset inside the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
struct Tooltip {
    visible: bool,
    name: String,
    size: f64,
    x: f64,
    y: f64,
}

impl Tooltip {
    fn style(&self, fade_in_ms: u32, fade_out_ms: u32) -> String {
        let (opacity, fade) = if self.visible { (1, fade_in_ms) } else { (0, fade_out_ms) };
        format!(
            "position:absolute; left:{}px; top:{}px; pointer-events:none; background:rgba(0,0,0,0.8); color:#f7f7f7; padding:6px 10px; border-radius:6px; font-size:13px; white-space:nowrap; opacity:{opacity}; transition:opacity {fade}ms;",
            self.x + TOOLTIP_OFFSET_PX,
            self.y + TOOLTIP_OFFSET_PX,
        )
    }
}

/// Accessible name of the canvas, following the drill-down focus.
fn canvas_label(layout: &Layout, focus: Option<usize>) -> String {
    match focus.and_then(|i| layout.get(i)) {
        Some(node) => format!("Sunburst chart focused on {}", node.name),
        None => "Sunburst chart".to_string(),
    }
}

type StateRef = Rc<RefCell<UseReducerHandle<ChartState>>>;
type WakeRef = Rc<RefCell<Option<Rc<dyn Fn()>>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct ChartViewProps {
    pub state: UseReducerHandle<ChartState>,
}

pub fn window_viewport() -> Viewport {
    let window = web_sys::window();
    let dim = |v: Option<wasm_bindgen::JsValue>, fallback: f64| v.and_then(|v| v.as_f64()).unwrap_or(fallback);
    Viewport {
        width: dim(window.as_ref().and_then(|w| w.inner_width().ok()), 800.0),
        height: dim(window.as_ref().and_then(|w| w.inner_height().ok()), 600.0),
    }
}

/// Paints wedges against the sampled scales, then labels against the label scales.
fn draw(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, state: &ChartState, now: f64) {
    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    let (cx, cy) = state.viewport.center();
    let _ = ctx.translate(cx, cy);
    let _ = ctx.rotate(-FRAC_PI_2);

    let drill = &state.view.drill;
    let scales = drill.scales_at(now);
    ctx.set_stroke_style_str(WEDGE_STROKE);
    ctx.set_line_width(1.0);
    for (i, node) in state.layout.nodes.iter().enumerate() {
        if !drill.is_revealed(node.depth) {
            continue;
        }
        let wedge = Wedge::of(node, &scales);
        if wedge.is_empty() {
            continue;
        }
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, wedge.outer, wedge.start - FRAC_PI_2, wedge.end - FRAC_PI_2);
        let _ = ctx.arc_with_anticlockwise(
            0.0,
            0.0,
            wedge.inner,
            wedge.end - FRAC_PI_2,
            wedge.start - FRAC_PI_2,
            true,
        );
        ctx.close_path();
        ctx.set_fill_style_str(state.fills.get(i).copied().unwrap_or(FALLBACK_FILL));
        ctx.fill();
        ctx.stroke();
    }

    let text = &state.view.text;
    let label_scales = drill.label_scales_at(now);
    ctx.set_font(&text.font());
    ctx.set_fill_style_str(&text.color);
    ctx.set_text_align("start");
    ctx.set_text_baseline("middle");
    for (i, node) in state.layout.nodes.iter().enumerate() {
        let alpha = drill.label_alpha(i, now);
        if alpha <= 0.0 {
            continue;
        }
        let placement = LabelPlacement::of(node, &label_scales);
        ctx.save();
        ctx.set_global_alpha(alpha);
        let _ = ctx.rotate(placement.rotation);
        let _ = ctx.fill_text(&node.name, placement.x, 0.0);
        ctx.restore();
    }
}

/// Wires the canvas to the reducer: frame loop, pointer and resize listeners.
/// The frame loop idles once the drill-down has settled; `wake` restarts it.
/// Returns the teardown, or `None` if the canvas is not mounted.
fn mount(
    canvas_ref: &NodeRef,
    state_ref: StateRef,
    wake: WakeRef,
    hovered: Rc<RefCell<Option<usize>>>,
    tip: Rc<RefCell<Tooltip>>,
    set_tip: UseStateSetter<Tooltip>,
) -> Option<Box<dyn FnOnce()>> {
    let window = web_sys::window()?;
    let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>()?;
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok().flatten()?.dyn_into().ok()?;

    let apply_size = {
        let canvas = canvas.clone();
        let state_ref = state_ref.clone();
        move || {
            let viewport = window_viewport();
            canvas.set_width(viewport.width.max(0.0) as u32);
            canvas.set_height(viewport.height.max(0.0) as u32);
            let handle = state_ref.borrow().clone();
            handle.dispatch(ChartAction::Resize(viewport));
        }
    };
    apply_size();

    // RAF loop. At most one frame is pending, tracked by `raf_id`.
    let raf_id = Rc::new(RefCell::new(None::<i32>));
    let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let schedule: Rc<dyn Fn()> = {
        let raf_id = raf_id.clone();
        let frame_cell = frame_cell.clone();
        let window = window.clone();
        Rc::new(move || {
            if raf_id.borrow().is_some() {
                return;
            }
            if let Some(cb) = frame_cell.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }
        })
    };
    {
        let raf_id = raf_id.clone();
        let schedule = schedule.clone();
        let canvas = canvas.clone();
        let state_ref = state_ref.clone();
        *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_id.borrow_mut().take();
            if !canvas.is_connected() {
                return;
            }
            let handle = state_ref.borrow().clone();
            let now = now_ms();
            draw(&canvas, &ctx, &handle, now);
            if handle.view.drill.needs_frames(now) {
                schedule();
            }
        }) as Box<dyn FnMut()>));
    }
    schedule();
    *wake.borrow_mut() = Some(schedule);

    let pick = {
        let state_ref = state_ref.clone();
        move |e: &MouseEvent| {
            let handle = state_ref.borrow().clone();
            let now = now_ms();
            let (angle, r) = handle.viewport.to_polar(e.offset_x() as f64, e.offset_y() as f64);
            let scales = handle.view.drill.scales_at(now);
            let hit = hit_test(&handle.layout, &scales, handle.view.visible_depth_ceiling(), angle, r);
            (handle, hit, now)
        }
    };

    let click_cb = {
        let pick = pick.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let (handle, hit, now) = pick(&e);
            if let Some(index) = hit {
                handle.dispatch(ChartAction::Select { index, now });
            }
        }) as Box<dyn FnMut(_)>)
    };

    let hide_tip = {
        let tip = tip.clone();
        let set_tip = set_tip.clone();
        move || {
            let mut current = tip.borrow_mut();
            if current.visible {
                current.visible = false;
                set_tip.set(current.clone());
            }
        }
    };

    let mousemove_cb = {
        let canvas = canvas.clone();
        let hovered = hovered.clone();
        let hide_tip = hide_tip.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let (handle, hit, _) = pick(&e);
            if *hovered.borrow() != hit {
                *hovered.borrow_mut() = hit;
                let cursor = if hit.is_some() { "pointer" } else { "default" };
                let _ = canvas.style().set_property("cursor", cursor);
            }
            match hit.and_then(|i| handle.layout.get(i)) {
                Some(node) => {
                    let next = Tooltip {
                        visible: true,
                        name: node.name.clone(),
                        size: node.size.unwrap_or(0.0),
                        x: e.offset_x() as f64,
                        y: e.offset_y() as f64,
                    };
                    *tip.borrow_mut() = next.clone();
                    set_tip.set(next);
                }
                None => hide_tip(),
            }
        }) as Box<dyn FnMut(_)>)
    };

    let mouseleave_cb = {
        let hovered = hovered.clone();
        Closure::wrap(Box::new(move |_e: MouseEvent| {
            *hovered.borrow_mut() = None;
            hide_tip();
        }) as Box<dyn FnMut(_)>)
    };

    let resize_cb = Closure::wrap(Box::new(move |_e: web_sys::Event| apply_size()) as Box<dyn FnMut(_)>);

    canvas
        .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())
        .ok()?;
    canvas
        .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
        .ok()?;
    canvas
        .add_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref())
        .ok()?;
    window
        .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
        .ok()?;

    Some(Box::new(move || {
        let _ = canvas.remove_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
        let _ = canvas.remove_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref());
        let _ = canvas.remove_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref());
        let _ = window.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
        if let Some(id) = raf_id.borrow_mut().take() {
            let _ = window.cancel_animation_frame(id);
        }
        // The frame closure and `wake` both reach the cell; clearing them breaks the cycle.
        wake.borrow_mut().take();
        frame_cell.borrow_mut().take();
    }) as Box<dyn FnOnce()>)
}

#[function_component]
pub fn ChartView(props: &ChartViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let state_ref = use_mut_ref(|| props.state.clone());
    let wake_ref: WakeRef = use_mut_ref(|| None);
    let hovered = use_mut_ref(|| None::<usize>);
    let tip_ref = use_mut_ref(Tooltip::default);
    let tooltip = use_state(Tooltip::default);

    // Frame and event closures read the newest handle through `state_ref`.
    // Every new version wakes the frame loop for at least one repaint.
    {
        let state_ref = state_ref.clone();
        let wake_ref = wake_ref.clone();
        let handle = props.state.clone();
        use_effect_with(props.state.version, move |_| {
            *state_ref.borrow_mut() = handle;
            let wake = wake_ref.borrow().clone();
            if let Some(wake) = wake {
                wake();
            }
            || ()
        });
    }
    {
        let canvas_ref = canvas_ref.clone();
        let set_tip = tooltip.setter();
        use_effect_with((), move |_| {
            let teardown = mount(&canvas_ref, state_ref, wake_ref, hovered, tip_ref, set_tip);
            if teardown.is_none() {
                tracing::error!("chart canvas could not be mounted");
            }
            move || {
                if let Some(teardown) = teardown {
                    teardown();
                }
            }
        });
    }

    let config = &props.state.config;
    let tip_style = tooltip.style(config.tooltip_fade_in_ms, config.tooltip_fade_out_ms);
    let label = canvas_label(&props.state.layout, props.state.view.current_focus());

    html! {
        <div class="visualization" style="position:relative; width:100vw; height:100vh; overflow:hidden;">
            <canvas ref={canvas_ref} role="img" aria-label={label} style="display:block;" />
            <div class="tooltip" style={tip_style}>
                <b>{"Name: "}</b>{ tooltip.name.clone() }<br/>
                <b>{"Size: "}</b>{ tooltip.size.to_string() }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{partition, ChildOrder};
    use crate::model::TreeNode;

    #[test]
    fn tooltip_sits_beside_the_pointer() {
        let tip = Tooltip { visible: true, name: "A".into(), size: 10.0, x: 140.0, y: 75.5 };
        let style = tip.style(200, 500);
        assert!(style.contains("left:152px;"), "{style}");
        assert!(style.contains("top:87.5px;"), "{style}");
        assert!(style.contains("opacity:1;"));
        assert!(style.contains("transition:opacity 200ms;"));
    }

    #[test]
    fn hidden_tooltip_fades_out_where_it_was() {
        let tip = Tooltip { visible: false, x: 10.0, y: 20.0, ..Tooltip::default() };
        let style = tip.style(200, 500);
        assert!(style.contains("left:22px; top:32px;"), "{style}");
        assert!(style.contains("opacity:0;"));
        assert!(style.contains("transition:opacity 500ms;"));
    }

    #[test]
    fn canvas_label_names_the_focused_wedge() {
        let tree = TreeNode::branch("root", vec![TreeNode::leaf("A", 1.0), TreeNode::leaf("B", 3.0)]);
        let layout = partition(&tree, ChildOrder::Preserve).unwrap();
        assert_eq!(canvas_label(&layout, None), "Sunburst chart");
        assert_eq!(canvas_label(&layout, Some(2)), "Sunburst chart focused on B");
        assert_eq!(canvas_label(&layout, Some(9)), "Sunburst chart");
    }
}

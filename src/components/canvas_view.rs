use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent, TouchEvent, TouchList, WheelEvent};
use yew::prelude::*;

use crate::config::CanvasConfig;
use crate::model::{NodeKind, NodeRecord, Point, Rect};
use crate::state::{
    CanvasAction, CanvasSignal, CanvasState, InputSession, Viewport, WheelInput, WheelMode,
    WheelOutcome,
};
use crate::util::{clog, sample_jitter};

use super::{
    camera_controls::CameraControls, full_screen_view::FullScreenView,
    intro_overlay::IntroOverlay, node_window::NodeWindow,
};

/// A navigation request; `seq` lets the same id be requested twice in a row.
#[derive(Clone, Debug, PartialEq)]
pub struct NavRequest {
    pub id: String,
    pub seq: u32,
}

#[derive(Properties, PartialEq, Clone)]
pub struct SpatialCanvasProps {
    pub nodes: Rc<Vec<NodeRecord>>,
    pub config: Rc<CanvasConfig>,
    pub target: Option<NavRequest>,
    pub play_intro: bool,
    pub on_navigate: Callback<String>,
    pub on_intro_complete: Callback<()>,
}

#[derive(Clone)]
struct Hooks {
    on_navigate: Callback<String>,
    on_intro_complete: Callback<()>,
}

/// Applies actions to the shared core and carries out the signals it returns.
#[derive(Clone)]
struct Driver {
    state: Rc<RefCell<CanvasState>>,
    hooks: Rc<RefCell<Hooks>>,
    alive: Rc<Cell<bool>>,
    redraw: UseForceUpdateHandle,
}

impl Driver {
    fn dispatch(&self, action: CanvasAction) {
        if !self.alive.get() {
            return;
        }
        let signals = self.state.borrow_mut().apply(action);
        for signal in signals {
            match signal {
                CanvasSignal::Navigate(id) => self.hooks.borrow().on_navigate.emit(id),
                CanvasSignal::IntroComplete => self.hooks.borrow().on_intro_complete.emit(()),
                CanvasSignal::Schedule { delay_ms, action } => self.schedule(delay_ms, action),
            }
        }
        self.redraw.force_update();
    }

    fn schedule(&self, delay_ms: u32, action: CanvasAction) {
        let driver = self.clone();
        yew::platform::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            driver.dispatch(action);
        });
    }
}

fn window_viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::default();
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1280.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    Viewport::new(width, height)
}

fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

fn local_point(container: &HtmlElement, client_x: i32, client_y: i32) -> Point {
    let rect = container.get_bounding_client_rect();
    Point::new(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

fn touch_points(container: &HtmlElement, touches: &TouchList) -> Vec<Point> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| local_point(container, t.client_x(), t.client_y()))
        .collect()
}

/// What a press landed on. Controls and content inside a window are inert.
#[derive(Debug, PartialEq)]
enum PressTarget {
    Handle(String),
    Inert,
    Background,
}

impl PressTarget {
    /// A claimed touch-start cancels native scrolling and the compatibility
    /// mouse events the browser would otherwise replay after the tap.
    fn claims_touch(&self, touches: usize) -> bool {
        touches >= 2 || *self != PressTarget::Inert
    }
}

fn press_target(event: &Event) -> PressTarget {
    if closest(event, "[data-no-drag]").is_some() {
        return PressTarget::Inert;
    }
    closest(event, "[data-drag-handle]")
        .and_then(|handle| handle.get_attribute("data-node-id"))
        .map_or(PressTarget::Background, PressTarget::Handle)
}

#[function_component(SpatialCanvas)]
pub fn spatial_canvas(props: &SpatialCanvasProps) -> Html {
    let container_ref = use_node_ref();
    let state = {
        let nodes = props.nodes.clone();
        let config = props.config.clone();
        use_mut_ref(move || CanvasState::new((*nodes).clone(), (*config).clone()))
    };
    let hooks = use_mut_ref(|| Hooks {
        on_navigate: props.on_navigate.clone(),
        on_intro_complete: props.on_intro_complete.clone(),
    });
    // Always point at the latest callbacks
    *hooks.borrow_mut() = Hooks {
        on_navigate: props.on_navigate.clone(),
        on_intro_complete: props.on_intro_complete.clone(),
    };
    let alive = use_memo((), |_| Cell::new(true));
    let redraw = use_force_update();
    let driver = Driver {
        state: state.clone(),
        hooks: hooks.clone(),
        alive,
        redraw,
    };

    // Mount: boot sequence + listeners
    {
        let container_ref = container_ref.clone();
        let driver = driver.clone();
        let play_intro = props.play_intro;
        use_effect_with((), move |_| {
            driver.alive.set(true);
            driver.dispatch(CanvasAction::Mount {
                viewport: window_viewport(),
                play_intro,
            });
            let mut listeners: Vec<EventListener> = Vec::new();
            let options = EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            };
            if let Some(container) = container_ref.cast::<HtmlElement>() {
                let d = driver.clone();
                let c = container.clone();
                listeners.push(EventListener::new(&container, "mousedown", move |event: &Event| {
                    let Some(e) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    if e.button() != 0 {
                        return;
                    }
                    let point = local_point(&c, e.client_x(), e.client_y());
                    let node = match press_target(event) {
                        PressTarget::Inert => return,
                        PressTarget::Handle(id) => Some(id),
                        PressTarget::Background => None,
                    };
                    d.dispatch(CanvasAction::PointerDown { point, node });
                }));
                let d = driver.clone();
                let c = container.clone();
                listeners.push(EventListener::new(&container, "mousemove", move |event: &Event| {
                    let Some(e) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    if matches!(d.state.borrow().session(), InputSession::Idle) {
                        return;
                    }
                    let point = local_point(&c, e.client_x(), e.client_y());
                    d.dispatch(CanvasAction::PointerMove { point });
                }));
                let d = driver.clone();
                listeners.push(EventListener::new(&container, "mouseleave", move |_event: &Event| {
                    if !matches!(d.state.borrow().session(), InputSession::Idle) {
                        d.dispatch(CanvasAction::PointerUp);
                    }
                }));
                let d = driver.clone();
                let c = container.clone();
                listeners.push(EventListener::new_with_options(
                    &container,
                    "wheel",
                    options,
                    move |event: &Event| {
                        let Some(e) = event.dyn_ref::<WheelEvent>() else {
                            return;
                        };
                        let input = WheelInput {
                            point: local_point(&c, e.client_x(), e.client_y()),
                            delta_x: e.delta_x(),
                            delta_y: e.delta_y(),
                            mode: WheelMode::from_dom(e.delta_mode()),
                            zoom_modifier: e.ctrl_key() || e.meta_key(),
                            over_scroll_region: closest(event, ".custom-scroll").is_some(),
                        };
                        let outcome = d.state.borrow_mut().wheel(&input);
                        if outcome != WheelOutcome::Passthrough {
                            event.prevent_default();
                            d.redraw.force_update();
                        }
                    },
                ));
                let d = driver.clone();
                let c = container.clone();
                listeners.push(EventListener::new_with_options(
                    &container,
                    "touchstart",
                    options,
                    move |event: &Event| {
                        let Some(e) = event.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        let touches = touch_points(&c, &e.touches());
                        let target = press_target(event);
                        if target.claims_touch(touches.len()) {
                            event.prevent_default();
                        }
                        if touches.len() >= 2 {
                            d.dispatch(CanvasAction::TouchStart { touches });
                            return;
                        }
                        let Some(first) = touches.first().copied() else {
                            return;
                        };
                        match target {
                            PressTarget::Inert => {}
                            PressTarget::Handle(id) => d.dispatch(CanvasAction::PointerDown {
                                point: first,
                                node: Some(id),
                            }),
                            PressTarget::Background => {
                                d.dispatch(CanvasAction::TouchStart { touches })
                            }
                        }
                    },
                ));
                let d = driver.clone();
                let c = container.clone();
                listeners.push(EventListener::new_with_options(
                    &container,
                    "touchmove",
                    options,
                    move |event: &Event| {
                        let Some(e) = event.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        if matches!(d.state.borrow().session(), InputSession::Idle) {
                            return;
                        }
                        event.prevent_default();
                        let touches = touch_points(&c, &e.touches());
                        d.dispatch(CanvasAction::TouchMove { touches });
                    },
                ));
                let d = driver.clone();
                listeners.push(EventListener::new(&container, "touchend", move |event: &Event| {
                    let Some(e) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    let remaining = e.touches().length() as usize;
                    d.dispatch(CanvasAction::TouchEnd { remaining });
                }));
                let d = driver.clone();
                listeners.push(EventListener::new(&container, "touchcancel", move |_event: &Event| {
                    d.dispatch(CanvasAction::TouchCancel);
                }));
            } else {
                clog("canvas container missing; input disabled");
            }
            if let Some(window) = web_sys::window() {
                let d = driver.clone();
                listeners.push(EventListener::new(&window, "mouseup", move |_event: &Event| {
                    if !matches!(d.state.borrow().session(), InputSession::Idle) {
                        d.dispatch(CanvasAction::PointerUp);
                    }
                }));
                let d = driver.clone();
                listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
                    d.dispatch(CanvasAction::Resize(window_viewport()));
                }));
            }
            let alive = driver.alive.clone();
            move || {
                alive.set(false);
                drop(listeners);
            }
        });
    }

    // Programmatic navigation; re-run once the tour completes
    let boot_complete = state.borrow().boot().is_complete();
    {
        let driver = driver.clone();
        use_effect_with((props.target.clone(), boot_complete), move |(target, _)| {
            if let Some(req) = target {
                driver.dispatch(CanvasAction::FlyTo {
                    id: req.id.clone(),
                    jitter: sample_jitter(),
                });
            }
            || ()
        });
    }

    let on_focus = {
        let driver = driver.clone();
        Callback::from(move |id: String| driver.dispatch(CanvasAction::Focus(id)))
    };
    let on_open = {
        let driver = driver.clone();
        Callback::from(move |id: String| {
            driver.dispatch(CanvasAction::Open {
                id,
                jitter: sample_jitter(),
            })
        })
    };
    let on_close = {
        let driver = driver.clone();
        Callback::from(move |id: String| driver.dispatch(CanvasAction::Close(id)))
    };
    let on_maximize = {
        let driver = driver.clone();
        Callback::from(move |(id, origin): (String, Rect)| {
            driver.dispatch(CanvasAction::Maximize {
                id,
                origin,
                jitter: sample_jitter(),
            })
        })
    };
    let on_restore = {
        let driver = driver.clone();
        Callback::from(move |_| driver.dispatch(CanvasAction::Restore))
    };
    let on_zoom_in = {
        let driver = driver.clone();
        Callback::from(move |_| driver.dispatch(CanvasAction::ZoomBy { factor: 1.2 }))
    };
    let on_zoom_out = {
        let driver = driver.clone();
        Callback::from(move |_| driver.dispatch(CanvasAction::ZoomBy { factor: 1.0 / 1.2 }))
    };
    let on_center = {
        let driver = driver.clone();
        Callback::from(move |_| driver.dispatch(CanvasAction::ResetView))
    };

    let snapshot = state.borrow();
    let camera = snapshot.camera();
    let launches: Vec<(String, String)> = snapshot
        .nodes()
        .iter()
        .filter(|n| n.hidden)
        .map(|n| (n.id.clone(), n.title.clone()))
        .collect();
    let windows = snapshot
        .node_views()
        .into_iter()
        .filter_map(|view| {
            let record = snapshot.node(&view.id)?.clone();
            let launches = if record.kind == NodeKind::ProjectHub {
                launches.clone()
            } else {
                Vec::new()
            };
            let key = view.id.clone();
            Some(html! {
                <NodeWindow
                    key={key}
                    record={record}
                    view={view}
                    launches={launches}
                    on_focus={on_focus.clone()}
                    on_open={on_open.clone()}
                    on_close={on_close.clone()}
                    on_maximize={on_maximize.clone()}
                />
            })
        })
        .collect::<Html>();
    let overlay = match snapshot.maximized() {
        Some((record, entry)) => {
            let close_id = record.id.clone();
            let on_close = on_close.clone();
            let launches = if record.kind == NodeKind::ProjectHub {
                launches.clone()
            } else {
                Vec::new()
            };
            html! {
                <FullScreenView
                    key={record.id.clone()}
                    record={record.clone()}
                    origin={entry.origin}
                    launches={launches}
                    on_restore={on_restore.clone()}
                    on_close={Callback::from(move |_| on_close.emit(close_id.clone()))}
                    on_maximize={on_maximize.clone()}
                />
            }
        }
        None => html! {},
    };
    let world_transition = if snapshot.is_animating() {
        "transition:transform 500ms cubic-bezier(0.25, 1, 0.5, 1);"
    } else {
        ""
    };
    let world_style = format!(
        "position:absolute; left:0; top:0; transform-origin:0 0; will-change:transform; transform:{}; {}",
        snapshot.world_transform(),
        world_transition
    );
    let grid_style = format!(
        "position:absolute; inset:0; pointer-events:none; opacity:0.4; background-image:radial-gradient(#30363d 1px, transparent 1px); background-position:{}px {}px; background-size:{}px {}px;",
        camera.x,
        camera.y,
        24.0 * camera.scale,
        24.0 * camera.scale
    );
    let boot_label = snapshot.boot().current_label();
    let controls_visible = snapshot.input_enabled();
    drop(snapshot);

    html! {
        <div
            ref={container_ref}
            style="position:relative; width:100%; height:100%; overflow:hidden; background:#0e1116; cursor:grab; touch-action:none;"
        >
            <div style={grid_style}></div>
            <div style={world_style}>
                { windows }
            </div>
            <IntroOverlay label={boot_label} />
            if controls_visible {
                <CameraControls
                    on_zoom_in={on_zoom_in}
                    on_zoom_out={on_zoom_out}
                    on_center={on_center}
                />
            }
            { overlay }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::PressTarget;

    #[test]
    fn handle_and_background_taps_claim_the_touch() {
        assert!(PressTarget::Handle("hero".into()).claims_touch(1));
        assert!(PressTarget::Background.claims_touch(1));
    }

    #[test]
    fn inert_taps_keep_native_behaviour_until_pinching() {
        assert!(!PressTarget::Inert.claims_touch(1));
        assert!(PressTarget::Inert.claims_touch(2));
    }
}

use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent};
use yew::prelude::*;

use super::node_window::{launch_list, node_body};
use crate::model::{NodeRecord, Rect};

const TRANSITION_MS: u32 = 300;

#[derive(Properties, PartialEq, Clone)]
pub struct FullScreenViewProps {
    pub record: NodeRecord,
    /// Screen rectangle of the windowed form; the overlay grows out of it.
    pub origin: Rect,
    /// (id, title) of hidden nodes a hub can promote over itself.
    #[prop_or_default]
    pub launches: Vec<(String, String)>,
    pub on_restore: Callback<()>,
    pub on_close: Callback<()>,
    pub on_maximize: Callback<(String, Rect)>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Entering,
    Shown,
    Collapsing,
    Fading,
}

#[function_component(FullScreenView)]
pub fn full_screen_view(props: &FullScreenViewProps) -> Html {
    let phase = use_state(|| Phase::Entering);

    // Let the origin rect paint once before expanding
    {
        let phase = phase.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                TimeoutFuture::new(0).await;
                phase.set(Phase::Shown);
            });
            || ()
        });
    }

    // Listeners may hold a stale `phase`; this flag is shared across renders.
    let leaving = use_mut_ref(|| false);
    let leave = {
        let phase = phase.clone();
        let on_restore = props.on_restore.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |next: Phase| {
            if std::mem::replace(&mut *leaving.borrow_mut(), true) {
                return;
            }
            phase.set(next);
            let cb = if next == Phase::Collapsing {
                on_restore.clone()
            } else {
                on_close.clone()
            };
            yew::platform::spawn_local(async move {
                TimeoutFuture::new(TRANSITION_MS).await;
                cb.emit(());
            });
        })
    };

    // Escape closes (permanent nodes just collapse back)
    {
        let leave = leave.clone();
        let permanent = props.record.is_permanent();
        use_effect_with(permanent, move |permanent| {
            let permanent = *permanent;
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "keydown", move |event: &Event| {
                    let is_escape = event
                        .dyn_ref::<KeyboardEvent>()
                        .is_some_and(|e| e.key() == "Escape");
                    if is_escape {
                        leave.emit(if permanent { Phase::Collapsing } else { Phase::Fading });
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_restore_click = {
        let leave = leave.clone();
        Callback::from(move |_: MouseEvent| leave.emit(Phase::Collapsing))
    };
    let on_close_click = {
        let leave = leave.clone();
        let permanent = props.record.is_permanent();
        Callback::from(move |_: MouseEvent| {
            leave.emit(if permanent { Phase::Collapsing } else { Phase::Fading })
        })
    };

    let o = props.origin;
    let frame = match *phase {
        Phase::Shown | Phase::Fading => "top:0; left:0; width:100%; height:100%; border-radius:0;".to_string(),
        Phase::Entering | Phase::Collapsing => format!(
            "top:{}px; left:{}px; width:{}px; height:{}px; border-radius:10px;",
            o.top, o.left, o.width, o.height
        ),
    };
    let opacity = if *phase == Phase::Fading { 0.0 } else { 1.0 };
    let style = format!(
        "position:fixed; {frame} opacity:{opacity}; z-index:2000; overflow:hidden; background:rgba(14,17,22,0.98); color:#c9d1d9; transition:top {TRANSITION_MS}ms ease, left {TRANSITION_MS}ms ease, width {TRANSITION_MS}ms ease, height {TRANSITION_MS}ms ease, opacity {TRANSITION_MS}ms ease; display:flex; flex-direction:column;"
    );

    html! {
        <div data-no-drag="true" style={style}>
            <div style="display:flex; justify-content:space-between; align-items:center; padding:10px 16px; border-bottom:1px solid #30363d;">
                <span style="font-family:monospace;">
                    <span style="opacity:0.6;">{ format!("{} / ", props.record.kind.label()) }</span>
                    { props.record.title.clone() }
                </span>
                <span style="display:flex; gap:8px;">
                    <button title="Restore" onclick={on_restore_click}>{ "❐" }</button>
                    <button title="Close" onclick={on_close_click}>{ "×" }</button>
                </span>
            </div>
            <div class="custom-scroll" style="flex:1; overflow:auto; padding:24px; max-width:960px; width:100%; margin:0 auto; box-sizing:border-box;">
                { node_body(&props.record) }
                { launch_list(&props.launches, None, &props.on_maximize) }
            </div>
        </div>
    }
}

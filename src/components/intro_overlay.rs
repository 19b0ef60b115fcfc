use yew::prelude::*;

use crate::state::boot::TOUR;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    /// Label of the waypoint being scanned; `None` hides the overlay.
    pub label: Option<&'static str>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    let Some(label) = props.label else {
        return html! {};
    };
    let step = TOUR
        .iter()
        .position(|w| w.label == label)
        .map(|i| i + 1)
        .unwrap_or(TOUR.len());
    html! {
        <div style="position:absolute; top:24px; left:50%; transform:translateX(-50%); background:rgba(0,0,0,0.87); border:1px solid #30363d; padding:10px 22px; border-radius:10px; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-family:monospace; font-size:13px; letter-spacing:0.08em; color:#58a6ff; pointer-events:none; z-index:1000;">
            <span style="opacity:0.6;">{ format!("SCANNING [{step}/{}] ", TOUR.len()) }</span>
            <span>{ label }</span>
        </div>
    }
}

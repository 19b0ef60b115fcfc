use std::rc::Rc;

use super::canvas_view::{NavRequest, SpatialCanvas};
use super::dock::Dock;
use crate::config::CanvasConfig;
use crate::model::portfolio_nodes;
use crate::util::{clog, session_flag, set_session_flag};
use yew::prelude::*;

/// Set once the boot tour has played (or been skipped) in this tab.
pub const INTRO_PLAYED_KEY: &str = "portfolio.introPlayed";

#[function_component(App)]
pub fn app() -> Html {
    let nodes = use_memo((), |_| portfolio_nodes());
    let config = use_memo((), |_| CanvasConfig::load_or_default());
    let play_intro = *use_memo((), |_| !session_flag(INTRO_PLAYED_KEY));
    let target = use_state(|| None::<NavRequest>);
    let seq = use_mut_ref(|| 0u32);

    let on_navigate = {
        let target = target.clone();
        Callback::from(move |id: String| {
            let mut next = seq.borrow_mut();
            *next += 1;
            clog(&format!("navigate {id}"));
            target.set(Some(NavRequest { id, seq: *next }));
        })
    };
    let on_intro_complete = Callback::from(|_| set_session_flag(INTRO_PLAYED_KEY));

    let active = (*target).as_ref().map(|t| t.id.clone());
    html! {
        <div style="position:fixed; inset:0; font-family:system-ui, sans-serif; color:#c9d1d9; background:#0e1116;">
            <SpatialCanvas
                nodes={Rc::clone(&nodes)}
                config={Rc::clone(&config)}
                target={(*target).clone()}
                play_intro={play_intro}
                on_navigate={on_navigate.clone()}
                on_intro_complete={on_intro_complete}
            />
            <Dock nodes={nodes} active={active} on_select={on_navigate} />
        </div>
    }
}

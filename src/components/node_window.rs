use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use crate::model::{MediaKind, NodeRecord, Rect};
use crate::state::NodeView;

#[derive(Properties, PartialEq, Clone)]
pub struct NodeWindowProps {
    pub record: NodeRecord,
    pub view: NodeView,
    /// (id, title) of windows this one can launch; only hubs get any.
    #[prop_or_default]
    pub launches: Vec<(String, String)>,
    pub on_focus: Callback<String>,
    pub on_open: Callback<String>,
    pub on_close: Callback<String>,
    pub on_maximize: Callback<(String, Rect)>,
}

/// Body shared by the windowed and full-screen forms.
pub fn node_body(record: &NodeRecord) -> Html {
    let lines = record
        .content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| match line.strip_prefix("# ") {
            Some(heading) => html! { <h3 style="margin:8px 0 4px 0; color:#58a6ff;">{ heading.to_string() }</h3> },
            None => match line.strip_prefix("- ") {
                Some(item) => html! { <div style="padding-left:12px;">{ format!("• {item}") }</div> },
                None => html! { <p style="margin:4px 0;">{ line.to_string() }</p> },
            },
        })
        .collect::<Html>();
    let media = match &record.media {
        Some(m) if m.kind == MediaKind::Image => html! {
            <img src={m.url.clone()} alt={m.caption.clone().unwrap_or_default()} style="max-width:100%; border-radius:6px;" />
        },
        Some(m) => html! {
            <a href={m.url.clone()} target="_blank" rel="noopener">{ m.caption.clone().unwrap_or_else(|| m.url.clone()) }</a>
        },
        None => html! {},
    };
    let tags = record
        .tags
        .iter()
        .map(|t| html! { <span style="border:1px solid #30363d; border-radius:4px; padding:1px 6px; font-size:11px;">{ t.clone() }</span> })
        .collect::<Html>();
    let links = record
        .links
        .iter()
        .map(|l| html! { <a href={l.url.clone()} target="_blank" rel="noopener" style="color:#58a6ff;">{ l.label.clone() }</a> })
        .collect::<Html>();
    html! {
        <>
            { media }
            { lines }
            if !record.tags.is_empty() {
                <div style="display:flex; flex-wrap:wrap; gap:4px; margin-top:8px;">{ tags }</div>
            }
            if !record.links.is_empty() {
                <div style="display:flex; gap:12px; margin-top:8px;">{ links }</div>
            }
        </>
    }
}

/// Launch entries for hidden nodes. Each can open in place (windowed form only)
/// or go straight to full screen, growing out of the clicked button.
pub fn launch_list(
    launches: &[(String, String)],
    on_open: Option<&Callback<String>>,
    on_maximize: &Callback<(String, Rect)>,
) -> Html {
    if launches.is_empty() {
        return html! {};
    }
    let items = launches
        .iter()
        .map(|(id, title)| {
            let open = on_open.map(|cb| {
                let cb = cb.clone();
                let id = id.clone();
                Callback::from(move |e: MouseEvent| {
                    e.stop_propagation();
                    cb.emit(id.clone())
                })
            });
            let maximize = {
                let cb = on_maximize.clone();
                let id = id.clone();
                Callback::from(move |e: MouseEvent| {
                    e.stop_propagation();
                    let rect = e
                        .target_dyn_into::<Element>()
                        .map(|el| {
                            let r = el.get_bounding_client_rect();
                            Rect::new(r.left(), r.top(), r.width(), r.height())
                        })
                        .unwrap_or_default();
                    cb.emit((id.clone(), rect))
                })
            };
            html! {
                <li style="display:flex; gap:4px;">
                    if let Some(onclick) = open {
                        <button {onclick} style="flex:1; text-align:left;">{ title.clone() }</button>
                    } else {
                        <span style="flex:1;">{ title.clone() }</span>
                    }
                    <button title="Open full screen" onclick={maximize}>{ "□" }</button>
                </li>
            }
        })
        .collect::<Html>();
    html! {
        <ul style="list-style:none; margin:8px 0 0 0; padding:0; display:flex; flex-direction:column; gap:4px;">
            { items }
        </ul>
    }
}

fn client_rect(node: &NodeRef) -> Rect {
    node.cast::<HtmlElement>()
        .map(|el| {
            let r = el.get_bounding_client_rect();
            Rect::new(r.left(), r.top(), r.width(), r.height())
        })
        .unwrap_or_default()
}

#[function_component(NodeWindow)]
pub fn node_window(props: &NodeWindowProps) -> Html {
    let root = use_node_ref();
    let view = &props.view;
    let id = props.record.id.clone();

    let on_focus = {
        let cb = props.on_focus.clone();
        let id = id.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id.clone()))
    };
    let on_close = {
        let cb = props.on_close.clone();
        let id = id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(id.clone())
        })
    };
    let on_maximize = {
        let cb = props.on_maximize.clone();
        let id = id.clone();
        let root = root.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit((id.clone(), client_rect(&root)))
        })
    };
    let launches = launch_list(&props.launches, Some(&props.on_open), &props.on_maximize);

    let width = props.record.width.unwrap_or(400.0);
    let opacity = if !view.is_visible || view.is_closing || view.is_maximized {
        0.0
    } else {
        1.0
    };
    let border = if view.is_active { "#58a6ff" } else { "#30363d" };
    // No transition while dragging so the window tracks the pointer.
    let transition = if view.is_dragging {
        "none"
    } else if view.is_restoring {
        "opacity 100ms ease-out"
    } else {
        "opacity 300ms ease-out, box-shadow 200ms"
    };
    let pointer_events = if opacity == 0.0 { "none" } else { "auto" };
    let style = format!(
        "position:absolute; left:{}px; top:{}px; width:{}px; z-index:{}; opacity:{}; transition:{}; pointer-events:{}; background:rgba(22,27,34,0.95); border:1px solid {}; border-radius:10px; color:#c9d1d9; box-shadow:0 6px 18px rgba(0,0,0,0.6);",
        view.position.x, view.position.y, width, view.z_index, opacity, transition, pointer_events, border
    );

    html! {
        <div ref={root} style={style} onclick={on_focus}>
            <div
                data-drag-handle="true"
                data-node-id={id.clone()}
                style="display:flex; justify-content:space-between; align-items:center; padding:8px 12px; border-bottom:1px solid #30363d; cursor:move; user-select:none;"
            >
                <span style="font-family:monospace; font-size:12px;">
                    <span style="opacity:0.6;">{ format!("{} / ", props.record.kind.label()) }</span>
                    { props.record.title.clone() }
                </span>
                <span data-no-drag="true" style="display:flex; gap:6px;">
                    if !props.record.is_permanent() {
                        <button title="Close" onclick={on_close}>{ "×" }</button>
                    }
                    <button title="Maximize" onclick={on_maximize}>{ "□" }</button>
                </span>
            </div>
            <div data-no-drag="true" class="custom-scroll" style="padding:12px; max-height:420px; overflow:auto; font-size:14px; line-height:1.4;">
                { node_body(&props.record) }
                { launches }
            </div>
        </div>
    }
}

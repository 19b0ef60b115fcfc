use std::rc::Rc;

use yew::prelude::*;

use crate::model::NodeRecord;

#[derive(Properties, PartialEq, Clone)]
pub struct DockProps {
    pub nodes: Rc<Vec<NodeRecord>>,
    pub active: Option<String>,
    pub on_select: Callback<String>,
}

/// Quick navigation to every permanent node.
#[function_component(Dock)]
pub fn dock(props: &DockProps) -> Html {
    let items = props
        .nodes
        .iter()
        .filter(|n| n.is_permanent())
        .map(|n| {
            let cb = props.on_select.clone();
            let id = n.id.clone();
            let onclick = Callback::from(move |_| cb.emit(id.clone()));
            let active = props.active.as_deref() == Some(n.id.as_str());
            let style = if active {
                "background:#1f6feb; color:#fff; border:1px solid #58a6ff;"
            } else {
                "background:transparent; color:#c9d1d9; border:1px solid #30363d;"
            };
            html! {
                <button {onclick} style={format!("{style} border-radius:6px; padding:4px 10px; font-size:12px;")}>
                    { n.title.clone() }
                </button>
            }
        })
        .collect::<Html>();
    html! {
        <div style="position:absolute; left:50%; bottom:12px; transform:translateX(-50%); display:flex; gap:6px; padding:6px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:10px; z-index:900;">
            { items }
        </div>
    }
}

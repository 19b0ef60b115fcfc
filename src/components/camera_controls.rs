use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_center: Callback<()>,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cc = {
        let cb = props.on_center.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div data-no-drag="true" style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center; z-index:900;">
        <button title="Zoom out" onclick={zo}> {"-"} </button>
        <button title="Zoom in" onclick={zi}> {"+"} </button>
        <span style="width:8px;"></span>
        <button title="Fit all" onclick={cc}> {"Center"} </button>
    </div>}
}

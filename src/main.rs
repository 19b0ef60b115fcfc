use spatial_portfolio::components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}

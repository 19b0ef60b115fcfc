pub mod app;
pub mod camera_controls;
pub mod canvas_view;
pub mod dock;
pub mod full_screen_view;
pub mod intro_overlay;
pub mod node_window;

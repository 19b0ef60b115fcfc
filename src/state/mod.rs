pub mod boot;
pub mod camera;
pub mod canvas;
pub mod fly_to;
pub mod input;
pub mod positions;
pub mod touch;
pub mod windows;
pub mod zorder;

pub use boot::{BootPhase, BootState, TourCursor, Viewport, ViewportClass};
pub use camera::CameraPose;
pub use canvas::{CanvasAction, CanvasSignal, CanvasState, Jitter, NodeView};
pub use input::{InputSession, WheelInput, WheelMode, WheelOutcome};
pub use touch::PinchState;
pub use windows::{MaximizedEntry, NodeLifecycle, WindowManager};
pub use zorder::ZOrder;

//! Pointer, touch and wheel session tracking.
//!
//! At most one session is live at a time. A node drag only starts moving the
//! node once the pointer has travelled past the drag threshold on either axis;
//! a session released before that point is a click on the node.

use super::camera::CameraPose;
use super::touch::PinchState;
use crate::config::CanvasConfig;
use crate::model::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum DragTarget {
    Camera { origin: Point },
    Node { id: String, origin: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub target: DragTarget,
    pub start: Point,
    pub moved: bool,
}

impl DragState {
    pub fn camera(start: Point, camera: &CameraPose) -> Self {
        Self {
            target: DragTarget::Camera {
                origin: Point::new(camera.x, camera.y),
            },
            start,
            moved: false,
        }
    }

    pub fn node(id: &str, start: Point, origin: Point) -> Self {
        Self {
            target: DragTarget::Node {
                id: id.to_string(),
                origin,
            },
            start,
            moved: false,
        }
    }

    /// Screen delta from the session start; latches `moved` past the threshold.
    pub fn track(&mut self, pointer: Point, threshold: f64) -> (f64, f64) {
        let dx = pointer.x - self.start.x;
        let dy = pointer.y - self.start.y;
        if dx.abs() > threshold || dy.abs() > threshold {
            self.moved = true;
        }
        (dx, dy)
    }

    pub fn node_id(&self) -> Option<&str> {
        match &self.target {
            DragTarget::Node { id, .. } => Some(id),
            DragTarget::Camera { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputSession {
    #[default]
    Idle,
    Drag(DragState),
    Pinch(PinchState),
}

impl InputSession {
    pub fn dragging_node(&self) -> Option<&str> {
        match self {
            InputSession::Drag(drag) => drag.node_id(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelMode {
    Pixel,
    Line,
    Page,
}

impl WheelMode {
    /// Maps `WheelEvent.deltaMode`.
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            0 => WheelMode::Pixel,
            1 => WheelMode::Line,
            _ => WheelMode::Page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub point: Point,
    pub delta_x: f64,
    pub delta_y: f64,
    pub mode: WheelMode,
    /// ctrl or meta held (also set by browsers for trackpad pinch).
    pub zoom_modifier: bool,
    /// Pointer is over an independently scrollable region.
    pub over_scroll_region: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Not intercepted; native scrolling takes over.
    Passthrough,
    Zoomed,
    Panned,
}

pub fn apply_wheel(camera: &mut CameraPose, input: &WheelInput, cfg: &CanvasConfig) -> WheelOutcome {
    if input.zoom_modifier {
        let sensitivity = match input.mode {
            WheelMode::Pixel => cfg.wheel_pixel_sensitivity,
            WheelMode::Line | WheelMode::Page => cfg.wheel_line_sensitivity,
        };
        let delta = -input.delta_y * sensitivity;
        if !delta.is_finite() {
            return WheelOutcome::Zoomed;
        }
        camera.zoom_at(input.point, camera.scale + delta, cfg);
        return WheelOutcome::Zoomed;
    }
    if input.over_scroll_region {
        return WheelOutcome::Passthrough;
    }
    if input.delta_x.is_finite() && input.delta_y.is_finite() {
        camera.pan_by(-input.delta_x, -input.delta_y);
    }
    WheelOutcome::Panned
}

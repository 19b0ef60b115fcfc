//! The canvas core: camera, input sessions, node side tables, boot tour and
//! window manager behind a single action entry point.
//!
//! `CanvasState::apply` mutates in place and returns the side effects the host
//! has to carry out (navigation callbacks, intro completion, delayed follow-up
//! actions). The core never reads a clock or a random source itself.

use super::boot::{self, BootPhase, BootState, TourCursor, Viewport, TOUR};
use super::camera::CameraPose;
use super::fly_to::fly_to_pose;
use super::input::{apply_wheel, DragState, DragTarget, InputSession, WheelInput, WheelOutcome};
use super::positions::NodePositions;
use super::touch::PinchState;
use super::windows::{CloseOutcome, MaximizedEntry, OpenOutcome, WindowManager};
use super::zorder::ZOrder;
use crate::config::CanvasConfig;
use crate::model::{NodeRecord, Point, Rect, PROJECTS_HUB_ID};
use crate::util::clog;

/// Uniform samples in `[0, 1]` used to scatter a freshly spawned window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    pub u: f64,
    pub v: f64,
}

impl Jitter {
    pub fn new(u: f64, v: f64) -> Self {
        let unit = |s: f64| if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.5 };
        Self { u: unit(u), v: unit(v) }
    }

    pub fn offset(&self, cfg: &CanvasConfig) -> Point {
        let span = cfg.jitter_max - cfg.jitter_min;
        Point::new(cfg.jitter_min + self.u * span, cfg.jitter_min + self.v * span)
    }
}

fn find<'a>(nodes: &'a [NodeRecord], id: &str) -> Option<&'a NodeRecord> {
    nodes.iter().find(|n| n.id == id)
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    Mount { viewport: Viewport, play_intro: bool },
    Resize(Viewport),
    BootAdvance,
    PointerDown { point: Point, node: Option<String> },
    PointerMove { point: Point },
    PointerUp,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd { remaining: usize },
    TouchCancel,
    Wheel(WheelInput),
    ZoomBy { factor: f64 },
    ResetView,
    Focus(String),
    Open { id: String, jitter: Jitter },
    Close(String),
    FinishClose { id: String, generation: u64 },
    Maximize { id: String, origin: Rect, jitter: Jitter },
    Restore,
    ClearRestoring(String),
    FlyTo { id: String, jitter: Jitter },
    AnimationEnd { seq: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasSignal {
    Navigate(String),
    IntroComplete,
    /// Apply `action` once `delay_ms` has elapsed.
    Schedule { delay_ms: u32, action: CanvasAction },
}

/// Per-node render props.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub id: String,
    pub position: Point,
    pub z_index: u32,
    pub is_active: bool,
    pub is_maximized: bool,
    pub is_visible: bool,
    pub is_closing: bool,
    pub is_dragging: bool,
    pub is_restoring: bool,
}

#[derive(Debug, Clone)]
pub struct CanvasState {
    cfg: CanvasConfig,
    nodes: Vec<NodeRecord>,
    viewport: Viewport,
    camera: CameraPose,
    positions: NodePositions,
    zorder: ZOrder,
    windows: WindowManager,
    boot: BootState,
    session: InputSession,
    animating: bool,
    animation_seq: u64,
    intro_signalled: bool,
}

impl CanvasState {
    pub fn new(nodes: Vec<NodeRecord>, cfg: CanvasConfig) -> Self {
        Self {
            positions: NodePositions::seeded(&nodes),
            cfg,
            nodes,
            viewport: Viewport::default(),
            camera: CameraPose::default(),
            zorder: ZOrder::default(),
            windows: WindowManager::default(),
            boot: BootState::default(),
            session: InputSession::Idle,
            animating: false,
            animation_seq: 0,
            intro_signalled: false,
        }
    }

    pub fn apply(&mut self, action: CanvasAction) -> Vec<CanvasSignal> {
        let mut out = Vec::new();
        match action {
            CanvasAction::Mount { viewport, play_intro } => self.mount(viewport, play_intro, &mut out),
            CanvasAction::Resize(viewport) => self.viewport = viewport,
            CanvasAction::BootAdvance => self.boot_advance(&mut out),
            CanvasAction::PointerDown { point, node } => self.pointer_down(point, node.as_deref()),
            CanvasAction::PointerMove { point } => self.pointer_move(point),
            CanvasAction::PointerUp => self.pointer_up(&mut out),
            CanvasAction::TouchStart { touches } => self.touch_start(&touches),
            CanvasAction::TouchMove { touches } => self.touch_move(&touches),
            CanvasAction::TouchEnd { remaining } => {
                if matches!(self.session, InputSession::Pinch(_)) && remaining < 2 {
                    self.session = InputSession::Idle;
                }
                if remaining == 0 {
                    self.pointer_up(&mut out);
                }
            }
            CanvasAction::TouchCancel => self.pointer_up(&mut out),
            CanvasAction::Wheel(input) => {
                self.wheel(&input);
            }
            CanvasAction::ZoomBy { factor } => {
                if self.input_enabled() && factor.is_finite() && factor > 0.0 {
                    let centre = Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
                    self.camera.zoom_at(centre, self.camera.scale * factor, &self.cfg);
                }
            }
            CanvasAction::ResetView => {
                if self.input_enabled() {
                    self.camera = boot::resting_pose(&self.nodes, self.viewport, &self.cfg);
                    self.start_animation(&mut out);
                }
            }
            CanvasAction::Focus(id) => self.focus(&id),
            CanvasAction::Open { id, jitter } => self.open(&id, jitter),
            CanvasAction::Close(id) => self.close(&id, &mut out),
            CanvasAction::FinishClose { id, generation } => {
                if self.windows.finish_close(&id, generation) {
                    clog(&format!("closed {id}"));
                }
            }
            CanvasAction::Maximize { id, origin, jitter } => self.maximize(&id, origin, jitter),
            CanvasAction::Restore => {
                if let Some(id) = self.windows.restore() {
                    clog(&format!("restore {id}"));
                    out.push(CanvasSignal::Schedule {
                        delay_ms: self.cfg.restore_flag_ms,
                        action: CanvasAction::ClearRestoring(id),
                    });
                }
            }
            CanvasAction::ClearRestoring(id) => self.windows.clear_restoring(&id),
            CanvasAction::FlyTo { id, jitter } => self.fly_to(&id, jitter, &mut out),
            CanvasAction::AnimationEnd { seq } => {
                if seq == self.animation_seq {
                    self.animating = false;
                }
            }
        }
        out
    }

    // ---------------- Boot -----------------

    fn mount(&mut self, viewport: Viewport, play_intro: bool, out: &mut Vec<CanvasSignal>) {
        if self.boot.phase != BootPhase::Idle {
            return;
        }
        self.viewport = viewport;
        self.boot.resting = boot::resting_pose(&self.nodes, viewport, &self.cfg);
        if !play_intro {
            self.camera = self.boot.resting;
            self.complete_boot(out);
            return;
        }
        clog("boot: scanning");
        self.animating = true;
        self.boot.booted.clear();
        self.boot.phase = BootPhase::Scanning(TourCursor::Waypoint(0));
        self.visit_waypoint(0);
        out.push(self.boot_timer(self.cfg.boot_step_ms));
    }

    fn boot_advance(&mut self, out: &mut Vec<CanvasSignal>) {
        match self.boot.phase {
            BootPhase::Scanning(TourCursor::Waypoint(i)) if i + 1 < TOUR.len() => {
                self.boot.phase = BootPhase::Scanning(TourCursor::Waypoint(i + 1));
                self.visit_waypoint(i + 1);
                out.push(self.boot_timer(self.cfg.boot_step_ms));
            }
            BootPhase::Scanning(TourCursor::Waypoint(_)) => {
                self.boot.phase = BootPhase::Scanning(TourCursor::Resting);
                self.camera = self.boot.resting;
                out.push(self.boot_timer(self.cfg.boot_settle_ms));
            }
            BootPhase::Scanning(TourCursor::Resting) => {
                self.animating = false;
                self.complete_boot(out);
            }
            BootPhase::Idle | BootPhase::Complete => {}
        }
    }

    fn visit_waypoint(&mut self, index: usize) {
        let Some(waypoint) = TOUR.get(index) else {
            return;
        };
        self.boot.booted.insert(waypoint.id.to_string());
        if let Some(node) = find(&self.nodes, waypoint.id) {
            self.camera = boot::tour_pose(node, self.viewport, &self.cfg);
            self.zorder.focus(waypoint.id);
        }
    }

    fn boot_timer(&self, delay_ms: u32) -> CanvasSignal {
        CanvasSignal::Schedule {
            delay_ms,
            action: CanvasAction::BootAdvance,
        }
    }

    fn complete_boot(&mut self, out: &mut Vec<CanvasSignal>) {
        self.boot.phase = BootPhase::Complete;
        if !self.intro_signalled {
            self.intro_signalled = true;
            clog("boot: complete");
            out.push(CanvasSignal::IntroComplete);
        }
    }

    // ---------------- Input -----------------

    /// Pan/zoom/drag are off during the tour and while anything is full-screen.
    pub fn input_enabled(&self) -> bool {
        !self.boot.is_scanning() && self.windows.current().is_none()
    }

    fn pointer_down(&mut self, point: Point, node: Option<&str>) {
        if !self.input_enabled() {
            return;
        }
        self.animating = false;
        match node.and_then(|id| find(&self.nodes, id)) {
            Some(record) => {
                let id = record.id.clone();
                let origin = self.positions.resolve(record);
                self.zorder.focus(&id);
                self.session = InputSession::Drag(DragState::node(&id, point, origin));
            }
            None => {
                self.session = InputSession::Drag(DragState::camera(point, &self.camera));
            }
        }
    }

    fn pointer_move(&mut self, point: Point) {
        let InputSession::Drag(drag) = &mut self.session else {
            return;
        };
        let (dx, dy) = drag.track(point, self.cfg.drag_threshold);
        match &drag.target {
            DragTarget::Camera { origin } => {
                self.camera.x = origin.x + dx;
                self.camera.y = origin.y + dy;
            }
            DragTarget::Node { id, origin } => {
                if drag.moved {
                    let scale = self.camera.scale;
                    let next = Point::new(origin.x + dx / scale, origin.y + dy / scale);
                    self.positions.set(id, next);
                }
            }
        }
    }

    fn pointer_up(&mut self, out: &mut Vec<CanvasSignal>) {
        if let InputSession::Drag(drag) = std::mem::take(&mut self.session) {
            if let (Some(id), false) = (drag.node_id(), drag.moved) {
                out.push(CanvasSignal::Navigate(id.to_string()));
            }
        }
    }

    fn touch_start(&mut self, touches: &[Point]) {
        if !self.input_enabled() {
            return;
        }
        match touches {
            [a, b, ..] => {
                self.session = InputSession::Pinch(PinchState::begin(*a, *b, self.camera.scale));
            }
            [single] => self.pointer_down(*single, None),
            [] => {}
        }
    }

    fn touch_move(&mut self, touches: &[Point]) {
        if !self.input_enabled() {
            return;
        }
        match touches {
            [a, b, ..] => {
                let InputSession::Pinch(pinch) = &self.session else {
                    return;
                };
                if let Some(scale) = pinch.target_scale(*a, *b, &self.cfg) {
                    self.camera.zoom_at(a.midpoint(*b), scale, &self.cfg);
                }
            }
            [single] => self.pointer_move(*single),
            [] => {}
        }
    }

    /// Applies a wheel event; the host uses the outcome to decide whether to
    /// cancel the browser default.
    pub fn wheel(&mut self, input: &WheelInput) -> WheelOutcome {
        if !self.input_enabled() {
            return WheelOutcome::Passthrough;
        }
        apply_wheel(&mut self.camera, input, &self.cfg)
    }

    // ---------------- Windows -----------------

    fn focus(&mut self, id: &str) {
        if self.node(id).is_some() {
            self.zorder.focus(id);
        }
    }

    fn open(&mut self, id: &str, jitter: Jitter) {
        let Some(node) = find(&self.nodes, id) else {
            return;
        };
        let outcome = self.windows.open(node);
        if outcome == OpenOutcome::FirstOpen {
            let anchor = self.hub_anchor();
            let offset = jitter.offset(&self.cfg);
            self.positions
                .set(id, Point::new(anchor.x + offset.x, anchor.y + offset.y));
        }
        if outcome != OpenOutcome::AlreadyOpen {
            clog(&format!("open {id}"));
        }
        self.zorder.focus(id);
    }

    fn hub_anchor(&self) -> Point {
        self.positions
            .get(PROJECTS_HUB_ID)
            .or_else(|| self.node(PROJECTS_HUB_ID).map(|n| n.position))
            .unwrap_or_default()
    }

    fn close(&mut self, id: &str, out: &mut Vec<CanvasSignal>) {
        let Some(node) = find(&self.nodes, id) else {
            return;
        };
        match self.windows.close(node) {
            CloseOutcome::Closing { generation } => {
                clog(&format!("closing {id}"));
                out.push(CanvasSignal::Schedule {
                    delay_ms: self.cfg.close_ms,
                    action: CanvasAction::FinishClose {
                        id: id.to_string(),
                        generation,
                    },
                });
            }
            CloseOutcome::Restored => {
                clog(&format!("restore {id}"));
                out.push(CanvasSignal::Schedule {
                    delay_ms: self.cfg.restore_flag_ms,
                    action: CanvasAction::ClearRestoring(id.to_string()),
                });
            }
            CloseOutcome::Minimized | CloseOutcome::Ignored => {}
        }
    }

    fn maximize(&mut self, id: &str, origin: Rect, jitter: Jitter) {
        if self.node(id).is_none() {
            return;
        }
        self.open(id, jitter);
        let origin = if origin.is_laid_out() {
            origin
        } else {
            Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
        };
        self.session = InputSession::Idle;
        self.windows.maximize(id, origin);
        clog(&format!("maximize {id}"));
    }

    fn fly_to(&mut self, id: &str, jitter: Jitter, out: &mut Vec<CanvasSignal>) {
        if self.boot.is_scanning() {
            return;
        }
        let Some(node) = find(&self.nodes, id) else {
            return;
        };
        if node.hidden && !self.windows.is_open(node) {
            self.open(id, jitter);
            return;
        }
        let position = self.positions.resolve(node);
        self.camera = fly_to_pose(node, position, self.viewport, &self.cfg);
        self.zorder.focus(id);
        self.start_animation(out);
    }

    fn start_animation(&mut self, out: &mut Vec<CanvasSignal>) {
        self.animating = true;
        self.animation_seq += 1;
        out.push(CanvasSignal::Schedule {
            delay_ms: self.cfg.fly_to_ms,
            action: CanvasAction::AnimationEnd {
                seq: self.animation_seq,
            },
        });
    }

    // ---------------- Queries -----------------

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        find(&self.nodes, id)
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.cfg
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn boot(&self) -> &BootState {
        &self.boot
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn zorder(&self) -> &ZOrder {
        &self.zorder
    }

    pub fn session(&self) -> &InputSession {
        &self.session
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// CSS transform for the world layer.
    pub fn world_transform(&self) -> String {
        self.camera.css_transform()
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id)
    }

    pub fn maximized(&self) -> Option<(&NodeRecord, &MaximizedEntry)> {
        let entry = self.windows.current()?;
        self.node(&entry.id).map(|node| (node, entry))
    }

    /// Nodes currently in the world, in authored order.
    pub fn node_views(&self) -> Vec<NodeView> {
        let dragging = self.session.dragging_node();
        self.nodes
            .iter()
            .filter(|n| self.windows.is_spawned(n))
            .map(|n| NodeView {
                id: n.id.clone(),
                position: self.positions.resolve(n),
                z_index: self.zorder.z_index(&n.id),
                is_active: self.zorder.is_active(&n.id),
                is_maximized: self.windows.is_current(&n.id),
                is_visible: self.boot.reveals(&n.id),
                is_closing: self.windows.is_closing(n),
                is_dragging: dragging == Some(n.id.as_str()),
                is_restoring: self.windows.is_restoring(&n.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::portfolio_nodes;

    fn mounted() -> CanvasState {
        let mut canvas = CanvasState::new(portfolio_nodes(), CanvasConfig::default());
        canvas.apply(CanvasAction::Mount {
            viewport: Viewport::new(1440.0, 900.0),
            play_intro: false,
        });
        canvas
    }

    #[test]
    fn skip_intro_signals_once_and_rests() {
        let mut canvas = CanvasState::new(portfolio_nodes(), CanvasConfig::default());
        let out = canvas.apply(CanvasAction::Mount {
            viewport: Viewport::new(1440.0, 900.0),
            play_intro: false,
        });
        assert_eq!(out, vec![CanvasSignal::IntroComplete]);
        assert_eq!(canvas.camera(), canvas.boot().resting);
        let again = canvas.apply(CanvasAction::Mount {
            viewport: Viewport::new(1440.0, 900.0),
            play_intro: false,
        });
        assert!(again.is_empty());
    }

    #[test]
    fn hidden_nodes_are_not_in_the_world() {
        let canvas = mounted();
        let ids: Vec<_> = canvas.node_views().into_iter().map(|v| v.id).collect();
        assert!(!ids.contains(&"proj-1".to_string()));
        assert!(ids.contains(&"hero".to_string()));
    }

    #[test]
    fn jitter_is_clamped_to_unit_range() {
        let j = Jitter::new(-2.0, f64::NAN);
        assert_eq!((j.u, j.v), (0.0, 0.5));
        let cfg = CanvasConfig::default();
        assert_eq!(Jitter::new(1.0, 0.0).offset(&cfg), Point::new(80.0, 40.0));
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut canvas = mounted();
        let before = canvas.camera();
        let j = Jitter::new(0.5, 0.5);
        assert!(canvas.apply(CanvasAction::Focus("nope".into())).is_empty());
        assert!(canvas.apply(CanvasAction::Open { id: "nope".into(), jitter: j }).is_empty());
        assert!(canvas
            .apply(CanvasAction::Maximize { id: "nope".into(), origin: Rect::default(), jitter: j })
            .is_empty());
        assert!(canvas.apply(CanvasAction::FlyTo { id: "nope".into(), jitter: j }).is_empty());
        assert!(canvas.apply(CanvasAction::Close("nope".into())).is_empty());
        assert_eq!(canvas.camera(), before);
        assert!(canvas.maximized().is_none());
        assert_eq!(canvas.zorder().active(), None);
    }

    #[test]
    fn degenerate_origin_falls_back_to_viewport() {
        let mut canvas = mounted();
        canvas.apply(CanvasAction::Maximize {
            id: "hero".into(),
            origin: Rect::new(0.0, 0.0, 0.0, 0.0),
            jitter: Jitter::new(0.0, 0.0),
        });
        let (_, entry) = canvas.maximized().unwrap();
        assert_eq!(entry.origin, Rect::new(0.0, 0.0, 1440.0, 900.0));
    }

    #[test]
    fn stale_animation_end_keeps_flag() {
        let mut canvas = mounted();
        let j = Jitter::new(0.0, 0.0);
        canvas.apply(CanvasAction::FlyTo { id: "hero".into(), jitter: j });
        canvas.apply(CanvasAction::FlyTo { id: "skills".into(), jitter: j });
        canvas.apply(CanvasAction::AnimationEnd { seq: 1 });
        assert!(canvas.is_animating());
        canvas.apply(CanvasAction::AnimationEnd { seq: 2 });
        assert!(!canvas.is_animating());
    }

    #[test]
    fn drag_start_cancels_animation() {
        let mut canvas = mounted();
        canvas.apply(CanvasAction::FlyTo { id: "hero".into(), jitter: Jitter::new(0.0, 0.0) });
        assert!(canvas.is_animating());
        canvas.apply(CanvasAction::PointerDown { point: Point::new(1.0, 1.0), node: None });
        assert!(!canvas.is_animating());
    }
}

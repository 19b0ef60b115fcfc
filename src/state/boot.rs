//! Intro camera tour and resting pose.

use std::collections::HashSet;

use super::camera::CameraPose;
use crate::config::CanvasConfig;
use crate::model::{NodeRecord, Point};

pub struct Waypoint {
    pub id: &'static str,
    pub label: &'static str,
}

pub const TOUR: [Waypoint; 5] = [
    Waypoint { id: "hero", label: "IDENTITY_CORE" },
    Waypoint { id: "skills", label: "TECH_STACK" },
    Waypoint { id: "projects-hub", label: "PROJECT_INDEX" },
    Waypoint { id: "experience-hub", label: "EXPERIENCE_LOGS" },
    Waypoint { id: "contact", label: "COMM_LINK" },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Tablet,
    Desktop,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn class(&self, cfg: &CanvasConfig) -> ViewportClass {
        if self.width < cfg.mobile_breakpoint {
            ViewportClass::Mobile
        } else if self.width < cfg.tablet_breakpoint {
            ViewportClass::Tablet
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn is_mobile(&self, cfg: &CanvasConfig) -> bool {
        self.class(cfg) == ViewportClass::Mobile
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourCursor {
    /// Index into `TOUR` of the waypoint currently shown.
    Waypoint(usize),
    /// Camera is easing into the resting pose.
    Resting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootPhase {
    #[default]
    Idle,
    Scanning(TourCursor),
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootState {
    pub phase: BootPhase,
    pub booted: HashSet<String>,
    pub resting: CameraPose,
}

impl BootState {
    pub fn is_scanning(&self) -> bool {
        matches!(self.phase, BootPhase::Scanning(_))
    }

    pub fn is_complete(&self) -> bool {
        self.phase == BootPhase::Complete
    }

    /// Rendering gate: unvisited nodes stay hidden until the tour completes.
    pub fn reveals(&self, id: &str) -> bool {
        self.is_complete() || self.booted.contains(id)
    }

    pub fn current_label(&self) -> Option<&'static str> {
        match self.phase {
            BootPhase::Scanning(TourCursor::Waypoint(i)) => TOUR.get(i).map(|w| w.label),
            _ => None,
        }
    }
}

/// Camera pose for a tour waypoint, from the authored layout.
pub fn tour_pose(node: &NodeRecord, viewport: Viewport, cfg: &CanvasConfig) -> CameraPose {
    let scale = cfg.tour_zoom.pick(viewport.is_mobile(cfg));
    let width = node.width.unwrap_or(cfg.default_width);
    let center = Point::new(
        node.position.x + width / 2.0,
        node.position.y + cfg.tour_node_height / 2.0,
    );
    CameraPose::centered_on(center, scale, viewport.width, viewport.height, cfg)
}

/// Where the camera settles after the tour (or immediately when it is skipped).
pub fn resting_pose(nodes: &[NodeRecord], viewport: Viewport, cfg: &CanvasConfig) -> CameraPose {
    match viewport.class(cfg) {
        ViewportClass::Mobile => hero_pose(nodes, viewport, cfg.hero_mobile_scale, cfg),
        ViewportClass::Tablet => hero_pose(nodes, viewport, cfg.hero_tablet_scale, cfg),
        ViewportClass::Desktop => fit_pose(nodes, viewport, cfg),
    }
}

fn hero_pose(nodes: &[NodeRecord], viewport: Viewport, scale: f64, cfg: &CanvasConfig) -> CameraPose {
    let Some(hero) = nodes
        .iter()
        .find(|n| n.id == crate::model::HERO_ID)
        .or_else(|| nodes.first())
    else {
        return CameraPose::new(0.0, 0.0, cfg.clamp_scale(scale));
    };
    let width = hero.width.unwrap_or(cfg.default_width);
    let center = Point::new(
        hero.position.x + width / 2.0,
        hero.position.y + cfg.hero_height / 2.0,
    );
    CameraPose::centered_on(center, scale, viewport.width, viewport.height, cfg)
}

/// Axis-aligned bounds of the permanent nodes as (min, max).
pub fn content_bounds(nodes: &[NodeRecord], cfg: &CanvasConfig) -> (Point, Point) {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for node in nodes.iter().filter(|n| !n.hidden) {
        let w = node.width.unwrap_or(cfg.default_width);
        let h = cfg.fit_height(node.kind);
        min.x = min.x.min(node.position.x);
        min.y = min.y.min(node.position.y);
        max.x = max.x.max(node.position.x + w);
        max.y = max.y.max(node.position.y + h);
    }
    if !min.x.is_finite() {
        return (Point::new(0.0, 0.0), Point::new(1000.0, 800.0));
    }
    (min, max)
}

fn fit_pose(nodes: &[NodeRecord], viewport: Viewport, cfg: &CanvasConfig) -> CameraPose {
    let (min, max) = content_bounds(nodes, cfg);
    let center = min.midpoint(max);
    let available_w = viewport.width - cfg.fit_padding * 2.0;
    let available_h = viewport.height - cfg.fit_padding * 2.0;
    let content_w = (max.x - min.x).max(1.0);
    let content_h = (max.y - min.y).max(1.0);
    let fit = (available_w / content_w).min(available_h / content_h);
    let scale = if fit.is_finite() { fit } else { cfg.fit_min_scale };
    let scale = scale.clamp(cfg.fit_min_scale, cfg.fit_max_scale);
    CameraPose::centered_on(center, scale, viewport.width, viewport.height, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::portfolio_nodes;

    #[test]
    fn classes_follow_breakpoints() {
        let cfg = CanvasConfig::default();
        assert_eq!(Viewport::new(375.0, 800.0).class(&cfg), ViewportClass::Mobile);
        assert_eq!(Viewport::new(768.0, 800.0).class(&cfg), ViewportClass::Tablet);
        assert_eq!(Viewport::new(1280.0, 800.0).class(&cfg), ViewportClass::Desktop);
    }

    #[test]
    fn bounds_skip_hidden_nodes() {
        let cfg = CanvasConfig::default();
        let (min, max) = content_bounds(&portfolio_nodes(), &cfg);
        assert_eq!(min, Point::new(0.0, 0.0));
        // hero: 500 + 650 wide, 550 + 600 tall; contact: 1300 + 400
        assert_eq!(max, Point::new(1700.0, 1150.0));
    }

    #[test]
    fn mobile_rest_centres_hero() {
        let cfg = CanvasConfig::default();
        let vp = Viewport::new(375.0, 700.0);
        let pose = resting_pose(&portfolio_nodes(), vp, &cfg);
        assert_eq!(pose.scale, 0.8);
        let centre = pose.world_to_screen(Point::new(500.0 + 325.0, 550.0 + 275.0));
        assert!((centre.x - 187.5).abs() < 1e-9);
        assert!((centre.y - 350.0).abs() < 1e-9);
    }

    #[test]
    fn tablet_rest_zooms_slightly_more() {
        let cfg = CanvasConfig::default();
        let pose = resting_pose(&portfolio_nodes(), Viewport::new(1000.0, 700.0), &cfg);
        assert_eq!(pose.scale, 0.9);
    }

    #[test]
    fn empty_layout_uses_fallback_bounds() {
        let cfg = CanvasConfig::default();
        let (min, max) = content_bounds(&[], &cfg);
        assert_eq!((min, max), (Point::new(0.0, 0.0), Point::new(1000.0, 800.0)));
    }
}

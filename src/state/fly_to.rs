// Camera target for programmatic navigation to a node.
use super::boot::Viewport;
use super::camera::CameraPose;
use crate::config::CanvasConfig;
use crate::model::{NodeRecord, Point};

/// Pose centring `node` at its current `position`, zoomed per node type.
pub fn fly_to_pose(node: &NodeRecord, position: Point, viewport: Viewport, cfg: &CanvasConfig) -> CameraPose {
    let mobile = viewport.is_mobile(cfg);
    let scale = if node.kind.is_hub() {
        cfg.fly_to_hub_zoom.pick(mobile)
    } else {
        cfg.fly_to_zoom.pick(mobile)
    };
    let width = node.width.unwrap_or(cfg.default_width);
    let height = cfg.estimated_height(node.kind);
    let center = Point::new(position.x + width / 2.0, position.y + height / 2.0);
    CameraPose::centered_on(center, scale, viewport.width, viewport.height, cfg)
}

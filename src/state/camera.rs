// World-to-screen camera: screen = world * scale + (x, y)
use crate::config::CanvasConfig;
use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl CameraPose {
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.x) / self.scale,
            (screen.y - self.y) / self.scale,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.scale + self.x, world.y * self.scale + self.y)
    }

    /// Sets a new (clamped) scale while keeping the world point under `focus` fixed.
    pub fn zoom_at(&mut self, focus: Point, scale: f64, cfg: &CanvasConfig) {
        let next = cfg.clamp_scale(scale);
        let world = self.screen_to_world(focus);
        self.x = focus.x - world.x * next;
        self.y = focus.y - world.y * next;
        self.scale = next;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Pose that puts `center` (world) at the middle of a `width` x `height` viewport.
    pub fn centered_on(center: Point, scale: f64, width: f64, height: f64, cfg: &CanvasConfig) -> Self {
        let scale = cfg.clamp_scale(scale);
        Self {
            x: width / 2.0 - center.x * scale,
            y: height / 2.0 - center.y * scale,
            scale,
        }
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.x, self.y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wheel_anchor_scenario() {
        let cfg = CanvasConfig::default();
        let mut cam = CameraPose::default();
        cam.zoom_at(Point::new(400.0, 300.0), 1.2, &cfg);
        assert!(close(cam.x, -80.0));
        assert!(close(cam.y, -60.0));
        assert!(close(cam.scale, 1.2));
        let back = cam.world_to_screen(Point::new(400.0, 300.0));
        assert!(close(back.x, 400.0) && close(back.y, 300.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let cfg = CanvasConfig::default();
        let mut cam = CameraPose::default();
        cam.zoom_at(Point::new(10.0, 10.0), 50.0, &cfg);
        assert_eq!(cam.scale, 6.0);
        cam.zoom_at(Point::new(10.0, 10.0), -3.0, &cfg);
        assert_eq!(cam.scale, 0.1);
    }

    #[test]
    fn round_trip_through_screen() {
        let cam = CameraPose::new(-120.0, 45.0, 0.75);
        let w = Point::new(321.0, -17.5);
        let s = cam.world_to_screen(w);
        let w2 = cam.screen_to_world(s);
        assert!(close(w.x, w2.x) && close(w.y, w2.y));
    }

    #[test]
    fn centering_places_point_mid_viewport() {
        let cfg = CanvasConfig::default();
        let cam = CameraPose::centered_on(Point::new(100.0, 50.0), 2.0, 800.0, 600.0, &cfg);
        let s = cam.world_to_screen(Point::new(100.0, 50.0));
        assert!(close(s.x, 400.0) && close(s.y, 300.0));
    }
}

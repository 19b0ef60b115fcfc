// Two-finger pinch gesture state
use crate::config::CanvasConfig;
use crate::model::Point;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct PinchState {
    pub start_distance: f64,
    pub start_scale: f64,
}

impl PinchState {
    pub fn begin(a: Point, b: Point, scale: f64) -> Self {
        Self {
            start_distance: a.distance(b),
            start_scale: scale,
        }
    }

    /// Scale for the current finger spread, or `None` when the gesture started
    /// with coincident touches.
    pub fn target_scale(&self, a: Point, b: Point, cfg: &CanvasConfig) -> Option<f64> {
        if !(self.start_distance > 0.0) {
            return None;
        }
        let ratio = a.distance(b) / self.start_distance;
        let scale = self.start_scale * ratio;
        scale.is_finite().then(|| cfg.clamp_scale(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_start_distance_skips() {
        let cfg = CanvasConfig::default();
        let p = Point::new(5.0, 5.0);
        let pinch = PinchState::begin(p, p, 1.0);
        assert_eq!(pinch.target_scale(p, Point::new(50.0, 5.0), &cfg), None);
    }

    #[test]
    fn spread_doubles_scale() {
        let cfg = CanvasConfig::default();
        let pinch = PinchState::begin(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1.5);
        let s = pinch.target_scale(Point::new(0.0, 0.0), Point::new(200.0, 0.0), &cfg);
        assert_eq!(s, Some(3.0));
    }
}

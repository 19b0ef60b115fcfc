use proptest::prelude::*;

use spatial_portfolio::config::CanvasConfig;
use spatial_portfolio::model::{NodeKind, NodeRecord, Point};
use spatial_portfolio::state::boot::{content_bounds, resting_pose};
use spatial_portfolio::state::input::apply_wheel;
use spatial_portfolio::state::{CameraPose, PinchState, Viewport, WheelInput, WheelMode, ZOrder};

fn camera() -> impl Strategy<Value = CameraPose> {
    (-2000.0f64..2000.0, -2000.0f64..2000.0, 0.1f64..=6.0)
        .prop_map(|(x, y, scale)| CameraPose::new(x, y, scale))
}

fn screen_point() -> impl Strategy<Value = Point> {
    (0.0f64..2560.0, 0.0f64..1440.0).prop_map(|(x, y)| Point::new(x, y))
}

fn mode() -> impl Strategy<Value = WheelMode> {
    prop_oneof![Just(WheelMode::Pixel), Just(WheelMode::Line), Just(WheelMode::Page)]
}

fn zoom_wheel(point: Point, delta_y: f64, mode: WheelMode) -> WheelInput {
    WheelInput {
        point,
        delta_x: 0.0,
        delta_y,
        mode,
        zoom_modifier: true,
        over_scroll_region: false,
    }
}

proptest! {
    #[test]
    fn wheel_zoom_keeps_anchor(cam in camera(), p in screen_point(), dy in -500.0f64..500.0, m in mode()) {
        let cfg = CanvasConfig::default();
        let mut cam = cam;
        let world = cam.screen_to_world(p);
        apply_wheel(&mut cam, &zoom_wheel(p, dy, m), &cfg);
        let back = cam.world_to_screen(world);
        prop_assert!((back.x - p.x).abs() < 1e-6);
        prop_assert!((back.y - p.y).abs() < 1e-6);
    }

    #[test]
    fn pinch_zoom_keeps_anchor(
        cam in camera(),
        a in screen_point(),
        b in screen_point(),
        spread in 0.1f64..10.0,
    ) {
        let cfg = CanvasConfig::default();
        prop_assume!(a.distance(b) > 1.0);
        let pinch = PinchState::begin(a, b, cam.scale);
        let mid = a.midpoint(b);
        let b2 = Point::new(mid.x + (b.x - mid.x) * spread, mid.y + (b.y - mid.y) * spread);
        let a2 = Point::new(mid.x + (a.x - mid.x) * spread, mid.y + (a.y - mid.y) * spread);
        let mut cam = cam;
        let world = cam.screen_to_world(mid);
        if let Some(scale) = pinch.target_scale(a2, b2, &cfg) {
            cam.zoom_at(a2.midpoint(b2), scale, &cfg);
        }
        let back = cam.world_to_screen(world);
        prop_assert!((back.x - mid.x).abs() < 1e-6);
        prop_assert!((back.y - mid.y).abs() < 1e-6);
    }

    #[test]
    fn scale_stays_clamped(
        deltas in prop::collection::vec(
            prop_oneof![-1e6f64..1e6, Just(f64::MAX), Just(f64::MIN), Just(f64::NAN), Just(f64::INFINITY)],
            1..40,
        ),
        m in mode(),
    ) {
        let cfg = CanvasConfig::default();
        let mut cam = CameraPose::default();
        for dy in deltas {
            apply_wheel(&mut cam, &zoom_wheel(Point::new(300.0, 200.0), dy, m), &cfg);
            prop_assert!((0.1..=6.0).contains(&cam.scale), "scale {}", cam.scale);
            prop_assert!(cam.x.is_finite() && cam.y.is_finite());
        }
    }

    #[test]
    fn last_focused_is_strictly_on_top(focus in prop::collection::vec(0usize..6, 1..60)) {
        let mut z = ZOrder::default();
        let mut touched = Vec::new();
        for i in focus {
            let id = format!("n{i}");
            z.focus(&id);
            if !touched.contains(&id) {
                touched.push(id.clone());
            }
            let top = z.z_index(&id);
            for other in touched.iter().filter(|o| **o != id) {
                prop_assert!(z.z_index(other) < top);
            }
            prop_assert_eq!(z.active(), Some(id.as_str()));
        }
    }

    #[test]
    fn desktop_rest_fits_content(
        w in 1280.0f64..3000.0,
        h in 600.0f64..2000.0,
        layout in prop::collection::vec((-2000.0f64..2000.0, -2000.0f64..2000.0, 200.0f64..800.0), 1..6),
    ) {
        let cfg = CanvasConfig::default();
        let nodes: Vec<NodeRecord> = layout
            .iter()
            .enumerate()
            .map(|(i, (x, y, width))| {
                NodeRecord::new(&format!("n{i}"), "n", NodeKind::Skill, Point::new(*x, *y)).with_width(*width)
            })
            .collect();
        let vp = Viewport::new(w, h);
        let pose = resting_pose(&nodes, vp, &cfg);
        prop_assert!((0.45..=0.9).contains(&pose.scale));

        let (min, max) = content_bounds(&nodes, &cfg);
        let pad = cfg.fit_padding;
        let fit = ((w - 2.0 * pad) / (max.x - min.x)).min((h - 2.0 * pad) / (max.y - min.y));
        if fit >= cfg.fit_min_scale {
            let lo = pose.world_to_screen(min);
            let hi = pose.world_to_screen(max);
            prop_assert!(lo.x >= pad - 1e-6 && lo.y >= pad - 1e-6);
            prop_assert!(hi.x <= w - pad + 1e-6 && hi.y <= h - pad + 1e-6);
        }
    }
}

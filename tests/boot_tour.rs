mod common;

use common::{jitter, scheduled, visible_ids};
use spatial_portfolio::config::CanvasConfig;
use spatial_portfolio::model::{portfolio_nodes, Point};
use spatial_portfolio::state::boot::{resting_pose, TOUR};
use spatial_portfolio::state::{
    BootPhase, CameraPose, CanvasAction, CanvasSignal, CanvasState, Viewport,
};

#[derive(Debug, PartialEq)]
struct Step {
    active: Option<String>,
    camera: CameraPose,
    delays: Vec<u32>,
    intro_complete: bool,
}

fn record(canvas: &CanvasState, out: &[CanvasSignal]) -> Step {
    Step {
        active: canvas.zorder().active().map(str::to_string),
        camera: canvas.camera(),
        delays: scheduled(out).into_iter().map(|(d, _)| d).collect(),
        intro_complete: out.contains(&CanvasSignal::IntroComplete),
    }
}

fn run_tour(viewport: Viewport) -> (Vec<Step>, CanvasState) {
    let mut canvas = CanvasState::new(portfolio_nodes(), CanvasConfig::default());
    let out = canvas.apply(CanvasAction::Mount {
        viewport,
        play_intro: true,
    });
    let mut steps = vec![record(&canvas, &out)];
    let mut pending = scheduled(&out);
    while let Some((_, action)) = pending.pop() {
        let out = canvas.apply(action);
        steps.push(record(&canvas, &out));
        pending.extend(scheduled(&out));
    }
    (steps, canvas)
}

#[test]
fn tour_is_deterministic() {
    let vp = Viewport::new(1600.0, 1000.0);
    let (a, _) = run_tour(vp);
    let (b, _) = run_tour(vp);
    assert_eq!(a, b);
}

#[test]
fn tour_visits_waypoints_in_order_then_rests() {
    let vp = Viewport::new(1600.0, 1000.0);
    let (steps, canvas) = run_tour(vp);
    let visited: Vec<_> = steps
        .iter()
        .take(TOUR.len())
        .map(|s| s.active.clone().unwrap_or_default())
        .collect();
    assert_eq!(
        visited,
        vec!["hero", "skills", "projects-hub", "experience-hub", "contact"]
    );
    let delays: Vec<_> = steps.iter().flat_map(|s| s.delays.clone()).collect();
    assert_eq!(delays, vec![600, 600, 600, 600, 600, 800]);
    let rest = resting_pose(canvas.nodes(), vp, canvas.config());
    assert_eq!(canvas.camera(), rest);
    assert_eq!(canvas.boot().phase, BootPhase::Complete);
}

#[test]
fn intro_complete_fires_exactly_once() {
    let (steps, mut canvas) = run_tour(Viewport::new(1600.0, 1000.0));
    let fired = steps.iter().filter(|s| s.intro_complete).count();
    assert_eq!(fired, 1);
    assert!(steps.last().is_some_and(|s| s.intro_complete));
    assert!(canvas.apply(CanvasAction::BootAdvance).is_empty());
}

#[test]
fn nodes_reveal_as_they_are_scanned() {
    let mut canvas = CanvasState::new(portfolio_nodes(), CanvasConfig::default());
    let out = canvas.apply(CanvasAction::Mount {
        viewport: Viewport::new(1600.0, 1000.0),
        play_intro: true,
    });
    assert_eq!(visible_ids(&canvas), vec!["hero".to_string()]);
    assert_eq!(canvas.boot().current_label(), Some("IDENTITY_CORE"));
    let (_, next) = scheduled(&out).remove(0);
    canvas.apply(next);
    let mut seen = visible_ids(&canvas);
    seen.sort();
    assert_eq!(seen, vec!["hero".to_string(), "skills".to_string()]);
    assert_eq!(canvas.boot().current_label(), Some("TECH_STACK"));
}

#[test]
fn input_and_navigation_are_ignored_while_scanning() {
    let mut canvas = CanvasState::new(portfolio_nodes(), CanvasConfig::default());
    canvas.apply(CanvasAction::Mount {
        viewport: Viewport::new(1600.0, 1000.0),
        play_intro: true,
    });
    let cam = canvas.camera();
    assert!(!canvas.input_enabled());
    canvas.apply(CanvasAction::PointerDown {
        point: Point::new(0.0, 0.0),
        node: None,
    });
    canvas.apply(CanvasAction::PointerMove {
        point: Point::new(300.0, 300.0),
    });
    canvas.apply(CanvasAction::ZoomBy { factor: 2.0 });
    let out = canvas.apply(CanvasAction::FlyTo {
        id: "contact".into(),
        jitter: jitter(0.5, 0.5),
    });
    assert!(out.is_empty());
    assert_eq!(canvas.camera(), cam);
}

#[test]
fn tour_poses_stay_within_scale_bounds_on_mobile() {
    let (steps, canvas) = run_tour(Viewport::new(390.0, 844.0));
    for step in &steps {
        assert!((0.1..=6.0).contains(&step.camera.scale));
    }
    assert_eq!(canvas.camera().scale, 0.8);
}

#[test]
fn skipping_the_intro_lands_on_rest_with_everything_visible() {
    let mut canvas = CanvasState::new(portfolio_nodes(), CanvasConfig::default());
    let out = canvas.apply(CanvasAction::Mount {
        viewport: Viewport::new(1000.0, 800.0),
        play_intro: false,
    });
    assert_eq!(out, vec![CanvasSignal::IntroComplete]);
    assert_eq!(canvas.camera().scale, 0.9);
    assert_eq!(visible_ids(&canvas).len(), 5);
}

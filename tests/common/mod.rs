#![allow(dead_code)]

use spatial_portfolio::config::CanvasConfig;
use spatial_portfolio::model::{portfolio_nodes, NodeRecord};
use spatial_portfolio::state::{CanvasAction, CanvasSignal, CanvasState, Jitter, Viewport};

pub fn desktop() -> Viewport {
    Viewport::new(1440.0, 900.0)
}

pub fn canvas_with(nodes: Vec<NodeRecord>) -> CanvasState {
    let mut canvas = CanvasState::new(nodes, CanvasConfig::default());
    canvas.apply(CanvasAction::Mount {
        viewport: desktop(),
        play_intro: false,
    });
    canvas
}

/// Portfolio canvas with the intro skipped.
pub fn ready_canvas() -> CanvasState {
    canvas_with(portfolio_nodes())
}

pub fn jitter(u: f64, v: f64) -> Jitter {
    Jitter::new(u, v)
}

/// Pulls the scheduled follow-ups out of a signal batch.
pub fn scheduled(signals: &[CanvasSignal]) -> Vec<(u32, CanvasAction)> {
    signals
        .iter()
        .filter_map(|s| match s {
            CanvasSignal::Schedule { delay_ms, action } => Some((*delay_ms, action.clone())),
            _ => None,
        })
        .collect()
}

pub fn visible_ids(canvas: &CanvasState) -> Vec<String> {
    canvas
        .node_views()
        .into_iter()
        .filter(|v| v.is_visible)
        .map(|v| v.id)
        .collect()
}

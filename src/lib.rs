//! Spatial portfolio: a pannable, zoomable canvas of draggable content windows.

pub mod components;
pub mod config;
pub mod model;
pub mod state;
pub mod util;

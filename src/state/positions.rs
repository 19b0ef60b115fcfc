// Live world positions, seeded from authored layout; entries are never removed.
use std::collections::HashMap;

use crate::model::{NodeRecord, Point};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePositions {
    by_id: HashMap<String, Point>,
}

impl NodePositions {
    pub fn seeded(nodes: &[NodeRecord]) -> Self {
        Self {
            by_id: nodes.iter().map(|n| (n.id.clone(), n.position)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.by_id.get(id).copied()
    }

    /// Live position, falling back to the authored one.
    pub fn resolve(&self, node: &NodeRecord) -> Point {
        self.get(&node.id).unwrap_or(node.position)
    }

    pub fn set(&mut self, id: &str, pos: Point) {
        self.by_id.insert(id.to_string(), pos);
    }
}

//! Focus and stacking order.
//!
//! Every focus takes a fresh value from a monotonically increasing counter, so the
//! most recently focused node is always strictly on top and is the "active" one.

use std::collections::HashMap;

pub const BASE_Z: u32 = 10;
/// z-index for nodes that were never focused.
pub const UNFOCUSED_Z: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ZOrder {
    highest: u32,
    by_id: HashMap<String, u32>,
}

impl Default for ZOrder {
    fn default() -> Self {
        Self {
            highest: BASE_Z,
            by_id: HashMap::new(),
        }
    }
}

impl ZOrder {
    pub fn focus(&mut self, id: &str) -> u32 {
        self.highest += 1;
        self.by_id.insert(id.to_string(), self.highest);
        self.highest
    }

    pub fn z_index(&self, id: &str) -> u32 {
        self.by_id.get(id).copied().unwrap_or(UNFOCUSED_Z)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.by_id.get(id) == Some(&self.highest)
    }

    pub fn active(&self) -> Option<&str> {
        self.by_id
            .iter()
            .find(|(_, z)| **z == self.highest)
            .map(|(id, _)| id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfocused_nodes_sit_low() {
        let z = ZOrder::default();
        assert_eq!(z.z_index("hero"), UNFOCUSED_Z);
        assert!(!z.is_active("hero"));
        assert_eq!(z.active(), None);
    }

    #[test]
    fn refocus_moves_to_top() {
        let mut z = ZOrder::default();
        z.focus("a");
        z.focus("b");
        z.focus("a");
        assert!(z.is_active("a"));
        assert!(z.z_index("a") > z.z_index("b"));
        assert_eq!(z.active(), Some("a"));
    }
}

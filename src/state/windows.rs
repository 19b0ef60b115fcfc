//! Window manager: spawned transient nodes and the full-screen stack.
//!
//! Permanent nodes (authored visible) are always in the world; closing one only
//! demotes it from full-screen. Transient nodes (authored hidden) move through
//! `Closed -> Open -> Closing -> Closed`, and a close is finished by a delayed
//! `finish_close` carrying the generation it was started with. Reopening bumps
//! the generation, so a late finish for an earlier close is ignored.

use std::collections::{HashMap, HashSet};

use crate::model::{NodeRecord, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeLifecycle {
    #[default]
    Closed,
    Open,
    Closing { generation: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaximizedEntry {
    pub id: String,
    pub origin: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Never been spawned before this call.
    FirstOpen,
    Reopened,
    AlreadyOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Permanent node left windowed; at most a suspended stack entry was dropped.
    Minimized,
    /// Permanent node was full-screen and got demoted like `restore`.
    Restored,
    /// Transient node fading out; finish with this generation.
    Closing { generation: u64 },
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowManager {
    lifecycle: HashMap<String, NodeLifecycle>,
    spawned_once: HashSet<String>,
    generation: u64,
    current: Option<MaximizedEntry>,
    stack: Vec<MaximizedEntry>,
    restoring: Option<String>,
}

impl WindowManager {
    pub fn lifecycle(&self, node: &NodeRecord) -> NodeLifecycle {
        if node.is_permanent() {
            return NodeLifecycle::Open;
        }
        self.lifecycle.get(&node.id).copied().unwrap_or_default()
    }

    /// In the world: open, or still fading out.
    pub fn is_spawned(&self, node: &NodeRecord) -> bool {
        self.lifecycle(node) != NodeLifecycle::Closed
    }

    pub fn is_open(&self, node: &NodeRecord) -> bool {
        self.lifecycle(node) == NodeLifecycle::Open
    }

    pub fn is_closing(&self, node: &NodeRecord) -> bool {
        matches!(self.lifecycle(node), NodeLifecycle::Closing { .. })
    }

    pub fn open(&mut self, node: &NodeRecord) -> OpenOutcome {
        if node.is_permanent() {
            return OpenOutcome::AlreadyOpen;
        }
        match self.lifecycle(node) {
            NodeLifecycle::Open => OpenOutcome::AlreadyOpen,
            NodeLifecycle::Closed | NodeLifecycle::Closing { .. } => {
                self.generation += 1;
                self.lifecycle.insert(node.id.clone(), NodeLifecycle::Open);
                if self.spawned_once.insert(node.id.clone()) {
                    OpenOutcome::FirstOpen
                } else {
                    OpenOutcome::Reopened
                }
            }
        }
    }

    /// Promotes `id` to full-screen, suspending the current one on the stack.
    pub fn maximize(&mut self, id: &str, origin: Rect) {
        if let Some(prev) = self.current.take() {
            if prev.id != id {
                self.stack.retain(|e| e.id != id);
                self.stack.push(prev);
            }
        }
        self.current = Some(MaximizedEntry {
            id: id.to_string(),
            origin,
        });
    }

    /// Demotes the current full-screen node and re-shows the one beneath it.
    /// Returns the demoted id.
    pub fn restore(&mut self) -> Option<String> {
        let demoted = self.current.take()?;
        self.current = self.stack.pop();
        self.restoring = Some(demoted.id.clone());
        Some(demoted.id)
    }

    pub fn close(&mut self, node: &NodeRecord) -> CloseOutcome {
        if node.is_permanent() {
            self.stack.retain(|e| e.id != node.id);
            if self.is_current(&node.id) {
                self.restore();
                return CloseOutcome::Restored;
            }
            return CloseOutcome::Minimized;
        }
        if self.lifecycle(node) != NodeLifecycle::Open {
            return CloseOutcome::Ignored;
        }
        self.stack.clear();
        if self.is_current(&node.id) {
            self.current = None;
        }
        self.generation += 1;
        let generation = self.generation;
        self.lifecycle
            .insert(node.id.clone(), NodeLifecycle::Closing { generation });
        CloseOutcome::Closing { generation }
    }

    /// Completes a transient close unless the node was reopened meanwhile.
    pub fn finish_close(&mut self, id: &str, generation: u64) -> bool {
        match self.lifecycle.get(id) {
            Some(NodeLifecycle::Closing { generation: g }) if *g == generation => {
                self.lifecycle.insert(id.to_string(), NodeLifecycle::Closed);
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&MaximizedEntry> {
        self.current.as_ref()
    }

    pub fn is_current(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|e| e.id == id)
    }

    pub fn stack(&self) -> &[MaximizedEntry] {
        &self.stack
    }

    pub fn is_restoring(&self, id: &str) -> bool {
        self.restoring.as_deref() == Some(id)
    }

    pub fn clear_restoring(&mut self, id: &str) {
        if self.is_restoring(id) {
            self.restoring = None;
        }
    }
}

//! 视图状态
//!
//! 通过折叠 trace 前缀得到；渲染端只读它。

use crate::trace::{Bound, Event, NodeId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// 节点的显示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unvisited,
    /// 进入过 frontier 但尚未展开
    Reached,
    /// 在调用栈上
    Active,
    Explored,
    /// 被剪枝，未探索
    Pruned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub stack: Vec<NodeId>,
    pub explored: BTreeSet<NodeId>,
    pub pruned: BTreeSet<NodeId>,
    pub reached: BTreeSet<NodeId>,
    pub edges: BTreeSet<(NodeId, NodeId)>,
    pub bounds: BTreeMap<NodeId, (Bound, Bound)>,
    pub values: BTreeMap<NodeId, i64>,
    pub path: Vec<NodeId>,
    pub pauses: usize,
}

impl ViewModel {
    pub fn apply(&mut self, ev: &Event) {
        match ev {
            Event::Push { node } => self.stack.push(*node),
            Event::Pop => {
                if self.stack.pop().is_none() {
                    warn!("pop on empty stack");
                }
            }
            Event::MarkExplored { node } => {
                self.explored.insert(*node);
            }
            Event::MarkEdge { parent, child } => {
                self.edges.insert((*parent, *child));
            }
            Event::SetBounds { node, lower, upper } => {
                self.bounds.insert(*node, (*lower, *upper));
            }
            Event::SetValue { node, value } => {
                self.values.insert(*node, *value);
            }
            Event::MarkPruned { node } => {
                self.pruned.insert(*node);
            }
            Event::MarkReached { node } => {
                self.reached.insert(*node);
            }
            Event::SetPath { nodes } => self.path.clone_from(nodes),
            Event::Pause => self.pauses += 1,
        }
    }

    pub fn clear(&mut self) {
        *self = ViewModel::default();
    }

    pub fn node_state(&self, node: NodeId) -> NodeState {
        if self.pruned.contains(&node) {
            NodeState::Pruned
        } else if self.explored.contains(&node) {
            NodeState::Explored
        } else if self.stack.contains(&node) {
            NodeState::Active
        } else if self.reached.contains(&node) {
            NodeState::Reached
        } else {
            NodeState::Unvisited
        }
    }

    pub fn top(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// alpha >= beta：该节点发生截断
    pub fn is_cut(&self, node: NodeId) -> bool {
        self.bounds
            .get(&node)
            .is_some_and(|(lower, upper)| lower >= upper)
    }
}

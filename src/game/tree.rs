//! 显式博弈树
//!
//! 节点 0 为根，由 MAX 先走，逐层交替。叶子携带效用值（MAX 视角）。

use super::{Game, Player};
use crate::error::{Error, Result};
use crate::trace::NodeId;
use std::collections::{BTreeMap, VecDeque};

/// 深度 3 三叉树（27 个叶子）的默认效用，前 9 个即教科书图 5.2。
pub const DEFAULT_LEAF_UTILITIES: [i64; 27] = [
    3, 12, 8, 2, 4, 6, 14, 5, 2, 3, 9, 1, 7, 15, 4, 6, 11, 5, 10, 1, 13, 8, 2, 7, 5, 16, 3,
];

/// 搜索按层递归，深度受调用栈限制
pub const MAX_TREE_DEPTH: usize = 64;

/// 节点总数上限（含叶子）
pub const MAX_TREE_NODES: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTree {
    children: Vec<Vec<NodeId>>,
    parents: Vec<Option<NodeId>>,
    depths: Vec<usize>,
    utilities: BTreeMap<NodeId, i64>,
}

impl GameTree {
    /// 按邻接表构建；校验无悬空子节点、无环、每个叶子都有效用。
    pub fn from_children(children: Vec<Vec<usize>>, utilities: BTreeMap<usize, i64>) -> Result<Self> {
        let n = children.len();
        if n == 0 {
            return Err(Error::invalid("game tree has no nodes"));
        }
        if n > MAX_TREE_NODES {
            return Err(Error::invalid(format!(
                "game tree has {n} nodes (limit {MAX_TREE_NODES})"
            )));
        }

        let mut parents: Vec<Option<NodeId>> = vec![None; n];
        for (p, cs) in children.iter().enumerate() {
            for &c in cs {
                if c >= n {
                    return Err(Error::invalid(format!("node {p} has dangling child {c}")));
                }
                if c == 0 {
                    return Err(Error::invalid(format!("node {p} points back to the root")));
                }
                if let Some(other) = parents[c] {
                    return Err(Error::invalid(format!(
                        "node {c} has two parents ({other} and {p})"
                    )));
                }
                parents[c] = Some(NodeId(p));
            }
        }

        // 每个非根节点恰有一个父节点，此时不可达即成环
        let mut depths = vec![usize::MAX; n];
        depths[0] = 0;
        let mut q = VecDeque::from([0_usize]);
        while let Some(p) = q.pop_front() {
            for &c in &children[p] {
                depths[c] = depths[p] + 1;
                q.push_back(c);
            }
        }
        if let Some(unreached) = depths.iter().position(|&d| d == usize::MAX) {
            return Err(Error::invalid(format!(
                "node {unreached} is not reachable from the root"
            )));
        }
        if let Some(&deepest) = depths.iter().max().filter(|&&d| d > MAX_TREE_DEPTH) {
            return Err(Error::invalid(format!(
                "game tree depth {deepest} exceeds limit {MAX_TREE_DEPTH}"
            )));
        }

        for (node, cs) in children.iter().enumerate() {
            let has_utility = utilities.contains_key(&node);
            if cs.is_empty() && !has_utility {
                return Err(Error::invalid(format!("terminal node {node} has no utility")));
            }
            if !cs.is_empty() && has_utility {
                return Err(Error::invalid(format!(
                    "utility given for non-terminal node {node}"
                )));
            }
        }
        if let Some(&extra) = utilities.keys().find(|&&k| k >= n) {
            return Err(Error::invalid(format!("utility given for unknown node {extra}")));
        }

        Ok(Self {
            children: children
                .into_iter()
                .map(|cs| cs.into_iter().map(NodeId).collect())
                .collect(),
            parents,
            depths,
            utilities: utilities.into_iter().map(|(k, v)| (NodeId(k), v)).collect(),
        })
    }

    /// 均匀树：每个内部节点 `branching` 个孩子，叶子在第 `depth` 层，按层序编号。
    pub fn uniform(branching: usize, depth: u32, leaf_utilities: &[i64]) -> Result<Self> {
        if branching == 0 {
            return Err(Error::invalid("branching factor must be positive"));
        }
        if depth as usize > MAX_TREE_DEPTH {
            return Err(Error::invalid(format!(
                "game tree depth {depth} exceeds limit {MAX_TREE_DEPTH}"
            )));
        }
        let leaves = branching
            .checked_pow(depth)
            .filter(|&l| l <= MAX_TREE_NODES)
            .ok_or_else(|| {
                Error::invalid(format!(
                    "branching {branching} depth {depth} exceeds {MAX_TREE_NODES} nodes"
                ))
            })?;
        if leaf_utilities.len() != leaves {
            return Err(Error::invalid(format!(
                "expected {leaves} leaf utilities for branching {branching} depth {depth}, got {}",
                leaf_utilities.len()
            )));
        }

        let internal = (0..depth).map(|d| branching.pow(d)).sum::<usize>();
        let total = internal + leaves;
        let mut children = vec![Vec::new(); total];
        for (node, cs) in children.iter_mut().enumerate().take(internal) {
            *cs = (1..=branching).map(|j| node * branching + j).collect();
        }
        let utilities = leaf_utilities
            .iter()
            .enumerate()
            .map(|(i, &u)| (internal + i, u))
            .collect();
        Self::from_children(children, utilities)
    }

    /// 教科书图 5.2 的扩展版本：深度 3 三叉树
    pub fn fig52_extended(leaf_utilities: &[i64]) -> Result<Self> {
        Self::uniform(3, 3, leaf_utilities)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.children.len()).map(NodeId)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.children.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node.0).copied().flatten()
    }

    pub fn depth(&self, node: NodeId) -> usize {
        self.depths.get(node.0).copied().unwrap_or_default()
    }

    pub fn max_depth(&self) -> usize {
        self.depths.iter().copied().max().unwrap_or_default()
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().filter(|&n| self.children(n).is_empty())
    }

    pub fn leaf_utility(&self, node: NodeId) -> Option<i64> {
        self.utilities.get(&node).copied()
    }

    /// 以 `node` 为根的子树（先序）
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }
}

impl Game for GameTree {
    type State = NodeId;
    type Action = usize;

    fn actions(&self, state: &NodeId) -> Vec<usize> {
        (0..self.children(*state).len()).collect()
    }

    fn result(&self, state: &NodeId, action: &usize) -> NodeId {
        self.children(*state)[*action]
    }

    fn terminal_test(&self, state: &NodeId) -> bool {
        self.children(*state).is_empty()
    }

    fn utility(&self, state: &NodeId, player: Player) -> Result<i64> {
        let u = self
            .leaf_utility(*state)
            .ok_or_else(|| Error::invalid(format!("node {state} is not terminal")))?;
        Ok(match player {
            Player::Max => u,
            Player::Min => -u,
        })
    }

    fn to_move(&self, state: &NodeId) -> Player {
        if self.depth(*state) % 2 == 0 {
            Player::Max
        } else {
            Player::Min
        }
    }

    fn node(&self, state: &NodeId) -> NodeId {
        *state
    }
}

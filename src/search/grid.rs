//! 网格寻路问题
//!
//! 8 邻接网格，障碍格不可进入；走到一格的代价为该格权重（默认 1）。

use crate::error::{Error, Result};
use crate::trace::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

pub type Pos = (i64, i64);

/// 网格格子总数上限；保证节点编号和距离计算不溢出
pub const MAX_GRID_CELLS: i64 = 1 << 24;

pub const DIRECTIONS: [Pos; 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// 最佳优先搜索的求解器：决定 frontier 的 f 值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    /// g + h
    Astar,
    /// g + weight * h
    Wastar,
    /// 深度
    Bfs,
    /// 负深度
    Dfs,
    /// g
    Ucs,
    /// h
    Bestfs,
}

impl FromStr for Solver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "astar" => Ok(Solver::Astar),
            "wastar" => Ok(Solver::Wastar),
            "bfs" => Ok(Solver::Bfs),
            "dfs" => Ok(Solver::Dfs),
            "ucs" => Ok(Solver::Ucs),
            "bestfs" => Ok(Solver::Bestfs),
            other => Err(Error::invalid(format!("unknown solver {other:?}"))),
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Solver::Astar => "astar",
            Solver::Wastar => "wastar",
            Solver::Bfs => "bfs",
            Solver::Dfs => "dfs",
            Solver::Ucs => "ucs",
            Solver::Bestfs => "bestfs",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridProblem {
    width: i64,
    height: i64,
    initial: Pos,
    goal: Pos,
    obstacles: BTreeSet<Pos>,
    cell_weights: BTreeMap<Pos, u64>,
}

impl GridProblem {
    /// 起点和终点上的障碍会被忽略
    pub fn new(
        width: i64,
        height: i64,
        initial: Pos,
        goal: Pos,
        obstacles: impl IntoIterator<Item = Pos>,
    ) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::invalid(format!("grid must be non-empty, got {width}x{height}")));
        }
        if width.checked_mul(height).is_none_or(|cells| cells > MAX_GRID_CELLS) {
            return Err(Error::invalid(format!(
                "grid {width}x{height} exceeds {MAX_GRID_CELLS} cells"
            )));
        }
        let mut problem = Self {
            width,
            height,
            initial,
            goal,
            obstacles: BTreeSet::new(),
            cell_weights: BTreeMap::new(),
        };
        for (name, p) in [("initial", initial), ("goal", goal)] {
            if !problem.in_bounds(p) {
                return Err(Error::invalid(format!(
                    "{name} cell {p:?} outside {width}x{height} grid"
                )));
            }
        }
        problem.obstacles = obstacles
            .into_iter()
            .filter(|&p| p != initial && p != goal && problem.in_bounds(p))
            .collect();
        Ok(problem)
    }

    pub fn with_cell_weights(mut self, weights: impl IntoIterator<Item = (Pos, u64)>) -> Self {
        self.cell_weights.extend(weights);
        self
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn initial(&self) -> Pos {
        self.initial
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn obstacles(&self) -> &BTreeSet<Pos> {
        &self.obstacles
    }

    /// 只有 `0..width` × `0..height` 内的格子可走，边界外没有额外的缓冲区
    pub fn in_bounds(&self, (x, y): Pos) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    pub fn is_free(&self, p: Pos) -> bool {
        self.in_bounds(p) && !self.obstacles.contains(&p)
    }

    pub fn goal_test(&self, p: Pos) -> bool {
        p == self.goal
    }

    /// 可以走到的相邻格（按 DIRECTIONS 顺序）
    pub fn actions(&self, (x, y): Pos) -> Vec<Pos> {
        DIRECTIONS
            .iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|&p| self.is_free(p))
            .collect()
    }

    pub fn step_cost(&self, to: Pos) -> u64 {
        self.cell_weights.get(&to).copied().unwrap_or(1)
    }

    /// 到终点的直线距离
    pub fn h(&self, (x, y): Pos) -> f64 {
        let (gx, gy) = self.goal;
        ((x - gx) as f64).hypot((y - gy) as f64)
    }

    pub fn node(&self, (x, y): Pos) -> NodeId {
        NodeId((y * self.width + x) as usize)
    }

    pub fn pos(&self, node: NodeId) -> Pos {
        let i = node.0 as i64;
        (i % self.width, i / self.width)
    }
}

use crate::error::{Error, Result};
use crate::search::{Pos, Solver};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    pub scenario: ScenarioKind,
    /// trace 事件上限
    #[serde(default)]
    pub max_events: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// 均匀博弈树；缺省为 3 叉 3 层、默认叶子效用
    GameTree {
        #[serde(default)]
        algorithm: Option<GameAlgorithm>,
        #[serde(default)]
        branching: Option<usize>,
        #[serde(default)]
        depth: Option<u32>,
        #[serde(default)]
        utilities: Option<Vec<i64>>,
    },
    /// 缺省知识库为犯罪知识库
    BackwardChaining {
        #[serde(default)]
        clauses: Option<Vec<String>>,
        query: String,
        #[serde(default)]
        max_depth: Option<usize>,
    },
    GridSearch {
        width: i64,
        height: i64,
        initial: Pos,
        goal: Pos,
        #[serde(default)]
        obstacles: Vec<Pos>,
        #[serde(default)]
        cell_weights: Vec<CellWeight>,
        #[serde(default)]
        solver: Option<Solver>,
        #[serde(default)]
        weight: Option<f64>,
        #[serde(default)]
        max_expansions: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellWeight {
    pub at: Pos,
    pub weight: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameAlgorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

impl GameAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            GameAlgorithm::Minimax => "minimax",
            GameAlgorithm::AlphaBeta => "alpha_beta",
        }
    }
}

impl FromStr for GameAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "minimax" => Ok(GameAlgorithm::Minimax),
            "alpha_beta" | "alphabeta" => Ok(GameAlgorithm::AlphaBeta),
            other => Err(Error::invalid(format!("unknown game algorithm {other:?}"))),
        }
    }
}

use crate::game::GameTree;
use crate::logic::ProofTable;
use crate::search::{GridProblem, Pos};
use crate::trace::{Event, Trace};
use serde::{Deserialize, Serialize};

/// 节点元信息（编号、显示文本、父节点）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizNodeInfo {
    pub id: usize,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
}

/// 回放前需要的静态信息（建议放在事件之前）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizMeta {
    GameTree {
        algorithm: String,
        nodes: Vec<VizNodeInfo>,
        root_value: i64,
    },
    Proof {
        query: String,
        /// 按录制顺序出现的目标节点
        nodes: Vec<VizNodeInfo>,
        /// 第一个证明的表格（无证明时为空）
        table: Vec<Vec<String>>,
    },
    Grid {
        solver: String,
        width: i64,
        height: i64,
        initial: Pos,
        goal: Pos,
        obstacles: Vec<Pos>,
    },
}

impl VizMeta {
    pub fn game_tree(algorithm: &str, tree: &GameTree, root_value: i64) -> Self {
        let nodes = tree
            .nodes()
            .map(|n| VizNodeInfo {
                id: n.0,
                label: tree
                    .leaf_utility(n)
                    .map_or_else(|| n.to_string(), |u| u.to_string()),
                parent: tree.parent(n).map(|p| p.0),
            })
            .collect();
        VizMeta::GameTree {
            algorithm: algorithm.to_string(),
            nodes,
            root_value,
        }
    }

    pub fn proof(query: &str, trace: &Trace, table: Option<&ProofTable>) -> Self {
        let parents = trace
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::MarkEdge { parent, child } => Some((child.0, parent.0)),
                _ => None,
            })
            .collect::<std::collections::HashMap<_, _>>();
        let nodes = trace
            .labels()
            .iter()
            .map(|(id, label)| VizNodeInfo {
                id: id.0,
                label: label.clone(),
                parent: parents.get(&id.0).copied(),
            })
            .collect();
        VizMeta::Proof {
            query: query.to_string(),
            nodes,
            table: table.map(|t| t.rows.clone()).unwrap_or_default(),
        }
    }

    pub fn grid(solver: &str, problem: &GridProblem) -> Self {
        VizMeta::Grid {
            solver: solver.to_string(),
            width: problem.width(),
            height: problem.height(),
            initial: problem.initial(),
            goal: problem.goal(),
            obstacles: problem.obstacles().iter().copied().collect(),
        }
    }
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizEvent {
    /// 在 trace 中的序号
    pub seq: usize,
    #[serde(flatten)]
    pub event: Event,
}

/// 离线播放器读取的完整文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizDocument {
    pub meta: VizMeta,
    pub events: Vec<VizEvent>,
}

impl VizDocument {
    pub fn new(meta: VizMeta, trace: &Trace) -> Self {
        let events = trace
            .events()
            .iter()
            .enumerate()
            .map(|(seq, ev)| VizEvent {
                seq,
                event: ev.clone(),
            })
            .collect();
        Self { meta, events }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &std::path::Path) -> crate::error::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

//! 轨迹事件类型
//!
//! 每个事件描述一次原子的可视化状态变化；回放端按顺序折叠事件得到视图状态。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 轨迹中的节点标识符（博弈树节点、证明目标或网格单元）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// alpha/beta 边界：负无穷 < 有限值 < 正无穷
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    NegInfinity,
    Value(i64),
    PosInfinity,
}

impl Bound {
    pub fn value(self) -> Option<i64> {
        match self {
            Bound::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for Bound {
    fn from(v: i64) -> Self {
        Bound::Value(v)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::NegInfinity => write!(f, "-inf"),
            Bound::Value(v) => write!(f, "{v}"),
            Bound::PosInfinity => write!(f, "+inf"),
        }
    }
}

/// 轨迹事件（录制后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// 节点入栈（开始处理）
    Push { node: NodeId },
    /// 栈顶节点出栈（回溯）
    Pop,
    MarkExplored { node: NodeId },
    /// 高亮父子之间的边（被选中的走法 / 搜索树边）
    MarkEdge { parent: NodeId, child: NodeId },
    /// alpha-beta：节点当前的下界/上界
    SetBounds {
        node: NodeId,
        lower: Bound,
        upper: Bound,
    },
    /// 节点回传的效用值
    SetValue { node: NodeId, value: i64 },
    /// 被剪枝（未探索），与 explored 区分
    MarkPruned { node: NodeId },
    /// 网格搜索：节点进入 frontier
    MarkReached { node: NodeId },
    /// 网格搜索：从起点到当前节点的路径
    SetPath { nodes: Vec<NodeId> },
    /// 单步边界（一次点击/一次 step）
    Pause,
}

impl Event {
    /// 事件直接涉及的节点（`Pop`/`Pause` 没有）
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Event::Push { node }
            | Event::MarkExplored { node }
            | Event::SetBounds { node, .. }
            | Event::SetValue { node, .. }
            | Event::MarkPruned { node }
            | Event::MarkReached { node } => Some(*node),
            Event::MarkEdge { child, .. } => Some(*child),
            Event::SetPath { nodes } => nodes.last().copied(),
            Event::Pop | Event::Pause => None,
        }
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, Event::Pause)
    }
}

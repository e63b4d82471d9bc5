//! 两人零和博弈与可回放的博弈树搜索
//!
//! [`Game`] 是搜索算法看到的全部接口；[`GameTree`] 是一棵显式给出的有限博弈树。

mod alpha_beta;
mod minimax;
mod tree;

pub use alpha_beta::{alpha_beta_search, record_alpha_beta};
pub use minimax::{minimax_decision, record_minimax};
pub use tree::{DEFAULT_LEAF_UTILITIES, GameTree, MAX_TREE_DEPTH, MAX_TREE_NODES};

use crate::error::Result;
use crate::trace::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Max,
    Min,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }
}

/// 博弈定义。所有方法只读，搜索不会修改输入。
///
/// 每个节点是 MAX 还是 MIN 节点由 `to_move` 决定，同一玩家可以连续行动。
pub trait Game {
    type State: Clone + std::fmt::Debug;
    type Action: Clone + std::fmt::Debug;

    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;
    fn terminal_test(&self, state: &Self::State) -> bool;
    /// 终局效用（站在 `player` 的角度）
    fn utility(&self, state: &Self::State, player: Player) -> Result<i64>;
    fn to_move(&self, state: &Self::State) -> Player;
    /// 状态在 trace 中的节点编号
    fn node(&self, state: &Self::State) -> NodeId;
}

/// 搜索结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision<A> {
    /// 根节点的回传值
    pub value: i64,
    /// 根节点选择的走法；根本身是终局时为 None
    pub action: Option<A>,
    /// 实际读取效用的叶子数
    pub leaves_evaluated: usize,
}

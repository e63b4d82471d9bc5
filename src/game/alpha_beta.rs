//! 可回放的 alpha-beta 剪枝
//!
//! 与 minimax 的录制方式相同，另外记录：
//! - 进入节点及边界收紧时的 (lower, upper)；MAX 节点为 (v, beta)，MIN 节点为 (alpha, v)
//! - 截断后从未访问的兄弟子树，逐节点标记为 pruned

use super::{Decision, Game, Player};
use crate::error::{Error, Result};
use crate::trace::{Bound, Exit, Instrument, NodeId, Recorder, Trace};
use tracing::{debug, trace};

struct AlphaBeta<'a, G: Game, I: Instrument> {
    game: &'a G,
    inst: &'a mut I,
    player: Player,
    leaves: usize,
}

impl<G: Game, I: Instrument> AlphaBeta<'_, G, I> {
    fn check_limit(&self) -> Result<()> {
        if self.inst.should_stop() {
            return Err(Error::aborted("event limit exceeded", None));
        }
        Ok(())
    }

    fn value(
        &mut self,
        state: &G::State,
        mut alpha: Bound,
        mut beta: Bound,
    ) -> Result<(i64, Option<G::Action>)> {
        self.check_limit()?;
        let node = self.game.node(state);
        self.inst.on_enter(node);

        if self.game.terminal_test(state) {
            let u = self.game.utility(state, self.player)?;
            self.leaves += 1;
            self.inst.on_exit(node, Exit::Value(u));
            self.inst.on_pause();
            return Ok((u, None));
        }

        let maximizing = self.game.to_move(state) == self.player;
        let mut v = if maximizing {
            Bound::NegInfinity
        } else {
            Bound::PosInfinity
        };
        self.publish_bounds(node, maximizing, v, alpha, beta);
        self.inst.on_pause();

        let actions = self.game.actions(state);
        let mut best: Option<(G::State, G::Action)> = None;
        let mut cut_after = None;
        for (i, a) in actions.iter().enumerate() {
            let child = self.game.result(state, a);
            let (cv, _) = self.value(&child, alpha, beta)?;
            let cv = Bound::Value(cv);
            let improved = if maximizing { cv > v } else { cv < v };
            if improved {
                v = cv;
                best = Some((child, a.clone()));
                self.publish_bounds(node, maximizing, v, alpha, beta);
            }
            let cut = if maximizing { v >= beta } else { v <= alpha };
            if cut {
                cut_after = Some(i);
                break;
            }
            if maximizing {
                alpha = alpha.max(v);
            } else {
                beta = beta.min(v);
            }
        }

        let value = v
            .value()
            .ok_or_else(|| Error::invalid(format!("non-terminal node {node} has no actions")))?;
        let (child, action) =
            best.ok_or_else(|| Error::invalid(format!("node {node} chose no action")))?;

        match cut_after {
            Some(i) => {
                trace!(%node, value, skipped = actions.len() - i - 1, "截断");
                self.inst.on_pause();
                for a in &actions[i + 1..] {
                    let skipped = self.game.result(state, a);
                    self.prune_subtree(&skipped)?;
                }
                // 截断节点的值只是边界，不高亮走法
                self.inst.on_exit(node, Exit::Value(value));
            }
            None => {
                self.inst.on_exit(
                    node,
                    Exit::Chosen {
                        child: self.game.node(&child),
                        value,
                    },
                );
            }
        }
        self.inst.on_pause();
        Ok((value, Some(action)))
    }

    fn publish_bounds(&mut self, node: NodeId, maximizing: bool, v: Bound, alpha: Bound, beta: Bound) {
        if maximizing {
            self.inst.on_bounds(node, v, beta);
        } else {
            self.inst.on_bounds(node, alpha, v);
        }
    }

    /// 只遍历结构（actions/result），不读取效用
    fn prune_subtree(&mut self, root: &G::State) -> Result<()> {
        let mut stack = vec![root.clone()];
        while let Some(s) = stack.pop() {
            self.check_limit()?;
            self.inst.on_prune(self.game.node(&s));
            if self.game.terminal_test(&s) {
                continue;
            }
            let mut kids = self
                .game
                .actions(&s)
                .iter()
                .map(|a| self.game.result(&s, a))
                .collect::<Vec<_>>();
            kids.reverse();
            stack.extend(kids);
        }
        Ok(())
    }
}

/// alpha-beta 搜索：与 minimax 同值同走法，但可能读取更少的叶子。
pub fn alpha_beta_search<G: Game, I: Instrument>(
    game: &G,
    state: &G::State,
    inst: &mut I,
) -> Result<Decision<G::Action>> {
    let player = game.to_move(state);
    let mut search = AlphaBeta {
        game,
        inst,
        player,
        leaves: 0,
    };
    let (value, action) = search.value(state, Bound::NegInfinity, Bound::PosInfinity)?;
    debug!(value, ?action, leaves = search.leaves, "alpha-beta 完成");
    Ok(Decision {
        value,
        action,
        leaves_evaluated: search.leaves,
    })
}

/// 录制一次 alpha-beta 搜索
#[tracing::instrument(skip(game, state))]
pub fn record_alpha_beta<G: Game>(
    game: &G,
    state: &G::State,
    limit: Option<usize>,
) -> Result<(Decision<G::Action>, Trace)> {
    let recorder = limit.map(Recorder::with_limit).unwrap_or_default();
    recorder.record(|rec| alpha_beta_search(game, state, rec))
}

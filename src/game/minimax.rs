//! 可回放的 minimax
//!
//! 每个被访问的节点（含叶子）都会入栈、赋值、标记 explored 并出栈。

use super::{Decision, Game, Player};
use crate::error::{Error, Result};
use crate::trace::{Exit, Instrument, Recorder, Trace};
use tracing::debug;

struct Minimax<'a, G: Game, I: Instrument> {
    game: &'a G,
    inst: &'a mut I,
    player: Player,
    leaves: usize,
}

impl<G: Game, I: Instrument> Minimax<'_, G, I> {
    fn value(&mut self, state: &G::State) -> Result<(i64, Option<G::Action>)> {
        if self.inst.should_stop() {
            return Err(Error::aborted("event limit exceeded", None));
        }
        let node = self.game.node(state);
        self.inst.on_enter(node);

        if self.game.terminal_test(state) {
            let u = self.game.utility(state, self.player)?;
            self.leaves += 1;
            self.inst.on_exit(node, Exit::Value(u));
            self.inst.on_pause();
            return Ok((u, None));
        }
        self.inst.on_pause();

        let maximizing = self.game.to_move(state) == self.player;
        // 严格比较：相同值时保留最先出现的走法
        let mut best: Option<(i64, G::State, G::Action)> = None;
        for a in self.game.actions(state) {
            let child = self.game.result(state, &a);
            let (v, _) = self.value(&child)?;
            let better = match &best {
                None => true,
                Some((bv, _, _)) if maximizing => v > *bv,
                Some((bv, _, _)) => v < *bv,
            };
            if better {
                best = Some((v, child, a));
            }
        }
        let (value, child, action) = best.ok_or_else(|| {
            Error::invalid(format!("non-terminal node {node} has no actions"))
        })?;

        self.inst.on_exit(
            node,
            Exit::Chosen {
                child: self.game.node(&child),
                value,
            },
        );
        self.inst.on_pause();
        Ok((value, Some(action)))
    }
}

/// 完整 minimax：返回根节点的值与最佳走法。
pub fn minimax_decision<G: Game, I: Instrument>(
    game: &G,
    state: &G::State,
    inst: &mut I,
) -> Result<Decision<G::Action>> {
    let player = game.to_move(state);
    let mut search = Minimax {
        game,
        inst,
        player,
        leaves: 0,
    };
    let (value, action) = search.value(state)?;
    debug!(value, ?action, leaves = search.leaves, "minimax 完成");
    Ok(Decision {
        value,
        action,
        leaves_evaluated: search.leaves,
    })
}

/// 录制一次 minimax 搜索
#[tracing::instrument(skip(game, state))]
pub fn record_minimax<G: Game>(
    game: &G,
    state: &G::State,
    limit: Option<usize>,
) -> Result<(Decision<G::Action>, Trace)> {
    let recorder = limit.map(Recorder::with_limit).unwrap_or_default();
    recorder.record(|rec| minimax_decision(game, state, rec))
}

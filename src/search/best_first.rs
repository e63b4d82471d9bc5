//! 可回放的最佳优先网格搜索
//!
//! 每次展开一个 frontier 节点就是一步：入栈、发布当前路径、标记新到达的子节点、
//! 标记 explored、出栈。

use super::frontier::Frontier;
use super::grid::{GridProblem, Pos, Solver};
use crate::error::{Error, Result};
use crate::trace::{Exit, Instrument, NodeId, Recorder, Trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// 默认的 wastar 权重
pub const DEFAULT_WEIGHT: f64 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    pub solver: Solver,
    pub weight: f64,
    /// 最多展开次数；None 表示直到结束
    pub max_expansions: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            solver: Solver::Astar,
            weight: DEFAULT_WEIGHT,
            max_expansions: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Found,
    /// frontier 为空，不可达
    Exhausted,
    /// 达到展开上限
    Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridOutcome {
    pub status: SearchStatus,
    /// 最后一次展开的节点路径（Found 时即解）
    pub path: Vec<Pos>,
    pub path_cost: u64,
    pub expansions: usize,
    pub reached: usize,
}

struct SearchNode {
    pos: Pos,
    parent: Option<usize>,
    cost: u64,
    depth: usize,
}

fn f_value(problem: &GridProblem, opts: &SearchOptions, n: &SearchNode) -> f64 {
    let g = n.cost as f64;
    let h = problem.h(n.pos);
    match opts.solver {
        Solver::Astar => g + h,
        Solver::Wastar => g + opts.weight * h,
        Solver::Bfs => n.depth as f64,
        Solver::Dfs => -(n.depth as f64),
        Solver::Ucs => g,
        Solver::Bestfs => h,
    }
}

fn path_to(nodes: &[SearchNode], mut idx: usize) -> Vec<Pos> {
    let mut path = vec![nodes[idx].pos];
    while let Some(p) = nodes[idx].parent {
        path.push(nodes[p].pos);
        idx = p;
    }
    path.reverse();
    path
}

pub fn best_first_search<I: Instrument>(
    problem: &GridProblem,
    opts: &SearchOptions,
    inst: &mut I,
) -> Result<GridOutcome> {
    let mut nodes = vec![SearchNode {
        pos: problem.initial(),
        parent: None,
        cost: 0,
        depth: 0,
    }];
    let mut reached: HashMap<Pos, usize> = HashMap::from([(problem.initial(), 0)]);
    let mut frontier = Frontier::default();
    frontier.push(f_value(problem, opts, &nodes[0]), 0);

    let start = problem.node(problem.initial());
    inst.on_label(start, &format!("{:?}", problem.initial()));
    inst.on_reach(None, start);
    inst.on_pause();

    let mut expansions = 0;
    let mut last = 0;
    let status = loop {
        if opts.max_expansions.is_some_and(|max| expansions >= max) {
            break SearchStatus::Stopped;
        }
        let Some(idx) = frontier.pop() else {
            break SearchStatus::Exhausted;
        };
        let pos = nodes[idx].pos;
        // 已经有更便宜的路径到达该格
        if reached.get(&pos) != Some(&idx) {
            continue;
        }
        if inst.should_stop() {
            return Err(Error::aborted("event limit exceeded", None));
        }

        expansions += 1;
        last = idx;
        let node = problem.node(pos);
        let path = path_to(&nodes, idx);
        trace!(?pos, cost = nodes[idx].cost, frontier = frontier.len(), "展开");
        inst.on_enter(node);
        inst.on_path(&path.iter().map(|&p| problem.node(p)).collect::<Vec<NodeId>>());

        if problem.goal_test(pos) {
            inst.on_exit(node, Exit::Done);
            inst.on_pause();
            break SearchStatus::Found;
        }

        for next in problem.actions(pos) {
            let cost = nodes[idx]
                .cost
                .checked_add(problem.step_cost(next))
                .ok_or_else(|| Error::invalid(format!("path cost to {next:?} overflows u64")))?;
            let child = SearchNode {
                pos: next,
                parent: Some(idx),
                cost,
                depth: nodes[idx].depth + 1,
            };
            let better = match reached.get(&next) {
                None => true,
                Some(&old) => child.cost < nodes[old].cost,
            };
            if !better {
                continue;
            }
            let f = f_value(problem, opts, &child);
            let child_idx = nodes.len();
            nodes.push(child);
            reached.insert(next, child_idx);
            frontier.push(f, child_idx);

            let child_node = problem.node(next);
            inst.on_label(child_node, &format!("{next:?}"));
            inst.on_reach(Some(node), child_node);
        }
        inst.on_exit(node, Exit::Done);
        inst.on_pause();
    };

    let outcome = GridOutcome {
        status,
        path: path_to(&nodes, last),
        path_cost: nodes[last].cost,
        expansions,
        reached: reached.len(),
    };
    debug!(
        solver = %opts.solver,
        ?outcome.status,
        outcome.expansions,
        outcome.path_cost,
        "网格搜索完成"
    );
    Ok(outcome)
}

/// 录制一次网格搜索
#[tracing::instrument(skip(problem), fields(solver = %opts.solver))]
pub fn record_best_first(
    problem: &GridProblem,
    opts: &SearchOptions,
    limit: Option<usize>,
) -> Result<(GridOutcome, Trace)> {
    let recorder = limit.map(Recorder::with_limit).unwrap_or_default();
    recorder.record(|rec| best_first_search(problem, opts, rec))
}

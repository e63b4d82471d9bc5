//! 可回放的一阶逻辑反向链接
//!
//! 每次对一个目标调用 OR 步骤都是 trace 中的一个新节点：
//! 入栈时标注（代入后的）目标文本并连到父目标；
//! 有至少一个证明则 explored，无证明或超出深度则 pruned。
//! 与生成器版本不同，这里一次性求出全部解。

use super::kb::FolKb;
use super::term::{Substitution, Term};
use super::unify::unify;
use crate::error::{Error, Result};
use crate::trace::{Exit, Instrument, NodeId, Recorder, Trace};
use tracing::{debug, trace};

pub const DEFAULT_MAX_DEPTH: usize = 16;

/// 证明树：目标及支撑它的子证明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofNode {
    pub goal: Term,
    pub children: Vec<ProofNode>,
}

impl ProofNode {
    pub fn resolve(&self, theta: &Substitution) -> ProofNode {
        ProofNode {
            goal: self.goal.resolve(theta),
            children: self.children.iter().map(|c| c.resolve(theta)).collect(),
        }
    }

    pub fn size(&self) -> usize {
        1 + self.children.iter().map(ProofNode::size).sum::<usize>()
    }
}

/// 一个完整证明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    /// 已代入到不动点的证明树
    pub tree: ProofNode,
    pub theta: Substitution,
}

impl Proof {
    /// 查询中变量的取值
    pub fn binding(&self, var: &str) -> Option<Term> {
        let v = Term::var(var);
        let resolved = v.resolve(&self.theta);
        (resolved != v).then_some(resolved)
    }
}

type Partial = (Vec<ProofNode>, Substitution);

struct BackwardChainer<'a, I: Instrument> {
    kb: &'a FolKb,
    inst: &'a mut I,
    max_depth: usize,
    next_node: usize,
    next_var: usize,
}

impl<I: Instrument> BackwardChainer<'_, I> {
    fn or(
        &mut self,
        goal: &Term,
        theta: &Substitution,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Result<Vec<Partial>> {
        if self.inst.should_stop() {
            return Err(Error::aborted("event limit exceeded", None));
        }
        let node = NodeId(self.next_node);
        self.next_node += 1;
        self.inst.on_label(node, &goal.resolve(theta).to_string());
        self.inst.on_enter(node);
        if let Some(parent) = parent {
            self.inst.on_edge(parent, node);
        }
        self.inst.on_pause();

        if depth > self.max_depth {
            trace!(%node, %goal, depth, "超出深度，放弃该目标");
            self.inst.on_exit(node, Exit::Failed);
            self.inst.on_pause();
            return Ok(Vec::new());
        }

        let kb = self.kb;
        let mut out = Vec::new();
        for rule in kb.fetch_rules_for_goal(goal) {
            let rule = rule.standardize(&mut self.next_var);
            let Some(theta1) = unify(&rule.consequent, goal, theta.clone()) else {
                continue;
            };
            for (proofs, theta2) in self.and(&rule.antecedents, theta1, node, depth + 1)? {
                out.push((
                    vec![ProofNode {
                        goal: goal.clone(),
                        children: proofs,
                    }],
                    theta2,
                ));
            }
        }

        let exit = if out.is_empty() {
            Exit::Failed
        } else {
            Exit::Done
        };
        self.inst.on_exit(node, exit);
        self.inst.on_pause();
        Ok(out)
    }

    fn and(
        &mut self,
        goals: &[Term],
        theta: Substitution,
        parent: NodeId,
        depth: usize,
    ) -> Result<Vec<Partial>> {
        let Some((first, rest)) = goals.split_first() else {
            return Ok(vec![(Vec::new(), theta)]);
        };
        let mut out = Vec::new();
        for (p1, theta1) in self.or(&first.subst(&theta), &theta, Some(parent), depth)? {
            for (p2, theta2) in self.and(rest, theta1, parent, depth)? {
                let mut proofs = p1.clone();
                proofs.extend(p2);
                out.push((proofs, theta2));
            }
        }
        Ok(out)
    }
}

/// 反向链接求出 `query` 的全部证明（按发现顺序）。
pub fn fol_bc_ask<I: Instrument>(
    kb: &FolKb,
    query: &Term,
    max_depth: usize,
    inst: &mut I,
) -> Result<Vec<Proof>> {
    let mut chainer = BackwardChainer {
        kb,
        inst,
        max_depth,
        next_node: 0,
        next_var: 0,
    };
    let found = chainer.or(query, &Substitution::new(), None, 0)?;
    let proofs = found
        .into_iter()
        .filter_map(|(mut trees, theta)| {
            trees.pop().map(|tree| Proof {
                tree: tree.resolve(&theta),
                theta,
            })
        })
        .collect::<Vec<_>>();
    debug!(%query, proofs = proofs.len(), goals = chainer.next_node, "反向链接完成");
    Ok(proofs)
}

/// 录制一次反向链接
#[tracing::instrument(skip(kb, query), fields(query = %query))]
pub fn record_fol_bc_ask(
    kb: &FolKb,
    query: &Term,
    max_depth: usize,
    limit: Option<usize>,
) -> Result<(Vec<Proof>, Trace)> {
    let recorder = limit.map(Recorder::with_limit).unwrap_or_default();
    recorder.record(|rec| fol_bc_ask(kb, query, max_depth, rec))
}

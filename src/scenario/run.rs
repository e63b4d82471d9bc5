//! 场景执行：校验输入、录制 trace、汇总结果

use super::spec::{GameAlgorithm, SCHEMA_VERSION, ScenarioKind, ScenarioSpec};
use crate::error::{Error, Result};
use crate::game::{DEFAULT_LEAF_UTILITIES, GameTree, record_alpha_beta, record_minimax};
use crate::logic::{CRIME_KB, DEFAULT_MAX_DEPTH, FolKb, ProofTable, parse_atom, record_fol_bc_ask};
use crate::replay::ViewModel;
use crate::search::{
    DEFAULT_WEIGHT, GridProblem, Pos, SearchOptions, SearchStatus, Solver, record_best_first,
};
use crate::trace::Trace;
use crate::viz::{VizDocument, VizMeta, render_game_tree, render_goal_stack, render_grid, render_proof_table};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::info;

/// 录制结果的摘要
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    GameTree {
        algorithm: GameAlgorithm,
        value: i64,
        action: Option<usize>,
        leaves_evaluated: usize,
    },
    BackwardChaining {
        query: String,
        /// 每个证明中查询变量的取值
        answers: Vec<BTreeMap<String, String>>,
    },
    GridSearch {
        solver: Solver,
        status: SearchStatus,
        expansions: usize,
        path_cost: u64,
        path: Vec<Pos>,
    },
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::GameTree {
                algorithm,
                value,
                action,
                leaves_evaluated,
            } => write!(
                f,
                "{} value={value} action={action:?} leaves_evaluated={leaves_evaluated}",
                algorithm.as_str()
            ),
            Summary::BackwardChaining { query, answers } => {
                write!(f, "query={query} proofs={}", answers.len())?;
                for (i, a) in answers.iter().enumerate() {
                    let binds = a
                        .iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "\nanswer[{i}] {binds}")?;
                }
                Ok(())
            }
            Summary::GridSearch {
                solver,
                status,
                expansions,
                path_cost,
                path,
            } => write!(
                f,
                "{solver} status={status:?} expansions={expansions} path_cost={path_cost} path_len={}",
                path.len()
            ),
        }
    }
}

/// 渲染所需的静态输入
#[derive(Debug, Clone)]
pub enum Scene {
    GameTree(GameTree),
    Proof(Option<ProofTable>),
    Grid(GridProblem),
}

#[derive(Debug, Clone)]
pub struct Recording {
    pub trace: Trace,
    pub meta: VizMeta,
    pub summary: Summary,
    pub scene: Scene,
}

impl Recording {
    pub fn viz_document(&self) -> VizDocument {
        VizDocument::new(self.meta.clone(), &self.trace)
    }

    /// 渲染某一时刻的视图
    pub fn render(&self, view: &ViewModel) -> String {
        match &self.scene {
            Scene::GameTree(tree) => render_game_tree(tree, view),
            Scene::Grid(problem) => render_grid(problem, view),
            Scene::Proof(table) => {
                let mut out = render_goal_stack(&self.trace, view);
                if let Some(table) = table {
                    out.push_str(&render_proof_table(table));
                }
                out
            }
        }
    }
}

/// 读取并校验场景文件
pub fn load(path: &Path) -> Result<ScenarioSpec> {
    let raw = std::fs::read_to_string(path)?;
    let spec: ScenarioSpec = serde_json::from_str(&raw)?;
    if spec.schema_version != SCHEMA_VERSION {
        return Err(Error::invalid(format!(
            "unsupported schema_version {} (expected {SCHEMA_VERSION})",
            spec.schema_version
        )));
    }
    Ok(spec)
}

#[tracing::instrument(skip(spec), fields(title = ?spec.meta.as_ref().and_then(|m| m.title.as_deref())))]
pub fn run(spec: &ScenarioSpec) -> Result<Recording> {
    let limit = spec.max_events;
    let recording = match &spec.scenario {
        ScenarioKind::GameTree {
            algorithm,
            branching,
            depth,
            utilities,
        } => {
            let algorithm = algorithm.unwrap_or_default();
            let utilities = utilities.as_deref().unwrap_or(&DEFAULT_LEAF_UTILITIES);
            let tree = GameTree::uniform(branching.unwrap_or(3), depth.unwrap_or(3), utilities)?;
            let (decision, trace) = match algorithm {
                GameAlgorithm::Minimax => record_minimax(&tree, &tree.root(), limit)?,
                GameAlgorithm::AlphaBeta => record_alpha_beta(&tree, &tree.root(), limit)?,
            };
            Recording {
                meta: VizMeta::game_tree(algorithm.as_str(), &tree, decision.value),
                summary: Summary::GameTree {
                    algorithm,
                    value: decision.value,
                    action: decision.action,
                    leaves_evaluated: decision.leaves_evaluated,
                },
                trace,
                scene: Scene::GameTree(tree),
            }
        }
        ScenarioKind::BackwardChaining {
            clauses,
            query,
            max_depth,
        } => {
            let kb = match clauses {
                Some(clauses) => FolKb::from_sentences(clauses)?,
                None => FolKb::from_sentences(&CRIME_KB)?,
            };
            let goal = parse_atom(query)?;
            let (proofs, trace) =
                record_fol_bc_ask(&kb, &goal, max_depth.unwrap_or(DEFAULT_MAX_DEPTH), limit)?;
            let vars = goal.variables();
            let answers = proofs
                .iter()
                .map(|p| {
                    vars.iter()
                        .filter_map(|v| p.binding(v).map(|t| (v.clone(), t.to_string())))
                        .collect()
                })
                .collect();
            let table = proofs.first().map(|p| ProofTable::from_proof(&p.tree));
            Recording {
                meta: VizMeta::proof(query, &trace, table.as_ref()),
                summary: Summary::BackwardChaining {
                    query: goal.to_string(),
                    answers,
                },
                trace,
                scene: Scene::Proof(table),
            }
        }
        ScenarioKind::GridSearch {
            width,
            height,
            initial,
            goal,
            obstacles,
            cell_weights,
            solver,
            weight,
            max_expansions,
        } => {
            let problem = GridProblem::new(*width, *height, *initial, *goal, obstacles.iter().copied())?
                .with_cell_weights(cell_weights.iter().map(|c| (c.at, c.weight)));
            let opts = SearchOptions {
                solver: solver.unwrap_or(Solver::Astar),
                weight: weight.unwrap_or(DEFAULT_WEIGHT),
                max_expansions: *max_expansions,
            };
            let (outcome, trace) = record_best_first(&problem, &opts, limit)?;
            Recording {
                meta: VizMeta::grid(&opts.solver.to_string(), &problem),
                summary: Summary::GridSearch {
                    solver: opts.solver,
                    status: outcome.status,
                    expansions: outcome.expansions,
                    path_cost: outcome.path_cost,
                    path: outcome.path,
                },
                trace,
                scene: Scene::Grid(problem),
            }
        }
    };
    info!(
        events = recording.trace.len(),
        pauses = recording.trace.pauses(),
        summary = %recording.summary,
        "场景录制完成"
    );
    Ok(recording)
}

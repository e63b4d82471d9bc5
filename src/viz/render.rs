//! 纯文本渲染：终端和测试里查看回放状态。

use crate::game::GameTree;
use crate::logic::ProofTable;
use crate::replay::{NodeState, ViewModel};
use crate::search::GridProblem;
use crate::trace::{NodeId, Trace};
use std::fmt::Write;

/// 按层输出博弈树。
///
/// `[12]` 已探索（带值），`<..>` 在栈上，`{xx}` 被剪枝，`[  ]` 未访问；
/// 栈上节点若有边界附加 `lower..upper`。
pub fn render_game_tree(tree: &GameTree, view: &ViewModel) -> String {
    let mut rows: Vec<Vec<NodeId>> = vec![Vec::new(); tree.max_depth() + 1];
    for n in tree.nodes() {
        rows[tree.depth(n)].push(n);
    }
    let mut out = String::new();
    for (depth, row) in rows.iter().enumerate() {
        let _ = write!(out, "d{depth}:");
        for &n in row {
            let value = view
                .values
                .get(&n)
                .map_or_else(|| "..".to_string(), |v| format!("{v:>2}"));
            let cell = match view.node_state(n) {
                NodeState::Explored => format!("[{value}]"),
                NodeState::Active | NodeState::Reached => format!("<{value}>"),
                NodeState::Pruned => "{xx}".to_string(),
                NodeState::Unvisited => "[  ]".to_string(),
            };
            let _ = write!(out, " {cell}");
        }
        out.push('\n');
    }
    for n in &view.stack {
        if let Some((lower, upper)) = view.bounds.get(n) {
            let mark = if view.is_cut(*n) { " cut" } else { "" };
            let _ = writeln!(out, "node {n}: {lower}..{upper}{mark}");
        }
    }
    let _ = writeln!(out, "edges: {}", view.edges.len());
    out
}

/// 输出网格：`#` 障碍，`S`/`G` 起终点，`@` 当前节点，`*` 当前路径，
/// `o` 已展开，`+` 已到达，`.` 空格。
pub fn render_grid(problem: &GridProblem, view: &ViewModel) -> String {
    let current = view.top().or_else(|| view.path.last().copied());
    let on_path = view.path.iter().copied().collect::<std::collections::BTreeSet<_>>();
    let mut out = String::new();
    for y in 0..problem.height() {
        for x in 0..problem.width() {
            let p = (x, y);
            let node = problem.node(p);
            let c = if problem.obstacles().contains(&p) {
                '#'
            } else if p == problem.initial() {
                'S'
            } else if p == problem.goal() {
                'G'
            } else if Some(node) == current {
                '@'
            } else if on_path.contains(&node) {
                '*'
            } else if view.explored.contains(&node) {
                'o'
            } else if view.reached.contains(&node) {
                '+'
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// 输出证明表，每行一个深度
pub fn render_proof_table(table: &ProofTable) -> String {
    let mut out = String::new();
    for (depth, row) in table.rows.iter().enumerate() {
        let _ = writeln!(out, "{depth}: {}", row.join(" | "));
    }
    out
}

/// 当前目标栈（自底向上），使用 trace 中的节点标注
pub fn render_goal_stack(trace: &Trace, view: &ViewModel) -> String {
    let mut out = String::new();
    for (i, n) in view.stack.iter().enumerate() {
        let label = trace.label(*n).unwrap_or("?");
        let state = match view.node_state(*n) {
            NodeState::Explored => " ✓",
            NodeState::Pruned => " ✗",
            _ => "",
        };
        let _ = writeln!(out, "{:indent$}{label}{state}", "", indent = i * 2);
    }
    out
}

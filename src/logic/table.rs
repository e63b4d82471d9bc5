//! 证明表：把证明树按深度摊平成行，记录父子单元格之间的连线。

use super::bc::ProofNode;

/// (行=深度, 列=该行中的序号)
pub type Cell = (usize, usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofTable {
    pub rows: Vec<Vec<String>>,
    /// (父单元格, 子单元格)
    pub links: Vec<(Cell, Cell)>,
}

impl ProofTable {
    pub fn from_proof(root: &ProofNode) -> Self {
        let mut table = ProofTable::default();
        table.visit(root, 0);
        table
    }

    fn visit(&mut self, node: &ProofNode, depth: usize) -> Cell {
        if self.rows.len() <= depth {
            self.rows.push(Vec::new());
        }
        let cell = (depth, self.rows[depth].len());
        self.rows[depth].push(node.goal.to_string());
        for child in &node.children {
            let child_cell = self.visit(child, depth + 1);
            self.links.push((cell, child_cell));
        }
        cell
    }

    pub fn cell_text(&self, (row, col): Cell) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.rows.len()
    }
}

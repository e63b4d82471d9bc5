//! 网格上的最佳优先搜索（astar / wastar / bfs / dfs / ucs / bestfs）

mod best_first;
mod frontier;
mod grid;

pub use best_first::{
    DEFAULT_WEIGHT, GridOutcome, SearchOptions, SearchStatus, best_first_search, record_best_first,
};
pub use grid::{DIRECTIONS, GridProblem, MAX_GRID_CELLS, Pos, Solver};

//! 可视化输出（离线播放器用的 JSON + 终端文本）
//!
//! 设计目标：
//! - **结构化**：导出 JSON 文档（meta + 带序号的事件），前端无需解析文本日志
//! - **轻量**：不引入复杂依赖/运行时服务
//! - **可回放**：前端按序号单步或跳转

mod render;
mod types;

pub use render::{render_game_tree, render_goal_stack, render_grid, render_proof_table};
pub use types::{VizDocument, VizEvent, VizMeta, VizNodeInfo};

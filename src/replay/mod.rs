//! Trace 回放
//!
//! 游标按顺序把事件应用到视图状态上；每步触发一次外部重绘。

mod cursor;
mod view;

pub use cursor::{RedrawCallback, ReplayCursor};
pub use view::{NodeState, ViewModel};

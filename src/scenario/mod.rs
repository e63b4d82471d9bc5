//! 场景文件（scenario.json）
//!
//! 一个场景选择一种可回放的算法及其输入，`run` 负责录制并给出摘要。

mod run;
mod spec;

pub use run::{Recording, Scene, Summary, load, run};
pub use spec::{CellWeight, GameAlgorithm, SCHEMA_VERSION, ScenarioKind, ScenarioMeta, ScenarioSpec};

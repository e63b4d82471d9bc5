//! 轨迹录制器
//!
//! 算法通过 [`Instrument`] 回调上报状态变化，[`Recorder`] 把它们追加成有序事件日志。
//! 录制是全有或全无：算法失败时部分 trace 直接丢弃。

use super::event::{Bound, Event, NodeId};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// 节点退出时的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// 选中某个子节点，回传其值
    Chosen { child: NodeId, value: i64 },
    /// 只有值（叶子，或被截断的节点）
    Value(i64),
    /// 成功完成（证明成立 / 节点已展开）
    Done,
    /// 失败（目标无法证明 / 超出深度）
    Failed,
}

/// 算法侧的插桩接口
pub trait Instrument {
    fn on_enter(&mut self, node: NodeId);
    fn on_exit(&mut self, node: NodeId, exit: Exit);
    fn on_prune(&mut self, node: NodeId);
    fn on_pause(&mut self);

    fn on_bounds(&mut self, _node: NodeId, _lower: Bound, _upper: Bound) {}
    fn on_edge(&mut self, _parent: NodeId, _child: NodeId) {}
    fn on_reach(&mut self, _parent: Option<NodeId>, _node: NodeId) {}
    fn on_path(&mut self, _nodes: &[NodeId]) {}
    fn on_label(&mut self, _node: NodeId, _label: &str) {}

    /// 返回 true 时算法应尽快以错误退出
    fn should_stop(&self) -> bool {
        false
    }
}

/// 不记录任何东西的插桩（用于对照计算）
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInstrument;

impl Instrument for NoopInstrument {
    fn on_enter(&mut self, _node: NodeId) {}
    fn on_exit(&mut self, _node: NodeId, _exit: Exit) {}
    fn on_prune(&mut self, _node: NodeId) {}
    fn on_pause(&mut self) {}
}

/// 一次算法运行产生的只读事件序列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    events: Vec<Event>,
    labels: BTreeMap<NodeId, String>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, idx: usize) -> Option<&Event> {
        self.events.get(idx)
    }

    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.labels.get(&node).map(String::as_str)
    }

    pub fn labels(&self) -> &BTreeMap<NodeId, String> {
        &self.labels
    }

    /// `Pause` 事件个数，即可单步的次数
    pub fn pauses(&self) -> usize {
        self.events.iter().filter(|e| e.is_pause()).count()
    }
}

/// 事件收集器
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<Event>,
    labels: BTreeMap<NodeId, String>,
    limit: Option<usize>,
    overflowed: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 限制事件条数；超出后录制失败
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 运行一次 `run`，成功时返回其结果与完整 trace。
    #[tracing::instrument(skip(self, run), fields(limit = ?self.limit))]
    pub fn record<T, F>(mut self, run: F) -> Result<(T, Trace)>
    where
        F: FnOnce(&mut Recorder) -> Result<T>,
    {
        info!("开始录制");
        let outcome = run(&mut self);
        let outcome = match outcome {
            Ok(_) if self.overflowed => Err(Error::aborted(
                format!("event limit {} exceeded", self.limit.unwrap_or_default()),
                None,
            )),
            other => other,
        };
        match outcome {
            Ok(out) => {
                info!(
                    events = self.events.len(),
                    labels = self.labels.len(),
                    "✅ 录制完成"
                );
                Ok((
                    out,
                    Trace {
                        events: self.events,
                        labels: self.labels,
                    },
                ))
            }
            Err(err) => {
                warn!(discarded = self.events.len(), %err, "录制失败，丢弃部分 trace");
                Err(match err {
                    aborted @ Error::RecordingAborted { .. } => aborted,
                    other => Error::aborted(other.to_string(), Some(other)),
                })
            }
        }
    }

    /// 追加一个原始事件
    pub fn emit(&mut self, ev: Event) {
        if let Some(limit) = self.limit {
            if self.events.len() >= limit {
                if !self.overflowed {
                    debug!(limit, "事件数达到上限");
                }
                self.overflowed = true;
                return;
            }
        }
        self.events.push(ev);
    }
}

impl Instrument for Recorder {
    fn on_enter(&mut self, node: NodeId) {
        self.emit(Event::Push { node });
    }

    fn on_exit(&mut self, node: NodeId, exit: Exit) {
        match exit {
            Exit::Chosen { child, value } => {
                self.emit(Event::SetValue { node, value });
                self.emit(Event::MarkEdge {
                    parent: node,
                    child,
                });
                self.emit(Event::MarkExplored { node });
            }
            Exit::Value(value) => {
                self.emit(Event::SetValue { node, value });
                self.emit(Event::MarkExplored { node });
            }
            Exit::Done => self.emit(Event::MarkExplored { node }),
            Exit::Failed => self.emit(Event::MarkPruned { node }),
        }
        self.emit(Event::Pop);
    }

    fn on_prune(&mut self, node: NodeId) {
        self.emit(Event::MarkPruned { node });
    }

    fn on_pause(&mut self) {
        self.emit(Event::Pause);
    }

    fn on_bounds(&mut self, node: NodeId, lower: Bound, upper: Bound) {
        self.emit(Event::SetBounds { node, lower, upper });
    }

    fn on_edge(&mut self, parent: NodeId, child: NodeId) {
        self.emit(Event::MarkEdge { parent, child });
    }

    fn on_reach(&mut self, parent: Option<NodeId>, node: NodeId) {
        self.emit(Event::MarkReached { node });
        if let Some(parent) = parent {
            self.on_edge(parent, node);
        }
    }

    fn on_path(&mut self, nodes: &[NodeId]) {
        self.emit(Event::SetPath {
            nodes: nodes.to_vec(),
        });
    }

    fn on_label(&mut self, node: NodeId, label: &str) {
        self.labels.insert(node, label.to_string());
    }

    fn should_stop(&self) -> bool {
        self.overflowed
    }
}

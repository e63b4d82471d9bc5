//! 回放游标
//!
//! 对已录制的 trace 单步前进；后退通过从头重放实现。

use super::view::ViewModel;
use crate::error::{Error, Result};
use crate::trace::{Event, Trace};
use tracing::{debug, trace};

/// 每次前进后触发的重绘回调
pub type RedrawCallback = Box<dyn FnMut(&ViewModel, usize)>;

pub struct ReplayCursor {
    trace: Trace,
    position: usize,
    view: ViewModel,
    redraw: Option<RedrawCallback>,
}

impl std::fmt::Debug for ReplayCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayCursor")
            .field("len", &self.trace.len())
            .field("position", &self.position)
            .field("view", &self.view)
            .finish()
    }
}

impl ReplayCursor {
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            position: 0,
            view: ViewModel::default(),
            redraw: None,
        }
    }

    /// 注入渲染回调
    pub fn with_redraw(mut self, redraw: RedrawCallback) -> Self {
        self.redraw = Some(redraw);
        self
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.trace.len()
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// 消费一个事件；已在末尾时返回 `ReplayExhausted`，状态不变。
    pub fn advance(&mut self) -> Result<&Event> {
        let pos = self.position;
        let Some(ev) = self.trace.get(pos) else {
            return Err(Error::ReplayExhausted { position: pos });
        };
        self.view.apply(ev);
        self.position += 1;
        trace!(position = self.position, ?ev, "advance");
        if let Some(redraw) = self.redraw.as_mut() {
            redraw(&self.view, self.position);
        }
        Ok(ev)
    }

    /// 前进到下一个 `Pause`（含）为止，返回消费的事件数。
    pub fn step(&mut self) -> Result<usize> {
        if self.is_at_end() {
            return Err(Error::ReplayExhausted {
                position: self.position,
            });
        }
        let mut consumed = 0;
        while !self.is_at_end() {
            consumed += 1;
            if self.advance()?.is_pause() {
                break;
            }
        }
        Ok(consumed)
    }

    pub fn reset(&mut self) {
        self.position = 0;
        self.view.clear();
        debug!("reset");
    }

    /// 跳到任意位置：向后跳时从头重放。
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.trace.len() {
            return Err(Error::SeekOutOfRange {
                position,
                len: self.trace.len(),
            });
        }
        if position < self.position {
            self.reset();
        }
        while self.position < position {
            self.advance()?;
        }
        Ok(())
    }

    /// 回放到末尾
    pub fn run_to_end(&mut self) -> &ViewModel {
        while self.advance().is_ok() {}
        &self.view
    }
}

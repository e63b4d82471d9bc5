//! 轨迹录制
//!
//! 先把算法完整跑一遍并记录事件，再交给 [`crate::replay`] 逐步回放。

mod event;
mod recorder;

pub use event::{Bound, Event, NodeId};
pub use recorder::{Exit, Instrument, NoopInstrument, Recorder, Trace};

//! 错误类型
//!
//! 录制、回放与场景加载共用一个错误枚举。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// 输入的博弈树/知识库/网格定义不合法
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 录制过程中算法失败，部分 trace 已丢弃
    #[error("recording aborted: {reason}")]
    RecordingAborted {
        reason: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// 已经回放到末尾
    #[error("replay exhausted at position {position}")]
    ReplayExhausted { position: usize },

    #[error("seek position {position} out of range (trace has {len} events)")]
    SeekOutOfRange { position: usize, len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub(crate) fn aborted(reason: impl Into<String>, source: Option<Error>) -> Self {
        Error::RecordingAborted {
            reason: reason.into(),
            source: source.map(Box::new),
        }
    }
}

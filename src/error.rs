//! # 统一错误处理模块
//!
//! 定义 pdlcount 的所有错误类型，使用 `thiserror` 派生。
//!
//! 错误分为三类（见 [`ErrorKind`]）：I/O 失败、格式无法识别、计数器失败。
//! 所有错误只终止单个作业，由 `batch/runner.rs` 捕获并汇报。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// pdlcount 统一错误类型
#[derive(Error, Debug)]
pub enum PdlError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // 格式错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown file format for {source_id} ({reason})")]
    UnrecognizedFormat { source_id: String, reason: String },

    #[error("Failed to count {format} job: {reason}")]
    CounterFailure { format: String, reason: String },
}

/// 错误类别，便于调用方分支处理而不必匹配消息文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    UnrecognizedFormat,
    CounterFailure,
}

impl PdlError {
    /// 返回错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            PdlError::FileReadError { .. } | PdlError::Io(_) => ErrorKind::Io,
            PdlError::UnrecognizedFormat { .. } => ErrorKind::UnrecognizedFormat,
            PdlError::CounterFailure { .. } => ErrorKind::CounterFailure,
        }
    }

    /// 构造计数器失败错误
    pub fn counter(format: impl ToString, reason: impl Into<String>) -> Self {
        PdlError::CounterFailure {
            format: format.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PdlError>;

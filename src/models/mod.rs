//! # 数据模型模块
//!
//! 定义作业格式与计数结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `sniffer/`, `parsers/`, `batch/` 和 `commands/` 使用
//! - 子模块: format, job

pub mod format;
pub mod job;

pub use format::PdlFormat;
pub use job::{JobResult, JobSize};

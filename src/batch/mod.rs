//! # 批量处理模块
//!
//! 依次计算多个作业的页数并汇总。
//!
//! ## 功能
//! - 由命令行参数收集作业列表（必要时追加标准输入）
//! - 单作业流程: open → 嗅探 → 计数 → close
//! - 失败作业单独记录，不影响其余作业
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `source/`, `sniffer/`, `parsers/`

pub mod collector;
pub mod job;
pub mod runner;

pub use collector::JobCollector;
pub use job::measure;
pub use runner::{BatchResult, BatchRunner};

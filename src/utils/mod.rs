//! # 工具函数模块
//!
//! 提供美化输出和诊断日志初始化。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和 `commands/` 模块使用
//! - 子模块: logging, output

pub mod logging;
pub mod output;

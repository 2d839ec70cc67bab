//! # 命令执行模块
//!
//! 实现作业页数统计的执行逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/`
//! - 子模块: count

pub mod count;

use crate::cli::Cli;
use crate::error::Result;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    count::execute(cli)
}

//! # pdlcount - 打印作业页数统计
//!
//! 不渲染作业，直接从内容判定页面描述语言 (PDL) 并统计页数。
//!
//! ## 支持格式
//! - PostScript
//! - PDF
//! - PCL3/4/5
//! - PCL-XL (PCL6)
//! - ESC/P2
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── batch/     (批量处理)
//!   │           ├── source/   (输入规范化)
//!   │           ├── sniffer/  (格式嗅探)
//!   │           └── parsers/  (各格式计数器)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod sniffer;
mod source;
mod utils;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use std::io::IsTerminal;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        utils::output::print_error(&utils::output::error_chain(&*e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    utils::logging::init(cli.debug).context("Failed to initialize diagnostics")?;
    commands::run(cli)?;
    Ok(())
}

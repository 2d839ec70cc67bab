//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 参数
//! - `--debug`: 诊断输出到标准错误
//! - `--details`: 在标准错误打印每个作业的表格
//! - `FILE...`: 作业文件，`-` 表示标准输入
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/count.rs`

use clap::{ArgAction, Parser};

/// pdlcount - 打印作业页数统计
#[derive(Parser, Debug)]
#[command(name = "pdlcount")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(disable_version_flag = true)]
#[command(
    about = "Count the pages of PostScript, PDF, PCL3/4/5, PCL-XL and ESC/P2 print jobs",
    long_about = None
)]
pub struct Cli {
    /// Print diagnostic messages to standard error
    #[arg(long)]
    pub debug: bool,

    /// Print a per-job breakdown to standard error
    #[arg(long)]
    pub details: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Print job files to count ('-' reads standard input)
    #[arg(value_name = "FILE")]
    pub jobs: Vec<String>,
}

//! # 美化输出工具
//!
//! 提供统一的终端输出样式。标准输出只用于总页数，其余信息都写到标准错误。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::error::Error;
use std::io::{self, Write};

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 写出单个作业的失败信息，附带底层原因
pub fn write_job_error<W: Write>(out: &mut W, err: &dyn Error) -> io::Result<()> {
    writeln!(out, "{} {}", "ERROR:".red().bold(), error_chain(err))
}

/// 拼接错误及其原因链
pub fn error_chain(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

/// 在标准错误打印标题栏
pub fn eprint_header(title: &str) {
    let line = "─".repeat(60);
    eprintln!("\n{}", line.dimmed());
    eprintln!("  {}", title.bold());
    eprintln!("{}\n", line.dimmed());
}

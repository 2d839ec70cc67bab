//! # 作业收集器
//!
//! 根据命令行参数收集待处理的作业标识。
//!
//! ## 功能
//! - 未给出任何作业时读取标准输入
//! - 标准输入不是终端且参数中没有 `-` 时，追加 `-`
//!
//! ## 依赖关系
//! - 被 `commands/count.rs` 调用

use crate::source::JobSource;

use std::io::IsTerminal;

/// 标准输入的作业标识
pub const STDIN_SENTINEL: &str = "-";

/// 作业收集器
pub struct JobCollector {
    /// 命令行给出的作业
    args: Vec<String>,
    /// 标准输入是否连接终端
    stdin_is_terminal: bool,
}

impl JobCollector {
    /// 创建新的作业收集器
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            stdin_is_terminal: std::io::stdin().is_terminal(),
        }
    }

    /// 覆盖标准输入的终端检测结果
    pub fn stdin_is_terminal(mut self, is_terminal: bool) -> Self {
        self.stdin_is_terminal = is_terminal;
        self
    }

    /// 收集作业标识
    pub fn collect(&self) -> Vec<String> {
        let mut jobs = self.args.clone();
        let has_stdin = jobs.iter().any(|job| job == STDIN_SENTINEL);
        if jobs.is_empty() || (!self.stdin_is_terminal && !has_stdin) {
            jobs.push(STDIN_SENTINEL.to_string());
        }
        jobs
    }

    /// 收集作业输入源
    pub fn sources(&self) -> Vec<JobSource<'static>> {
        self.collect()
            .iter()
            .map(|job| JobSource::parse(job))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(args: &[&str], terminal: bool) -> Vec<String> {
        JobCollector::new(args.iter().map(|s| s.to_string()).collect())
            .stdin_is_terminal(terminal)
            .collect()
    }

    #[test]
    fn test_no_args_reads_stdin() {
        assert_eq!(jobs(&[], true), vec!["-"]);
        assert_eq!(jobs(&[], false), vec!["-"]);
    }

    #[test]
    fn test_piped_stdin_is_appended() {
        assert_eq!(jobs(&["a.pdf"], false), vec!["a.pdf", "-"]);
        assert_eq!(jobs(&["a.pdf", "-"], false), vec!["a.pdf", "-"]);
    }

    #[test]
    fn test_terminal_stdin_is_not_appended() {
        assert_eq!(jobs(&["a.pdf", "b.ps"], true), vec!["a.pdf", "b.ps"]);
    }

    #[test]
    fn test_sources() {
        let sources = JobCollector::new(vec!["a.pdf".to_string()])
            .stdin_is_terminal(true)
            .sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].identifier(), "a.pdf");
    }
}

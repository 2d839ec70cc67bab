//! # 批量执行器
//!
//! 按输入顺序依次处理作业并累计总页数。
//!
//! ## 功能
//! - 单线程顺序执行，每个作业独占自己的流
//! - 单个作业失败只记录，不中断后续作业，也不计入总数
//! - 汇总成功/失败统计
//!
//! ## 依赖关系
//! - 被 `commands/count.rs` 调用
//! - 使用 `batch/job.rs` 处理单个作业

use super::job::measure;
use crate::models::JobResult;
use crate::source::JobSource;

use tracing::debug;

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 按输入顺序的作业结果
    pub jobs: Vec<JobResult>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: JobResult) {
        self.jobs.push(result);
    }

    /// 成功作业的页数总和
    pub fn total(&self) -> u64 {
        self.jobs.iter().filter_map(JobResult::size).sum()
    }

    /// 成功数量
    pub fn success(&self) -> usize {
        self.jobs.iter().filter(|job| job.is_success()).count()
    }

    /// 失败的作业
    pub fn failures(&self) -> impl Iterator<Item = &JobResult> {
        self.jobs.iter().filter(|job| !job.is_success())
    }
}

/// 批量执行器
#[derive(Debug, Default)]
pub struct BatchRunner;

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new() -> Self {
        Self
    }

    /// 依次处理作业列表
    pub fn run<'a, I>(&self, sources: I) -> BatchResult
    where
        I: IntoIterator<Item = JobSource<'a>>,
    {
        let mut batch_result = BatchResult::default();

        for source in sources {
            let id = source.identifier();
            let outcome = measure(source);
            if let Err(e) = &outcome {
                debug!("job {} failed: {}", id, e);
            }
            batch_result.merge(JobResult {
                source: id,
                outcome,
            });
        }

        batch_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;
    use std::path::PathBuf;

    #[test]
    fn test_failed_job_does_not_stop_batch() {
        let mut pdf = Cursor::new(b"%PDF-1.4\n<< /Type /Page >>\n<< /Type /Page >>\n".to_vec());
        let mut text = Cursor::new(b"hello, this is not a print job\n".to_vec());
        let mut ps = Cursor::new(b"%!PS-Adobe-3.0\n%%Page: 1 1\nshowpage\n".to_vec());

        let result = BatchRunner::new().run(vec![
            JobSource::Seekable(&mut pdf),
            JobSource::Seekable(&mut text),
            JobSource::Seekable(&mut ps),
        ]);

        assert_eq!(result.total(), 3);
        assert_eq!(result.success(), 2);

        let failures: Vec<_> = result.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].outcome.as_ref().unwrap_err().kind(),
            ErrorKind::UnrecognizedFormat
        );
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut escp2 = Cursor::new(b"\x1b@Hello\x0c\x1b@".to_vec());

        let result = BatchRunner::new().run(vec![
            JobSource::Path(dir.path().join("missing.prn")),
            JobSource::Seekable(&mut escp2),
        ]);

        assert_eq!(result.total(), 1);
        assert_eq!(result.jobs.len(), 2);
        assert!(result.jobs[0].source.ends_with("missing.prn"));
        assert_eq!(
            result.jobs[0].outcome.as_ref().unwrap_err().kind(),
            ErrorKind::Io
        );
    }

    #[test]
    fn test_results_keep_input_order() {
        let result = BatchRunner::new().run(vec![
            JobSource::Path(PathBuf::from("/nonexistent/a.pdf")),
            JobSource::Path(PathBuf::from("/nonexistent/b.pdf")),
        ]);
        let sources: Vec<_> = result.jobs.iter().map(|job| job.source.as_str()).collect();
        assert_eq!(sources, vec!["/nonexistent/a.pdf", "/nonexistent/b.pdf"]);
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_empty_batch() {
        let result = BatchRunner::new().run(Vec::<JobSource<'_>>::new());
        assert_eq!(result.total(), 0);
        assert_eq!(result.failures().count(), 0);
    }
}

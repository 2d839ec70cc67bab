//! # 作业结果数据模型
//!
//! 单个作业的计数结果，以及批处理中每个作业的成功/失败记录。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用

use super::PdlFormat;
use crate::error::PdlError;

/// 单个作业的计数结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSize {
    /// 嗅探得到的格式
    pub format: PdlFormat,
    /// 页数
    pub size: u64,
}

/// 批处理中单个作业的结果
///
/// 失败的作业不携带部分计数。
#[derive(Debug)]
pub struct JobResult {
    /// 作业标识（路径、`-` 或 `<stream>`）
    pub source: String,
    pub outcome: std::result::Result<JobSize, PdlError>,
}

impl JobResult {
    pub fn size(&self) -> Option<u64> {
        self.outcome.as_ref().ok().map(|job| job.size)
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

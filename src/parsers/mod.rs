//! # 作业计数器模块
//!
//! 每种 PDL 一个计数器，统一实现 [`JobSizeComputer`]。
//! 计数器读取位于偏移 0 的流并返回页数；调用方不会复用流，计数器无需回卷。
//! 诊断输出走 `tracing`，由 `--debug` 控制级别。
//!
//! ## 依赖关系
//! - 被 `batch/` 使用
//! - 使用 `source/` 的 `ByteSource`
//! - 子模块: reader, pdf, postscript, pcl345, pclxl, escp2

pub mod escp2;
pub mod pcl345;
pub mod pclxl;
pub mod pdf;
pub mod postscript;
pub mod reader;

use crate::error::{PdlError, Result};
use crate::models::PdlFormat;
use crate::source::ByteSource;

/// 单一格式的页数计数策略
pub trait JobSizeComputer {
    /// 计数器对应的格式
    fn format(&self) -> PdlFormat;

    /// 计算作业页数
    fn job_size(&self, stream: &mut dyn ByteSource) -> Result<u64>;
}

/// 按格式选择计数器
///
/// `Unknown` 返回 [`PdlError::UnrecognizedFormat`]。
pub fn resolve(format: PdlFormat, source_id: &str) -> Result<&'static dyn JobSizeComputer> {
    match format {
        PdlFormat::PostScript => Ok(&postscript::PostScriptCounter),
        PdlFormat::Pdf => Ok(&pdf::PdfCounter),
        PdlFormat::Pcl => Ok(&pcl345::Pcl345Counter),
        PdlFormat::PclXl => Ok(&pclxl::PclXlCounter),
        PdlFormat::Escp2 => Ok(&escp2::Escp2Counter),
        PdlFormat::Unknown => Err(PdlError::UnrecognizedFormat {
            source_id: source_id.to_string(),
            reason: "Analysis of first data block failed.".to_string(),
        }),
    }
}

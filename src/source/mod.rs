//! # 输入源模块
//!
//! 将任意作业输入（命名文件、标准输入、已打开的句柄）规范化为
//! 单一可寻址 (seekable) 字节流。
//!
//! ## 功能
//! - 命名文件直接以二进制方式打开，流拥有底层资源
//! - 可寻址句柄直接使用，不拥有，关闭时回卷到 0
//! - 标准输入和不可寻址句柄以 1 MiB 分块落盘到临时文件
//!
//! ## 依赖关系
//! - 被 `sniffer/`, `parsers/`, `batch/` 使用
//! - 使用 `tempfile` 创建临时存储
//! - 子模块: stream

pub mod stream;

pub use stream::{NormalizedStream, SPOOL_CHUNK_SIZE};

use std::io::{Read, Seek};
use std::path::PathBuf;

/// 可读且可寻址的字节源
///
/// 任何同时实现 `Read + Seek` 的类型都自动满足。
pub trait ByteSource: Read + Seek {}

impl<T: Read + Seek + ?Sized> ByteSource for T {}

/// 作业输入源
pub enum JobSource<'a> {
    /// 命名文件
    Path(PathBuf),
    /// 标准输入（命令行中的 `-`）
    Stdin,
    /// 已打开的可寻址句柄，由调用方拥有
    Seekable(&'a mut dyn ByteSource),
    /// 已打开但不可寻址的句柄，需要落盘
    Unseekable(&'a mut dyn Read),
}

impl JobSource<'static> {
    /// 从命令行参数构造输入源，`-` 表示标准输入
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            JobSource::Stdin
        } else {
            JobSource::Path(PathBuf::from(arg))
        }
    }
}

impl JobSource<'_> {
    /// 用于诊断信息的作业标识
    pub fn identifier(&self) -> String {
        match self {
            JobSource::Path(path) => path.display().to_string(),
            JobSource::Stdin => "-".to_string(),
            JobSource::Seekable(_) | JobSource::Unseekable(_) => "<stream>".to_string(),
        }
    }
}

impl std::fmt::Debug for JobSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            JobSource::Stdin => write!(f, "Stdin"),
            JobSource::Seekable(_) => write!(f, "Seekable(..)"),
            JobSource::Unseekable(_) => write!(f, "Unseekable(..)"),
        }
    }
}

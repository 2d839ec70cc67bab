//! # 规范化字节流
//!
//! `NormalizedStream` 记录是否拥有底层资源，关闭逻辑只取决于该标志：
//! 拥有则释放（临时文件随之删除），否则尽力回卷到偏移 0。
//!
//! ## 依赖关系
//! - 被 `source/mod.rs` 导出
//! - 使用 `tempfile` 创建匿名临时文件

use super::{ByteSource, JobSource};
use crate::error::{PdlError, Result};

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::debug;

/// 落盘时每次复制的块大小 (1 MiB)
pub const SPOOL_CHUNK_SIZE: usize = 1024 * 1024;

/// 流的底层存储
enum Backing<'a> {
    /// 直接打开的命名文件
    File(File),
    /// 标准输入或不可寻址句柄的落盘副本
    Scratch(File),
    /// 调用方提供的可寻址句柄
    Borrowed(&'a mut dyn ByteSource),
}

/// 单个作业的可寻址字节流
pub struct NormalizedStream<'a> {
    backing: Backing<'a>,
    owns_resource: bool,
}

impl<'a> NormalizedStream<'a> {
    /// 打开作业输入源
    pub fn open(source: JobSource<'a>) -> Result<Self> {
        let id = source.identifier();
        match source {
            JobSource::Path(path) => {
                let file = File::open(&path).map_err(|e| PdlError::FileReadError {
                    path: path.display().to_string(),
                    source: e,
                })?;
                Ok(Self {
                    backing: Backing::File(file),
                    owns_resource: true,
                })
            }
            JobSource::Stdin => {
                let stdin = io::stdin();
                let mut handle = stdin.lock();
                Self::spooled(&mut handle, &id)
            }
            JobSource::Unseekable(reader) => Self::spooled(reader, &id),
            JobSource::Seekable(handle) => Ok(Self {
                backing: Backing::Borrowed(handle),
                owns_resource: false,
            }),
        }
    }

    fn spooled<R: Read + ?Sized>(reader: &mut R, id: &str) -> Result<Self> {
        let (scratch, copied) = spool(reader).map_err(|e| PdlError::FileReadError {
            path: id.to_string(),
            source: e,
        })?;
        debug!("spooled {} bytes from {} to scratch storage", copied, id);
        Ok(Self {
            backing: Backing::Scratch(scratch),
            owns_resource: true,
        })
    }

    /// 是否拥有底层资源（关闭时需要释放）
    pub fn owns_underlying_resource(&self) -> bool {
        self.owns_resource
    }

    /// 关闭流
    ///
    /// 不拥有的句柄回卷到 0，回卷失败（如终端）被忽略。
    pub fn close(mut self) {
        if !self.owns_underlying_resource() {
            let _ = self.inner().seek(SeekFrom::Start(0));
        }
    }

    fn inner(&mut self) -> &mut dyn ByteSource {
        match &mut self.backing {
            Backing::File(file) | Backing::Scratch(file) => file,
            Backing::Borrowed(handle) => &mut **handle,
        }
    }
}

impl Read for NormalizedStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner().read(buf)
    }
}

impl Seek for NormalizedStream<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner().seek(pos)
    }
}

/// 分块复制到匿名临时文件并回卷，返回文件和复制的字节数
fn spool<R: Read + ?Sized>(reader: &mut R) -> io::Result<(File, u64)> {
    let mut scratch = tempfile::tempfile()?;
    let mut chunk = vec![0u8; SPOOL_CHUNK_SIZE];
    let mut copied = 0u64;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        scratch.write_all(&chunk[..n])?;
        copied += n as u64;
    }

    scratch.flush()?;
    scratch.seek(SeekFrom::Start(0))?;
    Ok((scratch, copied))
}

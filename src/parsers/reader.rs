//! # 计数器共用的字节读取器
//!
//! 在 `BufReader` 之上提供逐字节读取、定长读取与跳过，并记录偏移量，
//! 供 PCL、PCL-XL、ESC/P2 计数器使用。
//!
//! ## 依赖关系
//! - 被 `parsers/pcl345.rs`, `parsers/pclxl.rs`, `parsers/escp2.rs` 使用

use crate::error::PdlError;
use crate::models::PdlFormat;
use crate::source::ByteSource;

use std::io::{self, BufRead, BufReader, Read};

/// 带偏移记录的缓冲字节读取器
pub struct ByteReader<'s> {
    inner: BufReader<&'s mut dyn ByteSource>,
    offset: u64,
}

impl<'s> ByteReader<'s> {
    pub fn new(stream: &'s mut dyn ByteSource) -> Self {
        Self {
            inner: BufReader::new(stream),
            offset: 0,
        }
    }

    /// 已消费的字节数
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// 读取下一个字节，EOF 返回 `None`
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.inner.consume(1);
            self.offset += 1;
        }
        Ok(byte)
    }

    /// 查看下一个字节但不消费
    pub fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        let buf = self.inner.fill_buf()?;
        Ok(buf.first().copied())
    }

    /// 读取定长字节，数据不足返回 `None`
    pub fn read_array<const N: usize>(&mut self) -> io::Result<Option<[u8; N]>> {
        let mut out = [0u8; N];
        match self.inner.read_exact(&mut out) {
            Ok(()) => {
                self.offset += N as u64;
                Ok(Some(out))
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 跳过 `n` 字节，返回实际跳过的字节数（EOF 时可能少于 `n`）
    pub fn skip(&mut self, n: u64) -> io::Result<u64> {
        let skipped = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.offset += skipped;
        Ok(skipped)
    }

    /// 跳过 `n` 字节，不足时报告截断
    pub fn skip_exact(&mut self, n: u64, format: PdlFormat) -> crate::error::Result<()> {
        let start = self.offset;
        if self.skip(n)? < n {
            return Err(truncated(format, start));
        }
        Ok(())
    }

    /// 读取一行（含 `\n`），返回读取的字节数
    pub fn read_line(&mut self, line: &mut Vec<u8>) -> io::Result<usize> {
        let n = self.inner.read_until(b'\n', line)?;
        self.offset += n as u64;
        Ok(n)
    }
}

/// 数据在偏移 `offset` 处被截断
pub fn truncated(format: PdlFormat, offset: u64) -> PdlError {
    PdlError::counter(format, format!("unexpected end of data at offset {}", offset))
}

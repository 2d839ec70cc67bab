//! # ESC/P2 页数计数器
//!
//! 遍历 ESC/P 命令并跳过其参数与光栅数据，统计数据之外的换页符。
//!
//! ## 规则
//! - `FF` 弹出一页；作业结尾仍有内容的页计为一页
//! - `ESC ( c nL nH` 按长度跳过；`ESC ( R` 之后进入远程模式直到 `ESC NUL NUL NUL`
//! - `ESC .` 与 `ESC i` 光栅支持未压缩和游程编码 (RLE)
//! - `ESC . 2` TIFF 模式按命令自身的长度跳过，直到 `EXIT` (0xe3)
//! - `ESC 0x01` 之后的 EJL 文本不计为页面内容
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/reader.rs`

use super::reader::{truncated, ByteReader};
use super::JobSizeComputer;
use crate::error::{PdlError, Result};
use crate::models::PdlFormat;
use crate::source::ByteSource;

use tracing::debug;

const ESC: u8 = 0x1b;
const FF: u8 = 0x0c;

/// ESC/P2 计数器
pub struct Escp2Counter;

impl JobSizeComputer for Escp2Counter {
    fn format(&self) -> PdlFormat {
        PdlFormat::Escp2
    }

    fn job_size(&self, stream: &mut dyn ByteSource) -> Result<u64> {
        let mut reader = ByteReader::new(stream);
        let mut scanner = Scanner {
            reader: &mut reader,
            pages: 0,
            marked: false,
            in_ejl: false,
        };
        let pages = scanner.run()?;
        debug!(pages, "counted ESC/P2 pages");
        Ok(pages)
    }
}

struct Scanner<'r, 's> {
    reader: &'r mut ByteReader<'s>,
    pages: u64,
    marked: bool,
    in_ejl: bool,
}

impl Scanner<'_, '_> {
    fn run(&mut self) -> Result<u64> {
        while let Some(byte) = self.reader.next_byte()? {
            match byte {
                ESC => {
                    self.in_ejl = false;
                    self.command()?;
                }
                _ if self.in_ejl => {}
                FF => {
                    self.pages += 1;
                    self.marked = false;
                }
                b if b > b' ' && b != 0x7f => self.marked = true,
                _ => {}
            }
        }
        if self.marked {
            self.pages += 1;
        }
        Ok(self.pages)
    }

    fn command(&mut self) -> Result<()> {
        let Some(command) = self.reader.next_byte()? else {
            return Ok(());
        };

        match command {
            0x01 => self.in_ejl = true,
            b'(' => {
                let [kind, lo, hi] = self.read::<3>()?;
                self.skip(length(lo, hi))?;
                if kind == b'R' {
                    self.remote_mode()?;
                }
            }
            b'.' => {
                let [compression, _v, _h, rows, lo, hi] = self.read::<6>()?;
                let row_bytes = length(lo, hi).div_ceil(8);
                self.raster(compression, u64::from(rows) * row_bytes)?;
            }
            b'i' => {
                let [_color, compression, _bits, lo, hi, rows] = self.read::<6>()?;
                self.raster(compression, u64::from(rows) * length(lo, hi))?;
            }
            b'*' => {
                let [mode, lo, hi] = self.read::<3>()?;
                self.skip(length(lo, hi) * column_bytes(mode))?;
                self.marked = true;
            }
            b'K' | b'L' | b'Y' | b'Z' => {
                let [lo, hi] = self.read::<2>()?;
                self.skip(length(lo, hi))?;
                self.marked = true;
            }
            b'C' => {
                if self.read::<1>()?[0] == 0 {
                    self.skip(1)?;
                }
            }
            // 以 NUL 结尾的制表位列表
            b'B' | b'D' | b'b' => {
                while self.read::<1>()?[0] != 0 {}
            }
            b'$' | b'\\' | b'c' | b'e' | b'f' => self.skip(2)?,
            b'X' => self.skip(3)?,
            b'!' | b'-' | b'+' | b'/' | b'3' | b'A' | b'J' | b'j' | b'Q' | b'N' | b'U'
            | b'W' | b'a' | b'k' | b'l' | b't' | b'R' | b'r' | b'S' | b'w' | b'x' | b'p'
            | b'q' | b'm' | b's' | b' ' | 0x19 => self.skip(1)?,
            _ => {}
        }
        Ok(())
    }

    /// 远程模式: 每条命令为两字节名称 + nL nH + 参数，`ESC NUL NUL NUL` 结束
    fn remote_mode(&mut self) -> Result<()> {
        loop {
            let [a, b] = self.read::<2>()?;
            if a == ESC && b == 0 {
                self.skip(2)?;
                return Ok(());
            }
            let [lo, hi] = self.read::<2>()?;
            self.skip(length(lo, hi))?;
        }
    }

    fn raster(&mut self, compression: u8, size: u64) -> Result<()> {
        match compression {
            0 => self.skip(size)?,
            1 => self.skip_rle(size)?,
            2 => self.skip_tiff()?,
            other => {
                return Err(PdlError::counter(
                    PdlFormat::Escp2,
                    format!("unsupported raster compression {}", other),
                ))
            }
        }
        self.marked = true;
        Ok(())
    }

    /// 跳过解压后为 `size` 字节的 RLE 数据
    fn skip_rle(&mut self, mut size: u64) -> Result<()> {
        while size > 0 {
            let counter = u64::from(self.read::<1>()?[0]);
            if counter < 128 {
                self.skip(counter + 1)?;
                size = size.saturating_sub(counter + 1);
            } else {
                self.skip(1)?;
                size = size.saturating_sub(257 - counter);
            }
        }
        Ok(())
    }

    /// 跳过 TIFF 模式命令: XFER 带数据，MOVX/MOVY 带参数，EXIT 结束
    fn skip_tiff(&mut self) -> Result<()> {
        loop {
            let [command] = self.read::<1>()?;
            match command {
                // XFER，低 4 位为数据字节数
                0x20..=0x2f => self.skip(u64::from(command & 0x0f))?,
                // XFER，随后 1 或 2 字节给出数据字节数
                0x31 => {
                    let [n] = self.read::<1>()?;
                    self.skip(u64::from(n))?;
                }
                0x32 => {
                    let [lo, hi] = self.read::<2>()?;
                    self.skip(length(lo, hi))?;
                }
                // MOVX / MOVY 的 1 或 2 字节参数
                0x51 | 0x71 => self.skip(1)?,
                0x52 | 0x72 => self.skip(2)?,
                // MOVX / MOVY / COLR 立即数，CR, MOVXBYTE, MOVXDOT
                0x40..=0x4f | 0x60..=0x6f | 0x80..=0x8f | 0xe2 | 0xe4 | 0xe5 => {}
                // EXIT
                0xe3 => return Ok(()),
                other => {
                    return Err(PdlError::counter(
                        PdlFormat::Escp2,
                        format!(
                            "invalid TIFF command 0x{:02x} at offset {}",
                            other,
                            self.reader.offset() - 1
                        ),
                    ))
                }
            }
        }
    }

    fn read<const N: usize>(&mut self) -> Result<[u8; N]> {
        let offset = self.reader.offset();
        self.reader
            .read_array::<N>()?
            .ok_or_else(|| truncated(PdlFormat::Escp2, offset))
    }

    fn skip(&mut self, n: u64) -> Result<()> {
        self.reader.skip_exact(n, PdlFormat::Escp2)
    }
}

fn length(lo: u8, hi: u8) -> u64 {
    u64::from(lo) + u64::from(hi) * 256
}

/// `ESC *` 位图模式下每列的字节数
fn column_bytes(mode: u8) -> u64 {
    match mode {
        32..=40 => 3,
        71..=73 => 6,
        _ => 1,
    }
}

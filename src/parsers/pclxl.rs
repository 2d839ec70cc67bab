//! # PCL-XL (PCL6) 页数计数器
//!
//! 跳过 ASCII 流头后遍历二进制标签流，统计 `EndPage` 操作符。
//!
//! ## 流结构
//! ```text
//! [ESC %-12345X @PJL ...]
//! ) HP-PCL XL;2;0;Comment...\n      <- 绑定字节: ')' 小端, '(' 大端
//! <数据类型 | 数组 | 属性 | 嵌入数据 | 操作符>*
//! [ESC %-12345X ...]
//! ```
//! `EndPage` 之前的 `PageCopies` 属性 (0x31) 按份数计页。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/reader.rs`

use super::reader::{truncated, ByteReader};
use super::JobSizeComputer;
use crate::error::{PdlError, Result};
use crate::models::PdlFormat;
use crate::sniffer::rules::find;
use crate::source::ByteSource;

use tracing::debug;

const STREAM_HEADER: &[u8] = b" HP-PCL XL;";
const ESC: u8 = 0x1b;

const OP_END_PAGE: u8 = 0x44;
const ATTR_PAGE_COPIES: u16 = 0x31;

/// 多字节数值的字节序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    LittleEndian,
    BigEndian,
}

impl Binding {
    fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Binding::LittleEndian => u16::from_le_bytes(bytes),
            Binding::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Binding::LittleEndian => u32::from_le_bytes(bytes),
            Binding::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

/// PCL-XL 计数器
pub struct PclXlCounter;

impl JobSizeComputer for PclXlCounter {
    fn format(&self) -> PdlFormat {
        PdlFormat::PclXl
    }

    fn job_size(&self, stream: &mut dyn ByteSource) -> Result<u64> {
        let mut reader = ByteReader::new(stream);
        let binding = read_stream_header(&mut reader)?;
        let pages = TagWalker::new(&mut reader, binding).run()?;
        debug!(pages, ?binding, "counted PCL-XL pages");
        Ok(pages)
    }
}

/// 跳过 PJL 和流头行，返回绑定字节序
fn read_stream_header(reader: &mut ByteReader<'_>) -> Result<Binding> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(PdlError::counter(PdlFormat::PclXl, "missing stream header"));
        }
        let Some(pos) = find(&line, STREAM_HEADER) else {
            continue;
        };
        return match pos.checked_sub(1).map(|i| line[i]) {
            Some(b')') => Ok(Binding::LittleEndian),
            Some(b'(') => Ok(Binding::BigEndian),
            other => Err(PdlError::counter(
                PdlFormat::PclXl,
                format!("unsupported binding {:?}", other.map(char::from)),
            )),
        };
    }
}

/// 标签流遍历器
struct TagWalker<'r, 's> {
    reader: &'r mut ByteReader<'s>,
    binding: Binding,
    pages: u64,
    /// 最近一个标量值，供后续属性使用
    last_value: Option<u64>,
    copies: u64,
}

impl<'r, 's> TagWalker<'r, 's> {
    fn new(reader: &'r mut ByteReader<'s>, binding: Binding) -> Self {
        Self {
            reader,
            binding,
            pages: 0,
            last_value: None,
            copies: 1,
        }
    }

    fn run(mut self) -> Result<u64> {
        while let Some(tag) = self.reader.next_byte()? {
            match tag {
                // 空白
                0x00 | 0x09..=0x0d | 0x20 => {}
                // 语言切换返回 PJL
                ESC => break,
                0x41..=0xb9 => self.operator(tag),
                0xc0..=0xc5 => self.scalar(tag)?,
                0xc8..=0xcd => self.array(tag)?,
                0xd0..=0xd5 => self.skip(element_size(tag - 0xd0) * 2)?,
                0xe0..=0xe5 => self.skip(element_size(tag - 0xe0) * 4)?,
                0xf8 => {
                    let id = self.read::<1>()?[0];
                    self.attribute(u16::from(id));
                }
                0xf9 => {
                    let id = self.binding.u16(self.read::<2>()?);
                    self.attribute(id);
                }
                0xfa => {
                    let len = self.binding.u32(self.read::<4>()?);
                    self.skip(u64::from(len))?;
                }
                0xfb => {
                    let len = self.read::<1>()?[0];
                    self.skip(u64::from(len))?;
                }
                _ => {
                    return Err(PdlError::counter(
                        PdlFormat::PclXl,
                        format!(
                            "unknown tag 0x{:02x} at offset {}",
                            tag,
                            self.reader.offset() - 1
                        ),
                    ))
                }
            }
        }
        Ok(self.pages)
    }

    fn operator(&mut self, op: u8) {
        if op == OP_END_PAGE {
            self.pages += self.copies;
            self.copies = 1;
        }
        self.last_value = None;
    }

    fn attribute(&mut self, id: u16) {
        if id == ATTR_PAGE_COPIES {
            self.copies = self.last_value.unwrap_or(1).max(1);
        }
    }

    /// 单值数据类型，整数值记入 `last_value`
    fn scalar(&mut self, tag: u8) -> Result<()> {
        self.last_value = match tag {
            0xc0 => Some(u64::from(self.read::<1>()?[0])),
            0xc1 => Some(u64::from(self.binding.u16(self.read::<2>()?))),
            0xc2 => Some(u64::from(self.binding.u32(self.read::<4>()?))),
            0xc3 => {
                self.skip(2)?;
                None
            }
            _ => {
                self.skip(4)?;
                None
            }
        };
        Ok(())
    }

    /// 数组: 元素类型标签 + 长度（ubyte 或 uint16 数据类型）+ 元素
    fn array(&mut self, tag: u8) -> Result<()> {
        let len = match self.read::<1>()?[0] {
            0xc0 => u64::from(self.read::<1>()?[0]),
            0xc1 => u64::from(self.binding.u16(self.read::<2>()?)),
            other => {
                return Err(PdlError::counter(
                    PdlFormat::PclXl,
                    format!("invalid array length type 0x{:02x}", other),
                ))
            }
        };
        self.last_value = None;
        self.skip(len * element_size(tag - 0xc8))
    }

    fn read<const N: usize>(&mut self) -> Result<[u8; N]> {
        let offset = self.reader.offset();
        self.reader
            .read_array::<N>()?
            .ok_or_else(|| truncated(PdlFormat::PclXl, offset))
    }

    fn skip(&mut self, n: u64) -> Result<()> {
        self.reader.skip_exact(n, PdlFormat::PclXl)
    }
}

/// 数据类型序号对应的元素字节数:
/// ubyte, uint16, uint32, sint16, sint32, real32
fn element_size(index: u8) -> u64 {
    match index {
        0 => 1,
        1 | 3 => 2,
        _ => 4,
    }
}

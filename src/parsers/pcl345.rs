//! # PCL3/4/5 页数计数器
//!
//! 遍历转义序列，跳过 `W` 结尾命令和 `ESC *b#V` 携带的二进制数据，统计数据之外的换页符。
//!
//! ## 规则
//! - `FF` 弹出一页（乘以 `ESC &l#X` 设定的份数）
//! - `ESC E` 复位和 `ESC %-12345X` 语言切换会弹出已有内容的页
//! - 语言切换之后的 PJL 文本不计为页面内容，直到下一个转义序列
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/reader.rs`

use super::reader::ByteReader;
use super::JobSizeComputer;
use crate::error::Result;
use crate::models::PdlFormat;
use crate::source::ByteSource;

use std::io;
use tracing::debug;

const ESC: u8 = 0x1b;
const FF: u8 = 0x0c;

/// PCL3/4/5 计数器
pub struct Pcl345Counter;

impl JobSizeComputer for Pcl345Counter {
    fn format(&self) -> PdlFormat {
        PdlFormat::Pcl
    }

    fn job_size(&self, stream: &mut dyn ByteSource) -> Result<u64> {
        let mut reader = ByteReader::new(stream);
        let mut page = PageState::default();

        while let Some(byte) = reader.next_byte()? {
            match byte {
                ESC => {
                    page.in_pjl = false;
                    escape(&mut reader, &mut page)?;
                }
                _ if page.in_pjl => {}
                FF => page.eject(),
                b if b > b' ' && b != 0x7f => page.marked = true,
                _ => {}
            }
        }
        page.flush();

        debug!(pages = page.pages, "counted PCL pages");
        Ok(page.pages)
    }
}

/// 当前页状态
#[derive(Debug)]
struct PageState {
    pages: u64,
    copies: u64,
    /// 当前页是否已有内容
    marked: bool,
    in_pjl: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            pages: 0,
            copies: 1,
            marked: false,
            in_pjl: false,
        }
    }
}

impl PageState {
    fn eject(&mut self) {
        self.pages += self.copies;
        self.marked = false;
    }

    /// 有内容时弹出当前页
    fn flush(&mut self) {
        if self.marked {
            self.eject();
        }
    }
}

/// 处理 `ESC` 之后的命令
fn escape(reader: &mut ByteReader<'_>, page: &mut PageState) -> Result<()> {
    let Some(command) = reader.next_byte()? else {
        return Ok(());
    };

    match command {
        // 参数化命令: ESC <param> [group] (value parameter)+
        0x21..=0x2f => parameterized(reader, page, command),
        b'E' => {
            page.flush();
            Ok(())
        }
        _ => Ok(()),
    }
}

fn parameterized(reader: &mut ByteReader<'_>, page: &mut PageState, command: u8) -> Result<()> {
    let group = match reader.peek_byte()? {
        Some(b @ 0x60..=0x7e) => {
            reader.next_byte()?;
            Some(b)
        }
        _ => None,
    };

    loop {
        let value = read_value(reader)?;
        // 参数字符必须在 0x40..=0x7e，否则命令到此结束（如 `ESC %8 ESC ...`）
        let parameter = match reader.peek_byte()? {
            Some(b @ 0x40..=0x7e) => {
                reader.next_byte()?;
                b
            }
            _ => return Ok(()),
        };
        let kind = parameter.to_ascii_uppercase();
        let amount = value.max(0) as u64;

        match (command, group, kind) {
            // 带二进制数据的命令
            (_, _, b'W') | (b'*', Some(b'b'), b'V') | (b'&', Some(b'p'), b'X') => {
                reader.skip_exact(amount, PdlFormat::Pcl)?;
                if command == b'*' && group == Some(b'b') && amount > 0 {
                    page.marked = true;
                }
            }
            (b'&', Some(b'l'), b'X') => page.copies = amount.max(1),
            // ESC %-12345X
            (b'%', None, b'X') if value == -12345 => {
                page.flush();
                page.in_pjl = true;
            }
            _ => {}
        }

        // 大写字母结束命令，小写字母继续组合命令
        if !(0x60..=0x7e).contains(&parameter) {
            return Ok(());
        }
    }
}

/// 读取数值字段，只保留整数部分
fn read_value(reader: &mut ByteReader<'_>) -> io::Result<i64> {
    let mut negative = false;
    let mut fraction = false;
    let mut value = 0i64;

    while let Some(b) = reader.peek_byte()? {
        match b {
            b'+' => {}
            b'-' => negative = true,
            b'.' => fraction = true,
            b'0'..=b'9' => {
                if !fraction {
                    value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
                }
            }
            _ => break,
        }
        reader.next_byte()?;
    }

    Ok(if negative { -value } else { value })
}

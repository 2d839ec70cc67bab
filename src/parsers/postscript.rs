//! # PostScript 页数计数器
//!
//! 统计 DSC `%%Page:` 注释；作业中没有 DSC 页注释时退而统计 `showpage`。
//! 嵌入文档（`%%BeginDocument` ... `%%EndDocument`）内的页注释不计入。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用

use super::JobSizeComputer;
use crate::error::Result;
use crate::models::PdlFormat;
use crate::source::ByteSource;

use std::io::{BufRead, BufReader};
use tracing::debug;

/// PostScript 计数器
pub struct PostScriptCounter;

impl JobSizeComputer for PostScriptCounter {
    fn format(&self) -> PdlFormat {
        PdlFormat::PostScript
    }

    fn job_size(&self, stream: &mut dyn ByteSource) -> Result<u64> {
        let mut reader = BufReader::new(stream);
        let mut line = Vec::new();
        let mut tally = PageTally::default();

        while reader.read_until(b'\n', &mut line)? > 0 {
            tally.feed(&line);
            line.clear();
        }

        debug!(
            dsc_pages = tally.dsc_pages,
            showpages = tally.showpages,
            "counted PostScript pages"
        );
        Ok(tally.pages())
    }
}

/// 逐行累计的页数统计
#[derive(Debug, Default)]
struct PageTally {
    dsc_pages: u64,
    showpages: u64,
    /// 嵌入文档的嵌套深度
    depth: usize,
}

impl PageTally {
    fn feed(&mut self, line: &[u8]) {
        if line.starts_with(b"%%BeginDocument") {
            self.depth += 1;
        } else if line.starts_with(b"%%EndDocument") {
            self.depth = self.depth.saturating_sub(1);
        } else if self.depth == 0 {
            if line.starts_with(b"%%Page:") {
                self.dsc_pages += 1;
            } else if !line.starts_with(b"%") {
                self.showpages += count_showpage(line);
            }
        }
    }

    fn pages(&self) -> u64 {
        if self.dsc_pages > 0 {
            self.dsc_pages
        } else {
            self.showpages
        }
    }
}

/// 统计行中作为独立记号出现的 `showpage`
fn count_showpage(line: &[u8]) -> u64 {
    const TOKEN: &[u8] = b"showpage";
    // 注释之后的内容不计
    let code = match line.iter().position(|&b| b == b'%') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let is_delimiter = |b: u8| b.is_ascii_whitespace() || b"{}[]()<>/%".contains(&b);
    code.windows(TOKEN.len())
        .enumerate()
        .filter(|(i, window)| {
            *window == TOKEN
                && (*i == 0 || is_delimiter(code[i - 1]))
                && code.get(i + TOKEN.len()).map_or(true, |&b| is_delimiter(b))
        })
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn count(data: &[u8]) -> u64 {
        let mut cursor = Cursor::new(data.to_vec());
        PostScriptCounter.job_size(&mut cursor).unwrap()
    }

    #[test]
    fn test_dsc_pages() {
        let job = b"%!PS-Adobe-3.0\n%%Pages: 2\n%%EndComments\n\
%%Page: 1 1\n/Helvetica findfont 12 scalefont setfont\nshowpage\n\
%%Page: 2 2\nshowpage\n%%Trailer\n%%EOF\n";
        assert_eq!(count(job), 2);
    }

    #[test]
    fn test_showpage_fallback() {
        let job = b"%!\n100 100 moveto (Hello) show showpage\n{ showpage } exec\n% showpage in comment\n";
        assert_eq!(count(job), 2);
    }

    #[test]
    fn test_embedded_document_is_skipped() {
        let job = b"%!PS-Adobe-3.0\n%%Page: 1 1\n%%BeginDocument: logo.eps\n\
%%Page: 1 1\nshowpage\n%%EndDocument\nshowpage\n%%EOF\n";
        assert_eq!(count(job), 1);
    }

    #[test]
    fn test_showpage_token_boundaries() {
        assert_eq!(count_showpage(b"showpage"), 1);
        assert_eq!(count_showpage(b"/myshowpage load"), 0);
        assert_eq!(count_showpage(b"showpages"), 0);
        assert_eq!(count_showpage(b"gsave showpage grestore showpage\n"), 2);
    }

    #[test]
    fn test_empty_job() {
        assert_eq!(count(b""), 0);
    }
}

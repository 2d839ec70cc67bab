//! # PDF 页数计数器
//!
//! 逐行统计 `/Type /Page` 标记，不解析对象图。
//!
//! ## 匹配规则
//! ```text
//! /Type ?/Page[/ \t\r\n]
//! ```
//! 结尾字符要求排除 `/Type /Pages`（页树节点）。
//! 页对象只存在于压缩对象流中时会少计，内容流中出现字面标记时会多计。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `regex` crate (bytes API)

use super::JobSizeComputer;
use crate::error::Result;
use crate::models::PdlFormat;
use crate::source::ByteSource;

use regex::bytes::Regex;
use std::io::{BufRead, BufReader};
use std::sync::LazyLock;
use tracing::debug;

/// 页对象标记
static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(/Type) ?(/Page)[/ \t\r\n]").expect("valid page marker pattern")
});

/// PDF 计数器
pub struct PdfCounter;

impl JobSizeComputer for PdfCounter {
    fn format(&self) -> PdlFormat {
        PdlFormat::Pdf
    }

    fn job_size(&self, stream: &mut dyn ByteSource) -> Result<u64> {
        let mut reader = BufReader::new(stream);
        let mut line = Vec::new();
        let mut pages = 0u64;

        // 行保留结尾的 `\n`，因此行尾的标记同样能匹配
        while reader.read_until(b'\n', &mut line)? > 0 {
            pages += count_page_markers(&line);
            line.clear();
        }

        debug!(pages, "counted PDF page markers");
        Ok(pages)
    }
}

/// 统计一段数据中互不重叠的页对象标记
pub fn count_page_markers(data: &[u8]) -> u64 {
    PAGE_MARKER.find_iter(data).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn count(data: &[u8]) -> u64 {
        let mut cursor = Cursor::new(data.to_vec());
        PdfCounter.job_size(&mut cursor).unwrap()
    }

    #[test]
    fn test_single_page_marker() {
        assert_eq!(count_page_markers(b"/Type /Page/Contents 4 0 R"), 1);
        assert_eq!(count_page_markers(b"/Type/Page\n"), 1);
        assert_eq!(count_page_markers(b"/Type /Page\t/Parent 2 0 R"), 1);
    }

    #[test]
    fn test_page_tree_not_counted() {
        assert_eq!(count_page_markers(b"/Type /Pages"), 0);
        assert_eq!(count_page_markers(b"/Type /Pages /Kids [3 0 R] /Count 1\n"), 0);
        // 没有结尾字符
        assert_eq!(count_page_markers(b"/Type /Page"), 0);
    }

    #[test]
    fn test_multiple_markers_on_one_line() {
        assert_eq!(
            count_page_markers(b"<< /Type /Page /MediaBox [0 0 612 792] >> << /Type /Page >>"),
            2
        );
    }

    #[test]
    fn test_marker_at_line_end_uses_newline() {
        assert_eq!(count(b"3 0 obj << /Type /Page\n/Parent 2 0 R >>\nendobj\n"), 1);
        assert_eq!(count(b"/Type /Page\r\n"), 1);
    }

    #[test]
    fn test_minimal_document() {
        let pdf = b"%PDF-1.4\n\
1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
2 0 obj << /Type /Pages /Kids [3 0 R 4 0 R 5 0 R] /Count 3 >> endobj\n\
3 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
4 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
5 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
trailer << /Root 1 0 R >>\n%%EOF\n";
        assert_eq!(count(pdf), 3);
    }

    #[test]
    fn test_repeatable() {
        let pdf = b"%PDF-1.4\n<< /Type /Page >>\n<< /Type /Page >>\n";
        assert_eq!(count(pdf), count(pdf));
        assert_eq!(count(pdf), 2);
    }
}

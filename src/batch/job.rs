//! # 单作业处理流程
//!
//! open → 嗅探 → 选择计数器 → 计数 → close。
//! 无论识别或计数是否失败，流都会被关闭。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `source/`, `sniffer/`, `parsers/`

use crate::error::Result;
use crate::models::JobSize;
use crate::parsers;
use crate::sniffer::Snapshot;
use crate::source::{JobSource, NormalizedStream};

use tracing::debug;

/// 计算单个作业的页数
pub fn measure(source: JobSource<'_>) -> Result<JobSize> {
    let id = source.identifier();
    let mut stream = NormalizedStream::open(source)?;
    let outcome = size_stream(&mut stream, &id);
    stream.close();
    outcome
}

fn size_stream(stream: &mut NormalizedStream<'_>, id: &str) -> Result<JobSize> {
    let snapshot = Snapshot::take(stream);
    let format = snapshot.classify();
    if !format.is_known() {
        debug!("{}: {}", id, snapshot.failure_reason());
    }

    let computer = parsers::resolve(format, id)?;
    debug!("{} is a {} file", id, format);

    let size = computer.job_size(stream)?;
    debug!("{} has {} pages", id, size);
    Ok(JobSize { format, size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::PdlFormat;
    use std::io::{Cursor, Write};

    const THREE_PAGE_PDF: &[u8] = b"%PDF-1.4\n\
1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
2 0 obj << /Type /Pages /Kids [3 0 R 4 0 R 5 0 R] /Count 3 >> endobj\n\
3 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
4 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
5 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
%%EOF\n";

    #[test]
    fn test_measure_named_pdf() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(THREE_PAGE_PDF).unwrap();

        let job = measure(JobSource::Path(file.path().to_path_buf())).unwrap();
        assert_eq!(job.format, PdlFormat::Pdf);
        assert_eq!(job.size, 3);
    }

    #[test]
    fn test_measure_is_repeatable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(THREE_PAGE_PDF).unwrap();
        let path = file.path().to_path_buf();

        let first = measure(JobSource::Path(path.clone())).unwrap();
        let second = measure(JobSource::Path(path)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_borrowed_handle_is_rewound() {
        let mut cursor = Cursor::new(THREE_PAGE_PDF.to_vec());
        assert_eq!(measure(JobSource::Seekable(&mut cursor)).unwrap().size, 3);
        assert_eq!(cursor.position(), 0);

        // 再次计数得到相同结果
        assert_eq!(measure(JobSource::Seekable(&mut cursor)).unwrap().size, 3);
    }

    #[test]
    fn test_unknown_format_rewinds_handle() {
        let mut cursor = Cursor::new(b"plain text, no PDL here\n".to_vec());
        let err = measure(JobSource::Seekable(&mut cursor)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedFormat);
        assert!(err.to_string().contains("<stream>"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_unseekable_source() {
        let mut reader: &[u8] = b"%!PS-Adobe-3.0\n%%Page: 1 1\nshowpage\n%%EOF\n";
        let job = measure(JobSource::Unseekable(&mut reader)).unwrap();
        assert_eq!(job.format, PdlFormat::PostScript);
        assert_eq!(job.size, 1);
    }
}

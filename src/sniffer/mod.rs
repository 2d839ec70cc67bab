//! # 格式嗅探模块
//!
//! 读取作业流的前 4 KiB 和后 256 字节，按固定顺序的启发式规则判定 PDL。
//!
//! ## 判定顺序
//! PostScript → PCL-XL → PDF → PCL → ESC/P2，首个命中即返回。
//! 所有支持语言切换的作业都以 `ESC %-12345X` 开头，因此带 `LANGUAGE=`
//! 限定的规则必须先于 PCL 的通用规则。
//!
//! ## 依赖关系
//! - 被 `batch/` 使用
//! - 使用 `models/format.rs`
//! - 子模块: rules

pub mod rules;

use crate::models::PdlFormat;

use std::io::{Read, Seek, SeekFrom};
use tracing::trace;

/// 前缀块大小
pub const PREFIX_BLOCK_SIZE: usize = 4096;

/// 后缀块大小
pub const SUFFIX_BLOCK_SIZE: usize = 256;

/// 作业流的前缀/后缀快照
///
/// 格式判定是快照的纯函数。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub prefix: Vec<u8>,
    pub suffix: Vec<u8>,
}

impl Snapshot {
    pub fn new(prefix: impl Into<Vec<u8>>, suffix: impl Into<Vec<u8>>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// 从流中取快照，结束时流位置回到 0
    ///
    /// 流短于后缀块时后缀为空；读错误只会缩短快照，不会失败。
    pub fn take<S: Read + Seek + ?Sized>(stream: &mut S) -> Self {
        let prefix = match stream.seek(SeekFrom::Start(0)) {
            Ok(_) => read_block(stream, PREFIX_BLOCK_SIZE),
            Err(_) => Vec::new(),
        };

        let suffix = match stream.seek(SeekFrom::End(-(SUFFIX_BLOCK_SIZE as i64))) {
            Ok(_) => read_block(stream, SUFFIX_BLOCK_SIZE),
            Err(_) => Vec::new(),
        };

        let _ = stream.seek(SeekFrom::Start(0));

        Self { prefix, suffix }
    }

    /// 按优先级判定格式
    pub fn classify(&self) -> PdlFormat {
        let format = PdlFormat::KNOWN
            .into_iter()
            .find(|&format| rules::matches(format, self))
            .unwrap_or(PdlFormat::Unknown);
        trace!(
            prefix_len = self.prefix.len(),
            suffix_len = self.suffix.len(),
            %format,
            "sniffed job"
        );
        format
    }

    /// 未能识别时的诊断说明
    pub fn failure_reason(&self) -> String {
        format!(
            "Analysis of first data block failed ({} prefix bytes, {} suffix bytes)",
            self.prefix.len(),
            self.suffix.len()
        )
    }
}

/// 判定流的格式，不改变流位置（结束时位于 0）
pub fn classify<S: Read + Seek + ?Sized>(stream: &mut S) -> PdlFormat {
    Snapshot::take(stream).classify()
}

/// 读取至多 `limit` 字节，短读合法
fn read_block<S: Read + ?Sized>(stream: &mut S, limit: usize) -> Vec<u8> {
    let mut block = Vec::with_capacity(limit);
    if let Err(e) = stream.take(limit as u64).read_to_end(&mut block) {
        trace!("short block read: {}", e);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sniff(data: &[u8]) -> PdlFormat {
        let mut cursor = Cursor::new(data.to_vec());
        classify(&mut cursor)
    }

    #[test]
    fn test_canonical_prefixes() {
        assert_eq!(sniff(b"%!PS-Adobe-3.0\n%%Pages: 1\n"), PdlFormat::PostScript);
        assert_eq!(sniff(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n"), PdlFormat::Pdf);
        assert_eq!(sniff(b"\x1bE\x1b&l0O\x1b(s0p"), PdlFormat::Pcl);
        assert_eq!(sniff(b"\x1b@\x1b(G\x01\x00\x01"), PdlFormat::Escp2);
        assert_eq!(
            sniff(
                b"\x1b%-12345X@PJL ENTER LANGUAGE=PCLXL\r\n) HP-PCL XL;2;0;Comment\r\n"
            ),
            PdlFormat::PclXl
        );
    }

    #[test]
    fn test_unknown_inputs() {
        assert_eq!(sniff(b""), PdlFormat::Unknown);
        assert_eq!(sniff(b"just some plain text\nwith lines\n"), PdlFormat::Unknown);
        assert_eq!(sniff(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]), PdlFormat::Unknown);
    }

    #[test]
    fn test_classify_leaves_position_at_zero() {
        let mut data = b"%PDF-1.4\n".to_vec();
        data.extend(std::iter::repeat(b'.').take(10_000));
        let mut cursor = Cursor::new(data);

        assert_eq!(cursor.position(), 0);
        assert_eq!(classify(&mut cursor), PdlFormat::Pdf);
        assert_eq!(cursor.position(), 0);

        // 短流同样回到 0
        let mut short = Cursor::new(b"\x1b@".to_vec());
        classify(&mut short);
        assert_eq!(short.position(), 0);
    }

    #[test]
    fn test_switched_postscript_beats_generic_pcl() {
        assert_eq!(sniff(b"\x1b%-12345X%!PS-Adobe-3.0\n"), PdlFormat::PostScript);
        assert_eq!(
            sniff(b"\x1b%-12345X@PJL ENTER LANGUAGE = POSTSCRIPT\r\nshowpage\n"),
            PdlFormat::PostScript
        );
    }

    #[test]
    fn test_language_switch_outside_window_is_pcl() {
        let mut data = vec![b' '; 200];
        data.extend_from_slice(b"\x1b%-12345X@PJL ENTER LANGUAGE=POSTSCRIPT\r\n");
        assert_eq!(sniff(&data), PdlFormat::Pcl);
    }

    #[test]
    fn test_switched_pdf_is_case_insensitive() {
        assert_eq!(
            sniff(b"\x1b%-12345X@PJL ENTER language=pdf\r\n"),
            PdlFormat::Pdf
        );
        assert_eq!(sniff(b"\x1b%-12345X%PDF-1.3\n"), PdlFormat::Pdf);
    }

    #[test]
    fn test_short_stream_has_empty_suffix() {
        let mut cursor = Cursor::new(b"\x1b*rbC\x0c\x1b@".to_vec());
        let snapshot = Snapshot::take(&mut cursor);
        assert!(snapshot.suffix.is_empty());
        assert_eq!(snapshot.classify(), PdlFormat::Pcl);
    }

    #[test]
    fn test_raster_with_escp2_trailer() {
        let mut data = b"\x1b*rbC".to_vec();
        data.extend(std::iter::repeat(0u8).take(600));
        data.extend_from_slice(b"\x0c\x1b@");

        let mut cursor = Cursor::new(data);
        let snapshot = Snapshot::take(&mut cursor);
        assert_eq!(snapshot.suffix.len(), SUFFIX_BLOCK_SIZE);
        assert_eq!(snapshot.classify(), PdlFormat::Escp2);
    }

    #[test]
    fn test_prefix_is_bounded() {
        let mut data = vec![b'a'; PREFIX_BLOCK_SIZE];
        data.extend_from_slice(b"%PDF-1.4");
        let mut cursor = Cursor::new(data);

        let snapshot = Snapshot::take(&mut cursor);
        assert_eq!(snapshot.prefix.len(), PREFIX_BLOCK_SIZE);
        assert_eq!(snapshot.classify(), PdlFormat::Unknown);
    }
}

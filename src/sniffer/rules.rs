//! # 格式判定规则
//!
//! 每种 PDL 一条规则，只依赖快照的前缀（PCL 规则额外检查后缀）。
//!
//! ## 依赖关系
//! - 被 `sniffer/mod.rs` 使用

use super::Snapshot;
use crate::models::PdlFormat;

/// 打印机语言切换序列 (Universal Exit Language)
pub const UEL: &[u8] = b"\x1b%-12345X";

/// 语言切换序列必须出现在前缀的前 128 字节内
const SWITCH_WINDOW: usize = 128;

/// 判定快照是否符合指定格式
pub fn matches(format: PdlFormat, snapshot: &Snapshot) -> bool {
    let prefix = snapshot.prefix.as_slice();
    match format {
        PdlFormat::PostScript => is_postscript(prefix),
        PdlFormat::PclXl => is_pclxl(prefix),
        PdlFormat::Pdf => is_pdf(prefix),
        PdlFormat::Pcl => is_pcl(prefix, &snapshot.suffix),
        PdlFormat::Escp2 => is_escp2(prefix),
        PdlFormat::Unknown => false,
    }
}

pub fn is_postscript(prefix: &[u8]) -> bool {
    prefix.starts_with(b"%!")
        || prefix.starts_with(b"\x04%!")
        || prefix.starts_with(b"\x1b%-12345X%!PS")
        || (switches_language(prefix)
            && (contains(prefix, b"LANGUAGE=POSTSCRIPT")
                || contains(prefix, b"LANGUAGE = POSTSCRIPT")
                || contains(prefix, b"LANGUAGE = Postscript")))
        || contains(prefix, b"%!PS-Adobe")
}

pub fn is_pclxl(prefix: &[u8]) -> bool {
    switches_language(prefix)
        && contains(prefix, b" HP-PCL XL;")
        && (contains(prefix, b"LANGUAGE=PCLXL") || contains(prefix, b"LANGUAGE = PCLXL"))
}

pub fn is_pdf(prefix: &[u8]) -> bool {
    prefix.starts_with(b"%PDF-")
        || prefix.starts_with(b"\x1b%-12345X%PDF-")
        || (switches_language(prefix)
            && contains(&prefix.to_ascii_uppercase(), b"LANGUAGE=PDF"))
        || contains(prefix, b"%PDF-")
}

/// 以 `ESC *rbC` 开头但以 `FF ESC @` 结尾的光栅作业属于 ESC/P2
pub fn is_pcl(prefix: &[u8], suffix: &[u8]) -> bool {
    prefix.starts_with(b"\x1bE\x1b")
        || (prefix.starts_with(b"\x1b*rbC") && !suffix.ends_with(b"\x0c\x1b@"))
        || prefix.starts_with(b"\x1b%8\x1b")
        || contains(prefix, UEL)
}

pub fn is_escp2(prefix: &[u8]) -> bool {
    prefix.starts_with(b"\x1b@")
        || prefix.starts_with(b"\x1b*")
        || prefix.starts_with(b"\n\x1b@")
        // ESC/P raster (Stylus Photo)
        || prefix.starts_with(b"\x00\x00\x00\x1b\x01@EJL")
}

fn switches_language(prefix: &[u8]) -> bool {
    contains(&prefix[..prefix.len().min(SWITCH_WINDOW)], UEL)
}

/// 字节串子串查找
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

/// 返回子串首次出现的位置
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

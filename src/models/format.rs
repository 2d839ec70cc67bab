//! # 页面描述语言 (PDL) 格式模型
//!
//! 格式嗅探的结果：五种已知 PDL 之一，或 `Unknown`。
//!
//! ## 依赖关系
//! - 被 `sniffer/`, `parsers/mod.rs`, `batch/` 使用

/// 嗅探得到的作业格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdlFormat {
    PostScript,
    Pdf,
    Pcl,
    PclXl,
    Escp2,
    Unknown,
}

impl PdlFormat {
    /// 所有已知格式（不含 `Unknown`），按嗅探优先级排列
    pub const KNOWN: [PdlFormat; 5] = [
        PdlFormat::PostScript,
        PdlFormat::PclXl,
        PdlFormat::Pdf,
        PdlFormat::Pcl,
        PdlFormat::Escp2,
    ];

    pub fn is_known(self) -> bool {
        self != PdlFormat::Unknown
    }
}

impl std::fmt::Display for PdlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdlFormat::PostScript => write!(f, "PostScript"),
            PdlFormat::Pdf => write!(f, "PDF"),
            PdlFormat::Pcl => write!(f, "PCL3/4/5"),
            PdlFormat::PclXl => write!(f, "PCLXL (aka PCL6)"),
            PdlFormat::Escp2 => write!(f, "ESC/P2"),
            PdlFormat::Unknown => write!(f, "unknown"),
        }
    }
}

//! # 诊断日志初始化
//!
//! `tracing-subscriber` 输出到标准错误，不带时间戳。
//! 默认级别为 `warn`，`--debug` 提升到 `debug`；设置 `RUST_LOG` 时以其为准。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用

use tracing_subscriber::EnvFilter;

/// 默认过滤级别
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}

/// 初始化全局 tracing subscriber
pub fn init(debug: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

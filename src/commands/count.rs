//! # 页数统计命令实现
//!
//! 依次统计所有作业，总页数以纯整数输出到标准输出，
//! 每个失败作业在标准错误输出一行。
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的参数
//! - 使用 `batch/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchResult, BatchRunner, JobCollector};
use crate::cli::Cli;
use crate::error::Result;
use crate::utils::output;

use std::io::{self, Write};
use tabled::{Table, Tabled};

/// 作业明细行
#[derive(Debug, Clone, Tabled)]
struct JobRow {
    #[tabled(rename = "Job")]
    source: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "Pages")]
    pages: String,
}

/// 执行页数统计
pub fn execute(cli: Cli) -> Result<()> {
    let sources = JobCollector::new(cli.jobs).sources();
    let result = BatchRunner::new().run(sources);

    report(&result, &mut io::stdout().lock(), &mut io::stderr().lock())?;

    if cli.details {
        print_details(&result);
    }

    Ok(())
}

/// 每个失败作业向 `err` 写一行，总页数以纯整数写到 `out`
pub fn report<O: Write, E: Write>(
    result: &BatchResult,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    for job in result.failures() {
        if let Err(e) = &job.outcome {
            output::write_job_error(err, e)?;
        }
    }
    err.flush()?;

    writeln!(out, "{}", result.total())?;
    out.flush()
}

/// 在标准错误打印每个作业的明细表格
fn print_details(result: &BatchResult) {
    let rows: Vec<JobRow> = result
        .jobs
        .iter()
        .map(|job| match &job.outcome {
            Ok(size) => JobRow {
                source: job.source.clone(),
                format: size.format.to_string(),
                pages: size.size.to_string(),
            },
            Err(e) => JobRow {
                source: job.source.clone(),
                format: "-".to_string(),
                pages: format!("error: {:?}", e.kind()),
            },
        })
        .collect();

    if !rows.is_empty() {
        output::eprint_header(&format!(
            "{} of {} jobs counted",
            result.success(),
            result.jobs.len()
        ));
        eprintln!("{}", Table::new(&rows));
    }
}

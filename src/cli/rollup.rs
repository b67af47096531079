//! # rollup 子命令 CLI 定义
//!
//! 成本汇总主命令：输入为单个项目文件或项目目录（批量模式），
//! 目录查找、合同系数与间接费百分比均可覆盖。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/rollup.rs`

use clap::Args;
use std::path::PathBuf;

/// rollup 子命令参数
#[derive(Args, Debug)]
pub struct RollupArgs {
    /// Input: project file or directory containing project files
    pub input: PathBuf,

    /// Path to the material catalog file
    #[arg(short, long, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Contract ratio override (e.g., 1.15); project file value is used when omitted
    #[arg(short, long)]
    pub ratio: Option<String>,

    /// Export the row stream as CSV: file path (single mode) or directory (batch mode)
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // 公式模式间接费百分比覆盖
    // ─────────────────────────────────────────────────────────────
    /// Material loss percentage override
    #[arg(long)]
    pub loss_percent: Option<f64>,

    /// Transport percentage override
    #[arg(long)]
    pub transport_percent: Option<f64>,

    /// Material profit percentage override
    #[arg(long)]
    pub profit_percent: Option<f64>,

    /// Tool expense percentage override
    #[arg(long)]
    pub tool_percent: Option<f64>,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for project files (batch mode, e.g., "*.json")
    #[arg(long, default_value = "*.json")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,
}

/// 解析合同系数输入（正数）
pub fn parse_contract_ratio(input: &str) -> Result<f64, String> {
    let value: f64 = input.trim().parse().map_err(|_| {
        format!(
            "Invalid contract ratio '{}'. Use a positive number, e.g. 1.15",
            input
        )
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!(
            "Invalid contract ratio '{}'. Must be a positive number",
            input
        ));
    }
    Ok(value)
}

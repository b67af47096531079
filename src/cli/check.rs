//! # check 子命令 CLI 定义
//!
//! 对照检查：逐墙型核对项目文件引用的材料能否在目录中命中，
//! 不做任何金额计算。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use clap::Args;
use std::path::PathBuf;

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input: project file to check
    pub input: PathBuf,

    /// Path to the material catalog file
    #[arg(short, long, default_value = "catalog.json")]
    pub catalog: PathBuf,
}

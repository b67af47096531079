//! # catalog 子命令 CLI 定义
//!
//! 材料目录查看：列出全部目录项，或展开单项的子材料清单。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/catalog.rs`

use clap::Args;
use std::path::PathBuf;

/// catalog 子命令参数
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Path to the material catalog file
    #[arg(default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Show the bill of materials for one item (by name or id)
    #[arg(short, long)]
    pub item: Option<String>,
}

//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `store/`, `rollup/`, `utils/`
//! - 子模块: rollup, catalog, check

pub mod catalog;
pub mod check;
pub mod rollup;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Rollup(args) => rollup::execute(args),
        Commands::Catalog(args) => catalog::execute(args),
        Commands::Check(args) => check::execute(args),
    }
}

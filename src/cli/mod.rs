//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `rollup`: 墙体材料成本汇总（单文件或批量目录）
//! - `catalog`: 材料目录查看
//! - `check`: 项目文件与目录的对照检查
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: rollup, catalog, check

pub mod catalog;
pub mod check;
pub mod rollup;

use clap::{Parser, Subcommand};

/// qiangsuan - 轻钢龙骨隔墙材料成本汇总工具
#[derive(Parser)]
#[command(name = "qiangsuan")]
#[command(author = "Weimin Gao")]
#[command(version)]
#[command(about = "A material cost rollup toolkit for light-gauge steel wall estimation", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Roll up per-wall-type material costs from project files
    Rollup(rollup::RollupArgs),

    /// List catalog items or inspect one item's bill of materials
    Catalog(catalog::CatalogArgs),

    /// Check a project file against the catalog for missing materials
    Check(check::CheckArgs),
}

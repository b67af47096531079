//! # qiangsuan - 轻钢龙骨隔墙造价汇总工具
//!
//! 把墙型构造层按材料目录分解为构件清单，汇总出分墙型的
//! 订货价 / 合同价造价表。
//!
//! ## 子命令
//! - `rollup`  - 成本汇总（单项目文件或目录批量）
//! - `catalog` - 浏览材料目录与子材料清单
//! - `check`   - 项目与目录交叉检查
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (目录/项目/规格解析)
//!   │     ├── store/     (目录查询与构造层解析)
//!   │     ├── rollup/    (汇总引擎)
//!   │     └── batch/     (批量执行)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod rollup;
mod store;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

//! # 批量处理模块
//!
//! 提供项目文件的批量汇总能力。
//!
//! ## 功能
//! - 自动检测输入类型（文件/目录）
//! - 按 glob 模式收集项目文件
//! - 并行处理与进度反馈
//! - 成败统计与失败明细
//!
//! ## 依赖关系
//! - 被 `commands/rollup.rs` 使用
//! - 使用 `rayon` 并行，`indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};

//! # 解析器模块
//!
//! 提供材料目录、项目文件与规格尺寸串的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `rollup/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: catalog, project, size

pub mod catalog;
pub mod project;
pub mod size;

pub use catalog::parse_catalog_file;
pub use project::parse_project_file;
pub use size::{parse_size, SizeSpec};

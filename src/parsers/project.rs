//! # 项目文件解析器
//!
//! 解析 JSON 格式的项目文件（工程信息、墙型构造层、墙体实例）。
//!
//! ## 文件结构
//! ```text
//! {
//!   "site": "工程名称",
//!   "contract_ratio": 1.15,
//!   "wall_types": { "W1": { "骨架": "@75型轻钢龙骨隔墙", ... } },
//!   "walls": [ { "name": "1-2轴", "wall_type": "W1",
//!                "width": 6.0, "height": 3.0 }, ... ]
//! }
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/wall.rs`

use std::fs;
use std::path::Path;

use crate::error::{QiangsuanError, Result};
use crate::models::Project;

/// 解析项目文件
pub fn parse_project_file(path: &Path) -> Result<Project> {
    let content = fs::read_to_string(path).map_err(|e| QiangsuanError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_project_content(&content, &path.display().to_string())
}

/// 从字符串内容解析项目文件
pub fn parse_project_content(content: &str, path_label: &str) -> Result<Project> {
    serde_json::from_str(content).map_err(|e| QiangsuanError::ParseError {
        format: "project".to_string(),
        path: path_label.to_string(),
        reason: e.to_string(),
    })
}

//! # 材料目录存取模块
//!
//! 定义目录查询接口与内存实现，并提供墙型构造层的价格解析。
//! 查询未命中一律返回 `None`，由调用方记录缺价标记，不中断计算。
//!
//! ## 依赖关系
//! - 被 `rollup/` 和 `commands/` 使用
//! - 使用 `models/catalog.rs`
//! - 子模块: memory, resolve

pub mod memory;
pub mod resolve;

use crate::models::{CatalogItem, Dimensions};

/// 目录引用前缀：构造层材料名以 "@" 开头时显式指向目录项
pub const CATALOG_REF_PREFIX: &str = "@";

/// 剥除目录引用前缀，得到查询用名称
pub fn lookup_name(raw: &str) -> &str {
    raw.trim()
        .strip_prefix(CATALOG_REF_PREFIX)
        .unwrap_or(raw.trim())
        .trim()
}

/// 材料目录查询接口
pub trait CatalogStore: Sync {
    /// 按显示名称或编号查找目录项
    fn find_item(&self, name: &str) -> Option<&CatalogItem>;

    /// 按尺寸表编号查找板材尺寸
    fn find_dimensions(&self, material_id: &str) -> Option<Dimensions>;
}

pub use memory::InMemoryCatalog;
pub use resolve::resolve_project;

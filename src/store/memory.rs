//! # 内存材料目录
//!
//! 由目录文件构建的内存查询实现。目录规模为数十到数百项，
//! 名称查找采用线性扫描，尺寸表建哈希索引。
//!
//! ## 依赖关系
//! - 被 `commands/` 构建并传入 `rollup/`
//! - 实现 `store::CatalogStore`

use std::collections::HashMap;

use crate::models::{CatalogFile, CatalogItem, Dimensions};
use crate::store::CatalogStore;

/// 内存材料目录
pub struct InMemoryCatalog {
    items: Vec<CatalogItem>,
    dimensions: HashMap<String, Dimensions>,
}

impl InMemoryCatalog {
    /// 从解析后的目录文件构建
    pub fn from_file(file: CatalogFile) -> Self {
        let dimensions = file
            .materials
            .iter()
            .map(|m| (m.id.clone(), m.dimensions()))
            .collect();

        InMemoryCatalog {
            items: file.items,
            dimensions,
        }
    }

    /// 全部目录项（目录浏览用）
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn find_item(&self, name: &str) -> Option<&CatalogItem> {
        self.items
            .iter()
            .find(|item| item.name == name || item.id == name)
    }

    fn find_dimensions(&self, material_id: &str) -> Option<Dimensions> {
        self.dimensions.get(material_id).copied()
    }
}

//! # 材料目录文件解析器
//!
//! 解析 JSON 格式的材料目录文件。
//!
//! ## 文件结构
//! ```text
//! {
//!   "items":     [ { id, name, size, spacing, material_rate, labor_rate,
//!                    indirect_rates, sub_materials: [...] }, ... ],
//!   "materials": [ { id, name, width_mm, height_mm, thickness_mm }, ... ]
//! }
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/catalog.rs`

use std::fs;
use std::path::Path;

use crate::error::{QiangsuanError, Result};
use crate::models::CatalogFile;

/// 解析材料目录文件
pub fn parse_catalog_file(path: &Path) -> Result<CatalogFile> {
    let content = fs::read_to_string(path).map_err(|e| QiangsuanError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog_content(&content, &path.display().to_string())
}

/// 从字符串内容解析材料目录
pub fn parse_catalog_content(content: &str, path_label: &str) -> Result<CatalogFile> {
    serde_json::from_str(content).map_err(|e| QiangsuanError::ParseError {
        format: "catalog".to_string(),
        path: path_label.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialKind;

    #[test]
    fn test_parse_catalog_basic() {
        let content = r#"
{
  "items": [
    {
      "id": "LGS75",
      "name": "75型轻钢龙骨隔墙",
      "size": "75×45×0.6",
      "spacing": 400,
      "material_rate": 28.5,
      "labor_rate": 12.0,
      "sub_materials": [
        {
          "name": "竖龙骨",
          "spec": "C75×45×0.6",
          "unit": "根",
          "per_unit_quantity": 2.6,
          "material_unit_price": 11.8
        },
        {
          "name": "自攻钉",
          "spec": "M3.5×25",
          "unit": "个",
          "per_unit_quantity": 30.0,
          "material_unit_price": 0.05
        }
      ]
    }
  ],
  "materials": [
    { "id": "GB12-STD", "name": "纸面石膏板",
      "width_mm": 1200, "height_mm": 2400, "thickness_mm": 12 }
  ]
}
"#;
        let catalog = parse_catalog_content(content, "test").unwrap();
        assert_eq!(catalog.items.len(), 1);
        assert_eq!(catalog.materials.len(), 1);

        let item = &catalog.items[0];
        assert_eq!(item.name, "75型轻钢龙骨隔墙");
        assert_eq!(item.spacing, Some(400.0));
        assert_eq!(item.composite_rates(), Some((28.5, 12.0)));
        assert_eq!(item.kind(), MaterialKind::Stud);
        assert_eq!(item.sub_materials.len(), 2);
        assert_eq!(item.sub_materials[0].per_unit_quantity, 2.6);
        // 缺省字段取默认值
        assert_eq!(item.sub_materials[0].labor_amount, 0.0);
        assert!(item.indirect_rates.is_none());
    }

    #[test]
    fn test_parse_catalog_with_indirect_rates() {
        let content = r#"
{
  "items": [
    {
      "id": "GB12",
      "name": "12mm纸面石膏板",
      "indirect_rates": { "loss": 0.48, "profit": 1.2 },
      "sub_materials": []
    }
  ]
}
"#;
        let catalog = parse_catalog_content(content, "test").unwrap();
        let rates = catalog.items[0].indirect_rates.unwrap();
        assert_eq!(rates.loss, 0.48);
        assert_eq!(rates.transport, 0.0);
        assert_eq!(rates.profit, 1.2);
    }

    #[test]
    fn test_parse_catalog_invalid() {
        let result = parse_catalog_content("{ not json", "bad");
        assert!(result.is_err());

        // items 键缺失
        let result = parse_catalog_content(r#"{ "materials": [] }"#, "bad");
        assert!(result.is_err());
    }
}

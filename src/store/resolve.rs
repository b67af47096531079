//! # 墙型构造层解析
//!
//! 将项目文件中的墙体实例解析为带价格信息的墙体计算结果：
//! 逐层查询目录，命中时取目录项的综合单价，未命中时记零价
//! 并置缺价标记（不中断）。
//!
//! ## 依赖关系
//! - 被 `commands/rollup.rs` 调用
//! - 使用 `store::CatalogStore` 与 `models/wall.rs`

use crate::error::{QiangsuanError, Result};
use crate::models::{LayerMaterial, Project, WallCalculationResult};
use crate::store::{lookup_name, CatalogStore};

/// 解析单个构造层的材料价格
pub fn resolve_layer(material_name: &str, store: &dyn CatalogStore) -> LayerMaterial {
    match store.find_item(lookup_name(material_name)) {
        Some(item) => LayerMaterial {
            name: material_name.to_string(),
            spec: item.size.clone(),
            unit: "m²".to_string(),
            material_unit_price: item.material_rate.unwrap_or(0.0),
            labor_amount: item.labor_rate.unwrap_or(0.0),
            per_unit_quantity: 1.0,
            not_found: false,
        },
        None => LayerMaterial {
            name: material_name.to_string(),
            spec: String::new(),
            unit: "m²".to_string(),
            material_unit_price: 0.0,
            labor_amount: 0.0,
            per_unit_quantity: 1.0,
            not_found: true,
        },
    }
}

/// 解析项目的全部墙体实例
///
/// 墙体引用的墙型必须在项目的墙型定义中存在；构造层按层键
/// 顺序解析，空白材料名跳过。
pub fn resolve_project(
    project: &Project,
    store: &dyn CatalogStore,
) -> Result<Vec<WallCalculationResult>> {
    let mut results = Vec::with_capacity(project.walls.len());

    for wall in &project.walls {
        let layers_def =
            project
                .wall_types
                .get(&wall.wall_type)
                .ok_or_else(|| QiangsuanError::WallTypeNotFound {
                    name: wall.wall_type.clone(),
                })?;

        let layers: Vec<(String, LayerMaterial)> = layers_def
            .iter()
            .filter(|(_, material)| !material.trim().is_empty())
            .map(|(key, material)| (key.clone(), resolve_layer(material, store)))
            .collect();

        results.push(WallCalculationResult {
            wall_name: wall.name.clone(),
            wall_type: wall.wall_type.clone(),
            area: wall.resolved_area(),
            layers,
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogFile, CatalogItem, WallEntry};
    use crate::store::InMemoryCatalog;
    use std::collections::BTreeMap;

    fn sample_store() -> InMemoryCatalog {
        let mut item = CatalogItem::new("LGS75", "75型轻钢龙骨隔墙");
        item.size = "75×45×0.6".to_string();
        item.material_rate = Some(28.5);
        item.labor_rate = Some(12.0);

        InMemoryCatalog::from_file(CatalogFile {
            items: vec![item],
            materials: Vec::new(),
        })
    }

    fn sample_project() -> Project {
        let mut layers = BTreeMap::new();
        layers.insert("1骨架".to_string(), "@75型轻钢龙骨隔墙".to_string());
        layers.insert("2面层".to_string(), "特种防火板".to_string());
        layers.insert("3空层".to_string(), "  ".to_string());

        let mut wall_types = BTreeMap::new();
        wall_types.insert("W1".to_string(), layers);

        Project {
            site: "测试工程".to_string(),
            contract_ratio: None,
            surcharge_percents: None,
            wall_types,
            walls: vec![WallEntry {
                name: "1-2轴".to_string(),
                wall_type: "W1".to_string(),
                width: Some(5.0),
                height: Some(3.0),
                area: None,
            }],
        }
    }

    #[test]
    fn test_resolve_project() {
        let store = sample_store();
        let results = resolve_project(&sample_project(), &store).unwrap();

        assert_eq!(results.len(), 1);
        let wall = &results[0];
        assert_eq!(wall.area, 15.0);
        // 空白层被跳过
        assert_eq!(wall.layers.len(), 2);

        // 目录命中：取综合单价
        let (key, framing) = &wall.layers[0];
        assert_eq!(key, "1骨架");
        assert_eq!(framing.material_unit_price, 28.5);
        assert_eq!(framing.labor_amount, 12.0);
        assert!(!framing.not_found);
        // 原始写法保留 @ 前缀
        assert_eq!(framing.name, "@75型轻钢龙骨隔墙");

        // 目录未命中：零价 + 缺价标记
        let (_, board) = &wall.layers[1];
        assert_eq!(board.material_unit_price, 0.0);
        assert!(board.not_found);
    }

    #[test]
    fn test_resolve_unknown_wall_type() {
        let store = sample_store();
        let mut project = sample_project();
        project.walls[0].wall_type = "W9".to_string();

        let err = resolve_project(&project, &store).unwrap_err();
        assert!(err.to_string().contains("W9"));
    }
}

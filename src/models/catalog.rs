//! # 材料目录数据模型
//!
//! 定义材料目录文件的记录结构：目录项（含基础信息、综合单价、
//! 存储的间接费率与子材料清单）和板材尺寸表。
//!
//! ## 依赖关系
//! - 被 `parsers/catalog.rs` 反序列化
//! - 被 `store/` 和 `rollup/` 使用

use serde::{Deserialize, Serialize};

use crate::models::component::{CostCategory, MaterialKind, SurchargeKind};

/// 板材尺寸（mm）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width_mm: f64,
    pub height_mm: f64,
    pub thickness_mm: f64,
}

impl Dimensions {
    /// 单张板面积（m²，未舍入）
    pub fn sheet_area_m2(&self) -> f64 {
        (self.width_mm / 1000.0) * (self.height_mm / 1000.0)
    }
}

/// 板材尺寸表记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// 尺寸记录编号（被子材料 material_id 引用）
    pub id: String,

    /// 材料名称
    pub name: String,

    pub width_mm: f64,
    pub height_mm: f64,
    pub thickness_mm: f64,
}

impl MaterialRecord {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            thickness_mm: self.thickness_mm,
        }
    }
}

/// 每 m² 间接费率（元/m²，存储模式用）
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IndirectRates {
    #[serde(default)]
    pub loss: f64,
    #[serde(default)]
    pub transport: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub tool: f64,
}

impl IndirectRates {
    pub fn rate_for(&self, kind: SurchargeKind) -> f64 {
        match kind {
            SurchargeKind::Loss => self.loss,
            SurchargeKind::Transport => self.transport,
            SurchargeKind::Profit => self.profit,
            SurchargeKind::Tool => self.tool,
        }
    }
}

/// 目录项子材料（BOM 行）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubMaterial {
    /// 材料名称
    pub name: String,

    /// 规格型号
    #[serde(default)]
    pub spec: String,

    /// 计量单位
    #[serde(default)]
    pub unit: String,

    /// 每 m² 墙面用量
    #[serde(default)]
    pub per_unit_quantity: f64,

    /// 材料单价（订货价，元/计量单位）
    #[serde(default)]
    pub material_unit_price: f64,

    /// 人工费（元/m²）
    #[serde(default)]
    pub labor_amount: f64,

    /// 板材尺寸表引用
    #[serde(default)]
    pub material_id: Option<String>,
}

impl SubMaterial {
    pub fn new(name: impl Into<String>, spec: impl Into<String>, unit: impl Into<String>) -> Self {
        SubMaterial {
            name: name.into(),
            spec: spec.into(),
            unit: unit.into(),
            per_unit_quantity: 0.0,
            material_unit_price: 0.0,
            labor_amount: 0.0,
            material_id: None,
        }
    }
}

/// 材料目录项
///
/// 一个目录项描述一种墙体构造做法：基础信息（名称、规格尺寸、
/// 龙骨间距）、综合单价（元/m²，尾差调整的权威依据）、可选的
/// 存储间接费率，以及分解用的子材料清单。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// 目录项编号
    pub id: String,

    /// 显示名称（构造层按名称引用）
    pub name: String,

    /// 规格尺寸串（如 "75×45×0.6"）
    #[serde(default)]
    pub size: String,

    /// 龙骨间距（mm）
    #[serde(default)]
    pub spacing: Option<f64>,

    /// 综合材料单价（元/m²）
    #[serde(default)]
    pub material_rate: Option<f64>,

    /// 综合人工单价（元/m²）
    #[serde(default)]
    pub labor_rate: Option<f64>,

    /// 存储的间接费率（元/m²）
    #[serde(default)]
    pub indirect_rates: Option<IndirectRates>,

    /// 子材料清单
    #[serde(default)]
    pub sub_materials: Vec<SubMaterial>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            size: String::new(),
            spacing: None,
            material_rate: None,
            labor_rate: None,
            indirect_rates: None,
            sub_materials: Vec::new(),
        }
    }

    /// 目录项自身的材料种类（按名称判定）
    pub fn kind(&self) -> MaterialKind {
        MaterialKind::from_name(&self.name)
    }

    /// 目录项归属的费用分类（子材料继承）
    pub fn category(&self) -> CostCategory {
        CostCategory::for_name(self.kind(), &self.name)
    }

    /// 综合单价（材料, 人工），两者都未填时为 None
    pub fn composite_rates(&self) -> Option<(f64, f64)> {
        if self.material_rate.is_none() && self.labor_rate.is_none() {
            return None;
        }
        Some((
            self.material_rate.unwrap_or(0.0),
            self.labor_rate.unwrap_or(0.0),
        ))
    }
}

/// 材料目录文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub items: Vec<CatalogItem>,

    /// 板材尺寸表
    #[serde(default)]
    pub materials: Vec<MaterialRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_category() {
        let stud = CatalogItem::new("LGS75", "75型轻钢龙骨隔墙");
        assert_eq!(stud.kind(), MaterialKind::Stud);
        assert_eq!(stud.category(), CostCategory::Framing);

        let board = CatalogItem::new("GB12", "12mm纸面石膏板");
        assert_eq!(board.kind(), MaterialKind::Board);
        assert_eq!(
            board.category(),
            CostCategory::Board("12mm纸面石膏板".to_string())
        );
    }

    #[test]
    fn test_composite_rates() {
        let mut item = CatalogItem::new("LGS75", "75型轻钢龙骨隔墙");
        assert!(item.composite_rates().is_none());

        item.material_rate = Some(28.5);
        assert_eq!(item.composite_rates(), Some((28.5, 0.0)));

        item.labor_rate = Some(12.0);
        assert_eq!(item.composite_rates(), Some((28.5, 12.0)));
    }

    #[test]
    fn test_sheet_area() {
        let dims = Dimensions {
            width_mm: 1200.0,
            height_mm: 2400.0,
            thickness_mm: 12.0,
        };
        assert!((dims.sheet_area_m2() - 2.88).abs() < 1e-12);
    }

    #[test]
    fn test_indirect_rate_lookup() {
        let rates = IndirectRates {
            loss: 1.4,
            transport: 0.9,
            profit: 2.5,
            tool: 0.6,
        };
        assert_eq!(rates.rate_for(SurchargeKind::Loss), 1.4);
        assert_eq!(rates.rate_for(SurchargeKind::Tool), 0.6);
    }
}

//! # 尾差调整
//!
//! 目录项的综合单价是分类直接成本的权威值：材料综合单价 ×
//! 分类面积给出应计材料金额（含隐藏的紧固件等不单列材料），
//! 人工侧同理。明细行逐行舍入后的合计与权威值之间存在尾差，
//! 本阶段为每个带综合单价的分类补一行调整。
//!
//! 调整金额 = 权威金额 − 明细合计，**原样保留浮点差值不再
//! 舍入**：两数量级相近时差值精确，明细合计加回调整即按位
//! 等于权威金额。合同价侧不独立重算，由聚合层按系数从订货
//! 价派生，保证两价系在系数变化下保持比例一致。
//!
//! ## 依赖关系
//! - 被 `rollup/aggregate.rs` 调用
//! - 使用 `rollup/extract.rs` 的分类来源信息

use crate::models::CostCategory;
use crate::rollup::extract::CategorySource;
use crate::rollup::rounding::round2;

/// 单分类尾差调整（订货价侧）
#[derive(Debug, Clone)]
pub struct Correction {
    pub category: CostCategory,
    pub name: String,
    pub material_amount: f64,
    pub labor_amount: f64,
}

/// 计算一个分类的尾差调整
///
/// 无综合单价的分类（未入目录的合成层）没有权威值，不产出
/// 调整行。
pub fn rounding_correction(
    source: &CategorySource,
    area: f64,
    displayed_material: f64,
    displayed_labor: f64,
) -> Option<Correction> {
    let (material_rate, labor_rate) = source.composite?;

    let authoritative_material = round2(material_rate * area);
    let authoritative_labor = round2(labor_rate * area);

    let label = source.category.label();
    let name = if label.is_empty() {
        "尾差调整".to_string()
    } else {
        format!("{} 尾差调整", label)
    };

    Some(Correction {
        category: source.category.clone(),
        name,
        material_amount: authoritative_material - displayed_material,
        labor_amount: authoritative_labor - displayed_labor,
    })
}

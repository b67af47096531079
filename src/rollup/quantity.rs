//! # 数量与单价换算
//!
//! 按材料种类派发数量列、件数列与订货价单价的换算规则：
//!
//! | 种类 | 数量 | 件数 | 材料单价 |
//! |------|------|------|----------|
//! | 龙骨/保温/其他 | 墙面积 | round0(含量×面积) | 单价×含量 |
//! | 焊条 | 墙面积 | round2(含量×面积)，保留两位 | 单价×含量 |
//! | 板材 | round2(面积×含量) | 张数，按目录项共享 | 原始单价 |
//!
//! 含量系数在每行恰好出现一次：面积基准行进单价，板材行进
//! 数量。单价保留未舍入值供金额计算，取整仅发生在渲染层。
//!
//! 板材张数 = round0(同目录项数量合计 ÷ 换算系数)，换算系数
//! = round3(宽m × 高m)。张数从合并后的总量一次算出，同一目录
//! 项的各构件共享，不按构件分别取整后相加。
//!
//! ## 依赖关系
//! - 被 `rollup/aggregate.rs` 的行装配调用
//! - 使用 `rollup/rounding.rs` 的舍入原语

use crate::models::{Component, MaterialKind};
use crate::rollup::rounding::{round0, round2, round3};

/// 单一构件行的换算结果
#[derive(Debug, Clone, Copy)]
pub struct ComponentFigures {
    /// 数量列（金额计算基准）
    pub quantity: f64,

    /// 件数列（根/张/支；无法换算时为 None）
    pub count: Option<f64>,

    /// 订货价材料单价（未舍入）
    pub material_rate: f64,

    /// 订货价人工单价（未舍入）
    pub labor_rate: f64,
}

/// 板材数量按目录项汇总（编号 → 数量合计）
///
/// 对合并后的构件列表调用一次，结果供 [`component_figures`]
/// 共享张数。
pub fn sheet_quantity_totals(components: &[Component]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for component in components {
        if let Some(item_id) = &component.sheet_ref {
            let quantity = round2(component.area * component.per_unit_quantity);
            match totals.iter_mut().find(|(id, _)| id == item_id) {
                Some((_, total)) => *total += quantity,
                None => totals.push((item_id.clone(), quantity)),
            }
        }
    }

    totals
}

/// 换算单一构件行的数量、件数与单价
pub fn component_figures(
    component: &Component,
    sheet_totals: &[(String, f64)],
) -> ComponentFigures {
    match component.kind {
        MaterialKind::Board => {
            let quantity = round2(component.area * component.per_unit_quantity);
            ComponentFigures {
                quantity,
                count: board_sheet_count(component, quantity, sheet_totals),
                material_rate: component.material_unit_price,
                labor_rate: component.labor_amount,
            }
        }
        MaterialKind::WeldingRod => ComponentFigures {
            quantity: component.area,
            count: Some(round2(component.per_unit_quantity * component.area)),
            material_rate: component.material_unit_price * component.per_unit_quantity,
            labor_rate: component.labor_amount,
        },
        _ => ComponentFigures {
            quantity: component.area,
            count: Some(round0(component.per_unit_quantity * component.area)),
            material_rate: component.material_unit_price * component.per_unit_quantity,
            labor_rate: component.labor_amount,
        },
    }
}

/// 板材张数（目录项总量 ÷ 换算系数）
fn board_sheet_count(
    component: &Component,
    own_quantity: f64,
    sheet_totals: &[(String, f64)],
) -> Option<f64> {
    let dims = component.dimensions?;
    let conversion = round3(dims.sheet_area_m2());
    if conversion <= 0.0 {
        return None;
    }

    let total = component
        .sheet_ref
        .as_ref()
        .and_then(|id| sheet_totals.iter().find(|(key, _)| key == id))
        .map(|(_, total)| *total)
        .unwrap_or(own_quantity);

    Some(round0(total / conversion))
}

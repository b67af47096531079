//! # 构件分组合并
//!
//! 以 (名称, 规格, 单位, 分类) 为等价键合并跨墙体的同种构件：
//! 面积累加，单价、用量与目录引用取首次出现值。同键不同价时
//! 保留首值并记录警告，不中断。
//!
//! 合并对墙体输入顺序不敏感（总量层面），且幂等：对已合并
//! 列表再次合并不改变任何值。
//!
//! ## 依赖关系
//! - 被 `rollup/aggregate.rs` 调用

use crate::models::Component;

/// 价格比较容差（来源数据为两位小数金额）
const PRICE_EPSILON: f64 = 1e-9;

/// 合并构件列表，返回合并结果与警告
pub fn group_components(components: Vec<Component>) -> (Vec<Component>, Vec<String>) {
    let mut grouped: Vec<Component> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut warned: Vec<String> = Vec::new();

    for component in components {
        match grouped.iter_mut().find(|g| g.same_key(&component)) {
            Some(existing) => {
                if diverges(existing, &component) && !warned.contains(&component.name) {
                    warnings.push(format!(
                        "材料 '{}' 出现不同单价（{:.2}/{:.2} 对 {:.2}/{:.2}），保留首次出现值",
                        component.name,
                        existing.material_unit_price,
                        existing.labor_amount,
                        component.material_unit_price,
                        component.labor_amount,
                    ));
                    warned.push(component.name.clone());
                }
                existing.area += component.area;
            }
            None => grouped.push(component),
        }
    }

    (grouped, warnings)
}

/// 同键构件的价格或用量是否不一致
fn diverges(a: &Component, b: &Component) -> bool {
    (a.material_unit_price - b.material_unit_price).abs() > PRICE_EPSILON
        || (a.labor_amount - b.labor_amount).abs() > PRICE_EPSILON
        || (a.per_unit_quantity - b.per_unit_quantity).abs() > PRICE_EPSILON
}

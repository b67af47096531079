//! # 成本分类
//!
//! 按名称关键字把构件划分为直接材料与间接费用两类。关键字
//! 族固定：损耗、运输/搬运、利润/利益、工具/机具，以及单价
//! 取整/圆整类调整项。
//!
//! 间接构件的名称改写为"{分类标签} {原名}"，默认分组不加
//! 前缀。角色本身在提取阶段已判定，本阶段只分拣与改名。
//!
//! ## 依赖关系
//! - 被 `rollup/extract.rs`（关键字判定）与
//!   `rollup/aggregate.rs`（分拣）调用

use crate::models::{Component, CostRole, SurchargeKind};

/// 名称是否命中间接费用关键字
pub fn is_indirect_name(name: &str) -> bool {
    SurchargeKind::from_name(name).is_some() || name.contains("取整") || name.contains("圆整")
}

/// 分拣结果
#[derive(Debug, Default)]
pub struct Classified {
    pub direct: Vec<Component>,
    pub indirect: Vec<Component>,
}

/// 分拣构件并改写间接费名称
pub fn classify_components(components: Vec<Component>) -> Classified {
    let mut classified = Classified::default();

    for mut component in components {
        match component.role {
            CostRole::Direct => classified.direct.push(component),
            CostRole::Indirect => {
                let label = component.category.label();
                if !label.is_empty() {
                    component.name = format!("{} {}", label, component.name);
                }
                classified.indirect.push(component);
            }
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostCategory, MaterialKind};

    fn component(name: &str, role: CostRole, category: CostCategory) -> Component {
        Component {
            name: name.to_string(),
            spec: String::new(),
            unit: "m²".to_string(),
            material_unit_price: 1.0,
            labor_amount: 0.0,
            per_unit_quantity: 1.0,
            area: 10.0,
            category,
            kind: MaterialKind::Other,
            role,
            not_found: false,
            sheet_ref: None,
            dimensions: None,
        }
    }

    #[test]
    fn test_indirect_keywords() {
        assert!(is_indirect_name("材料损耗"));
        assert!(is_indirect_name("场内运输费"));
        assert!(is_indirect_name("搬运费"));
        assert!(is_indirect_name("材料利润"));
        assert!(is_indirect_name("工具费"));
        assert!(is_indirect_name("单价取整"));
        assert!(is_indirect_name("金额圆整"));
        assert!(!is_indirect_name("竖龙骨"));
        assert!(!is_indirect_name("纸面石膏板"));
    }

    #[test]
    fn test_partition_by_role() {
        let classified = classify_components(vec![
            component("竖龙骨", CostRole::Direct, CostCategory::Framing),
            component("场内运输费", CostRole::Indirect, CostCategory::Framing),
        ]);

        assert_eq!(classified.direct.len(), 1);
        assert_eq!(classified.indirect.len(), 1);
        assert_eq!(classified.direct[0].name, "竖龙骨");
    }

    #[test]
    fn test_indirect_rename_with_category() {
        let classified = classify_components(vec![component(
            "场内运输费",
            CostRole::Indirect,
            CostCategory::Framing,
        )]);
        assert_eq!(classified.indirect[0].name, "龙骨 场内运输费");
    }

    #[test]
    fn test_indirect_no_prefix_for_general() {
        let classified = classify_components(vec![component(
            "运输费",
            CostRole::Indirect,
            CostCategory::General,
        )]);
        assert_eq!(classified.indirect[0].name, "运输费");
    }
}

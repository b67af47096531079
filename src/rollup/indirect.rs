//! # 间接费用计算
//!
//! 每个费用分类固定产出四行：损耗 → 运输费 → 利润 → 工具费。
//! 按分类来源目录项选择两种计算模式之一：
//!
//! - **存储费率模式**（优先）：目录项带每平米费率，或 BOM 内嵌
//!   了间接费子行。金额 = round2(费率 × 分类面积)。内嵌行的
//!   每平米价覆盖目录基础费率，行名沿用内嵌行改写后的名称。
//! - **公式模式**（回退）：损耗 = round2(直材 × p)，运输 =
//!   round2(直材 × p)，利润 = round2((直材+损耗+运输) × p)——
//!   利润基数含已计的损耗与运输，工具费 = round2(直工 × p)。
//!   每平米单价按面积反推，零面积时取 0。
//!
//! 本阶段只产出订货价侧；合同价由聚合层统一按系数派生。
//! 舍入一律保留两位小数，取整是渲染层的事。
//!
//! ## 依赖关系
//! - 被 `rollup/aggregate.rs` 调用
//! - 使用 `rollup/rounding.rs` 的舍入原语

use crate::models::{Component, CostCategory, IndirectRates, SurchargeKind, SurchargePercents};
use crate::rollup::rounding::round2;

/// 单行间接费用（订货价侧）
#[derive(Debug, Clone)]
pub struct IndirectLine {
    pub kind: SurchargeKind,

    /// 行名称（内嵌行名或"{分类标签} {费用名}"）
    pub name: String,

    /// 规格列（公式模式显示百分比）
    pub spec: String,

    /// 每平米单价（未舍入）
    pub rate: f64,

    /// 金额
    pub amount: f64,
}

impl IndirectLine {
    /// 金额是否计入人工侧（工具费从直接人工计提）
    pub fn labor_side(&self) -> bool {
        self.kind == SurchargeKind::Tool
    }
}

/// 计算一个分类的四行间接费用
///
/// `embedded` 为该分类分拣出的间接构件（名称已带分类前缀），
/// `material_total`/`labor_total` 为该分类直接材料的订货价
/// 金额合计。
pub fn indirect_lines(
    category: &CostCategory,
    area: f64,
    material_total: f64,
    labor_total: f64,
    stored: Option<&IndirectRates>,
    embedded: &[Component],
    percents: &SurchargePercents,
) -> Vec<IndirectLine> {
    if stored.is_some() || embedded.iter().any(|c| SurchargeKind::from_name(&c.name).is_some()) {
        stored_rate_lines(category, area, stored, embedded)
    } else {
        formula_lines(category, area, material_total, labor_total, percents)
    }
}

/// 存储费率模式：目录费率叠加 BOM 内嵌行（内嵌覆盖）
fn stored_rate_lines(
    category: &CostCategory,
    area: f64,
    stored: Option<&IndirectRates>,
    embedded: &[Component],
) -> Vec<IndirectLine> {
    SurchargeKind::ALL
        .iter()
        .map(|&kind| {
            let overlay = embedded
                .iter()
                .find(|c| SurchargeKind::from_name(&c.name) == Some(kind));

            let (name, rate) = match overlay {
                Some(row) => (
                    row.name.clone(),
                    row.material_unit_price * row.per_unit_quantity + row.labor_amount,
                ),
                None => (
                    line_name(category, kind),
                    stored.map(|r| r.rate_for(kind)).unwrap_or(0.0),
                ),
            };

            IndirectLine {
                kind,
                name,
                spec: String::new(),
                rate,
                amount: round2(rate * area),
            }
        })
        .collect()
}

/// 公式模式：按百分比从直接材料/人工合计计提
fn formula_lines(
    category: &CostCategory,
    area: f64,
    material_total: f64,
    labor_total: f64,
    percents: &SurchargePercents,
) -> Vec<IndirectLine> {
    let loss = round2(material_total * percents.loss / 100.0);
    let transport = round2(material_total * percents.transport / 100.0);
    // 利润基数含已计提的损耗与运输
    let profit = round2((material_total + loss + transport) * percents.profit / 100.0);
    let tool = round2(labor_total * percents.tool / 100.0);

    let line = |kind: SurchargeKind, percent: f64, amount: f64| IndirectLine {
        kind,
        name: line_name(category, kind),
        spec: format!("{}%", format_percent(percent)),
        rate: if area > 0.0 { amount / area } else { 0.0 },
        amount,
    };

    vec![
        line(SurchargeKind::Loss, percents.loss, loss),
        line(SurchargeKind::Transport, percents.transport, transport),
        line(SurchargeKind::Profit, percents.profit, profit),
        line(SurchargeKind::Tool, percents.tool, tool),
    ]
}

/// 行名称："{分类标签} {费用名}"，默认分组不加前缀
fn line_name(category: &CostCategory, kind: SurchargeKind) -> String {
    let label = category.label();
    if label.is_empty() {
        kind.label().to_string()
    } else {
        format!("{} {}", label, kind.label())
    }
}

fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{}", percent as i64)
    } else {
        format!("{}", percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostRole, MaterialKind};

    fn embedded(name: &str, price: f64) -> Component {
        Component {
            name: name.to_string(),
            spec: String::new(),
            unit: "m²".to_string(),
            material_unit_price: price,
            labor_amount: 0.0,
            per_unit_quantity: 1.0,
            area: 20.0,
            category: CostCategory::Framing,
            kind: MaterialKind::Other,
            role: CostRole::Indirect,
            not_found: false,
            sheet_ref: None,
            dimensions: None,
        }
    }

    #[test]
    fn test_formula_mode_defaults() {
        let lines = indirect_lines(
            &CostCategory::Framing,
            20.0,
            1000.0,
            500.0,
            None,
            &[],
            &SurchargePercents::default(),
        );

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].kind, SurchargeKind::Loss);
        assert_eq!(lines[0].amount, 50.0);
        assert_eq!(lines[0].spec, "5%");
        assert_eq!(lines[1].amount, 30.0);
        // 利润基数 1000 + 50 + 30 = 1080
        assert_eq!(lines[2].amount, 86.4);
        assert_eq!(lines[3].kind, SurchargeKind::Tool);
        assert_eq!(lines[3].amount, 25.0);
        assert_eq!(lines[0].name, "龙骨 材料损耗");
    }

    #[test]
    fn test_formula_mode_back_derives_rates() {
        let lines = indirect_lines(
            &CostCategory::General,
            20.0,
            1000.0,
            0.0,
            None,
            &[],
            &SurchargePercents::default(),
        );
        assert_eq!(lines[0].rate, 2.5);
        assert_eq!(lines[0].name, "材料损耗");
    }

    #[test]
    fn test_formula_mode_zero_area() {
        let lines = indirect_lines(
            &CostCategory::General,
            0.0,
            1000.0,
            0.0,
            None,
            &[],
            &SurchargePercents::default(),
        );
        assert_eq!(lines[0].amount, 50.0);
        assert_eq!(lines[0].rate, 0.0);
    }

    #[test]
    fn test_stored_rate_mode() {
        let stored = IndirectRates {
            loss: 1.2,
            transport: 0.86,
            profit: 2.4,
            tool: 0.5,
        };
        let lines = indirect_lines(
            &CostCategory::Framing,
            20.0,
            1000.0,
            500.0,
            Some(&stored),
            &[],
            &SurchargePercents::default(),
        );

        assert_eq!(lines[0].amount, 24.0);
        assert_eq!(lines[1].amount, 17.2);
        assert_eq!(lines[2].amount, 48.0);
        assert_eq!(lines[3].amount, 10.0);
        assert!(lines[0].spec.is_empty());
    }

    #[test]
    fn test_embedded_overrides_stored() {
        let stored = IndirectRates {
            transport: 0.86,
            ..IndirectRates::default()
        };
        let rows = vec![embedded("龙骨 场内运输费", 0.9)];
        let lines = indirect_lines(
            &CostCategory::Framing,
            20.0,
            1000.0,
            500.0,
            Some(&stored),
            &rows,
            &SurchargePercents::default(),
        );

        let transport = &lines[1];
        assert_eq!(transport.kind, SurchargeKind::Transport);
        assert_eq!(transport.name, "龙骨 场内运输费");
        assert_eq!(transport.rate, 0.9);
        assert_eq!(transport.amount, 18.0);
    }

    #[test]
    fn test_embedded_alone_selects_stored_mode() {
        let rows = vec![embedded("龙骨 场内运输费", 0.86)];
        let lines = indirect_lines(
            &CostCategory::Framing,
            20.0,
            1000.0,
            500.0,
            None,
            &rows,
            &SurchargePercents::default(),
        );

        // 公式模式未触发：其余三项费率为零而非按百分比计提
        assert_eq!(lines[0].amount, 0.0);
        assert_eq!(lines[1].amount, 17.2);
        assert_eq!(lines[2].amount, 0.0);
    }
}

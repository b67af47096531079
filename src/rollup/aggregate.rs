//! # 墙型汇总聚合
//!
//! 汇总管线的装配与出表两步：
//!
//! 1. [`prepare_breakdown`]：提取 → 合并 → 分拣，产出与合同
//!    系数无关的 [`WallTypeBreakdown`]。系数变更只需对同一
//!    分解重新出表，订货价侧按位不变。
//! 2. [`RollupCalculator::calculate`]：按固定行序出表——各分类
//!    构件行与小计 → 各分类四行间接费 → 间接费用小计 → 各分类
//!    尾差调整 → 千元取整 → 合计。
//!
//! ## 价格系列
//! 构件行：订货价单价取未舍入换算值，金额 = round2(单价 ×
//! 数量)；合同价单价 = round2(订货价单价 × 系数)，金额 =
//! round2(合同价单价 × 数量)。无单价×数量分解的行（间接费、
//! 调整行）合同金额 = round2(订货金额 × 系数)。千元取整只落
//! 在合同价侧，订货价侧为零。
//!
//! ## 依赖关系
//! - 调用 `rollup/` 各阶段与 `parsers/size.rs`
//! - 被 `commands/rollup.rs` 驱动

use crate::models::{
    Component, CostCategory, MaterialKind, PricePair, PriceQuad, RollupRow, RowKind,
    SurchargePercents, WallTypeGroup, WallTypeRollup,
};
use crate::parsers::size::{format_num, parse_size};
use crate::rollup::classify::classify_components;
use crate::rollup::extract::{extract_components, CategorySource, Extraction};
use crate::rollup::group::group_components;
use crate::rollup::indirect::{indirect_lines, IndirectLine};
use crate::rollup::quantity::{component_figures, sheet_quantity_totals};
use crate::rollup::reconcile::{rounding_correction, Correction};
use crate::rollup::rounding::{round2, thousand_remainder};
use crate::store::CatalogStore;

/// 合同系数缺省值（合同价 = 订货价）
pub const DEFAULT_CONTRACT_RATIO: f64 = 1.0;

// ─────────────────────────────────────────────────────────────
// 分解装配
// ─────────────────────────────────────────────────────────────

/// 单一费用分类的分解结果
#[derive(Debug)]
pub struct CategoryBreakdown {
    pub category: CostCategory,

    /// 分类面积（各构件合并面积的最大值）
    pub area: f64,

    /// 合并后的直接材料构件
    pub direct: Vec<Component>,

    /// BOM 内嵌的间接费构件（名称已带分类前缀）
    pub surcharges: Vec<Component>,

    /// 来源目录项信息（合成层分类为 None）
    pub source: Option<CategorySource>,
}

/// 墙型分解结果（与合同系数无关）
#[derive(Debug)]
pub struct WallTypeBreakdown {
    pub wall_type: String,

    /// 墙型合计面积（m²）
    pub area: f64,

    /// 墙体实例数
    pub wall_count: usize,

    /// 分类按首次出现顺序
    pub categories: Vec<CategoryBreakdown>,

    /// 板材目录项数量合计（张数共享用）
    pub sheet_totals: Vec<(String, f64)>,

    /// 合并阶段警告
    pub warnings: Vec<String>,
}

/// 装配一个墙型的分解：提取全部墙体 → 合并 → 分拣归类
pub fn prepare_breakdown(group: &WallTypeGroup, store: &dyn CatalogStore) -> WallTypeBreakdown {
    let mut extraction = Extraction::default();
    for wall in &group.walls {
        extraction.merge(extract_components(wall, store));
    }
    let Extraction { components, sources } = extraction;

    let (grouped, warnings) = group_components(components);
    let sheet_totals = sheet_quantity_totals(&grouped);
    let classified = classify_components(grouped);

    let mut categories: Vec<CategoryBreakdown> = Vec::new();
    let mut slot = |category: &CostCategory, cats: &mut Vec<CategoryBreakdown>| -> usize {
        match cats.iter().position(|c| &c.category == category) {
            Some(i) => i,
            None => {
                cats.push(CategoryBreakdown {
                    category: category.clone(),
                    area: 0.0,
                    direct: Vec::new(),
                    surcharges: Vec::new(),
                    source: sources.iter().find(|s| &s.category == category).cloned(),
                });
                cats.len() - 1
            }
        }
    };

    for component in classified.direct {
        let i = slot(&component.category, &mut categories);
        categories[i].direct.push(component);
    }
    for component in classified.indirect {
        let i = slot(&component.category, &mut categories);
        categories[i].surcharges.push(component);
    }

    for category in &mut categories {
        category.area = category
            .direct
            .iter()
            .chain(&category.surcharges)
            .map(|c| c.area)
            .fold(0.0, f64::max);
    }

    WallTypeBreakdown {
        wall_type: group.wall_type.clone(),
        area: group.total_area(),
        wall_count: group.walls.len(),
        categories,
        sheet_totals,
        warnings,
    }
}

// ─────────────────────────────────────────────────────────────
// 出表
// ─────────────────────────────────────────────────────────────

/// 汇总计算器：持有合同系数与间接费百分比
pub struct RollupCalculator {
    ratio: f64,
    percents: SurchargePercents,
}

impl RollupCalculator {
    /// 创建计算器；非法系数（非有限或 ≤0）回退为缺省值
    pub fn new(ratio: f64) -> Self {
        let ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            DEFAULT_CONTRACT_RATIO
        };
        RollupCalculator {
            ratio,
            percents: SurchargePercents::default(),
        }
    }

    /// 替换公式模式的间接费百分比
    pub fn with_percents(mut self, percents: SurchargePercents) -> Self {
        self.percents = percents;
        self
    }

    /// 生效的合同系数
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// 对一个墙型分解出表
    pub fn calculate(&self, breakdown: &WallTypeBreakdown) -> WallTypeRollup {
        let mut rows: Vec<RollupRow> = Vec::new();

        // 直接材料：分类分段 + 分类小计
        let mut direct_order = PriceQuad::default();
        let mut direct_contract = PriceQuad::default();
        let mut category_totals: Vec<PriceQuad> = Vec::new();

        for category in &breakdown.categories {
            let mut subtotal = RollupRow::summary(
                RowKind::CategorySubtotal,
                prefixed_name(&category.category, "小计"),
            );
            subtotal.category = Some(category.category.clone());

            for component in &category.direct {
                let row = self.component_row(
                    component,
                    category.source.as_ref(),
                    &breakdown.sheet_totals,
                );
                subtotal.order.accumulate(&row.order);
                subtotal.contract.accumulate(&row.contract);
                rows.push(row);
            }

            direct_order.accumulate(&subtotal.order);
            direct_contract.accumulate(&subtotal.contract);
            category_totals.push(subtotal.order);
            rows.push(subtotal);
        }

        // 间接费用：每分类四行，统一一行小计
        let mut indirect_subtotal = RollupRow::summary(RowKind::IndirectSubtotal, "间接费用小计");
        let mut indirect_rows: Vec<RollupRow> = Vec::new();
        for (category, totals) in breakdown.categories.iter().zip(&category_totals) {
            let lines = indirect_lines(
                &category.category,
                category.area,
                totals.material.amount,
                totals.labor.amount,
                category.source.as_ref().and_then(|s| s.stored_rates.as_ref()),
                &category.surcharges,
                &self.percents,
            );
            for line in &lines {
                let row = self.indirect_row(line, &category.category, category.area);
                indirect_subtotal.order.accumulate(&row.order);
                indirect_subtotal.contract.accumulate(&row.contract);
                indirect_rows.push(row);
            }
        }
        let indirect_order = indirect_subtotal.order;
        let indirect_contract = indirect_subtotal.contract;
        rows.extend(indirect_rows);
        rows.push(indirect_subtotal);

        // 尾差调整：按分类回补权威综合单价与明细合计之差
        let mut correction_order = PriceQuad::default();
        let mut correction_contract = PriceQuad::default();
        for (category, totals) in breakdown.categories.iter().zip(&category_totals) {
            let correction = category.source.as_ref().and_then(|source| {
                rounding_correction(
                    source,
                    category.area,
                    totals.material.amount,
                    totals.labor.amount,
                )
            });
            if let Some(correction) = correction {
                let row = self.correction_row(&correction);
                correction_order.accumulate(&row.order);
                correction_contract.accumulate(&row.contract);
                rows.push(row);
            }
        }

        // 千元取整：只动合同价侧
        let contract_sum =
            direct_contract.total() + indirect_contract.total() + correction_contract.total();
        let truncation = -thousand_remainder(round2(contract_sum));
        let mut truncation_row = RollupRow::summary(RowKind::RoundingCorrection, "千元取整");
        truncation_row.contract.material.amount = truncation;
        rows.push(truncation_row);

        let mut grand = RollupRow::summary(RowKind::GrandTotal, "合计");
        grand.order.accumulate(&direct_order);
        grand.order.accumulate(&indirect_order);
        grand.order.accumulate(&correction_order);
        grand.contract.accumulate(&direct_contract);
        grand.contract.accumulate(&indirect_contract);
        grand.contract.accumulate(&correction_contract);
        grand.contract.material.amount += truncation;
        rows.push(grand);

        WallTypeRollup {
            wall_type: breakdown.wall_type.clone(),
            area: breakdown.area,
            wall_count: breakdown.wall_count,
            rows,
            warnings: breakdown.warnings.clone(),
        }
    }

    /// 构件行：两价系按单价×数量分解
    fn component_row(
        &self,
        component: &Component,
        source: Option<&CategorySource>,
        sheet_totals: &[(String, f64)],
    ) -> RollupRow {
        let figures = component_figures(component, sheet_totals);
        let (order_material, contract_material) =
            self.price_pair(figures.material_rate, figures.quantity);
        let (order_labor, contract_labor) = self.price_pair(figures.labor_rate, figures.quantity);

        RollupRow {
            kind: RowKind::Component,
            name: component.name.clone(),
            spec: display_spec(component, source),
            unit: component.unit.clone(),
            quantity: Some(figures.quantity),
            count: figures.count,
            order: PriceQuad {
                material: order_material,
                labor: order_labor,
            },
            contract: PriceQuad {
                material: contract_material,
                labor: contract_labor,
            },
            category: Some(component.category.clone()),
            not_found: component.not_found,
        }
    }

    /// 间接费行：工具费计人工侧，其余计材料侧
    fn indirect_row(&self, line: &IndirectLine, category: &CostCategory, area: f64) -> RollupRow {
        let order = PricePair {
            unit_price: line.rate,
            amount: line.amount,
        };
        let contract = PricePair {
            unit_price: round2(line.rate * self.ratio),
            amount: round2(line.amount * self.ratio),
        };

        let mut row = RollupRow::summary(RowKind::IndirectLine, line.name.clone());
        row.spec = line.spec.clone();
        row.unit = "m²".to_string();
        row.quantity = Some(area);
        row.category = Some(category.clone());
        if line.labor_side() {
            row.order.labor = order;
            row.contract.labor = contract;
        } else {
            row.order.material = order;
            row.contract.material = contract;
        }
        row
    }

    /// 尾差调整行：合同侧从订货侧按系数派生，不独立重算
    fn correction_row(&self, correction: &Correction) -> RollupRow {
        let mut row = RollupRow::summary(RowKind::RoundingCorrection, correction.name.clone());
        row.category = Some(correction.category.clone());
        row.order.material.amount = correction.material_amount;
        row.order.labor.amount = correction.labor_amount;
        row.contract.material.amount = round2(correction.material_amount * self.ratio);
        row.contract.labor.amount = round2(correction.labor_amount * self.ratio);
        row
    }

    /// 单价对：订货价保留未舍入单价，合同价两步派生
    fn price_pair(&self, rate: f64, quantity: f64) -> (PricePair, PricePair) {
        let order = PricePair {
            unit_price: rate,
            amount: round2(rate * quantity),
        };
        let contract_unit = round2(rate * self.ratio);
        let contract = PricePair {
            unit_price: contract_unit,
            amount: round2(contract_unit * quantity),
        };
        (order, contract)
    }
}

/// 构件规格显示：龙骨用目录规格串+间距，板材用厚度
fn display_spec(component: &Component, source: Option<&CategorySource>) -> String {
    match component.kind {
        MaterialKind::Stud | MaterialKind::Runner => source
            .and_then(|s| {
                parse_size(&s.size).ok().map(|mut spec| {
                    if spec.spacing.is_none() {
                        spec.spacing = s.spacing;
                    }
                    spec.display()
                })
            })
            .unwrap_or_else(|| component.spec.clone()),
        MaterialKind::Board => component
            .dimensions
            .map(|d| format!("{}mm", format_num(d.thickness_mm)))
            .unwrap_or_else(|| component.spec.clone()),
        _ => component.spec.clone(),
    }
}

/// "{分类标签} {名称}"，默认分组不加前缀
fn prefixed_name(category: &CostCategory, name: &str) -> String {
    let label = category.label();
    if label.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", label, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CatalogFile, CatalogItem, LayerMaterial, MaterialRecord, SubMaterial, WallCalculationResult,
    };
    use crate::store::InMemoryCatalog;

    fn sample_store() -> InMemoryCatalog {
        let mut framing = CatalogItem::new("F1", "龙骨测试");
        framing.size = "75×45×0.6".to_string();
        framing.spacing = Some(400.0);
        framing.sub_materials = vec![SubMaterial {
            per_unit_quantity: 1.5,
            material_unit_price: 10.0,
            labor_amount: 4.0,
            ..SubMaterial::new("竖龙骨", "C75×45×0.6", "根")
        }];

        let mut board = CatalogItem::new("B1", "石膏板测试");
        board.sub_materials = vec![SubMaterial {
            per_unit_quantity: 1.0,
            material_unit_price: 9.5,
            labor_amount: 6.5,
            material_id: Some("B1-STD".to_string()),
            ..SubMaterial::new("纸面石膏板", "12mm", "m²")
        }];

        InMemoryCatalog::from_file(CatalogFile {
            items: vec![framing, board],
            materials: vec![MaterialRecord {
                id: "B1-STD".to_string(),
                name: "纸面石膏板".to_string(),
                width_mm: 1500.0,
                height_mm: 2000.0,
                thickness_mm: 12.0,
            }],
        })
    }

    fn catalog_layer(name: &str) -> (String, LayerMaterial) {
        (
            name.to_string(),
            LayerMaterial {
                name: name.to_string(),
                spec: String::new(),
                unit: "m²".to_string(),
                material_unit_price: 0.0,
                labor_amount: 0.0,
                per_unit_quantity: 1.0,
                not_found: false,
            },
        )
    }

    fn wall(area: f64, layers: Vec<(String, LayerMaterial)>) -> WallCalculationResult {
        WallCalculationResult {
            wall_name: "测试墙".to_string(),
            wall_type: "W1".to_string(),
            area,
            layers,
        }
    }

    fn sample_group() -> WallTypeGroup {
        let layers = || {
            vec![
                catalog_layer("@龙骨测试"),
                catalog_layer("@石膏板测试"),
            ]
        };
        WallTypeGroup {
            wall_type: "W1".to_string(),
            walls: vec![wall(10.0, layers()), wall(10.0, layers())],
        }
    }

    fn synthetic_group(price: f64, area: f64) -> WallTypeGroup {
        let layer = (
            "面层".to_string(),
            LayerMaterial {
                name: "高价材料".to_string(),
                spec: String::new(),
                unit: "m²".to_string(),
                material_unit_price: price,
                labor_amount: 0.0,
                per_unit_quantity: 1.0,
                not_found: false,
            },
        );
        WallTypeGroup {
            wall_type: "W2".to_string(),
            walls: vec![wall(area, vec![layer])],
        }
    }

    fn find<'a>(rollup: &'a WallTypeRollup, name: &str) -> &'a RollupRow {
        rollup.rows.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn test_breakdown_groups_two_walls() {
        let store = sample_store();
        let breakdown = prepare_breakdown(&sample_group(), &store);

        assert_eq!(breakdown.wall_count, 2);
        assert_eq!(breakdown.area, 20.0);
        assert_eq!(breakdown.categories.len(), 2);
        assert_eq!(breakdown.categories[0].category, CostCategory::Framing);
        assert_eq!(breakdown.categories[0].area, 20.0);
        assert_eq!(breakdown.sheet_totals, vec![("B1".to_string(), 20.0)]);
    }

    #[test]
    fn test_stud_and_board_counts() {
        let store = sample_store();
        let breakdown = prepare_breakdown(&sample_group(), &store);
        let rollup = RollupCalculator::new(1.0).calculate(&breakdown);

        // 含量 1.5 × 面积 20 = 30 根
        let stud = find(&rollup, "竖龙骨");
        assert_eq!(stud.quantity, Some(20.0));
        assert_eq!(stud.count, Some(30.0));
        assert_eq!(stud.spec, "75×45×0.6 @400");

        // 换算系数 3.0，20 ÷ 3 → 7 张
        let board = find(&rollup, "纸面石膏板");
        assert_eq!(board.quantity, Some(20.0));
        assert_eq!(board.count, Some(7.0));
        assert_eq!(board.spec, "12mm");
    }

    #[test]
    fn test_row_order() {
        let store = sample_store();
        let breakdown = prepare_breakdown(&synthetic_group(100.0, 10.0), &store);
        let rollup = RollupCalculator::new(1.0).calculate(&breakdown);

        let kinds: Vec<RowKind> = rollup.rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RowKind::Component,
                RowKind::CategorySubtotal,
                RowKind::IndirectLine,
                RowKind::IndirectLine,
                RowKind::IndirectLine,
                RowKind::IndirectLine,
                RowKind::IndirectSubtotal,
                RowKind::RoundingCorrection,
                RowKind::GrandTotal,
            ]
        );
        // 合成层无综合单价：唯一的调整行是千元取整
        assert_eq!(rollup.rows[7].name, "千元取整");
    }

    #[test]
    fn test_contract_series_two_step() {
        let store = sample_store();
        let breakdown = prepare_breakdown(&synthetic_group(1000.0, 5.5), &store);
        let rollup = RollupCalculator::new(1.2).calculate(&breakdown);

        let row = find(&rollup, "高价材料");
        assert_eq!(row.order.material.unit_price, 1000.0);
        assert_eq!(row.order.material.amount, 5500.0);
        assert_eq!(row.contract.material.unit_price, 1200.0);
        assert_eq!(row.contract.material.amount, 6600.0);
    }

    #[test]
    fn test_correction_row_and_ratio_derivation() {
        let store = {
            let mut framing = CatalogItem::new("F2", "龙骨调整测试");
            framing.material_rate = Some(500.0);
            framing.labor_rate = Some(0.0);
            framing.sub_materials = vec![SubMaterial {
                per_unit_quantity: 1.0,
                material_unit_price: 499.9,
                ..SubMaterial::new("竖龙骨", "C75", "根")
            }];
            InMemoryCatalog::from_file(CatalogFile {
                items: vec![framing],
                materials: Vec::new(),
            })
        };
        let group = WallTypeGroup {
            wall_type: "W3".to_string(),
            walls: vec![wall(20.0, vec![catalog_layer("@龙骨调整测试")])],
        };
        let breakdown = prepare_breakdown(&group, &store);
        let rollup = RollupCalculator::new(1.2).calculate(&breakdown);

        // 权威 10000，明细 9998 → 调整 2；合同侧 2 × 1.2
        let correction = find(&rollup, "龙骨 尾差调整");
        assert_eq!(correction.order.material.amount, 2.0);
        assert_eq!(correction.contract.material.amount, 2.4);

        // 明细 + 调整按位等于权威金额
        let displayed: f64 = rollup
            .rows
            .iter()
            .filter(|r| r.kind == RowKind::Component)
            .map(|r| r.order.material.amount)
            .sum();
        assert_eq!(displayed + correction.order.material.amount, 10000.0);
    }

    #[test]
    fn test_thousand_truncation() {
        let store = sample_store();
        let breakdown = prepare_breakdown(&synthetic_group(1234.567, 1000.0), &store);
        let calculator = RollupCalculator::new(1.0).with_percents(SurchargePercents {
            loss: 0.0,
            transport: 0.0,
            profit: 0.0,
            tool: 0.0,
        });
        let rollup = calculator.calculate(&breakdown);

        // 合同单价先舍入为 1234.57，合同金额 1234570 → 取整 -570；
        // 订货价侧保留未舍入单价，金额 1234567 不受取整影响
        let truncation = find(&rollup, "千元取整");
        assert_eq!(truncation.contract.material.amount, -570.0);
        assert_eq!(truncation.order.material.amount, 0.0);
        assert_eq!(rollup.order_total(), 1_234_567.0);
        assert_eq!(rollup.contract_total(), 1_234_000.0);
    }

    #[test]
    fn test_ratio_reapplication_keeps_order_side() {
        let store = sample_store();
        let breakdown = prepare_breakdown(&sample_group(), &store);

        let base = RollupCalculator::new(1.0).calculate(&breakdown);
        let scaled = RollupCalculator::new(1.3).calculate(&breakdown);

        assert_eq!(base.rows.len(), scaled.rows.len());
        for (a, b) in base.rows.iter().zip(&scaled.rows) {
            assert_eq!(a.order.material.amount, b.order.material.amount);
            assert_eq!(a.order.labor.amount, b.order.labor.amount);
            assert_eq!(a.order.material.unit_price, b.order.material.unit_price);
        }
    }

    #[test]
    fn test_invalid_ratio_falls_back() {
        assert_eq!(RollupCalculator::new(0.0).ratio(), DEFAULT_CONTRACT_RATIO);
        assert_eq!(RollupCalculator::new(-1.5).ratio(), DEFAULT_CONTRACT_RATIO);
        assert_eq!(RollupCalculator::new(f64::NAN).ratio(), DEFAULT_CONTRACT_RATIO);
        assert_eq!(RollupCalculator::new(1.15).ratio(), 1.15);
    }
}

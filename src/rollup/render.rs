//! # 汇总表终端渲染
//!
//! 把行流格式化为 `tabled` 表格行。只做格式化，不重算任何
//! 金额：
//!
//! - 单价列取整显示（计算始终用未舍入值）
//! - 金额列保留两位小数
//! - 件数整数显示，已带小数的（焊条）保留两位
//! - 汇总性行留白单价、数量与件数列
//! - 缺价构件在备注列标记
//!
//! 显示合同价系列，另附一列订货价合价对照。
//!
//! ## 依赖关系
//! - 消费 `models/row.rs` 的行流
//! - 被 `commands/rollup.rs` 与 `commands/check.rs` 打印

use tabled::Tabled;

use crate::models::{RollupRow, RowKind, WallTypeRollup};

/// 终端表格行（全列预格式化）
#[derive(Debug, Clone, Tabled)]
pub struct RollupTableRow {
    #[tabled(rename = "名称")]
    pub name: String,
    #[tabled(rename = "规格")]
    pub spec: String,
    #[tabled(rename = "单位")]
    pub unit: String,
    #[tabled(rename = "数量")]
    pub quantity: String,
    #[tabled(rename = "件数")]
    pub count: String,
    #[tabled(rename = "材料单价")]
    pub material_unit: String,
    #[tabled(rename = "人工单价")]
    pub labor_unit: String,
    #[tabled(rename = "材料金额")]
    pub material_amount: String,
    #[tabled(rename = "人工金额")]
    pub labor_amount: String,
    #[tabled(rename = "合同合价")]
    pub contract_total: String,
    #[tabled(rename = "订货合价")]
    pub order_total: String,
    #[tabled(rename = "备注")]
    pub remark: String,
}

/// 格式化一个墙型的全部表格行
pub fn table_rows(rollup: &WallTypeRollup) -> Vec<RollupTableRow> {
    rollup.rows.iter().map(table_row).collect()
}

fn table_row(row: &RollupRow) -> RollupTableRow {
    let with_units = row.kind.shows_unit_columns();

    // 千元取整只动合同价侧，订货合价留白
    let order_total = if row.kind == RowKind::RoundingCorrection && row.category.is_none() {
        String::new()
    } else {
        format_amount(row.order.total())
    };

    RollupTableRow {
        name: row.name.clone(),
        spec: row.spec.clone(),
        unit: if with_units { row.unit.clone() } else { String::new() },
        quantity: if with_units {
            row.quantity.map(format_amount).unwrap_or_default()
        } else {
            String::new()
        },
        count: if with_units {
            row.count.map(format_count).unwrap_or_default()
        } else {
            String::new()
        },
        material_unit: if with_units {
            format_unit_price(row.contract.material.unit_price)
        } else {
            String::new()
        },
        labor_unit: if with_units {
            format_unit_price(row.contract.labor.unit_price)
        } else {
            String::new()
        },
        material_amount: format_amount(row.contract.material.amount),
        labor_amount: format_amount(row.contract.labor.amount),
        contract_total: format_amount(row.contract.total()),
        order_total,
        remark: if row.not_found { "缺价".to_string() } else { String::new() },
    }
}

/// 单价取整显示，零值留白
fn format_unit_price(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{:.0}", value)
    }
}

fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// 件数：整数不带小数点，焊条类保留两位
fn format_count(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

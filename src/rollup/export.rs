//! # 汇总结果 CSV 导出
//!
//! 把全部墙型的行流平铺为一张 CSV：每行带墙型与行种类列，
//! 两价系的单价与金额全量导出。只格式化，不重算。
//!
//! ## 依赖关系
//! - 消费 `models/row.rs` 的行流
//! - 被 `commands/rollup.rs` 调用
//! - 使用 `csv` 写出

use std::path::Path;

use crate::error::{QiangsuanError, Result};
use crate::models::{RowKind, WallTypeRollup};

/// 导出全部墙型到一个 CSV 文件
pub fn export_csv(rollups: &[WallTypeRollup], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| QiangsuanError::CsvError(e))?;

    write_rows(rollups, &mut wtr)?;

    wtr.flush().map_err(|e| QiangsuanError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

fn write_rows<W: std::io::Write>(
    rollups: &[WallTypeRollup],
    wtr: &mut csv::Writer<W>,
) -> Result<()> {
    wtr.write_record(&[
        "wall_type",
        "row_kind",
        "name",
        "spec",
        "unit",
        "quantity",
        "count",
        "order_material_unit",
        "order_material_amount",
        "order_labor_unit",
        "order_labor_amount",
        "order_total",
        "contract_material_unit",
        "contract_material_amount",
        "contract_labor_unit",
        "contract_labor_amount",
        "contract_total",
        "remark",
    ])
    .map_err(|e| QiangsuanError::CsvError(e))?;

    for rollup in rollups {
        for row in &rollup.rows {
            wtr.write_record(&[
                rollup.wall_type.clone(),
                kind_label(row.kind).to_string(),
                row.name.clone(),
                row.spec.clone(),
                row.unit.clone(),
                row.quantity.map(|q| format!("{:.2}", q)).unwrap_or_default(),
                row.count.map(|c| c.to_string()).unwrap_or_default(),
                format!("{:.2}", row.order.material.unit_price),
                format!("{:.2}", row.order.material.amount),
                format!("{:.2}", row.order.labor.unit_price),
                format!("{:.2}", row.order.labor.amount),
                format!("{:.2}", row.order.total()),
                format!("{:.2}", row.contract.material.unit_price),
                format!("{:.2}", row.contract.material.amount),
                format!("{:.2}", row.contract.labor.unit_price),
                format!("{:.2}", row.contract.labor.amount),
                format!("{:.2}", row.contract.total()),
                if row.not_found { "缺价".to_string() } else { String::new() },
            ])
            .map_err(|e| QiangsuanError::CsvError(e))?;
        }
    }

    Ok(())
}

fn kind_label(kind: RowKind) -> &'static str {
    match kind {
        RowKind::Component => "component",
        RowKind::CategorySubtotal => "category_subtotal",
        RowKind::IndirectLine => "indirect",
        RowKind::IndirectSubtotal => "indirect_subtotal",
        RowKind::RoundingCorrection => "rounding",
        RowKind::GrandTotal => "grand_total",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RollupRow;

    fn sample_rollup(wall_type: &str) -> WallTypeRollup {
        let mut component = RollupRow::summary(RowKind::Component, "竖龙骨");
        component.unit = "根".to_string();
        component.quantity = Some(20.0);
        component.count = Some(30.0);
        component.order.material.unit_price = 15.0;
        component.order.material.amount = 300.0;
        component.contract.material.unit_price = 18.0;
        component.contract.material.amount = 360.0;

        let mut total = RollupRow::summary(RowKind::GrandTotal, "合计");
        total.order.material.amount = 300.0;
        total.contract.material.amount = 360.0;

        WallTypeRollup {
            wall_type: wall_type.to_string(),
            area: 20.0,
            wall_count: 2,
            rows: vec![component, total],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_csv_layout() {
        let rollups = vec![sample_rollup("W1"), sample_rollup("W2")];
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&rollups, &mut wtr).unwrap();

        let bytes = wtr.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // 表头 + 每墙型两行
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("wall_type,row_kind,name"));
        assert!(lines[1].starts_with("W1,component,竖龙骨"));
        assert!(lines[1].contains("20.00"));
        assert!(lines[1].contains("360.00"));
        assert!(lines[2].starts_with("W1,grand_total,合计"));
        assert!(lines[3].starts_with("W2,component"));
    }

    #[test]
    fn test_blank_cells_for_missing_figures() {
        let rollups = vec![sample_rollup("W1")];
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&rollups, &mut wtr).unwrap();

        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let total_line = text.lines().nth(2).unwrap();

        // 合计行无数量与件数
        assert!(total_line.contains(",合计,,,,,"));
    }
}

//! # catalog 子命令实现
//!
//! 浏览材料目录：列出全部目录项，或展示单个目录项的
//! 子材料清单与存储间接费率。
//!
//! ## 依赖关系
//! - 使用 `cli/catalog.rs` 定义的 CatalogArgs
//! - 使用 `parsers/catalog.rs` 与 `store/`

use crate::cli::catalog::CatalogArgs;
use crate::error::{QiangsuanError, Result};
use crate::models::{CatalogItem, SubMaterial, SurchargeKind};
use crate::parsers::parse_catalog_file;
use crate::store::{lookup_name, CatalogStore, InMemoryCatalog};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 目录清单行
#[derive(Debug, Clone, Tabled)]
struct ItemRow {
    #[tabled(rename = "编号")]
    id: String,
    #[tabled(rename = "名称")]
    name: String,
    #[tabled(rename = "规格尺寸")]
    size: String,
    #[tabled(rename = "间距(mm)")]
    spacing: String,
    #[tabled(rename = "材料单价")]
    material_rate: String,
    #[tabled(rename = "人工单价")]
    labor_rate: String,
    #[tabled(rename = "子材料")]
    sub_count: usize,
}

/// 子材料清单行
#[derive(Debug, Clone, Tabled)]
struct SubRow {
    #[tabled(rename = "名称")]
    name: String,
    #[tabled(rename = "规格型号")]
    spec: String,
    #[tabled(rename = "单位")]
    unit: String,
    #[tabled(rename = "每m²用量")]
    per_unit_quantity: String,
    #[tabled(rename = "材料单价")]
    material_unit_price: String,
    #[tabled(rename = "人工费")]
    labor_amount: String,
    #[tabled(rename = "尺寸表")]
    material_id: String,
}

/// 执行目录浏览
pub fn execute(args: CatalogArgs) -> Result<()> {
    output::print_header("Material Catalog");

    let catalog = parse_catalog_file(&args.catalog)?;
    let store = InMemoryCatalog::from_file(catalog);

    match &args.item {
        Some(name) => show_item(&store, name),
        None => {
            list_items(&store);
            Ok(())
        }
    }
}

/// 列出全部目录项
fn list_items(store: &InMemoryCatalog) {
    output::print_info(&format!("{} catalog items", store.len()));

    let rows: Vec<ItemRow> = store.items().iter().map(item_row).collect();
    let table = Table::new(&rows);
    println!("{}", table);
}

/// 展示单个目录项明细
fn show_item(store: &InMemoryCatalog, name: &str) -> Result<()> {
    let item = store
        .find_item(lookup_name(name))
        .ok_or_else(|| QiangsuanError::ItemNotFound {
            name: name.to_string(),
        })?;

    output::print_kv("编号", &item.id);
    output::print_kv("名称", &item.name);
    if !item.size.is_empty() {
        output::print_kv("规格尺寸", &item.size);
    }
    if let Some(spacing) = item.spacing {
        output::print_kv("龙骨间距", &format!("{} mm", spacing));
    }
    if let Some((material, labor)) = item.composite_rates() {
        output::print_kv("综合材料单价", &format!("{:.2} 元/m²", material));
        output::print_kv("综合人工单价", &format!("{:.2} 元/m²", labor));
    }

    if let Some(rates) = &item.indirect_rates {
        println!();
        output::print_info("存储间接费率（元/m²）");
        for kind in SurchargeKind::ALL {
            output::print_kv(kind.label(), &format!("{:.2}", rates.rate_for(kind)));
        }
    }

    if item.sub_materials.is_empty() {
        output::print_warning("No sub-material breakdown for this item");
    } else {
        println!();
        output::print_info(&format!("{} sub-materials", item.sub_materials.len()));
        let rows: Vec<SubRow> = item.sub_materials.iter().map(sub_row).collect();
        println!("{}", Table::new(&rows));
    }

    Ok(())
}

fn item_row(item: &CatalogItem) -> ItemRow {
    ItemRow {
        id: item.id.clone(),
        name: item.name.clone(),
        size: item.size.clone(),
        spacing: item.spacing.map(|s| format!("{}", s)).unwrap_or_default(),
        material_rate: format_rate(item.material_rate),
        labor_rate: format_rate(item.labor_rate),
        sub_count: item.sub_materials.len(),
    }
}

fn sub_row(sub: &SubMaterial) -> SubRow {
    SubRow {
        name: sub.name.clone(),
        spec: sub.spec.clone(),
        unit: sub.unit.clone(),
        per_unit_quantity: format!("{}", sub.per_unit_quantity),
        material_unit_price: format!("{:.2}", sub.material_unit_price),
        labor_amount: format!("{:.2}", sub.labor_amount),
        material_id: sub.material_id.clone().unwrap_or_default(),
    }
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(value) => format!("{:.2}", value),
        None => String::new(),
    }
}

//! # check 子命令实现
//!
//! 项目与目录交叉检查：逐墙型列出构造层的目录命中情况，
//! 汇总缺价材料与未定义墙型。缺价不视为错误（汇总时记缺价
//! 标记继续算），未定义墙型会让汇总中断，按错误返回。
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的 CheckArgs
//! - 使用 `parsers/` 与 `store/`

use crate::cli::check::CheckArgs;
use crate::error::{QiangsuanError, Result};
use crate::parsers::{parse_catalog_file, parse_project_file};
use crate::store::{lookup_name, CatalogStore, InMemoryCatalog};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 构造层检查行
#[derive(Debug, Clone, Tabled)]
struct CheckRow {
    #[tabled(rename = "墙型")]
    wall_type: String,
    #[tabled(rename = "构造层")]
    layer: String,
    #[tabled(rename = "材料名称")]
    material: String,
    #[tabled(rename = "状态")]
    status: String,
}

/// 执行交叉检查
pub fn execute(args: CheckArgs) -> Result<()> {
    output::print_header("Project / Catalog Cross Check");

    let catalog = parse_catalog_file(&args.catalog)?;
    let store = InMemoryCatalog::from_file(catalog);
    output::print_info(&format!("Catalog loaded: {} items", store.len()));

    let project = parse_project_file(&args.input)?;
    output::print_info(&format!(
        "Project '{}': {} wall types, {} wall instances",
        project.site,
        project.wall_types.len(),
        project.walls.len()
    ));

    let mut rows: Vec<CheckRow> = Vec::new();
    let mut missing: Vec<String> = Vec::new();
    let mut hit = 0usize;
    let mut total = 0usize;

    for (wall_type, layers) in &project.wall_types {
        for (layer_key, material) in layers {
            if material.trim().is_empty() {
                continue;
            }
            total += 1;

            let (status, found) = layer_status(&store, material);
            if found {
                hit += 1;
            } else if !missing.contains(material) {
                missing.push(material.clone());
            }

            rows.push(CheckRow {
                wall_type: wall_type.clone(),
                layer: layer_key.clone(),
                material: material.clone(),
                status,
            });
        }
    }

    println!("{}", Table::new(&rows));

    // 墙体实例引用的墙型必须有定义
    let mut undefined: Vec<String> = Vec::new();
    for wall in &project.walls {
        if !project.wall_types.contains_key(&wall.wall_type)
            && !undefined.contains(&wall.wall_type)
        {
            undefined.push(wall.wall_type.clone());
        }
    }

    output::print_separator();
    output::print_kv("构造层总数", &format!("{}", total));
    output::print_kv("目录命中", &format!("{}", hit));
    output::print_kv("缺价材料", &format!("{}", missing.len()));

    for name in &missing {
        output::print_warning(&format!("缺价: {}", name));
    }
    for name in &undefined {
        output::print_error(&format!("墙型未定义: {}", name));
    }

    if let Some(name) = undefined.first() {
        return Err(QiangsuanError::WallTypeNotFound { name: name.clone() });
    }

    if missing.is_empty() {
        output::print_success("All layers priced from catalog");
    }

    Ok(())
}

/// 单个构造层的命中状态
fn layer_status(store: &dyn CatalogStore, material: &str) -> (String, bool) {
    match store.find_item(lookup_name(material)) {
        Some(item) if !item.sub_materials.is_empty() => (
            format!("命中（{} 子材料）", item.sub_materials.len()),
            true,
        ),
        Some(_) => ("命中（无子材料清单）".to_string(), true),
        None => ("缺价".to_string(), false),
    }
}

//! # rollup 子命令实现
//!
//! 项目文件 → 分墙型造价行流的完整流程。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 墙型间并行计算（rayon）
//! - 终端表格输出与 CSV 导出
//! - 合同系数与间接费百分比的命令行覆盖
//!
//! ## 依赖关系
//! - 使用 `cli/rollup.rs` 定义的 RollupArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `store/` 解析构造层、`rollup/` 计算行流

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::rollup::{parse_contract_ratio, RollupArgs};
use crate::error::{QiangsuanError, Result};
use crate::models::{Project, SurchargePercents, WallTypeGroup, WallTypeRollup};
use crate::parsers::{parse_catalog_file, parse_project_file};
use crate::rollup::{
    export_csv, prepare_breakdown, table_rows, RollupCalculator, DEFAULT_CONTRACT_RATIO,
};
use crate::store::{resolve_project, CatalogStore, InMemoryCatalog};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tabled::Table;

/// 执行成本汇总
pub fn execute(args: RollupArgs) -> Result<()> {
    output::print_header("Wall Material Cost Rollup");

    // 目录只加载一次，单文件与批量模式共用
    let spinner = progress::create_spinner(&format!(
        "Loading catalog '{}'",
        args.catalog.display()
    ));
    let catalog = parse_catalog_file(&args.catalog);
    spinner.finish_and_clear();
    let store = InMemoryCatalog::from_file(catalog?);

    if store.is_empty() {
        output::print_warning("Catalog contains no items; every layer will be priced as missing");
    } else {
        output::print_info(&format!("Catalog loaded: {} items", store.len()));
    }

    // 合同系数覆盖提前解析一次
    let ratio_override = match &args.ratio {
        Some(raw) => Some(parse_contract_ratio(raw).map_err(QiangsuanError::InvalidArgument)?),
        None => None,
    };

    // 检测输入类型
    if args.input.is_file() {
        execute_single_file(&args, &store, ratio_override)
    } else if args.input.is_dir() {
        execute_batch(&args, store, ratio_override)
    } else {
        Err(QiangsuanError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(
    args: &RollupArgs,
    store: &InMemoryCatalog,
    ratio_override: Option<f64>,
) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let project = parse_project_file(&args.input)?;
    let ratio = effective_ratio(ratio_override, &project);
    let percents = PercentOverrides::from_args(args)
        .apply(project.surcharge_percents.unwrap_or_default());

    output::print_info(&format!(
        "Project '{}': {} wall types, {} wall instances, contract ratio {:.4}",
        project.site,
        project.wall_types.len(),
        project.walls.len(),
        ratio
    ));

    let result = rollup_project(&project, store, ratio, percents)?;
    print_report(&result);

    if let Some(path) = &args.output_csv {
        export_csv(&result.rollups, path)?;
        output::print_success(&format!("Row stream exported to '{}'", path.display()));
    }

    Ok(())
}

/// 批量处理模式
fn execute_batch(
    args: &RollupArgs,
    store: InMemoryCatalog,
    ratio_override: Option<f64>,
) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    // 收集项目文件
    let collector = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive);

    let files = collector.collect();

    if files.is_empty() {
        return Err(QiangsuanError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    output::print_info(&format!("Found {} project files", files.len()));

    // 批量模式下 --output-csv 作为导出目录使用
    if let Some(dir) = &args.output_csv {
        fs::create_dir_all(dir).map_err(|e| QiangsuanError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
        output::print_info(&format!("CSV exports go to '{}'", dir.display()));
    }

    // 创建共享配置
    let config = Arc::new(BatchRollupConfig {
        store,
        ratio_override,
        overrides: PercentOverrides::from_args(args),
        csv_dir: args.output_csv.clone(),
        catalog_path: fs::canonicalize(&args.catalog).ok(),
    });

    // 并行处理
    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| process_batch_file(file, &config));

    // 打印统计
    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    for summary in &result.summaries {
        output::print_info(summary);
    }

    for skip in &result.skips {
        output::print_skip(skip);
    }

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// 参数融合
// ─────────────────────────────────────────────────────────────────

/// 合同系数优先级：命令行覆盖 > 项目文件 > 默认 1.0
///
/// 项目文件中的非法系数（非正数）按缺省处理。
fn effective_ratio(override_ratio: Option<f64>, project: &Project) -> f64 {
    if let Some(ratio) = override_ratio {
        return ratio;
    }
    match project.contract_ratio {
        Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
        _ => DEFAULT_CONTRACT_RATIO,
    }
}

/// 命令行的间接费百分比单项覆盖
#[derive(Debug, Clone, Copy, Default)]
struct PercentOverrides {
    loss: Option<f64>,
    transport: Option<f64>,
    profit: Option<f64>,
    tool: Option<f64>,
}

impl PercentOverrides {
    fn from_args(args: &RollupArgs) -> Self {
        PercentOverrides {
            loss: args.loss_percent,
            transport: args.transport_percent,
            profit: args.profit_percent,
            tool: args.tool_percent,
        }
    }

    /// 项目文件百分比打底，命令行单项覆盖
    fn apply(&self, mut base: SurchargePercents) -> SurchargePercents {
        if let Some(value) = self.loss {
            base.loss = value;
        }
        if let Some(value) = self.transport {
            base.transport = value;
        }
        if let Some(value) = self.profit {
            base.profit = value;
        }
        if let Some(value) = self.tool {
            base.tool = value;
        }
        base
    }
}

// ─────────────────────────────────────────────────────────────────
// 项目汇总
// ─────────────────────────────────────────────────────────────────

/// 整个项目的汇总结果
struct ProjectRollup {
    site: String,
    ratio: f64,
    rollups: Vec<WallTypeRollup>,
}

impl ProjectRollup {
    /// 全部墙型合同合价之和
    fn contract_total(&self) -> f64 {
        self.rollups.iter().map(|r| r.contract_total()).sum()
    }

    /// 全部墙型订货合价之和
    fn order_total(&self) -> f64 {
        self.rollups.iter().map(|r| r.order_total()).sum()
    }
}

/// 汇总整个项目：构造层解析 → 墙型分组 → 并行计算行流
fn rollup_project(
    project: &Project,
    store: &dyn CatalogStore,
    ratio: f64,
    percents: SurchargePercents,
) -> Result<ProjectRollup> {
    let results = resolve_project(project, store)?;
    let groups = WallTypeGroup::group(results);

    let calculator = RollupCalculator::new(ratio).with_percents(percents);

    // 墙型之间相互独立，按墙型并行；collect 保持首现顺序
    let rollups: Vec<WallTypeRollup> = groups
        .par_iter()
        .map(|group| calculator.calculate(&prepare_breakdown(group, store)))
        .collect();

    Ok(ProjectRollup {
        site: project.site.clone(),
        ratio: calculator.ratio(),
        rollups,
    })
}

/// 打印分墙型表格与项目摘要
fn print_report(result: &ProjectRollup) {
    for rollup in &result.rollups {
        println!();
        output::print_info(&format!(
            "墙型 {}  |  {} 面墙  |  合计面积 {:.2} m²",
            rollup.wall_type, rollup.wall_count, rollup.area
        ));

        let table = Table::new(table_rows(rollup));
        println!("{}", table);

        for warning in &rollup.warnings {
            output::print_warning(warning);
        }
    }

    output::print_separator();
    output::print_kv("工程", &result.site);
    output::print_kv("合同系数", &format!("{:.4}", result.ratio));
    for rollup in &result.rollups {
        output::print_kv(
            &format!("{} 合同合价", rollup.wall_type),
            &format!("{:.2} 元", rollup.contract_total()),
        );
    }
    output::print_kv("订货合价合计", &format!("{:.2} 元", result.order_total()));
    output::print_kv("合同合价合计", &format!("{:.2} 元", result.contract_total()));
}

// ─────────────────────────────────────────────────────────────────
// 批量处理
// ─────────────────────────────────────────────────────────────────

/// 批量处理配置
struct BatchRollupConfig {
    store: InMemoryCatalog,
    ratio_override: Option<f64>,
    overrides: PercentOverrides,
    csv_dir: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
}

/// 处理批量模式中的单个文件
fn process_batch_file(input: &PathBuf, config: &Arc<BatchRollupConfig>) -> ProcessResult {
    // 目录文件常与项目文件放在同一目录下，跳过
    if let (Some(catalog), Ok(canonical)) = (&config.catalog_path, fs::canonicalize(input)) {
        if *catalog == canonical {
            return ProcessResult::Skipped(format!("Catalog file: {}", input.display()));
        }
    }

    let project = match parse_project_file(input) {
        Ok(project) => project,
        Err(err) => {
            // 能按目录文件解析的 JSON 按跳过处理，不计失败
            if parse_catalog_file(input).is_ok() {
                return ProcessResult::Skipped(format!("Catalog file: {}", input.display()));
            }
            return ProcessResult::Failed(input.display().to_string(), err.to_string());
        }
    };

    let ratio = effective_ratio(config.ratio_override, &project);
    let percents = config
        .overrides
        .apply(project.surcharge_percents.unwrap_or_default());

    let result = match rollup_project(&project, &config.store, ratio, percents) {
        Ok(result) => result,
        Err(err) => return ProcessResult::Failed(input.display().to_string(), err.to_string()),
    };

    if let Some(dir) = &config.csv_dir {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("rollup");
        let target = dir.join(format!("{}_rollup.csv", stem));
        if let Err(err) = export_csv(&result.rollups, &target) {
            return ProcessResult::Failed(input.display().to_string(), err.to_string());
        }
    }

    let label = if result.site.is_empty() {
        input.display().to_string()
    } else {
        result.site.clone()
    };

    ProcessResult::Success(format!(
        "{}: {} 墙型, 合同合价 {:.2} 元",
        label,
        result.rollups.len(),
        result.contract_total()
    ))
}

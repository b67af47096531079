//! # 构件提取
//!
//! 汇总管线第一阶段：把每面墙的构造层按目录 BOM 分解为原子
//! 构件。目录命中且有子材料清单时逐条展开；未命中或清单为空
//! 时回退为单一合成构件（兼容未入目录的材料）。
//!
//! ## 展开规则
//! - 直接材料只保留可列示种类（龙骨、板材、保温、焊条），
//!   紧固件等隐藏种类跳过，其成本由尾差调整回补
//! - 名称命中间接费关键字的子材料按间接角色提取，不受列示
//!   种类限制
//! - 材料种类、成本角色、费用分类均在本阶段一次性判定
//!
//! ## 依赖关系
//! - 被 `rollup/aggregate.rs` 的分解装配调用
//! - 使用 `store::CatalogStore` 查询目录
//! - 使用 `rollup/classify.rs` 的关键字判定

use crate::models::{
    Component, CostCategory, CostRole, IndirectRates, MaterialKind, WallCalculationResult,
};
use crate::rollup::classify::is_indirect_name;
use crate::store::{lookup_name, CatalogStore};

/// 分类的来源目录项信息（首次出现者为准）
///
/// 尾差调整的权威综合单价、存储间接费率与规格显示信息都
/// 取自分类的来源目录项。
#[derive(Debug, Clone)]
pub struct CategorySource {
    pub category: CostCategory,

    /// 来源目录项编号
    pub item_id: String,

    /// 规格尺寸串
    pub size: String,

    /// 龙骨间距（mm）
    pub spacing: Option<f64>,

    /// 综合单价（材料, 人工，元/m²）
    pub composite: Option<(f64, f64)>,

    /// 存储的间接费率
    pub stored_rates: Option<IndirectRates>,
}

/// 单面墙的提取产物
#[derive(Debug, Default)]
pub struct Extraction {
    pub components: Vec<Component>,
    pub sources: Vec<CategorySource>,
}

impl Extraction {
    /// 记录分类来源（首次出现保留）
    fn record_source(&mut self, source: CategorySource) {
        if !self.sources.iter().any(|s| s.category == source.category) {
            self.sources.push(source);
        }
    }

    /// 并入另一面墙的提取产物（构件直接追加，来源首次保留）
    pub fn merge(&mut self, other: Extraction) {
        self.components.extend(other.components);
        for source in other.sources {
            self.record_source(source);
        }
    }
}

/// 提取单面墙的全部构件
pub fn extract_components(wall: &WallCalculationResult, store: &dyn CatalogStore) -> Extraction {
    let mut extraction = Extraction::default();

    for (_, layer) in &wall.layers {
        if layer.name.trim().is_empty() {
            continue;
        }

        let stripped = lookup_name(&layer.name);

        match store.find_item(stripped) {
            Some(item) if !item.sub_materials.is_empty() => {
                let category = item.category();

                extraction.record_source(CategorySource {
                    category: category.clone(),
                    item_id: item.id.clone(),
                    size: item.size.clone(),
                    spacing: item.spacing,
                    composite: item.composite_rates(),
                    stored_rates: item.indirect_rates,
                });

                for sub in &item.sub_materials {
                    let kind = MaterialKind::from_name(&sub.name);
                    let role = if is_indirect_name(&sub.name) {
                        CostRole::Indirect
                    } else {
                        CostRole::Direct
                    };

                    // 隐藏种类不进直接材料明细
                    if role == CostRole::Direct && !kind.is_displayed() {
                        continue;
                    }

                    let dimensions = sub
                        .material_id
                        .as_deref()
                        .and_then(|id| store.find_dimensions(id));

                    extraction.components.push(Component {
                        name: sub.name.clone(),
                        spec: sub.spec.clone(),
                        unit: sub.unit.clone(),
                        material_unit_price: sub.material_unit_price,
                        labor_amount: sub.labor_amount,
                        per_unit_quantity: sub.per_unit_quantity,
                        area: wall.area,
                        category: category.clone(),
                        kind,
                        role,
                        not_found: false,
                        sheet_ref: (kind == MaterialKind::Board).then(|| item.id.clone()),
                        dimensions,
                    });
                }
            }
            // 目录未命中或无子材料：按构造层自身价格合成单一构件
            _ => {
                let kind = MaterialKind::from_name(stripped);
                let role = if is_indirect_name(stripped) {
                    CostRole::Indirect
                } else {
                    CostRole::Direct
                };

                extraction.components.push(Component {
                    name: stripped.to_string(),
                    spec: layer.spec.clone(),
                    unit: layer.unit.clone(),
                    material_unit_price: layer.material_unit_price,
                    labor_amount: layer.labor_amount,
                    per_unit_quantity: layer.per_unit_quantity,
                    area: wall.area,
                    category: CostCategory::for_name(kind, stripped),
                    kind,
                    role,
                    not_found: layer.not_found,
                    sheet_ref: None,
                    dimensions: None,
                });
            }
        }
    }

    extraction
}

//! # 数据模型模块
//!
//! 定义材料目录、项目墙体与汇总表行的统一数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`store/`、`rollup/` 和 `commands/` 使用
//! - 子模块: catalog, wall, component, row

pub mod catalog;
pub mod component;
pub mod row;
pub mod wall;

pub use catalog::{CatalogFile, CatalogItem, Dimensions, IndirectRates, MaterialRecord, SubMaterial};
pub use component::{Component, CostCategory, CostRole, MaterialKind, SurchargeKind};
pub use row::{PricePair, PriceQuad, RollupRow, RowKind, WallTypeRollup};
pub use wall::{
    LayerMaterial, Project, SurchargePercents, WallCalculationResult, WallEntry, WallTypeGroup,
};

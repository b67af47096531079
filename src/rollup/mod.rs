//! # 成本汇总引擎
//!
//! 把解析后的墙体结果汇总为分墙型的造价行流。管线六阶段，
//! 全部为纯函数（数组进、数组出）：
//!
//! ```text
//! 提取 → 合并 → 分拣 → 间接费 → 尾差调整 → 聚合出表
//! ```
//!
//! ## 子模块
//! - `extract`: 构造层按目录 BOM 分解为构件
//! - `group`: 同种构件跨墙体合并
//! - `classify`: 直接材料 / 间接费用分拣
//! - `quantity`: 材料种类派发的数量与单价换算
//! - `indirect`: 四项间接费（存储费率 / 公式两模式）
//! - `reconcile`: 综合单价尾差调整
//! - `aggregate`: 分解装配与按合同系数出表
//! - `rounding`: 舍入原语
//! - `render`: 终端表格格式化
//! - `export`: CSV 导出
//!
//! ## 依赖关系
//! - 被 `commands/rollup.rs`、`commands/check.rs` 驱动
//! - 使用 `models/`、`parsers/size.rs`、`store/`

pub mod aggregate;
pub mod classify;
pub mod export;
pub mod extract;
pub mod group;
pub mod indirect;
pub mod quantity;
pub mod reconcile;
pub mod render;
pub mod rounding;

pub use aggregate::{
    prepare_breakdown, RollupCalculator, WallTypeBreakdown, DEFAULT_CONTRACT_RATIO,
};
pub use export::export_csv;
pub use render::table_rows;

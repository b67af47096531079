//! # 汇总表行数据模型
//!
//! 定义汇总引擎的唯一输出类型：带行种类标记的有序行流。
//! 渲染与导出只读消费行流，不做任何金额重算。
//!
//! ## 行序
//! 构件行（按分类分段）→ 分类小计 → 间接费用行 → 间接费用小计
//! → 尾差调整 → 千元取整 → 合计
//!
//! ## 依赖关系
//! - 被 `rollup/` 各阶段产出
//! - 被 `rollup/render.rs`、`rollup/export.rs` 消费

use serde::Serialize;

use crate::models::component::CostCategory;

/// 单价与金额对（元）
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PricePair {
    pub unit_price: f64,
    pub amount: f64,
}

/// 材料+人工价格四元组（一个价格系列）
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PriceQuad {
    pub material: PricePair,
    pub labor: PricePair,
}

impl PriceQuad {
    /// 材料金额与人工金额之和
    pub fn total(&self) -> f64 {
        self.material.amount + self.labor.amount
    }

    /// 累加金额（小计/合计行用，单价列不参与）
    pub fn accumulate(&mut self, other: &PriceQuad) {
        self.material.amount += other.material.amount;
        self.labor.amount += other.labor.amount;
    }
}

/// 行种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowKind {
    /// 直接材料构件行
    Component,
    /// 分类小计行
    CategorySubtotal,
    /// 间接费用行
    IndirectLine,
    /// 间接费用小计行
    IndirectSubtotal,
    /// 尾差调整 / 千元取整行
    RoundingCorrection,
    /// 合计行
    GrandTotal,
}

impl RowKind {
    /// 是否显示单价与数量列（汇总性行留白）
    pub fn shows_unit_columns(&self) -> bool {
        matches!(self, RowKind::Component | RowKind::IndirectLine)
    }
}

/// 汇总表行
#[derive(Debug, Clone, Serialize)]
pub struct RollupRow {
    pub kind: RowKind,

    /// 行名称（构件名 / 分类前缀的间接费名 / 汇总标题）
    pub name: String,

    /// 规格（构件规格显示串；公式模式间接费显示百分比）
    pub spec: String,

    /// 计量单位
    pub unit: String,

    /// 数量（面积基准）
    pub quantity: Option<f64>,

    /// 件数（根/张数；焊条保留两位小数）
    pub count: Option<f64>,

    /// 订货价系列
    pub order: PriceQuad,

    /// 合同价系列
    pub contract: PriceQuad,

    /// 所属分类（汇总性行为 None）
    pub category: Option<CostCategory>,

    /// 价格缺失标记
    pub not_found: bool,
}

impl RollupRow {
    /// 构造汇总性行（小计/调整/合计），金额由调用方累加
    pub fn summary(kind: RowKind, name: impl Into<String>) -> Self {
        RollupRow {
            kind,
            name: name.into(),
            spec: String::new(),
            unit: String::new(),
            quantity: None,
            count: None,
            order: PriceQuad::default(),
            contract: PriceQuad::default(),
            category: None,
            not_found: false,
        }
    }
}

/// 单一墙型的完整汇总结果
#[derive(Debug, Clone, Serialize)]
pub struct WallTypeRollup {
    /// 墙型名称
    pub wall_type: String,

    /// 墙型合计面积（m²）
    pub area: f64,

    /// 墙体实例数
    pub wall_count: usize,

    /// 严格有序的行流
    pub rows: Vec<RollupRow>,

    /// 计算过程警告（同名材料价格分歧等）
    pub warnings: Vec<String>,
}

impl WallTypeRollup {
    /// 合计行
    pub fn grand_total(&self) -> Option<&RollupRow> {
        self.rows.iter().rev().find(|r| r.kind == RowKind::GrandTotal)
    }

    /// 合同价合计（材料+人工）
    pub fn contract_total(&self) -> f64 {
        self.grand_total().map(|r| r.contract.total()).unwrap_or(0.0)
    }

    /// 订货价合计（材料+人工）
    pub fn order_total(&self) -> f64 {
        self.grand_total().map(|r| r.order.total()).unwrap_or(0.0)
    }
}

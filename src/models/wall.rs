//! # 项目与墙体数据模型
//!
//! 定义项目文件结构（工程信息、墙型构造层、墙体实例）以及
//! 构造层解析后的墙体计算结果。
//!
//! ## 依赖关系
//! - 被 `parsers/project.rs` 反序列化
//! - 被 `store/resolve.rs` 和 `rollup/` 使用

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 间接费用百分比（公式模式用，%）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurchargePercents {
    #[serde(default = "default_loss_percent")]
    pub loss: f64,
    #[serde(default = "default_transport_percent")]
    pub transport: f64,
    #[serde(default = "default_profit_percent")]
    pub profit: f64,
    #[serde(default = "default_tool_percent")]
    pub tool: f64,
}

fn default_loss_percent() -> f64 {
    5.0
}

fn default_transport_percent() -> f64 {
    3.0
}

fn default_profit_percent() -> f64 {
    8.0
}

fn default_tool_percent() -> f64 {
    5.0
}

impl Default for SurchargePercents {
    fn default() -> Self {
        SurchargePercents {
            loss: default_loss_percent(),
            transport: default_transport_percent(),
            profit: default_profit_percent(),
            tool: default_tool_percent(),
        }
    }
}

/// 墙体实例（项目文件记录）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallEntry {
    /// 墙体编号（如轴线号）
    #[serde(default)]
    pub name: String,

    /// 所属墙型
    pub wall_type: String,

    /// 墙长（m）
    #[serde(default)]
    pub width: Option<f64>,

    /// 墙高（m）
    #[serde(default)]
    pub height: Option<f64>,

    /// 墙面面积（m²，缺省时按 width × height 计算）
    #[serde(default)]
    pub area: Option<f64>,
}

impl WallEntry {
    /// 墙面面积：area 字段优先，否则 width × height，都缺时为 0
    pub fn resolved_area(&self) -> f64 {
        if let Some(area) = self.area {
            return area;
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) => w * h,
            _ => 0.0,
        }
    }
}

/// 项目文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// 工程名称
    #[serde(default)]
    pub site: String,

    /// 合同系数（CLI --ratio 优先于此值）
    #[serde(default)]
    pub contract_ratio: Option<f64>,

    /// 间接费用百分比（公式模式）
    #[serde(default)]
    pub surcharge_percents: Option<SurchargePercents>,

    /// 墙型定义：墙型名 → 构造层键 → 材料名称
    pub wall_types: BTreeMap<String, BTreeMap<String, String>>,

    /// 墙体实例
    pub walls: Vec<WallEntry>,
}

/// 构造层解析结果：层材料及其价格信息
///
/// 价格字段来自目录命中项的综合单价；未命中时为零并置
/// `not_found` 标记。
#[derive(Debug, Clone, Serialize)]
pub struct LayerMaterial {
    /// 材料名称（保留原始写法，目录引用前缀由提取阶段剥除）
    pub name: String,

    /// 规格（命中目录项时为其规格尺寸串）
    pub spec: String,

    /// 计量单位
    pub unit: String,

    /// 材料单价（元/m²）
    pub material_unit_price: f64,

    /// 人工费（元/m²）
    pub labor_amount: f64,

    /// 每 m² 用量
    pub per_unit_quantity: f64,

    /// 价格缺失标记
    pub not_found: bool,
}

/// 单面墙的构造层计算结果
#[derive(Debug, Clone, Serialize)]
pub struct WallCalculationResult {
    /// 墙体编号
    pub wall_name: String,

    /// 所属墙型
    pub wall_type: String,

    /// 墙面面积（m²）
    pub area: f64,

    /// 构造层（按层键顺序）
    pub layers: Vec<(String, LayerMaterial)>,
}

/// 墙型分组：同墙型的全部墙体实例
#[derive(Debug, Clone)]
pub struct WallTypeGroup {
    pub wall_type: String,
    pub walls: Vec<WallCalculationResult>,
}

impl WallTypeGroup {
    /// 按墙型分组，保持首次出现顺序
    pub fn group(results: Vec<WallCalculationResult>) -> Vec<WallTypeGroup> {
        let mut groups: Vec<WallTypeGroup> = Vec::new();
        for result in results {
            match groups.iter_mut().find(|g| g.wall_type == result.wall_type) {
                Some(group) => group.walls.push(result),
                None => groups.push(WallTypeGroup {
                    wall_type: result.wall_type.clone(),
                    walls: vec![result],
                }),
            }
        }
        groups
    }

    /// 墙型合计面积（m²）
    pub fn total_area(&self) -> f64 {
        self.walls.iter().map(|w| w.area).sum()
    }
}

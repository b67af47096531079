//! # 构件数据模型
//!
//! 定义成本计算的原子单位：构件（墙体分解出的单一材料记录），
//! 以及材料种类、成本角色、费用分类等枚举。
//!
//! ## 依赖关系
//! - 被 `rollup/` 各阶段使用
//! - 被 `store/resolve.rs` 使用

use serde::{Deserialize, Serialize};

use crate::models::catalog::Dimensions;

/// 材料种类
///
/// 从材料名称关键字一次性判定（提取阶段），下游不再重判。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialKind {
    /// 竖龙骨（C 型）
    Stud,
    /// 天地/沿边龙骨（U 型）
    Runner,
    /// 板材（石膏板、硅酸钙板等）
    Board,
    /// 保温材料（岩棉、玻璃棉等）
    Insulation,
    /// 紧固件（自攻钉、膨胀栓等）
    Fastener,
    /// 焊条
    WeldingRod,
    /// 其他
    Other,
}

impl MaterialKind {
    /// 从材料名称判定种类
    ///
    /// 关键字按特异性排序：天地/横撑类先于泛化的"龙骨"，
    /// 保温棉类先于泛化的"板"（如"岩棉板"归保温）。
    pub fn from_name(name: &str) -> Self {
        const RUNNER_KEYS: [&str; 5] = ["天地龙骨", "沿顶龙骨", "沿地龙骨", "横撑", "U型龙骨"];
        const FASTENER_KEYS: [&str; 7] =
            ["自攻钉", "射钉", "膨胀栓", "膨胀螺栓", "螺丝", "拉铆钉", "支撑卡"];
        const INSULATION_KEYS: [&str; 4] = ["岩棉", "玻璃棉", "保温棉", "矿棉"];

        if RUNNER_KEYS.iter().any(|k| name.contains(k)) {
            MaterialKind::Runner
        } else if name.contains("焊条") {
            MaterialKind::WeldingRod
        } else if FASTENER_KEYS.iter().any(|k| name.contains(k)) {
            MaterialKind::Fastener
        } else if INSULATION_KEYS.iter().any(|k| name.contains(k)) {
            MaterialKind::Insulation
        } else if name.contains("板") {
            MaterialKind::Board
        } else if name.contains("龙骨") {
            MaterialKind::Stud
        } else {
            MaterialKind::Other
        }
    }

    /// 是否进入直接材料明细表
    ///
    /// 紧固件与未识别材料不单列，其成本由尾差调整行回补。
    pub fn is_displayed(&self) -> bool {
        matches!(
            self,
            MaterialKind::Stud
                | MaterialKind::Runner
                | MaterialKind::Board
                | MaterialKind::Insulation
                | MaterialKind::WeldingRod
        )
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::Stud => write!(f, "竖龙骨"),
            MaterialKind::Runner => write!(f, "天地龙骨"),
            MaterialKind::Board => write!(f, "板材"),
            MaterialKind::Insulation => write!(f, "保温材料"),
            MaterialKind::Fastener => write!(f, "紧固件"),
            MaterialKind::WeldingRod => write!(f, "焊条"),
            MaterialKind::Other => write!(f, "其他"),
        }
    }
}

/// 成本角色：直接材料或间接费用
///
/// 按名称关键字在提取阶段一次性判定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostRole {
    Direct,
    Indirect,
}

/// 间接费用种类（固定四项，输出顺序即声明顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurchargeKind {
    /// 材料损耗
    Loss,
    /// 运输费
    Transport,
    /// 材料利润
    Profit,
    /// 工具费
    Tool,
}

impl SurchargeKind {
    pub const ALL: [SurchargeKind; 4] = [
        SurchargeKind::Loss,
        SurchargeKind::Transport,
        SurchargeKind::Profit,
        SurchargeKind::Tool,
    ];

    /// 行名称标签
    pub fn label(&self) -> &'static str {
        match self {
            SurchargeKind::Loss => "材料损耗",
            SurchargeKind::Transport => "运输费",
            SurchargeKind::Profit => "材料利润",
            SurchargeKind::Tool => "工具费",
        }
    }

    /// 从名称关键字判定间接费用种类
    pub fn from_name(name: &str) -> Option<Self> {
        if name.contains("损耗") {
            Some(SurchargeKind::Loss)
        } else if name.contains("运输") || name.contains("搬运") {
            Some(SurchargeKind::Transport)
        } else if name.contains("利润") || name.contains("利益") {
            Some(SurchargeKind::Profit)
        } else if name.contains("工具") || name.contains("机具") {
            Some(SurchargeKind::Tool)
        } else {
            None
        }
    }
}

impl std::fmt::Display for SurchargeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 费用分类
///
/// 龙骨骨架（竖龙骨+天地龙骨及其附件）为一组；
/// 每种板材、每种保温材料各为一组；其余归默认分组。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    /// 龙骨骨架
    Framing,
    /// 板材（按目录项名称区分）
    Board(String),
    /// 保温材料（按目录项名称区分）
    Insulation(String),
    /// 默认分组（未分类）
    General,
}

impl CostCategory {
    /// 从材料种类与显示名称判定分类
    ///
    /// 目录项的子材料继承目录项的分类（龙骨系统内的自攻钉、焊条
    /// 随骨架组走）；合成构件按自身名称判定。
    pub fn for_name(kind: MaterialKind, name: &str) -> Self {
        match kind {
            MaterialKind::Stud | MaterialKind::Runner => CostCategory::Framing,
            MaterialKind::Board => CostCategory::Board(name.to_string()),
            MaterialKind::Insulation => CostCategory::Insulation(name.to_string()),
            _ => CostCategory::General,
        }
    }

    /// 分类标签（默认分组为空串，间接费用行名不加前缀）
    pub fn label(&self) -> &str {
        match self {
            CostCategory::Framing => "龙骨",
            CostCategory::Board(name) => name,
            CostCategory::Insulation(name) => name,
            CostCategory::General => "",
        }
    }
}

/// 构件：墙体分解出的原子材料记录
///
/// 分组合并以 (名称, 规格, 单位, 分类) 为等价键；面积在合并时
/// 累加，单价与用量取首次出现值。
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    /// 材料名称
    pub name: String,

    /// 规格型号
    pub spec: String,

    /// 计量单位
    pub unit: String,

    /// 材料单价（订货价，元/计量单位）
    pub material_unit_price: f64,

    /// 人工费（元/m²，既作人工单价也作人工金额基数）
    pub labor_amount: f64,

    /// 每 m² 墙面用量
    pub per_unit_quantity: f64,

    /// 墙面面积（m²，分组时累加）
    pub area: f64,

    /// 费用分类（提取时判定）
    pub category: CostCategory,

    /// 材料种类（提取时判定）
    pub kind: MaterialKind,

    /// 成本角色（提取时判定）
    pub role: CostRole,

    /// 价格缺失标记（目录未命中）
    pub not_found: bool,

    /// 所属板材目录项（整张数共享重算用）
    pub sheet_ref: Option<String>,

    /// 板材尺寸（张数换算用）
    pub dimensions: Option<Dimensions>,
}

impl Component {
    /// 分组等价键比较
    pub fn same_key(&self, other: &Component) -> bool {
        self.name == other.name
            && self.spec == other.spec
            && self.unit == other.unit
            && self.category == other.category
    }
}

//! # 规格尺寸串解析器
//!
//! 解析目录项的规格尺寸串，如 "75×45×0.6"、"C75x45x0.6@400"、
//! "1200*2400*12"。
//!
//! ## 格式说明
//! ```text
//! [前缀字母] 高 × 宽 [× 厚] [@间距]
//! ```
//! 分隔符接受 ×、x、X、*；前缀字母（C/U/CH 等型号标记）忽略；
//! @ 后为龙骨间距（mm）。
//!
//! ## 依赖关系
//! - 被 `rollup/aggregate.rs` 在构件规格显示时使用
//! - 使用 `regex` 匹配

use regex::Regex;

use crate::error::{QiangsuanError, Result};

/// 解析后的规格尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSpec {
    /// 断面高度（mm，第一个数）
    pub height: f64,

    /// 宽度（mm，第二个数）
    pub width: f64,

    /// 厚度（mm，第三个数，可缺省）
    pub thickness: Option<f64>,

    /// 龙骨间距（mm，@ 后缀，可缺省）
    pub spacing: Option<f64>,
}

impl SizeSpec {
    /// 规范化显示串，如 "75×45×0.6 @400"
    pub fn display(&self) -> String {
        let mut s = format!("{}×{}", format_num(self.height), format_num(self.width));
        if let Some(t) = self.thickness {
            s.push('×');
            s.push_str(&format_num(t));
        }
        if let Some(sp) = self.spacing {
            s.push_str(&format!(" @{}", format_num(sp)));
        }
        s
    }
}

/// 数值显示：整数不带小数点
pub(crate) fn format_num(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// 解析规格尺寸串
pub fn parse_size(input: &str) -> Result<SizeSpec> {
    let re = Regex::new(
        r"^\s*[A-Za-z]*\s*(\d+(?:\.\d+)?)\s*[×xX*]\s*(\d+(?:\.\d+)?)(?:\s*[×xX*]\s*(\d+(?:\.\d+)?))?(?:\s*@\s*(\d+(?:\.\d+)?))?\s*$",
    )
    .unwrap();

    let caps = re
        .captures(input)
        .ok_or_else(|| QiangsuanError::InvalidSize(input.to_string()))?;

    let height: f64 = caps[1]
        .parse()
        .map_err(|_| QiangsuanError::InvalidSize(input.to_string()))?;
    let width: f64 = caps[2]
        .parse()
        .map_err(|_| QiangsuanError::InvalidSize(input.to_string()))?;
    let thickness = caps.get(3).and_then(|m| m.as_str().parse().ok());
    let spacing = caps.get(4).and_then(|m| m.as_str().parse().ok());

    Ok(SizeSpec {
        height,
        width,
        thickness,
        spacing,
    })
}

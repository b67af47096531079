//! # 金额与数量舍入
//!
//! 汇总引擎统一的舍入原语。金额一律四舍五入保留两位小数，
//! 板材换算系数保留三位，件数取整。
//!
//! ## 依赖关系
//! - 被 `rollup/` 各阶段使用

/// 四舍五入保留两位小数（金额）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 四舍五入保留三位小数（板材换算系数）
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// 四舍五入取整（根数/张数）
pub fn round0(value: f64) -> f64 {
    value.round()
}

/// 千元以下尾数（符号随被除数）
///
/// 合计 1,234,567 元的尾数为 567 元，取整行金额为其相反数。
pub fn thousand_remainder(total: f64) -> f64 {
    round2(total % 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(6600.004), 6600.0);
        assert_eq!(round2(1199.996), 1200.0);
        // 半值远离零
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(2.8799999), 2.88);
        assert_eq!(round3(1.5 * 2.0), 3.0);
        assert_eq!(round3(1.22 * 2.44), 2.977);
    }

    #[test]
    fn test_round0() {
        assert_eq!(round0(6.6667), 7.0);
        assert_eq!(round0(30.0), 30.0);
        assert_eq!(round0(29.4), 29.0);
    }

    #[test]
    fn test_thousand_remainder() {
        assert_eq!(thousand_remainder(1_234_567.0), 567.0);
        assert_eq!(thousand_remainder(1_000.0), 0.0);
        assert_eq!(thousand_remainder(999.99), 999.99);
        assert_eq!(thousand_remainder(0.0), 0.0);
        assert_eq!(thousand_remainder(-1_234_567.0), -567.0);
    }
}

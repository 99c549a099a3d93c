//! 金额值对象

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// 金额（以分存储，序列化为两位小数）
///
/// 运算在 `i64` 边界处饱和，生成配置的校验保证正常数据不会触及边界
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// 从浮点数创建，四舍五入到分
    pub fn from_decimal(amount: f64) -> Self {
        Self::from_cents((amount * 100.0).round() as i64)
    }

    /// 转换为浮点数（用于显示）
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_cents(self.cents.saturating_add(other.cents))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.cents = self.cents.saturating_add(other.cents);
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, multiplier: u32) -> Self {
        Self::from_cents(self.cents.saturating_mul(i64::from(multiplier)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(12.346).cents(), 1235);
        assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_decimal(1499.999).cents(), 150000);
    }

    #[test]
    fn test_multiply_by_quantity() {
        let price = Money::from_cents(19_999);
        assert_eq!((price * 7).cents(), 139_993);
        assert_eq!((price * 7).to_decimal(), 1399.93);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let huge = Money::from_decimal(1.0e17);
        assert_eq!((huge * 10).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);

        let mut total = Money::from_cents(i64::MAX - 1);
        total += Money::from_cents(5);
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(150), Money::from_cents(250)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_cents(400));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(123_405).to_string(), "1234.05");
        assert_eq!(Money::from_cents(-7).to_string(), "-0.07");
    }

    #[test]
    fn test_serializes_as_decimal_number() {
        let json = serde_json::to_string(&Money::from_cents(5_001)).unwrap();
        assert_eq!(json, "50.01");
    }
}

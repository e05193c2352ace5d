//! 數值解析與捨入規則

use rust_decimal::prelude::*;

use crate::{CostError, Result};

/// 金額預設小數位數
pub const MONEY_SCALE: u32 = 2;

/// 解析地區格式的小數字串（逗號作為小數點）
///
/// 供應商報價表的價格以 `"0,50"` 的形式出現，這裡統一把逗號換成句點後再解析。
/// 同時含有逗號與句點（千分位寫法）的字串不予接受。
///
/// # 範例
/// ```
/// # use breakeven_core::parse_locale_decimal;
/// # use rust_decimal::Decimal;
/// assert_eq!(parse_locale_decimal("0,50"), Some(Decimal::new(50, 2)));
/// assert_eq!(parse_locale_decimal("1.25"), Some(Decimal::new(125, 2)));
/// assert_eq!(parse_locale_decimal("abc"), None);
/// ```
pub fn parse_locale_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || (trimmed.contains(',') && trimmed.contains('.')) {
        return None;
    }

    let normalized = trimmed.replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// 金額捨入（銀行家捨入法）
pub fn round_money(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven)
}

/// 數量捨入至整數單位
pub fn round_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// 乘法，溢位時回報是哪個項目
///
/// `Decimal` 的運算子在溢位時會 panic，計算路徑上的金額與數量一律經過這組函式。
pub fn checked_mul(lhs: Decimal, rhs: Decimal, subject: &str) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow(subject))
}

pub fn checked_add(lhs: Decimal, rhs: Decimal, subject: &str) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| overflow(subject))
}

pub fn checked_sub(lhs: Decimal, rhs: Decimal, subject: &str) -> Result<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| overflow(subject))
}

/// 除法，除數為零也視為無法計算
pub fn checked_div(lhs: Decimal, rhs: Decimal, subject: &str) -> Result<Decimal> {
    lhs.checked_div(rhs).ok_or_else(|| overflow(subject))
}

/// 加總
pub fn checked_sum<I>(values: I, subject: &str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| checked_add(acc, value, subject))
}

fn overflow(subject: &str) -> CostError {
    CostError::Overflow {
        subject: subject.to_string(),
    }
}

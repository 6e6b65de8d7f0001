//! 十进制文本模块
//!
//! 后端以 JSON 字符串传输所有 Decimal 字段（如 `"5.0"`、`"15.75"`）。
//! `DecimalText` 原样保存这段文本，发送前绝不转换为二进制浮点数；
//! 只有界面上的小计/合计才会把它解析为 `rust_decimal::Decimal`。

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// 以文本形式传输的十进制数
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecimalText(String);

impl DecimalText {
    /// 直接包装后端返回的文本，不做任何处理
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// 从用户输入构造，接受逗号或点号作为小数分隔符
    ///
    /// `"5,0"` -> `"5.0"`，首尾空白会被去除。
    pub fn from_input(raw: &str) -> Self {
        Self(normalize_input(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// 解析为 `Decimal`，仅供显示计算使用
    pub fn to_decimal(&self) -> Option<Decimal> {
        parse_input(&self.0)
    }
}

impl Display for DecimalText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DecimalText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// 规范化用户输入：第一个逗号替换为点号，再去除首尾空白
pub fn normalize_input(raw: &str) -> String {
    raw.replacen(',', ".", 1).trim().to_string()
}

/// 解析用户输入为 `Decimal`
///
/// 空字符串或无法解析的文本返回 `None`。
pub fn parse_input(raw: &str) -> Option<Decimal> {
    let normalized = normalize_input(raw);
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// 以两位小数格式化金额，例如 `21` -> `"21.00"`
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

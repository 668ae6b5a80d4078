//! 退款方式枚举

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownValue;

/// 退款方式（pengembalian）
///
/// 只在批准时设置，且只能是退货（barang）或退款（uang）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RefundMethod {
    /// 未设置
    #[default]
    #[serde(rename = "")]
    Unset,
    /// 换货
    #[serde(rename = "barang")]
    Item,
    /// 退款
    #[serde(rename = "uang")]
    Money,
}

impl RefundMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundMethod::Unset => "",
            RefundMethod::Item => "barang",
            RefundMethod::Money => "uang",
        }
    }

    /// 审批请求中允许的取值
    pub fn for_approval(value: &str) -> Option<Self> {
        match value {
            "barang" => Some(RefundMethod::Item),
            "uang" => Some(RefundMethod::Money),
            _ => None,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, RefundMethod::Unset)
    }
}

impl FromStr for RefundMethod {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(RefundMethod::Unset),
            other => RefundMethod::for_approval(other).ok_or_else(|| UnknownValue {
                kind: "pengembalian",
                value: other.to_string(),
            }),
        }
    }
}

//! 退货状态枚举

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownValue;

/// 退货状态
///
/// 新建为处理中，审批后为已批准或已拒绝；重复审批会直接覆盖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReturStatus {
    /// 处理中
    #[default]
    #[serde(rename = "Dalam Proses")]
    InProgress,
    /// 已批准
    #[serde(rename = "Disetujui")]
    Approved,
    /// 已拒绝
    #[serde(rename = "Tidak Disetujui")]
    Rejected,
}

impl ReturStatus {
    /// 对外（JSON/数据库）使用的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturStatus::InProgress => "Dalam Proses",
            ReturStatus::Approved => "Disetujui",
            ReturStatus::Rejected => "Tidak Disetujui",
        }
    }
}

impl FromStr for ReturStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dalam Proses" => Ok(ReturStatus::InProgress),
            "Disetujui" => Ok(ReturStatus::Approved),
            "Tidak Disetujui" => Ok(ReturStatus::Rejected),
            other => Err(UnknownValue {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

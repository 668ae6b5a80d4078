//! ID 值对象

use std::str::FromStr;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::error::ReturError;

/// 退货单 ID
///
/// 由分配器指定，不使用数据库自增
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct ReturId(pub i32);

impl ReturId {
    /// 第一个可用 ID
    pub const FIRST: ReturId = ReturId(1);

    pub fn value(&self) -> i32 {
        self.0
    }

    /// 下一个顺序 ID
    pub fn next(&self) -> ReturId {
        ReturId(self.0 + 1)
    }
}

impl FromStr for ReturId {
    type Err = ReturError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(ReturId)
            .map_err(|_| ReturError::InvalidId)
    }
}

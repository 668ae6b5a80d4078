//! 枚举模块

mod refund_method;
mod retur_status;

pub use refund_method::RefundMethod;
pub use retur_status::ReturStatus;

use thiserror::Error;

/// 数据库中出现无法识别的枚举值
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

//! Retur commands

use crate::domain::enums::RefundMethod;
use crate::domain::value_objects::ReturId;
use crate::error::{ReturError, ServiceResult};

/// 创建退货单命令
#[derive(Debug, Clone, Default)]
pub struct CreateReturCommand {
    pub item: String,
    pub reason: String,
}

/// 批准退货单命令
#[derive(Debug, Clone)]
pub struct ApproveReturCommand {
    pub id: ReturId,
    /// 请求中的原始 pengembalian 值
    pub pengembalian: String,
}

impl ApproveReturCommand {
    /// 解析退款方式，只接受 barang / uang
    pub fn refund_method(&self) -> ServiceResult<RefundMethod> {
        RefundMethod::for_approval(&self.pengembalian).ok_or(ReturError::InvalidRefundMethod)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_method() {
        let cmd = ApproveReturCommand {
            id: ReturId(1),
            pengembalian: "uang".to_string(),
        };
        assert_eq!(cmd.refund_method().unwrap(), RefundMethod::Money);

        for value in ["", "Uang", "cash"] {
            let cmd = ApproveReturCommand {
                id: ReturId(1),
                pengembalian: value.to_string(),
            };
            assert!(matches!(
                cmd.refund_method(),
                Err(ReturError::InvalidRefundMethod)
            ));
        }
    }
}

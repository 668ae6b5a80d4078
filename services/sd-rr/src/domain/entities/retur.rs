//! 退货单实体

use serde::{Deserialize, Serialize};

use crate::domain::enums::{RefundMethod, ReturStatus};
use crate::domain::value_objects::ReturId;

/// 退货单实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retur {
    /// 退货单 ID
    id: ReturId,
    /// 退货物品（barang）
    item: String,
    /// 退货原因（alasan）
    reason: String,
    /// 状态
    status: ReturStatus,
    /// 退款方式（pengembalian）
    refund_method: RefundMethod,
}

impl Retur {
    /// 创建新的退货单，状态为处理中
    pub fn new(id: ReturId, item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id,
            item: item.into(),
            reason: reason.into(),
            status: ReturStatus::InProgress,
            refund_method: RefundMethod::Unset,
        }
    }

    /// 从持久化数据重建
    pub fn restore(
        id: ReturId,
        item: String,
        reason: String,
        status: ReturStatus,
        refund_method: RefundMethod,
    ) -> Self {
        Self {
            id,
            item,
            reason,
            status,
            refund_method,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> ReturId {
        self.id
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn status(&self) -> ReturStatus {
        self.status
    }

    pub fn refund_method(&self) -> RefundMethod {
        self.refund_method
    }

    // ========== 状态变更 ==========

    /// 批准退货并记录退款方式
    pub fn approve(&mut self, refund_method: RefundMethod) {
        self.status = ReturStatus::Approved;
        self.refund_method = refund_method;
    }

    /// 拒绝退货
    pub fn disapprove(&mut self) {
        self.status = ReturStatus::Rejected;
    }
}

//! 删除撤销账本
//!
//! 两个进程内结构：已释放 ID 注册表与已删除退货单的撤销栈。
//! 两者都不持久化，进程重启即丢失。

mod allocator;
mod free_ids;
mod undo_stack;

pub use allocator::{AllocatedId, allocate_id};
pub use free_ids::FreeIdRegistry;
pub use undo_stack::{EmptyStack, UndoStack};

use crate::domain::entities::Retur;
use crate::domain::value_objects::ReturId;

/// 服务持有的账本状态
#[derive(Debug, Default)]
pub struct ReturLedger {
    /// 已释放的 ID（后进先出复用）
    pub free_ids: FreeIdRegistry,
    /// 已删除退货单快照
    pub deleted: UndoStack<Retur>,
}

impl ReturLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前账本快照
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            undo_depth: self.deleted.len(),
            free_ids: self.free_ids.ids().to_vec(),
        }
    }
}

/// 账本只读快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    /// 可撤销的删除数量
    pub undo_depth: usize,
    /// 已释放 ID，末尾为下一个复用的 ID
    pub free_ids: Vec<ReturId>,
}

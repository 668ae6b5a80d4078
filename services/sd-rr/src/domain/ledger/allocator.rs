//! ID 分配

use tracing::warn;

use crate::domain::repositories::ReturRepository;
use crate::domain::value_objects::ReturId;

use super::FreeIdRegistry;

/// 分配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatedId {
    pub id: ReturId,
    /// 是否取自已释放 ID
    pub recycled: bool,
}

/// 为新退货单分配 ID
///
/// 优先复用最近释放的 ID；否则取当前最大 ID 加一，表为空时为 1。
/// 查询最大 ID 失败时回退到 1，由后续插入的主键冲突暴露问题。
pub async fn allocate_id(
    free_ids: &mut FreeIdRegistry,
    repo: &dyn ReturRepository,
) -> AllocatedId {
    if let Some(id) = free_ids.pop() {
        return AllocatedId { id, recycled: true };
    }

    let id = match repo.max_id().await {
        Ok(Some(max)) => max.next(),
        Ok(None) => ReturId::FIRST,
        Err(e) => {
            warn!(error = %e, "Failed to query max return id, falling back to 1");
            ReturId::FIRST
        }
    };

    AllocatedId {
        id,
        recycled: false,
    }
}

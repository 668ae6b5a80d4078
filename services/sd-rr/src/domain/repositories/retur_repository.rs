//! 退货单仓储接口

use async_trait::async_trait;
use cuba_errors::AppResult;

use crate::domain::entities::Retur;
use crate::domain::value_objects::ReturId;

/// 退货单仓储接口
///
/// 所有失败都以 `AppError` 返回；`update`/`delete_by_id` 在目标行不存在时返回 `AppError::NotFound`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReturRepository: Send + Sync {
    /// 查询全部退货单（按 ID 升序）
    async fn list_all(&self) -> AppResult<Vec<Retur>>;

    /// 以调用方指定的 ID 插入；主键冲突返回 `AppError::Conflict`
    async fn insert(&self, retur: &Retur) -> AppResult<Retur>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: ReturId) -> AppResult<Option<Retur>>;

    /// 整行覆盖更新
    async fn update(&self, retur: &Retur) -> AppResult<()>;

    /// 根据 ID 删除
    async fn delete_by_id(&self, id: ReturId) -> AppResult<()>;

    /// 当前最大 ID，表为空时返回 `None`
    async fn max_id(&self) -> AppResult<Option<ReturId>>;

    /// 存储连通性检查
    async fn ping(&self) -> AppResult<()>;
}

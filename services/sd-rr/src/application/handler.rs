//! Business logic handler

use std::future::Future;
use std::sync::Arc;

use cuba_errors::AppError;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::entities::Retur;
use crate::domain::ledger::{LedgerSnapshot, ReturLedger, allocate_id};
use crate::domain::repositories::ReturRepository;
use crate::domain::value_objects::ReturId;
use crate::error::{ReturError, ServiceResult, StoreAction, classify};
use crate::infrastructure::observability::metrics;

use super::commands::*;

/// 退货单业务处理
///
/// 克隆开销很小，克隆体共享同一仓储与账本
#[derive(Clone)]
pub struct ServiceHandler {
    repo: Arc<dyn ReturRepository>,
    /// 已释放 ID 与撤销栈；所有写操作在整个存储序列期间持有该锁
    ledger: Arc<Mutex<ReturLedger>>,
}

impl ServiceHandler {
    pub fn new(repo: Arc<dyn ReturRepository>) -> Self {
        Self {
            repo,
            ledger: Arc::new(Mutex::new(ReturLedger::new())),
        }
    }

    /// 查询全部退货单
    pub async fn list_returs(&self) -> ServiceResult<Vec<Retur>> {
        self.repo
            .list_all()
            .await
            .map_err(|e| store_failure(StoreAction::List, e))
    }

    /// 创建退货单
    ///
    /// 账本与存储的更新在独立任务中完成，调用方被取消也不会中断
    pub async fn create_retur(&self, cmd: CreateReturCommand) -> ServiceResult<Retur> {
        let handler = self.clone();
        detached(StoreAction::Create, async move { handler.create_in_ledger(cmd).await }).await
    }

    /// 批准退货单
    pub async fn approve_retur(&self, cmd: ApproveReturCommand) -> ServiceResult<Retur> {
        let refund_method = cmd.refund_method()?;
        let _ledger = self.ledger.lock().await;

        let mut retur = self.load(cmd.id, StoreAction::Update).await?;
        retur.approve(refund_method);
        self.save(&retur).await?;

        info!(id = %cmd.id, pengembalian = refund_method.as_str(), "Return approved");
        metrics::record_approved();

        Ok(retur)
    }

    /// 拒绝退货单
    pub async fn disapprove_retur(&self, id: ReturId) -> ServiceResult<Retur> {
        let _ledger = self.ledger.lock().await;

        let mut retur = self.load(id, StoreAction::Update).await?;
        retur.disapprove();
        self.save(&retur).await?;

        info!(id = %id, "Return disapproved");
        metrics::record_disapproved();

        Ok(retur)
    }

    /// 删除退货单，快照压入撤销栈并释放 ID
    pub async fn delete_retur(&self, id: ReturId) -> ServiceResult<ReturId> {
        let handler = self.clone();
        detached(StoreAction::Delete, async move { handler.delete_in_ledger(id).await }).await
    }

    /// 撤销最近一次删除
    pub async fn undo_delete(&self) -> ServiceResult<Retur> {
        let handler = self.clone();
        detached(StoreAction::Restore, async move { handler.undo_in_ledger().await }).await
    }

    /// 账本快照
    pub async fn ledger_snapshot(&self) -> LedgerSnapshot {
        self.ledger.lock().await.snapshot()
    }

    // ========== 账本写操作 ==========

    async fn create_in_ledger(&self, cmd: CreateReturCommand) -> ServiceResult<Retur> {
        let mut ledger = self.ledger.lock().await;

        let allocated = allocate_id(&mut ledger.free_ids, self.repo.as_ref()).await;
        let retur = Retur::new(allocated.id, cmd.item, cmd.reason);

        let created = match self.repo.insert(&retur).await {
            Ok(created) => created,
            Err(e) => {
                if allocated.recycled {
                    ledger.free_ids.push(allocated.id);
                }
                return Err(store_failure(StoreAction::Create, e));
            }
        };

        info!(
            id = %created.id(),
            recycled = allocated.recycled,
            "Return created"
        );
        metrics::record_created();
        metrics::record_ledger(&ledger.snapshot());

        Ok(created)
    }

    async fn delete_in_ledger(&self, id: ReturId) -> ServiceResult<ReturId> {
        let mut ledger = self.ledger.lock().await;

        let snapshot = self.load(id, StoreAction::Delete).await?;
        self.repo
            .delete_by_id(id)
            .await
            .map_err(|e| log_failure(StoreAction::Delete, e))?;

        // 存储删除成功后才登记
        ledger.deleted.push(snapshot);
        ledger.free_ids.push(id);

        info!(id = %id, undo_depth = ledger.deleted.len(), "Return deleted");
        metrics::record_deleted();
        metrics::record_ledger(&ledger.snapshot());

        Ok(id)
    }

    async fn undo_in_ledger(&self) -> ServiceResult<Retur> {
        let mut ledger = self.ledger.lock().await;

        let snapshot = ledger.deleted.pop()?;
        let id = snapshot.id();
        let position = ledger.free_ids.take(id);

        let restored = match self.repo.insert(&snapshot).await {
            Ok(restored) => restored,
            Err(AppError::Conflict(msg)) => {
                // 该 ID 已被新记录占用，快照无法恢复
                warn!(id = %id, error = %msg, "Return id already in use, dropping undo snapshot");
                metrics::record_ledger(&ledger.snapshot());
                return Err(store_failure(
                    StoreAction::Restore,
                    AppError::Conflict(msg),
                ));
            }
            Err(e) => {
                ledger.deleted.push(snapshot);
                if let Some(position) = position {
                    ledger.free_ids.reinsert(position, id);
                }
                return Err(store_failure(StoreAction::Restore, e));
            }
        };

        info!(id = %id, undo_depth = ledger.deleted.len(), "Return restored");
        metrics::record_restored();
        metrics::record_ledger(&ledger.snapshot());

        Ok(restored)
    }

    // ========== 内部辅助 ==========

    /// 查找退货单；查询失败按当前操作归类
    async fn load(&self, id: ReturId, action: StoreAction) -> ServiceResult<Retur> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| store_failure(action, e))?
            .ok_or(ReturError::NotFound)
    }

    async fn save(&self, retur: &Retur) -> ServiceResult<()> {
        self.repo
            .update(retur)
            .await
            .map_err(|e| log_failure(StoreAction::Update, e))
    }
}

/// 在独立任务中运行账本写操作并等待结果
///
/// 调用方 future 被丢弃时任务继续执行，账本与存储保持一致
async fn detached<T, F>(action: StoreAction, task: F) -> ServiceResult<T>
where
    T: Send + 'static,
    F: Future<Output = ServiceResult<T>> + Send + 'static,
{
    tokio::spawn(task).await.unwrap_or_else(|e| {
        Err(store_failure(
            action,
            AppError::internal(format!("Ledger task aborted: {}", e)),
        ))
    })
}

/// 记录存储失败并包装为 `ReturError::Store`
fn store_failure(action: StoreAction, source: AppError) -> ReturError {
    error!(error = %source, "{}", action);
    ReturError::store(action, source)
}

/// 同 `store_failure`，但存储层的 NotFound 保留为 404
fn log_failure(action: StoreAction, source: AppError) -> ReturError {
    let error = classify(action)(source);
    if let ReturError::Store { source, .. } = &error {
        error!(error = %source, "{}", action);
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{RefundMethod, ReturStatus};
    use crate::domain::repositories::MockReturRepository;
    use crate::infrastructure::persistence::InMemoryReturRepository;
    use async_trait::async_trait;
    use cuba_errors::AppResult;
    use mockall::predicate::eq;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::time::timeout;

    fn create_cmd(item: &str) -> CreateReturCommand {
        CreateReturCommand {
            item: item.to_string(),
            reason: "rusak".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_uses_next_id() {
        let mut repo = MockReturRepository::new();
        repo.expect_max_id().returning(|| Ok(Some(ReturId(3))));
        repo.expect_insert().returning(|r| Ok(r.clone()));

        let handler = ServiceHandler::new(Arc::new(repo));
        let retur = handler.create_retur(create_cmd("Shoes")).await.unwrap();

        assert_eq!(retur.id(), ReturId(4));
        assert_eq!(retur.status(), ReturStatus::InProgress);
        assert_eq!(retur.refund_method(), RefundMethod::Unset);
    }

    #[tokio::test]
    async fn test_failed_insert_hands_back_recycled_id() {
        let mut repo = MockReturRepository::new();
        repo.expect_find_by_id()
            .with(eq(ReturId(5)))
            .returning(|id| Ok(Some(Retur::new(id, "Shoes", "wrong size"))));
        repo.expect_delete_by_id().returning(|_| Ok(()));
        repo.expect_insert()
            .returning(|_| Err(AppError::database("connection reset")));

        let handler = ServiceHandler::new(Arc::new(repo));
        handler.delete_retur(ReturId(5)).await.unwrap();

        let err = handler.create_retur(create_cmd("Hat")).await.unwrap_err();
        assert!(matches!(
            err,
            ReturError::Store {
                action: StoreAction::Create,
                ..
            }
        ));
        assert_eq!(handler.ledger_snapshot().await.free_ids, vec![ReturId(5)]);
    }

    #[tokio::test]
    async fn test_approve_checks_refund_before_store() {
        let mut repo = MockReturRepository::new();
        repo.expect_find_by_id().never();
        repo.expect_update().never();

        let handler = ServiceHandler::new(Arc::new(repo));
        let err = handler
            .approve_retur(ApproveReturCommand {
                id: ReturId(1),
                pengembalian: "cash".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ReturError::InvalidRefundMethod));
    }

    #[tokio::test]
    async fn test_approve_find_failure_is_update_failure() {
        let mut repo = MockReturRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(AppError::database("timeout")));

        let handler = ServiceHandler::new(Arc::new(repo));
        let err = handler
            .approve_retur(ApproveReturCommand {
                id: ReturId(1),
                pengembalian: "barang".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReturError::Store {
                action: StoreAction::Update,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_vanished_row_on_update_is_not_found() {
        let mut repo = MockReturRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(Retur::new(id, "Shoes", "wrong size"))));
        repo.expect_update()
            .returning(|_| Err(AppError::not_found("no row")));

        let handler = ServiceHandler::new(Arc::new(repo));
        let err = handler.disapprove_retur(ReturId(1)).await.unwrap_err();

        assert!(matches!(err, ReturError::NotFound));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_ledger_untouched() {
        let mut repo = MockReturRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(Retur::new(id, "Shoes", "wrong size"))));
        repo.expect_delete_by_id()
            .returning(|_| Err(AppError::database("disk full")));

        let handler = ServiceHandler::new(Arc::new(repo));
        assert!(handler.delete_retur(ReturId(2)).await.is_err());

        let snapshot = handler.ledger_snapshot().await;
        assert_eq!(snapshot.undo_depth, 0);
        assert!(snapshot.free_ids.is_empty());
    }

    #[tokio::test]
    async fn test_failed_undo_keeps_snapshot_and_id() {
        let mut repo = MockReturRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(Retur::new(id, "Shoes", "wrong size"))));
        repo.expect_delete_by_id().returning(|_| Ok(()));
        repo.expect_insert()
            .returning(|_| Err(AppError::database("connection reset")));

        let handler = ServiceHandler::new(Arc::new(repo));
        handler.delete_retur(ReturId(3)).await.unwrap();
        handler.delete_retur(ReturId(8)).await.unwrap();

        let err = handler.undo_delete().await.unwrap_err();
        assert!(matches!(
            err,
            ReturError::Store {
                action: StoreAction::Restore,
                ..
            }
        ));

        let snapshot = handler.ledger_snapshot().await;
        assert_eq!(snapshot.undo_depth, 2);
        assert_eq!(snapshot.free_ids, vec![ReturId(3), ReturId(8)]);
    }

    #[tokio::test]
    async fn test_undo_conflict_drops_snapshot() {
        let mut repo = MockReturRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(Retur::new(id, "Shoes", "wrong size"))));
        repo.expect_delete_by_id().returning(|_| Ok(()));
        repo.expect_insert()
            .returning(|_| Err(AppError::conflict("duplicate key")));

        let handler = ServiceHandler::new(Arc::new(repo));
        handler.delete_retur(ReturId(3)).await.unwrap();

        assert!(handler.undo_delete().await.is_err());

        let snapshot = handler.ledger_snapshot().await;
        assert_eq!(snapshot.undo_depth, 0);
        assert!(snapshot.free_ids.is_empty());
    }

    #[tokio::test]
    async fn test_undo_empty_stack() {
        let mut repo = MockReturRepository::new();
        repo.expect_insert().never();

        let handler = ServiceHandler::new(Arc::new(repo));
        let err = handler.undo_delete().await.unwrap_err();

        assert!(matches!(err, ReturError::EmptyStack));
    }

    /// 插入在放行前一直挂起的仓储
    struct GatedRepository {
        inner: InMemoryReturRepository,
        gate: Notify,
    }

    #[async_trait]
    impl ReturRepository for GatedRepository {
        async fn list_all(&self) -> AppResult<Vec<Retur>> {
            self.inner.list_all().await
        }

        async fn insert(&self, retur: &Retur) -> AppResult<Retur> {
            self.gate.notified().await;
            self.inner.insert(retur).await
        }

        async fn find_by_id(&self, id: ReturId) -> AppResult<Option<Retur>> {
            self.inner.find_by_id(id).await
        }

        async fn update(&self, retur: &Retur) -> AppResult<()> {
            self.inner.update(retur).await
        }

        async fn delete_by_id(&self, id: ReturId) -> AppResult<()> {
            self.inner.delete_by_id(id).await
        }

        async fn max_id(&self) -> AppResult<Option<ReturId>> {
            self.inner.max_id().await
        }

        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }
    }

    async fn gated_with_one_deleted() -> (Arc<GatedRepository>, ServiceHandler) {
        let repo = Arc::new(GatedRepository {
            inner: InMemoryReturRepository::new(),
            gate: Notify::new(),
        });
        repo.inner
            .insert(&Retur::new(ReturId(1), "Shoes", "wrong size"))
            .await
            .unwrap();

        let handler = ServiceHandler::new(repo.clone());
        handler.delete_retur(ReturId(1)).await.unwrap();
        (repo, handler)
    }

    #[tokio::test]
    async fn test_cancelled_undo_still_restores() {
        let (repo, handler) = gated_with_one_deleted().await;

        let cancelled = timeout(Duration::from_millis(50), handler.undo_delete()).await;
        assert!(cancelled.is_err());

        repo.gate.notify_one();
        // 账本锁在后台任务完成后才释放
        let snapshot = handler.ledger_snapshot().await;

        assert_eq!(snapshot.undo_depth, 0);
        assert!(snapshot.free_ids.is_empty());
        let restored = repo.inner.find_by_id(ReturId(1)).await.unwrap().unwrap();
        assert_eq!(restored.item(), "Shoes");
    }

    #[tokio::test]
    async fn test_cancelled_create_keeps_recycled_id_in_use() {
        let (repo, handler) = gated_with_one_deleted().await;

        let cancelled =
            timeout(Duration::from_millis(50), handler.create_retur(create_cmd("Hat"))).await;
        assert!(cancelled.is_err());

        repo.gate.notify_one();
        let snapshot = handler.ledger_snapshot().await;

        assert!(snapshot.free_ids.is_empty());
        let created = repo.inner.find_by_id(ReturId(1)).await.unwrap().unwrap();
        assert_eq!(created.item(), "Hat");
    }
}

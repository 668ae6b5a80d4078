//! 内存仓储实现，用于测试与本地运行

use std::collections::BTreeMap;

use async_trait::async_trait;
use cuba_errors::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::domain::entities::Retur;
use crate::domain::repositories::ReturRepository;
use crate::domain::value_objects::ReturId;

#[derive(Default)]
pub struct InMemoryReturRepository {
    returs: RwLock<BTreeMap<ReturId, Retur>>,
}

impl InMemoryReturRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReturRepository for InMemoryReturRepository {
    async fn list_all(&self) -> AppResult<Vec<Retur>> {
        Ok(self.returs.read().await.values().cloned().collect())
    }

    async fn insert(&self, retur: &Retur) -> AppResult<Retur> {
        let mut returs = self.returs.write().await;
        if returs.contains_key(&retur.id()) {
            return Err(AppError::conflict(format!(
                "Return {} already exists",
                retur.id()
            )));
        }
        returs.insert(retur.id(), retur.clone());
        Ok(retur.clone())
    }

    async fn find_by_id(&self, id: ReturId) -> AppResult<Option<Retur>> {
        Ok(self.returs.read().await.get(&id).cloned())
    }

    async fn update(&self, retur: &Retur) -> AppResult<()> {
        match self.returs.write().await.get_mut(&retur.id()) {
            Some(stored) => {
                *stored = retur.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "Return {} not found",
                retur.id()
            ))),
        }
    }

    async fn delete_by_id(&self, id: ReturId) -> AppResult<()> {
        self.returs
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Return {} not found", id)))
    }

    async fn max_id(&self) -> AppResult<Option<ReturId>> {
        Ok(self.returs.read().await.keys().next_back().copied())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

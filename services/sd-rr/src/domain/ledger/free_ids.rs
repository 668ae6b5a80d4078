//! 已释放 ID 注册表

use crate::domain::value_objects::ReturId;

/// 已删除退货单释放的 ID，最近释放的最先复用
#[derive(Debug, Clone, Default)]
pub struct FreeIdRegistry {
    ids: Vec<ReturId>,
}

impl FreeIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ReturId) {
        self.ids.push(id);
    }

    pub fn pop(&mut self) -> Option<ReturId> {
        self.ids.pop()
    }

    /// 移除指定 ID，返回其原位置
    pub fn take(&mut self, id: ReturId) -> Option<usize> {
        let position = self.ids.iter().rposition(|&free| free == id)?;
        self.ids.remove(position);
        Some(position)
    }

    /// 把 `take` 移除的 ID 放回原位置
    pub fn reinsert(&mut self, position: usize, id: ReturId) {
        let position = position.min(self.ids.len());
        self.ids.insert(position, id);
    }

    pub fn contains(&self, id: ReturId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[ReturId] {
        &self.ids
    }
}

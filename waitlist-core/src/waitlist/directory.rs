use std::sync::Arc;

use dashmap::DashMap;

use super::queue::WaitlistQueue;

/// 候位队列目录
///
/// 拥有 restaurant_id → [`WaitlistQueue`] 的映射。队列在首次访问时创建，
/// 之后在餐厅的整个生命周期内保留。
///
/// `get_or_create` 通过 `DashMap::entry` 在分片写锁内完成检查与插入，
/// 并发首次访问同一餐厅时也只会创建一个队列。
#[derive(Debug, Default)]
pub struct WaitlistDirectory {
    queues: DashMap<i64, Arc<WaitlistQueue>>,
}

impl WaitlistDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取餐厅的队列，不存在时原子地创建一个空队列
    pub fn get_or_create(&self, restaurant_id: i64) -> Arc<WaitlistQueue> {
        let entry = self.queues.entry(restaurant_id).or_insert_with(|| {
            tracing::debug!(restaurant_id, "Creating waitlist queue");
            Arc::new(WaitlistQueue::new(restaurant_id))
        });
        Arc::clone(entry.value())
    }

    /// 只读查找，不会创建
    pub fn get(&self, restaurant_id: i64) -> Option<Arc<WaitlistQueue>> {
        self.queues.get(&restaurant_id).map(|q| Arc::clone(q.value()))
    }

    /// 已创建队列的餐厅 ID (升序)
    pub fn restaurant_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.queues.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

//! 内存存储的 ID 分配
//!
//! `snowflake_id` 每毫秒只有 12 位随机数，同一毫秒内可能重复。
//! 插入前在 `DashMap::entry` 的分片锁内确认 ID 未被占用，占用时重新生成。

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::RefMut;
use shared::util::snowflake_id;

/// Insert the row built by `build` under an id no other row holds
///
/// The returned guard keeps the shard locked until it is dropped.
pub fn insert_with_fresh_id<V>(
    map: &DashMap<i64, V>,
    build: impl FnOnce(i64) -> V,
) -> RefMut<'_, i64, V> {
    let slot = loop {
        match map.entry(snowflake_id()) {
            Entry::Vacant(slot) => break slot,
            Entry::Occupied(taken) => {
                tracing::debug!(id = *taken.key(), "Generated id already in use, drawing another");
            }
        }
    };
    let id = *slot.key();
    slot.insert(build(id))
}

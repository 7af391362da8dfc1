//! Rating ledger - 每个餐厅一个评分聚合
//!
//! 每次更新都在 `DashMap::entry` 的分片写锁内完成读-改-写并递增修订号，
//! 同一餐厅的并发评价操作不会看到只应用了一半的增量。

use dashmap::DashMap;
use rust_decimal::Decimal;

use super::aggregate::RatingAggregate;

#[derive(Debug, Default)]
struct LedgerEntry {
    aggregate: RatingAggregate,
    revision: u64,
}

/// Result of one ledger update
///
/// `revision` increases strictly per restaurant, so a consumer can drop an
/// older snapshot that arrives late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingSnapshot {
    pub restaurant_id: i64,
    pub mean: Decimal,
    pub count: u64,
    pub revision: u64,
}

#[derive(Debug)]
pub struct RatingLedger {
    entries: DashMap<i64, LedgerEntry>,
    decimal_places: u32,
}

impl RatingLedger {
    pub fn new(decimal_places: u32) -> Self {
        Self {
            entries: DashMap::new(),
            decimal_places,
        }
    }

    pub fn apply_new_review(&self, restaurant_id: i64, stars: i32) -> RatingSnapshot {
        self.update(restaurant_id, |agg| agg.apply_new(stars))
    }

    pub fn apply_edited_review(
        &self,
        restaurant_id: i64,
        old_stars: i32,
        new_stars: i32,
    ) -> RatingSnapshot {
        self.update(restaurant_id, |agg| agg.apply_edited(old_stars, new_stars))
    }

    pub fn apply_removed_review(&self, restaurant_id: i64, stars: i32) -> RatingSnapshot {
        self.update(restaurant_id, |agg| agg.apply_removed(stars))
    }

    /// Current mean, 0 for restaurants without reviews
    pub fn mean(&self, restaurant_id: i64) -> Decimal {
        self.snapshot(restaurant_id).mean
    }

    pub fn snapshot(&self, restaurant_id: i64) -> RatingSnapshot {
        match self.entries.get(&restaurant_id) {
            Some(entry) => self.to_snapshot(restaurant_id, &entry),
            None => RatingSnapshot {
                restaurant_id,
                mean: Decimal::ZERO,
                count: 0,
                revision: 0,
            },
        }
    }

    fn update(&self, restaurant_id: i64, f: impl FnOnce(&mut RatingAggregate)) -> RatingSnapshot {
        let mut entry = self.entries.entry(restaurant_id).or_default();
        f(&mut entry.aggregate);
        entry.revision += 1;
        let snapshot = self.to_snapshot(restaurant_id, &entry);
        tracing::debug!(
            restaurant_id,
            mean = %snapshot.mean,
            count = snapshot.count,
            revision = snapshot.revision,
            "Rating aggregate updated"
        );
        snapshot
    }

    fn to_snapshot(&self, restaurant_id: i64, entry: &LedgerEntry) -> RatingSnapshot {
        RatingSnapshot {
            restaurant_id,
            mean: entry.aggregate.mean(self.decimal_places),
            count: entry.aggregate.count(),
            revision: entry.revision,
        }
    }
}

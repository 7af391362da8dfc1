//! WaitlistQueue - 单个餐厅的 FIFO 候位队列
//!
//! 所有操作都在同一把 `parking_lot::Mutex` 下完成，因此 join / leave / pop
//! 是线性一致的：两个并发 join 不会得到相同位置，pop 也不会返回已被 leave
//! 移除的 Party。位置总是按当前顺序即时计算，从不缓存。

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::error::{QueueError, QueueResult};
use super::party::{Party, PartyKey};

#[derive(Debug, Default)]
struct QueueState {
    /// Ordered by `sequence`, head first
    entries: VecDeque<Party>,
    /// Last sequence handed out; never reused
    last_sequence: u64,
}

/// Per-restaurant ordered queue of waiting parties
#[derive(Debug)]
pub struct WaitlistQueue {
    restaurant_id: i64,
    state: Mutex<QueueState>,
}

impl WaitlistQueue {
    pub fn new(restaurant_id: i64) -> Self {
        Self {
            restaurant_id,
            state: Mutex::new(QueueState::default()),
        }
    }

    pub fn restaurant_id(&self) -> i64 {
        self.restaurant_id
    }

    /// Append a party at the tail, returning its 1-based position
    ///
    /// Fails with `DuplicateEntry` when a party with the same key is waiting;
    /// the queue is left untouched in that case.
    pub fn join(&self, mut party: Party) -> QueueResult<usize> {
        let mut state = self.state.lock();
        if state.entries.iter().any(|p| p.party_key == party.party_key) {
            return Err(QueueError::DuplicateEntry(party.party_key));
        }
        state.last_sequence += 1;
        party.sequence = state.last_sequence;
        state.entries.push_back(party);
        Ok(state.entries.len())
    }

    /// 1-based position of the party, counting everyone ahead of it
    pub fn position_of(&self, key: &PartyKey) -> QueueResult<usize> {
        let state = self.state.lock();
        state
            .entries
            .iter()
            .position(|p| &p.party_key == key)
            .map(|idx| idx + 1)
            .ok_or_else(|| QueueError::NotFound(key.clone()))
    }

    pub fn contains(&self, key: &PartyKey) -> bool {
        self.state.lock().entries.iter().any(|p| &p.party_key == key)
    }

    /// Remove the party wherever it sits; others keep their relative order
    pub fn leave(&self, key: &PartyKey) -> QueueResult<Party> {
        let mut state = self.state.lock();
        let idx = state
            .entries
            .iter()
            .position(|p| &p.party_key == key)
            .ok_or_else(|| QueueError::NotFound(key.clone()))?;
        state
            .entries
            .remove(idx)
            .ok_or_else(|| QueueError::NotFound(key.clone()))
    }

    /// Remove and return the head party
    pub fn pop_next(&self) -> QueueResult<Party> {
        self.pop_next_with_remaining().map(|(party, _)| party)
    }

    /// Remove the head party, also returning the length left behind
    ///
    /// Both values come from the same critical section.
    pub fn pop_next_with_remaining(&self) -> QueueResult<(Party, usize)> {
        let mut state = self.state.lock();
        let party = state.entries.pop_front().ok_or(QueueError::EmptyQueue)?;
        Ok((party, state.entries.len()))
    }

    pub fn length(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Copy of the current order, head first
    pub fn snapshot(&self) -> Vec<Party> {
        self.state.lock().entries.iter().cloned().collect()
    }
}

//! ReservationService - 候位业务编排
//!
//! 组合 [`WaitlistDirectory`] 与外部协作方 (餐厅目录、用户目录、权限)。
//! 队列锁只在同步的队列操作内持有，协作方调用 (`.await`) 都在锁外。
//!
//! # 反向引用
//!
//! 注册用户加入时记录 "我的候位" 反向引用，离开或被叫号时清除。
//! 清除发生在队列锁之外，期间同一用户可能已重新加入；清除后再查一次队列，
//! 仍在队列中则补回引用。清除失败只记日志。
//! `my_position` 直接读取队列目录，不依赖反向引用。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::models::{WaitingEntry, WaitingPosition};

use super::directory::WaitlistDirectory;
use super::error::QueueError;
use super::party::{ANONYMOUS_DISPLAY_NAME, Party, PartyKey};
use super::queue::WaitlistQueue;
use crate::core::{ServiceError, ServiceResult};
use crate::services::{Authorizer, RestaurantDirectory, UserDirectory};
use crate::utils::validation::normalize_phone;

/// Who is joining or leaving a queue
///
/// Wire form is tagged by `kind`: `{"kind":"registered","user_id":1}` or
/// `{"kind":"anonymous","phone":"010-0000-0000"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requester {
    /// Registered user; `phone` overrides the profile phone when present
    Registered {
        user_id: i64,
        #[serde(default)]
        phone: Option<String>,
    },
    /// Walk-in identified only by phone
    Anonymous { phone: String },
}

/// Result of seating the head of a queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNextOutcome {
    pub party: Party,
    pub remaining: usize,
}

pub struct ReservationService {
    directory: Arc<WaitlistDirectory>,
    restaurants: Arc<dyn RestaurantDirectory>,
    users: Arc<dyn UserDirectory>,
    authorizer: Arc<dyn Authorizer>,
    phone_digits: usize,
}

impl ReservationService {
    pub fn new(
        directory: Arc<WaitlistDirectory>,
        restaurants: Arc<dyn RestaurantDirectory>,
        users: Arc<dyn UserDirectory>,
        authorizer: Arc<dyn Authorizer>,
        phone_digits: usize,
    ) -> Self {
        Self {
            directory,
            restaurants,
            users,
            authorizer,
            phone_digits,
        }
    }

    pub fn directory(&self) -> &Arc<WaitlistDirectory> {
        &self.directory
    }

    /// Join a restaurant's queue, returning the 1-based position
    pub async fn join_waitlist(
        &self,
        restaurant_id: i64,
        requester: Requester,
    ) -> ServiceResult<usize> {
        self.ensure_restaurant(restaurant_id).await?;
        let party = self.build_party(restaurant_id, requester).await?;
        let key = party.party_key.clone();
        let reservation_id = party.reservation_id;

        let queue = self.directory.get_or_create(restaurant_id);
        let position = queue.join(party).map_err(|e| {
            if let QueueError::DuplicateEntry(ref existing) = e {
                tracing::warn!(restaurant_id, party = %existing, "Duplicate waitlist join rejected");
            }
            ServiceError::from_queue(restaurant_id, e)
        })?;

        if let Some(user_id) = key.user_id()
            && let Err(e) = self.users.add_reservation_backref(user_id, restaurant_id).await
        {
            // a registered entry always has a back-reference
            if queue.leave(&key).is_ok() {
                tracing::warn!(restaurant_id, party = %key, "Join rolled back: back-reference failed");
            }
            return Err(e.into());
        }

        tracing::info!(restaurant_id, party = %key, reservation_id, position, "Joined waitlist");
        Ok(position)
    }

    /// Current queue order, head first
    pub async fn list_waitlist(&self, restaurant_id: i64) -> ServiceResult<Vec<WaitingEntry>> {
        self.ensure_restaurant(restaurant_id).await?;
        let entries: Vec<WaitingEntry> = self
            .directory
            .get(restaurant_id)
            .map(|queue| queue.snapshot().iter().map(Party::to_entry).collect())
            .unwrap_or_default();
        tracing::debug!(restaurant_id, "Listed waitlist");
        Ok(entries)
    }

    /// Seat the head party
    pub async fn call_next(&self, restaurant_id: i64) -> ServiceResult<CallNextOutcome> {
        self.ensure_restaurant(restaurant_id).await?;
        let queue = self
            .directory
            .get(restaurant_id)
            .ok_or(ServiceError::QueueEmpty(restaurant_id))?;
        let (party, remaining) = queue
            .pop_next_with_remaining()
            .map_err(|e| ServiceError::from_queue(restaurant_id, e))?;

        if let Some(user_id) = party.party_key.user_id() {
            self.release_backref(&queue, user_id, restaurant_id).await;
        }
        tracing::info!(
            restaurant_id,
            party = %party.party_key,
            reservation_id = party.reservation_id,
            remaining,
            "Party seated"
        );
        Ok(CallNextOutcome { party, remaining })
    }

    /// [`call_next`](Self::call_next) on behalf of `actor_user_id`
    ///
    /// Fails `Unauthorized` before touching the queue.
    pub async fn call_next_as(
        &self,
        actor_user_id: i64,
        restaurant_id: i64,
    ) -> ServiceResult<CallNextOutcome> {
        if !self.authorizer.can_manage(actor_user_id, restaurant_id).await? {
            tracing::warn!(restaurant_id, actor_user_id, "Call-next denied");
            return Err(ServiceError::Unauthorized);
        }
        self.call_next(restaurant_id).await
    }

    /// Cancel the requester's entry, returning its reservation id
    ///
    /// A second call fails `ReservationNotFound`.
    pub async fn leave_waitlist(
        &self,
        restaurant_id: i64,
        requester: Requester,
    ) -> ServiceResult<i64> {
        self.ensure_restaurant(restaurant_id).await?;
        let key = self.party_key_of(&requester)?;
        let queue = self
            .directory
            .get(restaurant_id)
            .ok_or(ServiceError::ReservationNotFound)?;
        let party = queue
            .leave(&key)
            .map_err(|e| ServiceError::from_queue(restaurant_id, e))?;

        if let Some(user_id) = key.user_id() {
            self.release_backref(&queue, user_id, restaurant_id).await;
        }
        tracing::info!(restaurant_id, party = %key, reservation_id = party.reservation_id, "Left waitlist");
        Ok(party.reservation_id)
    }

    /// Every queue the user currently waits in, with the live position
    ///
    /// Ordered by restaurant id.
    pub async fn my_position(&self, user_id: i64) -> ServiceResult<Vec<WaitingPosition>> {
        let key = PartyKey::User(user_id);
        let waiting: Vec<(i64, usize)> = self
            .directory
            .restaurant_ids()
            .into_iter()
            .filter_map(|restaurant_id| {
                let queue = self.directory.get(restaurant_id)?;
                queue.position_of(&key).ok().map(|position| (restaurant_id, position))
            })
            .collect();

        let mut positions = Vec::with_capacity(waiting.len());
        for (restaurant_id, position) in waiting {
            let Some(basic) = self.restaurants.get_basic(restaurant_id).await? else {
                tracing::warn!(user_id, restaurant_id, "Waiting in a restaurant that no longer exists");
                continue;
            };
            positions.push(WaitingPosition {
                restaurant_id,
                restaurant_name: basic.name,
                position,
            });
        }
        Ok(positions)
    }

    /// Queue length, 0 when the restaurant has no queue yet
    pub fn waiting_count(&self, restaurant_id: i64) -> usize {
        self.directory
            .get(restaurant_id)
            .map_or(0, |queue| queue.length())
    }

    async fn ensure_restaurant(&self, restaurant_id: i64) -> ServiceResult<()> {
        if !self.restaurants.exists(restaurant_id).await? {
            return Err(ServiceError::RestaurantNotFound(restaurant_id));
        }
        Ok(())
    }

    fn party_key_of(&self, requester: &Requester) -> ServiceResult<PartyKey> {
        match requester {
            Requester::Registered { user_id, .. } => Ok(PartyKey::User(*user_id)),
            Requester::Anonymous { phone } => {
                Ok(PartyKey::Phone(normalize_phone(phone, self.phone_digits)?))
            }
        }
    }

    async fn build_party(&self, restaurant_id: i64, requester: Requester) -> ServiceResult<Party> {
        match requester {
            Requester::Registered { user_id, phone } => {
                let profile = self
                    .users
                    .get_profile(user_id)
                    .await?
                    .ok_or_else(|| ServiceError::InvalidInput(format!("unknown user {user_id}")))?;
                let raw_phone = match phone {
                    Some(phone) => phone,
                    None => self.users.get_phone(user_id).await?.ok_or_else(|| {
                        ServiceError::InvalidInput(format!("user {user_id} has no phone number"))
                    })?,
                };
                let contact = normalize_phone(&raw_phone, self.phone_digits)?;
                Ok(Party::new(
                    restaurant_id,
                    PartyKey::User(user_id),
                    profile.name,
                    contact,
                ))
            }
            Requester::Anonymous { phone } => {
                let contact = normalize_phone(&phone, self.phone_digits)?;
                Ok(Party::new(
                    restaurant_id,
                    PartyKey::Phone(contact.clone()),
                    ANONYMOUS_DISPLAY_NAME,
                    contact,
                ))
            }
        }
    }

    /// Clear the back-reference once the user's entry is gone
    ///
    /// Re-adds it when the user rejoined while the clear was in flight.
    async fn release_backref(&self, queue: &WaitlistQueue, user_id: i64, restaurant_id: i64) {
        if let Err(e) = self.users.clear_reservation_backref(user_id, restaurant_id).await {
            tracing::warn!(user_id, restaurant_id, error = %e, "Failed to clear reservation back-reference");
            return;
        }
        if !queue.contains(&PartyKey::User(user_id)) {
            return;
        }
        tracing::debug!(user_id, restaurant_id, "User rejoined during release, restoring back-reference");
        if let Err(e) = self.users.add_reservation_backref(user_id, restaurant_id).await {
            tracing::warn!(user_id, restaurant_id, error = %e, "Failed to restore reservation back-reference");
        }
    }
}

//! Collaborator interfaces consumed by the waitlist core
//!
//! Every call may suspend; failures come back as [`AppError`] and are
//! propagated by the core without retrying.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::AppResult;
use shared::models::{RestaurantBasic, UserProfile};

/// Restaurant directory (existence, display name, star average persistence)
#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    async fn exists(&self, restaurant_id: i64) -> AppResult<bool>;

    async fn get_basic(&self, restaurant_id: i64) -> AppResult<Option<RestaurantBasic>>;

    /// Persist a published mean
    ///
    /// `revision` increases strictly per restaurant; implementations must
    /// ignore a publish whose revision is not newer than the stored one.
    async fn update_star_avg(
        &self,
        restaurant_id: i64,
        star_avg: Decimal,
        revision: u64,
    ) -> AppResult<()>;
}

/// User directory (profiles and the "my reservations" back-references)
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_profile(&self, user_id: i64) -> AppResult<Option<UserProfile>>;

    async fn get_phone(&self, user_id: i64) -> AppResult<Option<String>> {
        Ok(self
            .get_profile(user_id)
            .await?
            .map(|profile| profile.phone_number))
    }

    async fn add_reservation_backref(&self, user_id: i64, restaurant_id: i64) -> AppResult<()>;

    async fn clear_reservation_backref(&self, user_id: i64, restaurant_id: i64) -> AppResult<()>;

    /// Restaurants the user is recorded as waiting in, in join order
    async fn reservation_backrefs(&self, user_id: i64) -> AppResult<Vec<i64>>;
}

/// Authorization for manager actions
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn can_manage(&self, user_id: i64, restaurant_id: i64) -> AppResult<bool>;
}

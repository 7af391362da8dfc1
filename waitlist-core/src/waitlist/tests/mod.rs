use super::*;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::AppResult;
use shared::error::AppError;
use shared::models::{RestaurantBasic, RestaurantCreate, UserProfile, WaitingPosition};

use crate::core::{Config, ServiceError};
use crate::services::{
    ManagerRegistry, RestaurantCatalog, RestaurantDirectory, UserDirectory, UserRegistry,
};

const PHONE_DIGITS: usize = 11;

struct TestEnv {
    catalog: Arc<RestaurantCatalog>,
    users: Arc<UserRegistry>,
    managers: Arc<ManagerRegistry>,
    directory: Arc<WaitlistDirectory>,
    service: ReservationService,
}

fn create_test_env() -> TestEnv {
    let config = Config::with_overrides(chrono_tz::Asia::Seoul, PHONE_DIGITS);
    let catalog = Arc::new(RestaurantCatalog::new(&config));
    let users = Arc::new(UserRegistry::new());
    let managers = Arc::new(ManagerRegistry::new());
    let directory = Arc::new(WaitlistDirectory::new());
    let service = ReservationService::new(
        directory.clone(),
        catalog.clone(),
        users.clone(),
        managers.clone(),
        config.phone_digits,
    );
    TestEnv {
        catalog,
        users,
        managers,
        directory,
        service,
    }
}

fn add_restaurant(env: &TestEnv, name: &str) -> i64 {
    env.catalog
        .register(RestaurantCreate {
            name: name.to_string(),
            category: vec![1],
            latitude: 37.5665,
            longitude: 126.978,
            address: "Seoul".to_string(),
            images: vec![],
            hours: None,
        })
        .unwrap()
        .id
}

fn add_user(env: &TestEnv, name: &str, phone: &str) -> UserProfile {
    env.users.register(name, phone)
}

fn registered(user_id: i64) -> Requester {
    Requester::Registered {
        user_id,
        phone: None,
    }
}

fn anonymous(phone: &str) -> Requester {
    Requester::Anonymous {
        phone: phone.to_string(),
    }
}

fn user_party(restaurant_id: i64, user_id: i64) -> Party {
    Party::new(
        restaurant_id,
        PartyKey::User(user_id),
        format!("User {}", user_id),
        "01000000000",
    )
}

fn phone_party(restaurant_id: i64, phone: &str) -> Party {
    Party::new(
        restaurant_id,
        PartyKey::Phone(phone.to_string()),
        ANONYMOUS_DISPLAY_NAME,
        phone,
    )
}

/// Restaurant directory whose backend is down
struct UnreachableRestaurants;

#[async_trait]
impl RestaurantDirectory for UnreachableRestaurants {
    async fn exists(&self, _restaurant_id: i64) -> AppResult<bool> {
        Err(AppError::network("restaurant directory unreachable"))
    }

    async fn get_basic(&self, _restaurant_id: i64) -> AppResult<Option<RestaurantBasic>> {
        Err(AppError::network("restaurant directory unreachable"))
    }

    async fn update_star_avg(&self, _: i64, _: Decimal, _: u64) -> AppResult<()> {
        Err(AppError::network("restaurant directory unreachable"))
    }
}

/// User directory whose back-reference clears arrive late
struct SlowClearUsers {
    inner: Arc<UserRegistry>,
    delay: Duration,
}

#[async_trait]
impl UserDirectory for SlowClearUsers {
    async fn get_profile(&self, user_id: i64) -> AppResult<Option<UserProfile>> {
        self.inner.get_profile(user_id).await
    }

    async fn add_reservation_backref(&self, user_id: i64, restaurant_id: i64) -> AppResult<()> {
        self.inner.add_reservation_backref(user_id, restaurant_id).await
    }

    async fn clear_reservation_backref(&self, user_id: i64, restaurant_id: i64) -> AppResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.clear_reservation_backref(user_id, restaurant_id).await
    }

    async fn reservation_backrefs(&self, user_id: i64) -> AppResult<Vec<i64>> {
        self.inner.reservation_backrefs(user_id).await
    }
}

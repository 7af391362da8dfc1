//! In-memory user directory

use async_trait::async_trait;
use dashmap::DashMap;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::UserProfile;

use super::traits::UserDirectory;
use crate::utils::ids::insert_with_fresh_id;

#[derive(Debug, Clone)]
struct UserRecord {
    profile: UserProfile,
    /// Restaurants this user is waiting in, join order
    waiting_in: Vec<i64>,
}

/// 用户注册表 - 用户资料与 "我的候位" 反向引用
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: DashMap<i64, UserRecord>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with a fresh id
    pub fn register(&self, name: impl Into<String>, phone_number: impl Into<String>) -> UserProfile {
        insert_with_fresh_id(&self.users, |id| UserRecord {
            profile: UserProfile {
                id,
                name: name.into(),
                phone_number: phone_number.into(),
            },
            waiting_in: Vec::new(),
        })
        .profile
        .clone()
    }

    /// Insert or replace a profile, keeping existing back-references
    pub fn insert(&self, profile: UserProfile) {
        self.users
            .entry(profile.id)
            .and_modify(|record| record.profile = profile.clone())
            .or_insert_with(|| UserRecord {
                profile: profile.clone(),
                waiting_in: Vec::new(),
            });
    }

    pub fn get(&self, user_id: i64) -> Option<UserProfile> {
        self.users.get(&user_id).map(|r| r.profile.clone())
    }

    fn user_not_found(user_id: i64) -> AppError {
        AppError::with_message(ErrorCode::UserNotFound, format!("User {user_id} not found"))
            .with_detail("user_id", user_id)
    }
}

#[async_trait]
impl UserDirectory for UserRegistry {
    async fn get_profile(&self, user_id: i64) -> AppResult<Option<UserProfile>> {
        Ok(self.get(user_id))
    }

    async fn add_reservation_backref(&self, user_id: i64, restaurant_id: i64) -> AppResult<()> {
        let mut record = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| Self::user_not_found(user_id))?;
        if !record.waiting_in.contains(&restaurant_id) {
            record.waiting_in.push(restaurant_id);
        }
        Ok(())
    }

    async fn clear_reservation_backref(&self, user_id: i64, restaurant_id: i64) -> AppResult<()> {
        let mut record = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| Self::user_not_found(user_id))?;
        record.waiting_in.retain(|id| *id != restaurant_id);
        Ok(())
    }

    async fn reservation_backrefs(&self, user_id: i64) -> AppResult<Vec<i64>> {
        Ok(self
            .users
            .get(&user_id)
            .map(|r| r.waiting_in.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_backrefs_are_deduplicated_and_ordered() {
        let registry = UserRegistry::new();
        let user = registry.register("김철수", "01012345678");

        registry.add_reservation_backref(user.id, 30).await.unwrap();
        registry.add_reservation_backref(user.id, 10).await.unwrap();
        registry.add_reservation_backref(user.id, 30).await.unwrap();
        assert_eq!(registry.reservation_backrefs(user.id).await.unwrap(), vec![30, 10]);

        registry.clear_reservation_backref(user.id, 30).await.unwrap();
        assert_eq!(registry.reservation_backrefs(user.id).await.unwrap(), vec![10]);
    }

    #[tokio::test]
    async fn test_get_phone_uses_profile() {
        let registry = UserRegistry::new();
        let user = registry.register("Ana", "01099998888");
        assert_eq!(
            registry.get_phone(user.id).await.unwrap().as_deref(),
            Some("01099998888")
        );
        assert_eq!(registry.get_phone(user.id + 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_user_backref_fails() {
        let registry = UserRegistry::new();
        let err = registry.add_reservation_backref(404, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
        assert!(registry.reservation_backrefs(404).await.unwrap().is_empty());
    }

    #[test]
    fn test_insert_keeps_backrefs() {
        let registry = UserRegistry::new();
        let mut user = registry.register("Old name", "01011112222");
        registry
            .users
            .get_mut(&user.id)
            .unwrap()
            .waiting_in
            .push(5);

        user.name = "New name".into();
        registry.insert(user.clone());
        assert_eq!(registry.get(user.id).unwrap().name, "New name");
        assert_eq!(registry.users.get(&user.id).unwrap().waiting_in, vec![5]);
    }
}

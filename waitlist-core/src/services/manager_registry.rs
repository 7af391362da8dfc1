//! In-memory authorizer for manager actions

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use shared::AppResult;

use super::traits::Authorizer;

/// 管理员注册表
///
/// 每个餐厅一名店长，另有可管理所有餐厅的员工账号。
#[derive(Debug, Default)]
pub struct ManagerRegistry {
    /// restaurant_id → manager user_id
    managers: DashMap<i64, i64>,
    staff: DashSet<i64>,
}

impl ManagerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the manager of a restaurant
    pub fn assign_manager(&self, restaurant_id: i64, user_id: i64) {
        if let Some(previous) = self.managers.insert(restaurant_id, user_id) {
            tracing::info!(restaurant_id, previous, user_id, "Restaurant manager replaced");
        }
    }

    pub fn manager_of(&self, restaurant_id: i64) -> Option<i64> {
        self.managers.get(&restaurant_id).map(|m| *m)
    }

    /// Grant a user rights over every restaurant
    pub fn add_staff(&self, user_id: i64) {
        self.staff.insert(user_id);
    }
}

#[async_trait]
impl Authorizer for ManagerRegistry {
    async fn can_manage(&self, user_id: i64, restaurant_id: i64) -> AppResult<bool> {
        Ok(self.staff.contains(&user_id) || self.manager_of(restaurant_id) == Some(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manager_and_staff_rights() {
        let registry = ManagerRegistry::new();
        registry.assign_manager(1, 100);
        registry.add_staff(900);

        assert!(registry.can_manage(100, 1).await.unwrap());
        assert!(!registry.can_manage(100, 2).await.unwrap());
        assert!(registry.can_manage(900, 2).await.unwrap());
        assert!(!registry.can_manage(101, 1).await.unwrap());

        registry.assign_manager(1, 101);
        assert_eq!(registry.manager_of(1), Some(101));
        assert!(!registry.can_manage(100, 1).await.unwrap());
    }
}

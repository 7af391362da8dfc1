//! Review Service - 评价存储，驱动评分聚合
//!
//! 锁顺序固定为 reviews → ledger，并且在任何 `.await` 之前释放。
//! 平均星级写回餐厅记录时带上 ledger 的修订号，迟到的旧值会被丢弃。

use std::sync::Arc;

use dashmap::DashMap;
use shared::models::{Review, ReviewCreate, ReviewUpdate};
use shared::util::now_millis;

use crate::core::{ServiceError, ServiceResult};
use crate::rating::{RatingLedger, RatingSnapshot};
use crate::services::RestaurantDirectory;
use crate::utils::ids::insert_with_fresh_id;
use crate::utils::validation::{
    MAX_CONTENTS_LEN, MAX_MENU_LEN, validate_required_text, validate_stars, validate_text_len,
};

pub struct ReviewService {
    reviews: DashMap<i64, Review>,
    ledger: Arc<RatingLedger>,
    restaurants: Arc<dyn RestaurantDirectory>,
}

fn validate_review(stars: i32, menu: &str, contents: &str) -> ServiceResult<()> {
    validate_stars(stars)?;
    validate_text_len(menu, "menu", MAX_MENU_LEN)?;
    validate_required_text(contents, "contents", MAX_CONTENTS_LEN)
}

/// Newest first, id as tie-break
fn newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

impl ReviewService {
    pub fn new(ledger: Arc<RatingLedger>, restaurants: Arc<dyn RestaurantDirectory>) -> Self {
        Self {
            reviews: DashMap::new(),
            ledger,
            restaurants,
        }
    }

    pub async fn write_review(
        &self,
        restaurant_id: i64,
        user_id: i64,
        data: ReviewCreate,
    ) -> ServiceResult<Review> {
        validate_review(data.stars, &data.menu, &data.contents)?;
        if !self.restaurants.exists(restaurant_id).await? {
            return Err(ServiceError::RestaurantNotFound(restaurant_id));
        }

        let now = now_millis();
        let (review, snapshot) = {
            let row = insert_with_fresh_id(&self.reviews, |id| Review {
                id,
                restaurant_id,
                user_id,
                stars: data.stars,
                menu: data.menu,
                contents: data.contents,
                created_at: now,
                updated_at: now,
            });
            let snapshot = self.ledger.apply_new_review(restaurant_id, row.stars);
            (row.value().clone(), snapshot)
        };
        tracing::info!(review_id = review.id, restaurant_id, user_id, stars = review.stars, "Review written");

        self.publish(snapshot).await?;
        Ok(review)
    }

    /// Only the author's review in that restaurant can be edited
    pub async fn edit_review(
        &self,
        restaurant_id: i64,
        user_id: i64,
        review_id: i64,
        data: ReviewUpdate,
    ) -> ServiceResult<Review> {
        validate_review(data.stars, &data.menu, &data.contents)?;

        let (updated, snapshot) = {
            let mut review = self
                .reviews
                .get_mut(&review_id)
                .filter(|r| r.restaurant_id == restaurant_id && r.user_id == user_id)
                .ok_or(ServiceError::ReviewNotFound(review_id))?;
            let old_stars = review.stars;
            review.stars = data.stars;
            review.menu = data.menu;
            review.contents = data.contents;
            review.updated_at = now_millis();
            let snapshot = self
                .ledger
                .apply_edited_review(restaurant_id, old_stars, data.stars);
            (review.value().clone(), snapshot)
        };
        tracing::info!(review_id, restaurant_id, stars = updated.stars, "Review edited");

        self.publish(snapshot).await?;
        Ok(updated)
    }

    /// Only the author can delete
    pub async fn delete_review(&self, user_id: i64, review_id: i64) -> ServiceResult<Review> {
        let (_, removed) = self
            .reviews
            .remove_if(&review_id, |_, r| r.user_id == user_id)
            .ok_or(ServiceError::ReviewNotFound(review_id))?;
        let snapshot = self
            .ledger
            .apply_removed_review(removed.restaurant_id, removed.stars);
        tracing::info!(review_id, restaurant_id = removed.restaurant_id, "Review deleted");

        self.publish(snapshot).await?;
        Ok(removed)
    }

    pub fn get(&self, review_id: i64) -> Option<Review> {
        self.reviews.get(&review_id).map(|r| r.value().clone())
    }

    pub fn list_for_restaurant(&self, restaurant_id: i64) -> Vec<Review> {
        let mut rows: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.restaurant_id == restaurant_id)
            .map(|r| r.value().clone())
            .collect();
        newest_first(&mut rows);
        rows
    }

    pub fn list_for_user(&self, user_id: i64) -> Vec<Review> {
        let mut rows: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        newest_first(&mut rows);
        rows
    }

    /// The `limit` newest reviews of a restaurant
    pub fn latest_for_restaurant(&self, restaurant_id: i64, limit: usize) -> Vec<Review> {
        let mut rows = self.list_for_restaurant(restaurant_id);
        rows.truncate(limit);
        rows
    }

    async fn publish(&self, snapshot: RatingSnapshot) -> ServiceResult<()> {
        self.restaurants
            .update_star_avg(snapshot.restaurant_id, snapshot.mean, snapshot.revision)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::services::RestaurantCatalog;
    use rust_decimal::Decimal;
    use shared::models::RestaurantCreate;

    struct Fixture {
        catalog: Arc<RestaurantCatalog>,
        ledger: Arc<RatingLedger>,
        service: ReviewService,
        restaurant_id: i64,
    }

    fn fixture() -> Fixture {
        let catalog = Arc::new(RestaurantCatalog::new(&Config::default()));
        let ledger = Arc::new(RatingLedger::new(2));
        let service = ReviewService::new(ledger.clone(), catalog.clone());
        let restaurant_id = catalog
            .register(RestaurantCreate {
                name: "Review Test".into(),
                category: vec![1],
                latitude: 37.5,
                longitude: 127.0,
                address: String::new(),
                images: vec![],
                hours: None,
            })
            .unwrap()
            .id;
        Fixture {
            catalog,
            ledger,
            service,
            restaurant_id,
        }
    }

    fn create(stars: i32) -> ReviewCreate {
        ReviewCreate {
            stars,
            menu: "김치찌개".into(),
            contents: "맛있어요".into(),
        }
    }

    fn update(stars: i32) -> ReviewUpdate {
        ReviewUpdate {
            stars,
            menu: String::new(),
            contents: "다시 왔어요".into(),
        }
    }

    #[tokio::test]
    async fn test_star_average_follows_reviews() {
        let f = fixture();
        let rid = f.restaurant_id;

        f.service.write_review(rid, 1, create(5)).await.unwrap();
        let three = f.service.write_review(rid, 2, create(3)).await.unwrap();
        let four = f.service.write_review(rid, 3, create(4)).await.unwrap();
        assert_eq!(f.catalog.get(rid).unwrap().star_avg, Decimal::new(400, 2));

        f.service.edit_review(rid, 2, three.id, update(5)).await.unwrap();
        assert_eq!(f.catalog.get(rid).unwrap().star_avg, Decimal::new(467, 2));

        f.service.delete_review(3, four.id).await.unwrap();
        assert_eq!(f.catalog.get(rid).unwrap().star_avg, Decimal::new(500, 2));
        assert_eq!(f.ledger.snapshot(rid).count, 2);
    }

    #[tokio::test]
    async fn test_only_author_can_edit_or_delete() {
        let f = fixture();
        let rid = f.restaurant_id;
        let review = f.service.write_review(rid, 1, create(2)).await.unwrap();

        assert!(matches!(
            f.service.edit_review(rid, 99, review.id, update(5)).await,
            Err(ServiceError::ReviewNotFound(_))
        ));
        assert!(matches!(
            f.service.edit_review(rid + 1, 1, review.id, update(5)).await,
            Err(ServiceError::ReviewNotFound(_))
        ));
        assert!(matches!(
            f.service.delete_review(99, review.id).await,
            Err(ServiceError::ReviewNotFound(_))
        ));

        // nothing changed
        assert_eq!(f.service.get(review.id).unwrap().stars, 2);
        assert_eq!(f.ledger.mean(rid), Decimal::new(200, 2));
    }

    #[tokio::test]
    async fn test_write_validates_input_and_restaurant() {
        let f = fixture();
        let rid = f.restaurant_id;

        assert!(matches!(
            f.service.write_review(rid, 1, create(0)).await,
            Err(ServiceError::InvalidInput(_))
        ));
        let mut long_menu = create(3);
        long_menu.menu = "메".repeat(MAX_MENU_LEN + 1);
        assert!(f.service.write_review(rid, 1, long_menu).await.is_err());
        let mut empty = create(3);
        empty.contents = "  ".into();
        assert!(f.service.write_review(rid, 1, empty).await.is_err());

        assert!(matches!(
            f.service.write_review(-1, 1, create(3)).await,
            Err(ServiceError::RestaurantNotFound(-1))
        ));
        assert!(f.service.list_for_restaurant(rid).is_empty());
        assert_eq!(f.ledger.snapshot(rid).count, 0);
    }

    #[tokio::test]
    async fn test_listing_newest_first() {
        let f = fixture();
        let rid = f.restaurant_id;
        let mut ids = Vec::new();
        for stars in 1..=4 {
            ids.push(f.service.write_review(rid, 7, create(stars)).await.unwrap().id);
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let latest = f.service.latest_for_restaurant(rid, 2);
        assert_eq!(
            latest.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![ids[3], ids[2]]
        );
        assert_eq!(f.service.list_for_user(7).len(), 4);
        assert!(f.service.list_for_user(8).is_empty());
    }

    #[tokio::test]
    async fn test_burst_of_writes_keeps_every_review() {
        let f = fixture();
        let rid = f.restaurant_id;
        for i in 0..3000 {
            f.service.write_review(rid, i, create(4)).await.unwrap();
        }

        assert_eq!(f.service.list_for_restaurant(rid).len(), 3000);
        assert_eq!(f.ledger.snapshot(rid).count, 3000);
        assert_eq!(f.ledger.mean(rid), Decimal::new(400, 2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_keep_mean_exact() {
        let f = fixture();
        let rid = f.restaurant_id;
        let service = Arc::new(f.service);

        let writes = (0..40).map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                let stars = if i % 2 == 0 { 5 } else { 3 };
                service.write_review(rid, i, create(stars)).await
            })
        });
        for handle in futures::future::join_all(writes).await {
            handle.unwrap().unwrap();
        }

        assert_eq!(f.ledger.snapshot(rid).count, 40);
        assert_eq!(f.ledger.mean(rid), Decimal::new(400, 2));
        assert_eq!(f.catalog.get(rid).unwrap().star_avg, Decimal::new(400, 2));
    }
}

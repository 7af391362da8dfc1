//! Restaurant Catalog - in-memory restaurant directory with search
//!
//! Searches are linear scans over the catalog; distances use the haversine
//! formula. "Open" is evaluated in the configured business time zone.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use dashmap::DashMap;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AlternativeRestaurant, FilterQuery, NearbyRestaurant, OperatingHours, Restaurant,
    RestaurantBasic, RestaurantCreate,
};
use shared::util::now_millis;

use super::traits::RestaurantDirectory;
use crate::core::{Config, ServiceError, ServiceResult};
use crate::utils::geo::{distance_km, round_metres};
use crate::utils::ids::insert_with_fresh_id;
use crate::utils::time::{is_open_at, local_now, validate_operating_hours};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_RESTAURANT_NAME_LEN, validate_coordinates, validate_required_text,
    validate_text_len,
};

// =============================================================================
// Service
// =============================================================================

/// 餐厅目录
#[derive(Debug)]
pub struct RestaurantCatalog {
    restaurants: DashMap<i64, Restaurant>,
    timezone: Tz,
    filter_radius_km: f64,
    nearby_radius_km: f64,
    alternative_radius_km: f64,
}

impl RestaurantCatalog {
    pub fn new(config: &Config) -> Self {
        Self {
            restaurants: DashMap::new(),
            timezone: config.timezone,
            filter_radius_km: config.filter_radius_km,
            nearby_radius_km: config.nearby_radius_km,
            alternative_radius_km: config.alternative_radius_km,
        }
    }

    /// Current wall-clock time in the business time zone
    pub fn local_now(&self) -> NaiveDateTime {
        local_now(self.timezone)
    }

    // =========================================================================
    // Write
    // =========================================================================

    pub fn register(&self, data: RestaurantCreate) -> ServiceResult<Restaurant> {
        validate_required_text(&data.name, "name", MAX_RESTAURANT_NAME_LEN)?;
        validate_text_len(&data.address, "address", MAX_ADDRESS_LEN)?;
        validate_coordinates(data.latitude, data.longitude)?;
        let hours = data.hours.unwrap_or_default();
        validate_operating_hours(&hours)?;

        let now = now_millis();
        let restaurant = insert_with_fresh_id(&self.restaurants, |id| Restaurant {
            id,
            name: data.name.trim().to_string(),
            category: data.category,
            latitude: data.latitude,
            longitude: data.longitude,
            address: data.address,
            star_avg: Decimal::ZERO,
            star_revision: 0,
            images: data.images,
            hours,
            created_at: now,
            updated_at: now,
        })
        .value()
        .clone();
        tracing::info!(restaurant_id = restaurant.id, name = %restaurant.name, "Restaurant registered");
        Ok(restaurant)
    }

    pub fn update_operating_hours(
        &self,
        restaurant_id: i64,
        hours: OperatingHours,
    ) -> ServiceResult<Restaurant> {
        validate_operating_hours(&hours)?;
        let mut restaurant = self
            .restaurants
            .get_mut(&restaurant_id)
            .ok_or(ServiceError::RestaurantNotFound(restaurant_id))?;
        restaurant.hours = hours;
        restaurant.updated_at = now_millis();
        tracing::info!(restaurant_id, "Operating hours updated");
        Ok(restaurant.value().clone())
    }

    // =========================================================================
    // Read
    // =========================================================================

    pub fn get(&self, restaurant_id: i64) -> ServiceResult<Restaurant> {
        self.restaurants
            .get(&restaurant_id)
            .map(|r| r.value().clone())
            .ok_or(ServiceError::RestaurantNotFound(restaurant_id))
    }

    pub fn is_open_now(&self, restaurant_id: i64) -> ServiceResult<bool> {
        let restaurant = self.get(restaurant_id)?;
        Ok(is_open_at(&restaurant.hours, self.local_now()))
    }

    /// Filtered search: name substring, every requested category, within the
    /// filter radius and open at `at`. Highest star average first.
    pub fn filter(&self, query: &FilterQuery, at: NaiveDateTime) -> ServiceResult<Vec<i64>> {
        validate_coordinates(query.latitude, query.longitude)?;
        let name = query.name.trim();

        let mut matches: Vec<(Decimal, i64)> = self
            .restaurants
            .iter()
            .filter(|r| name.is_empty() || r.name.contains(name))
            .filter(|r| query.categories.iter().all(|c| r.category.contains(c)))
            .filter(|r| {
                distance_km(query.latitude, query.longitude, r.latitude, r.longitude)
                    <= self.filter_radius_km
            })
            .filter(|r| is_open_at(&r.hours, at))
            .map(|r| (r.star_avg, r.id))
            .collect();

        matches.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        tracing::debug!(count = matches.len(), "Filtered restaurant search");
        Ok(matches.into_iter().map(|(_, id)| id).collect())
    }

    /// Open restaurants within `radius_km` (default nearby radius), nearest first
    pub fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
        at: NaiveDateTime,
    ) -> ServiceResult<Vec<NearbyRestaurant>> {
        validate_coordinates(latitude, longitude)?;
        let radius = radius_km.unwrap_or(self.nearby_radius_km);
        if !radius.is_finite() || radius < 0.0 {
            return Err(ServiceError::InvalidInput(format!("invalid radius: {radius}")));
        }

        let mut rows: Vec<(f64, NearbyRestaurant)> = self
            .restaurants
            .iter()
            .filter(|r| is_open_at(&r.hours, at))
            .filter_map(|r| {
                let d = distance_km(latitude, longitude, r.latitude, r.longitude);
                (d <= radius).then(|| {
                    (
                        d,
                        NearbyRestaurant {
                            id: r.id,
                            category: r.category.clone(),
                            latitude: r.latitude,
                            longitude: r.longitude,
                        },
                    )
                })
            })
            .collect();

        rows.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    /// Other open restaurants near `restaurant_id` sharing all of its
    /// categories, nearest first
    pub fn alternatives(
        &self,
        restaurant_id: i64,
        at: NaiveDateTime,
    ) -> ServiceResult<Vec<AlternativeRestaurant>> {
        let source = self.get(restaurant_id)?;

        let mut rows: Vec<AlternativeRestaurant> = self
            .restaurants
            .iter()
            .filter(|r| r.id != source.id)
            .filter(|r| source.category.iter().all(|c| r.category.contains(c)))
            .filter(|r| is_open_at(&r.hours, at))
            .filter_map(|r| {
                let d = distance_km(source.latitude, source.longitude, r.latitude, r.longitude);
                (d <= self.alternative_radius_km).then(|| AlternativeRestaurant {
                    id: r.id,
                    name: r.name.clone(),
                    category: r.category.clone(),
                    hours: r.hours.clone(),
                    distance_m: round_metres(d),
                })
            })
            .collect();

        rows.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m).then(a.id.cmp(&b.id)));
        tracing::debug!(restaurant_id, count = rows.len(), "Alternative restaurants");
        Ok(rows)
    }

    pub fn by_category(&self, category: i32) -> Vec<RestaurantBasic> {
        let mut rows: Vec<RestaurantBasic> = self
            .restaurants
            .iter()
            .filter(|r| r.category.contains(&category))
            .map(|r| RestaurantBasic {
                id: r.id,
                name: r.name.clone(),
            })
            .collect();
        rows.sort_by_key(|r| r.id);
        rows
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

#[async_trait]
impl RestaurantDirectory for RestaurantCatalog {
    async fn exists(&self, restaurant_id: i64) -> AppResult<bool> {
        Ok(self.restaurants.contains_key(&restaurant_id))
    }

    async fn get_basic(&self, restaurant_id: i64) -> AppResult<Option<RestaurantBasic>> {
        Ok(self.restaurants.get(&restaurant_id).map(|r| RestaurantBasic {
            id: r.id,
            name: r.name.clone(),
        }))
    }

    async fn update_star_avg(
        &self,
        restaurant_id: i64,
        star_avg: Decimal,
        revision: u64,
    ) -> AppResult<()> {
        let mut restaurant = self.restaurants.get_mut(&restaurant_id).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant with ID {restaurant_id} not found"),
            )
        })?;
        if revision <= restaurant.star_revision {
            tracing::debug!(
                restaurant_id,
                revision,
                current = restaurant.star_revision,
                "Ignoring stale star average"
            );
            return Ok(());
        }
        restaurant.star_avg = star_avg;
        restaurant.star_revision = revision;
        restaurant.updated_at = now_millis();
        Ok(())
    }
}

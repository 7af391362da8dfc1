//! Restaurant Model

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 营业时间 (operating hours)
///
/// `day_of_week` uses 0 = Monday .. 6 = Sunday; an empty list means every day.
/// When `end_time < start_time` the window wraps past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub is_24_hours: bool,
    #[serde(default)]
    pub day_of_week: Vec<u8>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub etc_reason: Option<String>,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            is_24_hours: true,
            day_of_week: Vec::new(),
            start_time: None,
            end_time: None,
            etc_reason: None,
        }
    }
}

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub category: Vec<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    /// Mean star rating, published by the rating ledger
    pub star_avg: Decimal,
    /// Ledger revision of `star_avg` (older publishes are ignored)
    #[serde(skip)]
    pub star_revision: u64,
    pub images: Vec<String>,
    #[serde(flatten)]
    pub hours: OperatingHours,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub category: Vec<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub hours: Option<OperatingHours>,
}

/// Minimal restaurant view consumed by the waitlist core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantBasic {
    pub id: i64,
    pub name: String,
}

/// Filtered search request (name / categories / location)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<i32>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Nearby search result row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyRestaurant {
    pub id: i64,
    pub category: Vec<i32>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Alternative recommendation row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeRestaurant {
    pub id: i64,
    pub name: String,
    pub category: Vec<i32>,
    #[serde(flatten)]
    pub hours: OperatingHours,
    /// Distance from the source restaurant in metres (2 dp)
    pub distance_m: f64,
}

//! 时间工具函数: 营业时区与营业时间判断

use chrono::{Datelike, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use shared::models::OperatingHours;

use crate::core::{ServiceError, ServiceResult};

/// 当前营业时区的本地时间
pub fn local_now(tz: Tz) -> NaiveDateTime {
    chrono::Utc::now().with_timezone(&tz).naive_local()
}

/// 判断某一本地时间是否在营业时间内
///
/// - 24 小时营业: 总是营业
/// - `day_of_week` 非空时必须包含当天 (0 = 周一)
/// - `start_time <= t <= end_time`；`end < start` 表示跨过午夜
pub fn is_open_at(hours: &OperatingHours, at: NaiveDateTime) -> bool {
    if hours.is_24_hours {
        return true;
    }
    let weekday = at.weekday().num_days_from_monday() as u8;
    if !hours.day_of_week.is_empty() && !hours.day_of_week.contains(&weekday) {
        return false;
    }
    let (Some(start), Some(end)) = (hours.start_time, hours.end_time) else {
        return false;
    };
    within_window(at.time(), start, end)
}

fn within_window(t: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        start <= t && t <= end
    } else {
        t >= start || t <= end
    }
}

/// 校验营业时间设置
pub fn validate_operating_hours(hours: &OperatingHours) -> ServiceResult<()> {
    if let Some(day) = hours.day_of_week.iter().find(|d| **d > 6) {
        return Err(ServiceError::InvalidInput(format!(
            "day_of_week must be 0..=6, got {day}"
        )));
    }
    if !hours.is_24_hours && (hours.start_time.is_none() || hours.end_time.is_none()) {
        return Err(ServiceError::InvalidInput(
            "start_time and end_time are required unless open 24 hours".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hours(start: (u32, u32), end: (u32, u32), days: Vec<u8>) -> OperatingHours {
        OperatingHours {
            is_24_hours: false,
            day_of_week: days,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0),
            etc_reason: None,
        }
    }

    // 2026-10-19 is a Monday
    fn monday_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_24_hours_always_open() {
        assert!(is_open_at(&OperatingHours::default(), monday_at(3, 0)));
    }

    #[test]
    fn test_daytime_window() {
        let h = hours((11, 0), (21, 0), vec![]);
        assert!(is_open_at(&h, monday_at(11, 0)));
        assert!(is_open_at(&h, monday_at(21, 0)));
        assert!(!is_open_at(&h, monday_at(10, 59)));
        assert!(!is_open_at(&h, monday_at(21, 1)));
    }

    #[test]
    fn test_overnight_window() {
        let h = hours((18, 0), (2, 0), vec![]);
        assert!(is_open_at(&h, monday_at(23, 30)));
        assert!(is_open_at(&h, monday_at(1, 0)));
        assert!(!is_open_at(&h, monday_at(12, 0)));
    }

    #[test]
    fn test_day_of_week_filter() {
        let weekend_only = hours((0, 0), (23, 59), vec![5, 6]);
        assert!(!is_open_at(&weekend_only, monday_at(12, 0)));
        let monday = hours((0, 0), (23, 59), vec![0]);
        assert!(is_open_at(&monday, monday_at(12, 0)));
    }

    #[test]
    fn test_validate_operating_hours() {
        assert!(validate_operating_hours(&OperatingHours::default()).is_ok());
        assert!(validate_operating_hours(&hours((9, 0), (18, 0), vec![0, 6])).is_ok());
        assert!(validate_operating_hours(&hours((9, 0), (18, 0), vec![7])).is_err());

        let missing = OperatingHours {
            is_24_hours: false,
            ..OperatingHours::default()
        };
        assert!(validate_operating_hours(&missing).is_err());
    }
}

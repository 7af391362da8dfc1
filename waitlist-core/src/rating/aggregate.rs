use rust_decimal::prelude::*;

/// Running star sum/count of one restaurant
///
/// Only mutated through the three `apply_*` deltas; `mean` is derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingAggregate {
    sum: Decimal,
    count: u64,
}

impl RatingAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sum(&self) -> Decimal {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn apply_new(&mut self, stars: i32) {
        self.sum += Decimal::from(stars);
        self.count += 1;
    }

    pub fn apply_edited(&mut self, old_stars: i32, new_stars: i32) {
        self.sum += Decimal::from(new_stars) - Decimal::from(old_stars);
    }

    /// Floors at 0/0; an empty aggregate always has a zero sum
    pub fn apply_removed(&mut self, stars: i32) {
        if self.count <= 1 {
            if self.count == 0 {
                tracing::warn!(stars, "Removing a review from an empty rating aggregate");
            }
            self.sum = Decimal::ZERO;
            self.count = 0;
            return;
        }
        self.sum = (self.sum - Decimal::from(stars)).max(Decimal::ZERO);
        self.count -= 1;
    }

    /// sum / count rounded half away from zero, 0 when there are no reviews
    pub fn mean(&self, decimal_places: u32) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        (self.sum / Decimal::from(self.count))
            .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_follows_deltas() {
        let mut agg = RatingAggregate::new();
        for stars in [5, 3, 4] {
            agg.apply_new(stars);
        }
        assert_eq!(agg.mean(2), Decimal::new(400, 2));

        agg.apply_edited(3, 5);
        assert_eq!(agg.count(), 3);
        assert_eq!(agg.mean(2), Decimal::new(467, 2));

        agg.apply_removed(4);
        assert_eq!(agg.count(), 2);
        assert_eq!(agg.mean(2), Decimal::new(500, 2));
    }

    #[test]
    fn test_empty_mean_is_zero() {
        assert_eq!(RatingAggregate::new().mean(2), Decimal::ZERO);
    }

    #[test]
    fn test_remove_floors_at_zero() {
        let mut agg = RatingAggregate::new();
        agg.apply_removed(3);
        assert_eq!((agg.sum(), agg.count()), (Decimal::ZERO, 0));

        agg.apply_new(4);
        agg.apply_removed(2);
        assert_eq!((agg.sum(), agg.count()), (Decimal::ZERO, 0));
    }

    #[test]
    fn test_edit_with_extreme_stars_does_not_overflow() {
        let mut agg = RatingAggregate::new();
        agg.apply_new(i32::MIN);
        agg.apply_edited(i32::MIN, i32::MAX);
        assert_eq!(agg.sum(), Decimal::from(i32::MAX));
        assert_eq!(agg.count(), 1);
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        let mut agg = RatingAggregate::new();
        // 9 / 8 = 1.125
        for stars in [1, 1, 1, 1, 1, 1, 1, 2] {
            agg.apply_new(stars);
        }
        assert_eq!(agg.mean(2), Decimal::new(113, 2));
        assert_eq!(agg.mean(1), Decimal::new(11, 1));
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slope rating of a course of standard difficulty.
pub const NEUTRAL_SLOPE: Decimal = dec!(113);

/// Rating data for the tees a round is played from.
///
/// Values are supplied by the course or the user and are not range
/// checked here.
///
/// # Examples
///
/// ```
/// use golf_settle::core::course::CourseRating;
/// use rust_decimal_macros::dec;
///
/// let tees = CourseRating::new(dec!(125), dec!(71.4), 72);
/// assert_eq!(tees.rating_over_par(), dec!(-0.6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseRating {
    pub slope_rating: Decimal,
    pub course_rating: Decimal,
    pub par: i32,
}

impl CourseRating {
    pub fn new(slope_rating: Decimal, course_rating: Decimal, par: i32) -> Self {
        Self {
            slope_rating,
            course_rating,
            par,
        }
    }

    /// A neutral course: slope 113 and a rating equal to par.
    pub fn neutral(par: i32) -> Self {
        Self::new(NEUTRAL_SLOPE, Decimal::from(par), par)
    }

    pub fn rating_over_par(&self) -> Decimal {
        self.course_rating - Decimal::from(self.par)
    }
}

impl fmt::Display for CourseRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slope {} / rating {} / par {}",
            self.slope_rating, self.course_rating, self.par
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_course() {
        let course = CourseRating::neutral(72);
        assert_eq!(course.slope_rating, dec!(113));
        assert_eq!(course.rating_over_par(), Decimal::ZERO);
    }

    #[test]
    fn test_course_display() {
        let course = CourseRating::new(dec!(131), dec!(73.2), 72);
        assert_eq!(course.to_string(), "slope 131 / rating 73.2 / par 72");
    }
}

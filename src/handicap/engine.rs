use crate::core::course::{CourseRating, NEUTRAL_SLOPE};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a head-to-head matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => f.write_str("A"),
            Player::B => f.write_str("B"),
        }
    }
}

/// Strokes one player receives from the other on a given course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeAllocation {
    pub course_handicap_a: i32,
    pub course_handicap_b: i32,
    /// Absolute difference of the two course handicaps.
    pub strokes_given: u32,
    /// The side with the larger course handicap. A on a tie.
    pub higher_handicap_player: Player,
}

impl StrokeAllocation {
    /// The player who receives strokes, or `None` for an even match.
    ///
    /// Unlike `higher_handicap_player` this does not name a side when the
    /// course handicaps are equal.
    pub fn receiving_player(&self) -> Option<Player> {
        if self.strokes_given == 0 {
            None
        } else {
            Some(self.higher_handicap_player)
        }
    }

    pub fn is_even(&self) -> bool {
        self.strokes_given == 0
    }
}

impl fmt::Display for StrokeAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.receiving_player() {
            None => write!(f, "Even match - no strokes given"),
            Some(side) => write!(
                f,
                "Player {} gets {} {}",
                side,
                self.strokes_given,
                if self.strokes_given == 1 { "stroke" } else { "strokes" }
            ),
        }
    }
}

/// Course handicap and stroke allocation arithmetic.
///
/// Pure functions with no state: safe to call from any thread, any
/// number of times.
pub struct HandicapEngine;

impl HandicapEngine {
    /// Convert a handicap index into a course handicap.
    ///
    /// `round(index × slope / 113 + (course_rating − par))`, with halves
    /// rounded away from zero. Negative results are returned as is; an
    /// out-of-range result saturates at the `i32` bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use golf_settle::handicap::engine::HandicapEngine;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(HandicapEngine::course_handicap(dec!(10), dec!(113), dec!(72), 72), 10);
    /// assert_eq!(HandicapEngine::course_handicap(dec!(12.4), dec!(131), dec!(73.2), 72), 16);
    /// ```
    pub fn course_handicap(
        handicap_index: Decimal,
        slope_rating: Decimal,
        course_rating: Decimal,
        par: i32,
    ) -> i32 {
        // Multiply before dividing so a neutral slope passes the index through exactly.
        let playing = handicap_index
            .checked_mul(slope_rating)
            .and_then(|scaled| scaled.checked_div(NEUTRAL_SLOPE));
        let adjustment = course_rating.checked_sub(Decimal::from(par));

        match (playing, adjustment) {
            (Some(playing), Some(adjustment)) => match playing.checked_add(adjustment) {
                Some(value) => saturating_i32(
                    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
                ),
                // An overflowing sum has the sign of both operands.
                None => saturate(playing.is_sign_negative()),
            },
            (None, _) => {
                saturate(handicap_index.is_sign_negative() != slope_rating.is_sign_negative())
            }
            (_, None) => saturate(course_rating.is_sign_negative()),
        }
    }

    /// [`course_handicap`](Self::course_handicap) for a [`CourseRating`].
    pub fn course_handicap_for(handicap_index: Decimal, course: &CourseRating) -> i32 {
        Self::course_handicap(
            handicap_index,
            course.slope_rating,
            course.course_rating,
            course.par,
        )
    }

    /// Strokes given between two players on the same tees.
    ///
    /// Both indexes are converted to course handicaps first; the strokes
    /// given are the difference of the rounded values.
    pub fn strokes_given(
        index_a: Decimal,
        index_b: Decimal,
        slope_rating: Decimal,
        course_rating: Decimal,
        par: i32,
    ) -> StrokeAllocation {
        let course_handicap_a = Self::course_handicap(index_a, slope_rating, course_rating, par);
        let course_handicap_b = Self::course_handicap(index_b, slope_rating, course_rating, par);
        let diff = i64::from(course_handicap_a) - i64::from(course_handicap_b);

        StrokeAllocation {
            course_handicap_a,
            course_handicap_b,
            strokes_given: u32::try_from(diff.unsigned_abs()).unwrap_or(u32::MAX),
            higher_handicap_player: if diff >= 0 { Player::A } else { Player::B },
        }
    }

    /// [`strokes_given`](Self::strokes_given) for a [`CourseRating`].
    pub fn strokes_given_for(
        index_a: Decimal,
        index_b: Decimal,
        course: &CourseRating,
    ) -> StrokeAllocation {
        Self::strokes_given(
            index_a,
            index_b,
            course.slope_rating,
            course.course_rating,
            course.par,
        )
    }
}

fn saturating_i32(value: Decimal) -> i32 {
    value
        .to_i32()
        .unwrap_or_else(|| saturate(value.is_sign_negative()))
}

fn saturate(negative: bool) -> i32 {
    if negative {
        i32::MIN
    } else {
        i32::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_neutral_course_passes_index_through() {
        assert_eq!(
            HandicapEngine::course_handicap(dec!(10), dec!(113), dec!(72), 72),
            10
        );
    }

    #[test]
    fn test_out_of_range_index_saturates() {
        assert_eq!(
            HandicapEngine::course_handicap(Decimal::MAX, dec!(155), dec!(72), 72),
            i32::MAX
        );
        assert_eq!(
            HandicapEngine::course_handicap(Decimal::MIN, dec!(155), dec!(72), 72),
            i32::MIN
        );
        // Representable as a Decimal, too large for i32.
        assert_eq!(
            HandicapEngine::course_handicap(Decimal::from(10_000_000_000i64), dec!(113), dec!(72), 72),
            i32::MAX
        );
        assert_eq!(
            HandicapEngine::course_handicap(Decimal::from(-10_000_000_000i64), dec!(113), dec!(72), 72),
            i32::MIN
        );
    }

    #[test]
    fn test_out_of_range_rating_saturates() {
        assert_eq!(
            HandicapEngine::course_handicap(dec!(10), dec!(113), Decimal::MIN, 72),
            i32::MIN
        );
        assert_eq!(
            HandicapEngine::course_handicap(dec!(10), dec!(113), Decimal::MAX, -72),
            i32::MAX
        );
        // Playing handicap and rating offset each fit, their sum does not.
        assert_eq!(
            HandicapEngine::course_handicap(
                Decimal::MAX / dec!(200),
                dec!(113),
                Decimal::MAX - dec!(100),
                0
            ),
            i32::MAX
        );
    }

    #[test]
    fn test_saturated_handicaps_still_allocate_strokes() {
        let alloc = HandicapEngine::strokes_given(Decimal::MAX, Decimal::MIN, dec!(155), dec!(72), 72);
        assert_eq!(alloc.course_handicap_a, i32::MAX);
        assert_eq!(alloc.course_handicap_b, i32::MIN);
        assert_eq!(alloc.strokes_given, u32::MAX);
        assert_eq!(alloc.higher_handicap_player, Player::A);
    }

    #[test]
    fn test_slope_and_rating_adjustment() {
        // 12.4 * 131 / 113 = 14.375..., + 1.2 = 15.575...
        assert_eq!(
            HandicapEngine::course_handicap(dec!(12.4), dec!(131), dec!(73.2), 72),
            16
        );
        // 8.2 * 125 / 113 = 9.070..., - 0.6 = 8.470...
        assert_eq!(
            HandicapEngine::course_handicap(dec!(8.2), dec!(125), dec!(71.4), 72),
            8
        );
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(
            HandicapEngine::course_handicap(dec!(10.5), dec!(113), dec!(72), 72),
            11
        );
        assert_eq!(
            HandicapEngine::course_handicap(dec!(-2.5), dec!(113), dec!(72), 72),
            -3
        );
    }

    #[test]
    fn test_negative_course_handicap_not_clamped() {
        // Plus-handicap player on an easy course.
        assert_eq!(
            HandicapEngine::course_handicap(dec!(-1.0), dec!(113), dec!(69.5), 72),
            -4
        );
    }

    #[test]
    fn test_course_handicap_for_matches_explicit_form() {
        let course = CourseRating::new(dec!(128), dec!(72.1), 72);
        assert_eq!(
            HandicapEngine::course_handicap_for(dec!(18.3), &course),
            HandicapEngine::course_handicap(dec!(18.3), dec!(128), dec!(72.1), 72)
        );
    }

    #[test]
    fn test_strokes_given_a_higher() {
        let alloc = HandicapEngine::strokes_given(dec!(15.1), dec!(5.8), dec!(113), dec!(72), 72);
        assert_eq!(alloc.course_handicap_a, 15);
        assert_eq!(alloc.course_handicap_b, 6);
        assert_eq!(alloc.strokes_given, 9);
        assert_eq!(alloc.higher_handicap_player, Player::A);
        assert_eq!(alloc.to_string(), "Player A gets 9 strokes");
    }

    #[test]
    fn test_strokes_given_b_higher() {
        let alloc = HandicapEngine::strokes_given(dec!(5.8), dec!(15.1), dec!(113), dec!(72), 72);
        assert_eq!(alloc.strokes_given, 9);
        assert_eq!(alloc.higher_handicap_player, Player::B);
        assert_eq!(alloc.receiving_player(), Some(Player::B));
    }

    #[test]
    fn test_equal_handicaps_tag_a_but_receive_nothing() {
        let alloc = HandicapEngine::strokes_given(dec!(10.2), dec!(9.8), dec!(113), dec!(72), 72);
        assert_eq!(alloc.strokes_given, 0);
        assert_eq!(alloc.higher_handicap_player, Player::A);
        assert_eq!(alloc.receiving_player(), None);
        assert!(alloc.is_even());
        assert_eq!(alloc.to_string(), "Even match - no strokes given");
    }

    #[test]
    fn test_single_stroke_wording() {
        let alloc = HandicapEngine::strokes_given(dec!(11), dec!(10), dec!(113), dec!(72), 72);
        assert_eq!(alloc.to_string(), "Player A gets 1 stroke");
    }
}

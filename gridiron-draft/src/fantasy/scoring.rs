// Fixed-weight PPR fantasy scoring.
//
// 1 pt per 25 passing yards, 4 per passing TD, 1 per 10 rushing or receiving
// yards, 6 per rushing or receiving TD, 1 per reception, -2 per interception
// or lost fumble.

use super::stats::{or_zero, PlayerSeasonStat};

pub const PASSING_YARDS_PER_POINT: f64 = 25.0;
pub const PASSING_TD_POINTS: f64 = 4.0;
pub const RUSHING_YARDS_PER_POINT: f64 = 10.0;
pub const RUSHING_TD_POINTS: f64 = 6.0;
pub const RECEIVING_YARDS_PER_POINT: f64 = 10.0;
pub const RECEIVING_TD_POINTS: f64 = 6.0;
pub const RECEPTION_POINTS: f64 = 1.0;
pub const TURNOVER_PENALTY: f64 = 2.0;

/// Fantasy points for a season stat line, rounded to hundredths.
///
/// Missing fields count as zero. Values are taken as-is: negative or
/// implausible totals are not clamped.
pub fn compute_fantasy_points(stat: &PlayerSeasonStat) -> f64 {
    round_to_hundredths(unrounded_points(stat))
}

fn unrounded_points(stat: &PlayerSeasonStat) -> f64 {
    or_zero(stat.passing_yards) / PASSING_YARDS_PER_POINT
        + or_zero(stat.passing_touchdowns) * PASSING_TD_POINTS
        + or_zero(stat.rushing_yards) / RUSHING_YARDS_PER_POINT
        + or_zero(stat.rushing_touchdowns) * RUSHING_TD_POINTS
        + or_zero(stat.receiving_yards) / RECEIVING_YARDS_PER_POINT
        + or_zero(stat.receiving_touchdowns) * RECEIVING_TD_POINTS
        + or_zero(stat.receptions) * RECEPTION_POINTS
        - or_zero(stat.passing_interceptions) * TURNOVER_PENALTY
        - or_zero(stat.fumbles_lost) * TURNOVER_PENALTY
}

/// Round to two decimals: scale by 100, round half away from zero, scale back.
///
/// The tie rule applies to the binary value after scaling, so a total whose
/// decimal spelling ends in 5 at the third place but is stored slightly
/// below it rounds down. Negative zero is normalised to `0.0`.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Format a point total with exactly two decimals (e.g. `18.00`).
pub fn format_points(points: f64) -> String {
    format!("{points:.2}")
}

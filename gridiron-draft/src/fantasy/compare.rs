// Head-to-head stat comparison between two players.

use super::stats::{scored_stats, PlayerSeasonStat, ScoredStat, StatCategory};

/// Result of one category comparison, from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner,
    Loser,
    Neutral,
}

/// Which direction of a raw value is favorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// Label fragments marking a stat where fewer is better (turnovers).
const LOWER_IS_BETTER_MARKERS: [&str; 2] = ["Int", "Fum"];

impl Polarity {
    /// Polarity of a stat label: labels mentioning interceptions or fumbles
    /// are lower-is-better, everything else higher-is-better.
    pub fn for_label(label: &str) -> Self {
        if LOWER_IS_BETTER_MARKERS
            .iter()
            .any(|marker| label.contains(marker))
        {
            Polarity::LowerIsBetter
        } else {
            Polarity::HigherIsBetter
        }
    }
}

impl StatCategory {
    pub fn polarity(self) -> Polarity {
        Polarity::for_label(self.label())
    }
}

/// Compare two raw values under a polarity. Returns `(outcome_a, outcome_b)`.
///
/// Equal values, and values that do not order (NaN), are neutral for both.
pub fn compare_values(polarity: Polarity, a: f64, b: f64) -> (Outcome, Outcome) {
    let a_better = match polarity {
        Polarity::HigherIsBetter => a > b,
        Polarity::LowerIsBetter => a < b,
    };
    let b_better = match polarity {
        Polarity::HigherIsBetter => b > a,
        Polarity::LowerIsBetter => b < a,
    };

    if a_better {
        (Outcome::Winner, Outcome::Loser)
    } else if b_better {
        (Outcome::Loser, Outcome::Winner)
    } else {
        (Outcome::Neutral, Outcome::Neutral)
    }
}

/// Compare two players on a single tracked category.
pub fn compare_stat(
    category: StatCategory,
    a: &PlayerSeasonStat,
    b: &PlayerSeasonStat,
) -> (Outcome, Outcome) {
    compare_values(
        category.polarity(),
        category.raw_value(a),
        category.raw_value(b),
    )
}

/// A tracked stat row tagged with its head-to-head outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparedStat {
    pub stat: ScoredStat,
    pub outcome: Outcome,
}

/// Build the comparison rows for `player` against an optional opponent.
///
/// Without an opponent every row is neutral. Rows follow the tracked
/// category order, so rows of two players pair up positionally.
pub fn compare_against(
    player: &PlayerSeasonStat,
    opponent: Option<&PlayerSeasonStat>,
) -> Vec<ComparedStat> {
    scored_stats(player)
        .into_iter()
        .map(|stat| {
            let outcome = match opponent {
                Some(opp) => compare_stat(stat.category, player, opp).0,
                None => Outcome::Neutral,
            };
            ComparedStat { stat, outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i64) -> PlayerSeasonStat {
        PlayerSeasonStat {
            player_id: id,
            name: Some(format!("Player {id}")),
            ..Default::default()
        }
    }

    #[test]
    fn polarity_from_labels() {
        assert_eq!(Polarity::for_label("Pass Int"), Polarity::LowerIsBetter);
        assert_eq!(Polarity::for_label("Fumbles"), Polarity::LowerIsBetter);
        assert_eq!(Polarity::for_label("Rush Yds"), Polarity::HigherIsBetter);
        assert_eq!(Polarity::for_label("Pass TD"), Polarity::HigherIsBetter);
    }

    #[test]
    fn only_interceptions_are_lower_is_better_among_tracked() {
        let lower: Vec<_> = StatCategory::TRACKED
            .into_iter()
            .filter(|c| c.polarity() == Polarity::LowerIsBetter)
            .collect();
        assert_eq!(lower, vec![StatCategory::PassInterceptions]);
    }

    #[test]
    fn higher_rush_yards_wins() {
        let a = PlayerSeasonStat {
            rushing_yards: Some(900.0),
            ..player(1)
        };
        let b = PlayerSeasonStat {
            rushing_yards: Some(450.0),
            ..player(2)
        };
        assert_eq!(
            compare_stat(StatCategory::RushYards, &a, &b),
            (Outcome::Winner, Outcome::Loser)
        );
        assert_eq!(
            compare_stat(StatCategory::RushYards, &b, &a),
            (Outcome::Loser, Outcome::Winner)
        );
    }

    #[test]
    fn fewer_interceptions_wins() {
        let a = PlayerSeasonStat {
            passing_interceptions: Some(5.0),
            ..player(1)
        };
        let b = PlayerSeasonStat {
            passing_interceptions: Some(14.0),
            ..player(2)
        };
        assert_eq!(
            compare_stat(StatCategory::PassInterceptions, &a, &b),
            (Outcome::Winner, Outcome::Loser)
        );
    }

    #[test]
    fn equal_values_are_neutral_in_every_category() {
        let a = PlayerSeasonStat {
            passing_yards: Some(300.0),
            passing_interceptions: Some(2.0),
            ..player(1)
        };
        let b = PlayerSeasonStat {
            player_id: 2,
            ..a.clone()
        };
        for category in StatCategory::TRACKED {
            assert_eq!(
                compare_stat(category, &a, &b),
                (Outcome::Neutral, Outcome::Neutral),
                "{}",
                category.label()
            );
        }
    }

    #[test]
    fn missing_value_compares_as_zero() {
        let a = PlayerSeasonStat {
            receiving_touchdowns: Some(1.0),
            ..player(1)
        };
        let b = player(2);
        assert_eq!(
            compare_stat(StatCategory::RecTouchdowns, &a, &b),
            (Outcome::Winner, Outcome::Loser)
        );
        // Missing interceptions beat any positive count.
        let c = PlayerSeasonStat {
            passing_interceptions: Some(1.0),
            ..player(3)
        };
        assert_eq!(
            compare_stat(StatCategory::PassInterceptions, &b, &c),
            (Outcome::Winner, Outcome::Loser)
        );
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(
            compare_values(Polarity::HigherIsBetter, f64::NAN, 1.0),
            (Outcome::Neutral, Outcome::Neutral)
        );
    }

    #[test]
    fn compare_against_is_antisymmetric() {
        let a = PlayerSeasonStat {
            passing_yards: Some(4000.0),
            passing_interceptions: Some(10.0),
            rushing_yards: Some(200.0),
            ..player(1)
        };
        let b = PlayerSeasonStat {
            passing_yards: Some(3500.0),
            passing_interceptions: Some(8.0),
            rushing_yards: Some(200.0),
            receiving_yards: Some(15.0),
            ..player(2)
        };

        let rows_a = compare_against(&a, Some(&b));
        let rows_b = compare_against(&b, Some(&a));
        assert_eq!(rows_a.len(), rows_b.len());

        for (ra, rb) in rows_a.iter().zip(&rows_b) {
            assert_eq!(ra.stat.label, rb.stat.label);
            let expected_b = match ra.outcome {
                Outcome::Winner => Outcome::Loser,
                Outcome::Loser => Outcome::Winner,
                Outcome::Neutral => Outcome::Neutral,
            };
            assert_eq!(rb.outcome, expected_b, "{}", ra.stat.label);
        }

        assert_eq!(rows_a[0].outcome, Outcome::Winner); // Pass Yds
        assert_eq!(rows_a[2].outcome, Outcome::Loser); // Pass Int
        assert_eq!(rows_a[3].outcome, Outcome::Neutral); // Rush Yds
        assert_eq!(rows_a[5].outcome, Outcome::Loser); // Rec Yds
    }

    #[test]
    fn no_opponent_means_all_neutral() {
        let a = PlayerSeasonStat {
            passing_yards: Some(4000.0),
            ..player(1)
        };
        let rows = compare_against(&a, None);
        assert_eq!(rows.len(), StatCategory::TRACKED.len());
        assert!(rows.iter().all(|r| r.outcome == Outcome::Neutral));
    }
}

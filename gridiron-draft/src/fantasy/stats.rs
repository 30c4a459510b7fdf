// Player season stat records (upstream JSON shape) and the tracked stat
// categories shown on player cards and in head-to-head comparisons.

use serde::Deserialize;

/// Upstream player identifier (`PlayerID`).
pub type PlayerId = i64;

/// One player's season totals as served by the stats provider.
///
/// Only the fields the scoring engine and the renderer need are modelled;
/// everything else in the upstream payload is ignored. Every numeric field
/// may be missing or `null` upstream and reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerSeasonStat {
    #[serde(rename = "PlayerID")]
    pub player_id: PlayerId,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "Team", default)]
    pub team: Option<String>,

    #[serde(rename = "Position", default)]
    pub position: Option<String>,

    #[serde(rename = "PassingYards", default)]
    pub passing_yards: Option<f64>,

    #[serde(rename = "PassingTouchdowns", default)]
    pub passing_touchdowns: Option<f64>,

    #[serde(rename = "PassingInterceptions", default)]
    pub passing_interceptions: Option<f64>,

    #[serde(rename = "RushingYards", default)]
    pub rushing_yards: Option<f64>,

    #[serde(rename = "RushingTouchdowns", default)]
    pub rushing_touchdowns: Option<f64>,

    #[serde(rename = "ReceivingYards", default)]
    pub receiving_yards: Option<f64>,

    #[serde(rename = "ReceivingTouchdowns", default)]
    pub receiving_touchdowns: Option<f64>,

    #[serde(rename = "Receptions", default)]
    pub receptions: Option<f64>,

    #[serde(rename = "FumblesLost", default)]
    pub fumbles_lost: Option<f64>,
}

impl PlayerSeasonStat {
    /// Display name, `Unknown` when the provider sent none or a blank one.
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or("Unknown")
    }

    /// Team abbreviation, `FA` for free agents.
    pub fn display_team(&self) -> &str {
        non_empty(self.team.as_deref()).unwrap_or("FA")
    }

    pub fn display_position(&self) -> &str {
        non_empty(self.position.as_deref()).unwrap_or("N/A")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Read an optional season total, treating missing values as zero.
pub(crate) fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tracked categories
// ---------------------------------------------------------------------------

/// Stat categories shown on cards and compared head to head.
///
/// Receptions and fumbles count toward fantasy points but are not part of
/// the tracked set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    PassYards,
    PassTouchdowns,
    PassInterceptions,
    RushYards,
    RushTouchdowns,
    RecYards,
    RecTouchdowns,
}

impl StatCategory {
    /// Every tracked category, in display order.
    pub const TRACKED: [StatCategory; 7] = [
        StatCategory::PassYards,
        StatCategory::PassTouchdowns,
        StatCategory::PassInterceptions,
        StatCategory::RushYards,
        StatCategory::RushTouchdowns,
        StatCategory::RecYards,
        StatCategory::RecTouchdowns,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatCategory::PassYards => "Pass Yds",
            StatCategory::PassTouchdowns => "Pass TD",
            StatCategory::PassInterceptions => "Pass Int",
            StatCategory::RushYards => "Rush Yds",
            StatCategory::RushTouchdowns => "Rush TD",
            StatCategory::RecYards => "Rec Yds",
            StatCategory::RecTouchdowns => "Rec TD",
        }
    }

    /// The player's raw season total for this category (missing reads as 0).
    pub fn raw_value(self, player: &PlayerSeasonStat) -> f64 {
        let value = match self {
            StatCategory::PassYards => player.passing_yards,
            StatCategory::PassTouchdowns => player.passing_touchdowns,
            StatCategory::PassInterceptions => player.passing_interceptions,
            StatCategory::RushYards => player.rushing_yards,
            StatCategory::RushTouchdowns => player.rushing_touchdowns,
            StatCategory::RecYards => player.receiving_yards,
            StatCategory::RecTouchdowns => player.receiving_touchdowns,
        };
        or_zero(value)
    }
}

/// A single tracked stat for one player, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredStat {
    pub category: StatCategory,
    pub label: &'static str,
    pub display_value: String,
    pub raw_value: f64,
}

impl ScoredStat {
    pub fn new(category: StatCategory, player: &PlayerSeasonStat) -> Self {
        let raw_value = category.raw_value(player);
        ScoredStat {
            category,
            label: category.label(),
            display_value: raw_value.to_string(),
            raw_value,
        }
    }
}

/// Build the tracked stat list for a player, in display order.
pub fn scored_stats(player: &PlayerSeasonStat) -> Vec<ScoredStat> {
    StatCategory::TRACKED
        .into_iter()
        .map(|category| ScoredStat::new(category, player))
        .collect()
}

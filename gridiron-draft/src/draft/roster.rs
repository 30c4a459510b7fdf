// Drafted roster: the user's unbounded, deduplicated set of drafted players.

use thiserror::Error;

use crate::fantasy::scoring::{compute_fantasy_points, format_points};
use crate::fantasy::stats::{PlayerId, PlayerSeasonStat};

/// Rejections from roster mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("{name} is already on your roster!")]
    Duplicate { player_id: PlayerId, name: String },
}

/// A drafted player with the points shown in the roster table.
#[derive(Debug, Clone, PartialEq)]
pub struct RosteredPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub team: String,
    pub fantasy_points: f64,
}

impl RosteredPlayer {
    fn from_stat(stat: &PlayerSeasonStat) -> Self {
        RosteredPlayer {
            player_id: stat.player_id,
            name: stat.display_name().to_string(),
            position: stat.display_position().to_string(),
            team: stat.display_team().to_string(),
            fantasy_points: compute_fantasy_points(stat),
        }
    }
}

/// The user's drafted players, in draft order.
///
/// Stat lines are stored as drafted; the total is recomputed from them on
/// every query and never kept as a running sum.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<PlayerSeasonStat>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft a player. A player already on the roster is rejected rather
    /// than added twice.
    pub fn add_player(&mut self, player: PlayerSeasonStat) -> Result<(), RosterError> {
        if self.has_player(player.player_id) {
            return Err(RosterError::Duplicate {
                player_id: player.player_id,
                name: player.display_name().to_string(),
            });
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove a player by ID. Returns the removed stat line, or `None` when
    /// the player was not on the roster (a no-op).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Option<PlayerSeasonStat> {
        let idx = self.players.iter().position(|p| p.player_id == player_id)?;
        Some(self.players.remove(idx))
    }

    /// Whether a player is already on this roster.
    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|p| p.player_id == player_id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerSeasonStat] {
        &self.players
    }

    /// Table rows in draft order.
    pub fn entries(&self) -> Vec<RosteredPlayer> {
        self.players.iter().map(RosteredPlayer::from_stat).collect()
    }

    /// Sum of every member's fantasy points.
    pub fn total_points(&self) -> f64 {
        // Explicit +0.0 seed: an empty f64 `sum()` yields -0.0.
        self.players
            .iter()
            .fold(0.0, |total, p| total + compute_fantasy_points(p))
    }

    /// Total formatted with two decimals.
    pub fn total_display(&self) -> String {
        format_points(self.total_points())
    }
}

// Session state: the season's player list, the comparison slots, and the
// drafted roster, driven by explicit commands.
//
// Every command is a state transition that returns a `SessionUpdate`
// describing what changed, so callers can render or notify without reaching
// into the state themselves.

use tracing::{debug, info};

use super::roster::{Roster, RosterError};
use super::selection::{ComparisonSlots, SelectionChange};
use crate::fantasy::stats::{PlayerId, PlayerSeasonStat};

/// Description of what a session command changed.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// Blank search text; nothing happened.
    EmptyQuery,
    /// The session has no player data to search.
    NoData,
    /// Loading the season's players failed outright.
    FetchFailed,
    /// The master list was (re)loaded.
    PlayersLoaded { count: usize },
    NoMatches { query: String },
    SearchResults {
        query: String,
        players: Vec<PlayerSeasonStat>,
    },
    /// A player entered the comparison, possibly pushing out the oldest.
    ComparisonAdded {
        player: PlayerSeasonStat,
        evicted: Option<PlayerSeasonStat>,
    },
    AlreadyComparing { player_id: PlayerId },
    ComparisonCleared,
    Drafted { player: PlayerSeasonStat },
    DuplicateDraft(RosterError),
    Removed { player: PlayerSeasonStat },
    NotOnRoster { player_id: PlayerId },
    UnknownPlayer { player_id: PlayerId },
}

impl SessionUpdate {
    /// One-line status text for the update.
    pub fn status_message(&self) -> String {
        match self {
            SessionUpdate::EmptyQuery => "Enter a player name to search.".to_string(),
            SessionUpdate::NoData => {
                "Error: No data returned from API. Check key/season.".to_string()
            }
            SessionUpdate::FetchFailed => "System Error: Could not fetch stats.".to_string(),
            SessionUpdate::PlayersLoaded { count } => format!("Loaded {count} players."),
            SessionUpdate::NoMatches { .. } => "No players found with that name.".to_string(),
            SessionUpdate::SearchResults { players, .. } => {
                format!("Found {} player(s).", players.len())
            }
            SessionUpdate::ComparisonAdded { player, evicted } => match evicted {
                Some(old) => format!(
                    "Comparing {} (replaced {}).",
                    player.display_name(),
                    old.display_name()
                ),
                None => format!("Comparing {}.", player.display_name()),
            },
            SessionUpdate::AlreadyComparing { .. } => {
                "That player is already being compared.".to_string()
            }
            SessionUpdate::ComparisonCleared => "Comparison cleared.".to_string(),
            SessionUpdate::Drafted { player } => {
                format!("Added! {} joins your roster.", player.display_name())
            }
            SessionUpdate::DuplicateDraft(err) => err.to_string(),
            SessionUpdate::Removed { player } => {
                format!("Removed {} from your roster.", player.display_name())
            }
            SessionUpdate::NotOnRoster { player_id } => {
                format!("Player {player_id} is not on your roster.")
            }
            SessionUpdate::UnknownPlayer { player_id } => {
                format!("No player with ID {player_id}.")
            }
        }
    }

    /// Whether the comparison view needs redrawing after this update.
    pub fn comparison_changed(&self) -> bool {
        matches!(
            self,
            SessionUpdate::ComparisonAdded { .. } | SessionUpdate::ComparisonCleared
        )
    }

    /// Whether the roster table needs redrawing after this update.
    pub fn roster_changed(&self) -> bool {
        matches!(
            self,
            SessionUpdate::Drafted { .. } | SessionUpdate::Removed { .. }
        )
    }
}

/// Case-insensitive substring match on player names. Players without a
/// name never match.
pub fn filter_players_by_name<'a>(
    players: &'a [PlayerSeasonStat],
    search_term: &str,
) -> Vec<&'a PlayerSeasonStat> {
    let needle = search_term.to_lowercase();
    players
        .iter()
        .filter(|p| {
            p.name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// All per-session state, owned in one place.
#[derive(Debug, Clone, Default)]
pub struct Session {
    players: Vec<PlayerSeasonStat>,
    comparison: ComparisonSlots,
    roster: Roster,
}

impl Session {
    /// Start a session over a season's player list. The list is read-only
    /// for the life of the session.
    pub fn new(players: Vec<PlayerSeasonStat>) -> Self {
        info!("Session started with {} players", players.len());
        Session {
            players,
            comparison: ComparisonSlots::new(),
            roster: Roster::new(),
        }
    }

    pub fn players(&self) -> &[PlayerSeasonStat] {
        &self.players
    }

    pub fn comparison(&self) -> &ComparisonSlots {
        &self.comparison
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Swap in a freshly loaded master list. Comparison and roster keep
    /// their stat lines as selected.
    pub fn replace_players(&mut self, players: Vec<PlayerSeasonStat>) -> SessionUpdate {
        info!("Session master list replaced with {} players", players.len());
        self.players = players;
        SessionUpdate::PlayersLoaded {
            count: self.players.len(),
        }
    }

    pub fn find_player(&self, player_id: PlayerId) -> Option<&PlayerSeasonStat> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    pub fn search(&self, query: &str) -> SessionUpdate {
        let query = query.trim();
        if query.is_empty() {
            return SessionUpdate::EmptyQuery;
        }
        if self.players.is_empty() {
            return SessionUpdate::NoData;
        }

        let matches: Vec<PlayerSeasonStat> = filter_players_by_name(&self.players, query)
            .into_iter()
            .cloned()
            .collect();
        debug!("Search {:?} matched {} players", query, matches.len());

        if matches.is_empty() {
            SessionUpdate::NoMatches {
                query: query.to_string(),
            }
        } else {
            SessionUpdate::SearchResults {
                query: query.to_string(),
                players: matches,
            }
        }
    }

    pub fn select_for_comparison(&mut self, player_id: PlayerId) -> SessionUpdate {
        let Some(player) = self.find_player(player_id).cloned() else {
            return SessionUpdate::UnknownPlayer { player_id };
        };

        match self.comparison.add(player.clone()) {
            SelectionChange::AlreadySelected => SessionUpdate::AlreadyComparing { player_id },
            SelectionChange::Added => SessionUpdate::ComparisonAdded {
                player,
                evicted: None,
            },
            SelectionChange::Replaced { evicted } => SessionUpdate::ComparisonAdded {
                player,
                evicted: Some(evicted),
            },
        }
    }

    pub fn clear_comparison(&mut self) -> SessionUpdate {
        self.comparison.clear();
        SessionUpdate::ComparisonCleared
    }

    pub fn draft_player(&mut self, player_id: PlayerId) -> SessionUpdate {
        let Some(player) = self.find_player(player_id).cloned() else {
            return SessionUpdate::UnknownPlayer { player_id };
        };

        match self.roster.add_player(player.clone()) {
            Ok(()) => {
                info!("Drafted {} ({})", player.display_name(), player_id);
                SessionUpdate::Drafted { player }
            }
            Err(err) => SessionUpdate::DuplicateDraft(err),
        }
    }

    pub fn remove_player(&mut self, player_id: PlayerId) -> SessionUpdate {
        match self.roster.remove_player(player_id) {
            Some(player) => {
                info!("Removed {} ({})", player.display_name(), player_id);
                SessionUpdate::Removed { player }
            }
            None => SessionUpdate::NotOnRoster { player_id },
        }
    }
}

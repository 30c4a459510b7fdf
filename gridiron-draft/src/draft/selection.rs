// Comparison slots: the two-player working set for head-to-head comparison.

use std::collections::VecDeque;

use crate::fantasy::compare::{compare_against, ComparedStat};
use crate::fantasy::scoring::compute_fantasy_points;
use crate::fantasy::stats::{PlayerId, PlayerSeasonStat};

/// Maximum number of players compared at once.
pub const COMPARISON_CAPACITY: usize = 2;

/// What happened when a player was offered to the comparison slots.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    /// The player took a free slot.
    Added,
    /// The slots were full; the oldest player was dropped to make room.
    Replaced { evicted: PlayerSeasonStat },
    /// The player was already selected; nothing changed.
    AlreadySelected,
}

/// Bounded, insertion-ordered set of players selected for comparison.
///
/// Adding a third distinct player evicts the earliest-added one.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSlots {
    slots: VecDeque<PlayerSeasonStat>,
}

impl ComparisonSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a player to the comparison. Idempotent by player ID.
    pub fn add(&mut self, player: PlayerSeasonStat) -> SelectionChange {
        if self.contains(player.player_id) {
            return SelectionChange::AlreadySelected;
        }

        let evicted = if self.slots.len() >= COMPARISON_CAPACITY {
            self.slots.pop_front()
        } else {
            None
        };
        self.slots.push_back(player);

        match evicted {
            Some(evicted) => SelectionChange::Replaced { evicted },
            None => SelectionChange::Added,
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.slots.iter().any(|p| p.player_id == player_id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Selected players, oldest first.
    pub fn players(&self) -> impl Iterator<Item = &PlayerSeasonStat> {
        self.slots.iter()
    }

    /// The other selected player, if any, for the player at `index`.
    pub fn opponent_of(&self, index: usize) -> Option<&PlayerSeasonStat> {
        self.slots
            .iter()
            .enumerate()
            .find(|(i, _)| *i != index)
            .map(|(_, p)| p)
    }

    /// `Comparison Slots: N / 2`
    pub fn status_line(&self) -> String {
        format!(
            "Comparison Slots: {} / {}",
            self.slots.len(),
            COMPARISON_CAPACITY
        )
    }

    /// Selected names joined with ` vs `.
    pub fn names(&self) -> String {
        self.slots
            .iter()
            .map(|p| p.display_name())
            .collect::<Vec<_>>()
            .join(" vs ")
    }

    /// Build the comparison view for the current selection.
    pub fn comparison(&self) -> ComparisonView {
        if self.slots.is_empty() {
            return ComparisonView::NoPlayersSelected;
        }

        let cards = self
            .slots
            .iter()
            .enumerate()
            .map(|(index, player)| ComparisonCard {
                player: player.clone(),
                fantasy_points: compute_fantasy_points(player),
                rows: compare_against(player, self.opponent_of(index)),
            })
            .collect();

        ComparisonView::Cards(cards)
    }
}

/// One selected player's side of the comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonCard {
    pub player: PlayerSeasonStat,
    pub fantasy_points: f64,
    pub rows: Vec<ComparedStat>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonView {
    NoPlayersSelected,
    Cards(Vec<ComparisonCard>),
}

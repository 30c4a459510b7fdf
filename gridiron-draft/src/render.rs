// Plain-text rendering of cards, the comparison view, and the roster.

use crate::draft::roster::Roster;
use crate::draft::selection::{ComparisonSlots, ComparisonView};
use crate::fantasy::compare::{ComparedStat, Outcome};
use crate::fantasy::scoring::{compute_fantasy_points, format_points};
use crate::fantasy::stats::{scored_stats, PlayerSeasonStat};

pub const HELP_TEXT: &str = "\
Commands:
  search <name>     find players by name
  compare <id>      add a player to the comparison (max 2)
  clear             clear the comparison
  draft <id>        add a player to your roster
  remove <id>       remove a player from your roster
  roster            show your roster
  help              show this help
  quit              exit";

fn outcome_tag(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Winner => "[W] ",
        Outcome::Loser => "[L] ",
        Outcome::Neutral => "    ",
    }
}

/// A search result card: name, `TEAM \u{2022} POS`, points, and the tracked stats.
pub fn player_card(player: &PlayerSeasonStat) -> String {
    let mut out = format!(
        "{} (ID {})\n  {} \u{2022} {}\n  {} FPTS\n",
        player.display_name(),
        player.player_id,
        player.display_team(),
        player.display_position(),
        format_points(compute_fantasy_points(player)),
    );
    for stat in scored_stats(player) {
        out.push_str(&format!("  {:<9}{:>8}\n", stat.label, stat.display_value));
    }
    out
}

pub fn search_results(players: &[PlayerSeasonStat]) -> String {
    players
        .iter()
        .map(player_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Comparison Slots: N / 2`, followed by the selected names when any.
pub fn compare_bar(slots: &ComparisonSlots) -> String {
    if slots.is_empty() {
        slots.status_line()
    } else {
        format!("{}  {}", slots.status_line(), slots.names())
    }
}

fn compared_row(row: &ComparedStat) -> String {
    format!(
        "  {}{:<9}{:>8}\n",
        outcome_tag(row.outcome),
        row.stat.label,
        row.stat.display_value
    )
}

pub fn comparison(view: &ComparisonView) -> String {
    let cards = match view {
        ComparisonView::NoPlayersSelected => return "No players selected.".to_string(),
        ComparisonView::Cards(cards) => cards,
    };

    cards
        .iter()
        .map(|card| {
            let mut out = format!(
                "{}\n  {} - {}\n  Proj FPTS: {}\n",
                card.player.display_name(),
                card.player.display_position(),
                card.player.display_team(),
                format_points(card.fantasy_points),
            );
            for row in &card.rows {
                out.push_str(&compared_row(row));
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn roster_row(id: &str, name: &str, position: &str, team: &str, points: &str) -> String {
    format!("{id:<8} {name:<24} {position:<4} {team:<4} {points:>8}\n")
}

/// Roster table with the summary line, or the empty-roster message.
pub fn roster(roster: &Roster) -> String {
    if roster.is_empty() {
        return "Your roster is empty. Draft players with 'draft <id>'.".to_string();
    }

    let mut out = roster_row("ID", "Name", "Pos", "Team", "FPTS");
    for entry in roster.entries() {
        out.push_str(&roster_row(
            &entry.player_id.to_string(),
            &entry.name,
            &entry.position,
            &entry.team,
            &format_points(entry.fantasy_points),
        ));
    }
    out.push_str(&roster_summary(roster));
    out
}

/// `Roster: N player(s), total X.XX FPTS`
pub fn roster_summary(roster: &Roster) -> String {
    let noun = if roster.len() == 1 { "player" } else { "players" };
    format!(
        "Roster: {} {}, total {} FPTS",
        roster.len(),
        noun,
        roster.total_display()
    )
}

// Application state and the interactive command loop.
//
// A reader task parses stdin lines into `UserCommand`s and sends them over an
// mpsc channel; the loop applies each command to the session and pushes
// rendered output to the printer through a second channel.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::draft::session::{Session, SessionUpdate};
use crate::protocol::{parse_command, UiUpdate, UserCommand};
use crate::render;
use crate::source::PlayerSource;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Everything the command loop owns.
pub struct AppState {
    pub config: Config,
    pub session: Session,
    /// Where the master list is reloaded from when it is empty.
    source: Arc<dyn PlayerSource>,
}

impl AppState {
    pub fn new(config: Config, session: Session, source: Arc<dyn PlayerSource>) -> Self {
        Self {
            config,
            session,
            source,
        }
    }

    /// Refetch the master list if it is empty. Returns the failure status
    /// when the fetch errors; an empty result is left for search to report.
    async fn reload_if_empty(&mut self) -> Option<UiUpdate> {
        if !self.session.players().is_empty() {
            return None;
        }

        info!("No player data in session; refetching stats");
        match self.source.load_players().await {
            Ok(players) => {
                let update = self.session.replace_players(players);
                debug!("Reload: {:?}", update);
                None
            }
            Err(e) => {
                error!("Stats refetch failed: {}", e);
                Some(UiUpdate::Status(SessionUpdate::FetchFailed.status_message()))
            }
        }
    }

    /// Output shown when the loop starts.
    pub fn welcome(&self) -> Vec<UiUpdate> {
        let count = self.session.players().len();
        let status = if count == 0 {
            SessionUpdate::NoData.status_message()
        } else {
            format!(
                "Loaded {} players for {}. Type 'help' for commands.",
                count, self.config.upstream.season
            )
        };
        vec![UiUpdate::Status(status)]
    }
}

// ---------------------------------------------------------------------------
// Command handling
// ---------------------------------------------------------------------------

/// Apply one command to the session and describe what to print.
///
/// `Quit` produces nothing; the loop handles it.
pub fn apply_command(state: &mut AppState, cmd: UserCommand) -> Vec<UiUpdate> {
    let update = match cmd {
        UserCommand::Search(query) => state.session.search(&query),
        UserCommand::Compare(player_id) => state.session.select_for_comparison(player_id),
        UserCommand::ClearComparison => state.session.clear_comparison(),
        UserCommand::Draft(player_id) => state.session.draft_player(player_id),
        UserCommand::Remove(player_id) => state.session.remove_player(player_id),
        UserCommand::ShowRoster => {
            return vec![UiUpdate::Screen(render::roster(state.session.roster()))];
        }
        UserCommand::Help => return vec![UiUpdate::Screen(render::HELP_TEXT.to_string())],
        UserCommand::Quit => return Vec::new(),
    };
    debug!("Session update: {:?}", update);

    let mut out = Vec::new();
    if let SessionUpdate::EmptyQuery = update {
        return out;
    }
    if let SessionUpdate::SearchResults { players, .. } = &update {
        out.push(UiUpdate::Screen(render::search_results(players)));
    }
    out.push(UiUpdate::Status(update.status_message()));

    if update.comparison_changed() {
        let comparison = state.session.comparison();
        out.push(UiUpdate::Screen(format!(
            "{}\n\n{}",
            render::compare_bar(comparison),
            render::comparison(&comparison.comparison())
        )));
    }
    if update.roster_changed() {
        out.push(UiUpdate::Status(render::roster_summary(
            state.session.roster(),
        )));
    }
    out
}

/// Like `apply_command`, but a non-blank search over an empty master list
/// first tries to load the season's players again.
pub async fn process_command(state: &mut AppState, cmd: UserCommand) -> Vec<UiUpdate> {
    if let UserCommand::Search(query) = &cmd {
        if !query.trim().is_empty() {
            if let Some(failure) = state.reload_if_empty().await {
                return vec![failure];
            }
        }
    }
    apply_command(state, cmd)
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    for update in process_command(state, cmd).await {
        if ui_tx.send(update).await.is_err() {
            debug!("UI channel closed; dropping output");
            return;
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the command loop until `Quit` arrives or the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<AppState> {
    info!("Application event loop started");

    for update in state.welcome() {
        let _ = ui_tx.send(update).await;
    }

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => handle_user_command(&mut state, cmd, &ui_tx).await,
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(state)
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Read lines from `reader`, forwarding parsed commands to `cmd_tx`.
///
/// Parse errors go to `ui_tx` as status text. Stops at end of input, after
/// forwarding `Quit`, or when the command channel closes.
pub async fn read_commands<R>(
    reader: R,
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(cmd)) => {
                let quit = cmd == UserCommand::Quit;
                if cmd_tx.send(cmd).await.is_err() {
                    break;
                }
                if quit {
                    break;
                }
            }
            Err(e) => {
                warn!("Rejected input {:?}: {}", line, e);
                let _ = ui_tx.send(UiUpdate::Status(e.to_string())).await;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

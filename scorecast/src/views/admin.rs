//! The admin page: the same polled mirror as the other views, plus the
//! line commands that turn into backend writes.

use super::{Renderable, style};
use crate::network::AdminAction;
use log::{info, warn};
use scorecast_common::{
    backend::{MatchUpdate, NewPenalty, TimerAction},
    clock,
    match_state::{MatchState, ShotResult, TeamSide},
};
use std::{
    io::BufRead,
    sync::{Arc, Mutex},
    thread,
};
use tokio::sync::mpsc;

const HELP: &str = "\
Commands:
  score <a> <b>                  set both scores
  start | pause | reset          control the match clock
  edit                           open an edit session (freezes the mirror)
  name <a|b> <text>              stage a team name        (while editing)
  status <text>                  stage the phase label    (while editing)
  stoppage <minutes>             stage stoppage time      (while editing)
  logo <a|b> <url>               stage a logo URL         (while editing)
  apply | cancel                 post or discard the staged edit
  penalty <a|b> <player> <gol|miss>   record a shootout attempt
  clear                          empty the penalty list (asks to confirm)
  quit                           leave";

/// Mirrored admin inputs, one slot per editable field, plus the read-only
/// clock display.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdminElements {
    pub input_score_a: String,
    pub input_score_b: String,
    pub input_name_a: String,
    pub input_name_b: String,
    pub input_status: String,
    pub input_stoppage: String,
    pub input_logo_a: String,
    pub input_logo_b: String,
    pub time_display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    TeamAName,
    TeamBName,
    Status,
    Stoppage,
    LogoA,
    LogoB,
}

/// A staged bulk edit. While one is open the poll cycle must keep its
/// hands off the mirrored inputs so a refresh can't clobber typing in
/// progress.
#[derive(Debug, Default)]
pub struct EditSession {
    focused: bool,
    staged: MatchUpdate,
}

impl EditSession {
    pub fn begin(&mut self) {
        self.focused = true;
        self.staged = MatchUpdate::default();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn staged(&self) -> &MatchUpdate {
        &self.staged
    }

    pub fn stage(&mut self, field: EditField, value: &str) -> Result<(), String> {
        match field {
            EditField::TeamAName => self.staged.team_a_name = Some(value.to_string()),
            EditField::TeamBName => self.staged.team_b_name = Some(value.to_string()),
            EditField::Status => self.staged.status = Some(value.to_string()),
            EditField::Stoppage => {
                let minutes = value
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("Not a number of minutes: {value}"))?;
                self.staged.stoppage_time = Some(minutes);
            }
            EditField::LogoA => self.staged.logo_a = Some(value.to_string()),
            EditField::LogoB => self.staged.logo_b = Some(value.to_string()),
        }
        Ok(())
    }

    /// Ends the session and hands back the staged update for posting.
    pub fn take(&mut self) -> MatchUpdate {
        self.focused = false;
        std::mem::take(&mut self.staged)
    }

    pub fn cancel(&mut self) {
        self.focused = false;
        self.staged = MatchUpdate::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Score(u32, u32),
    Timer(TimerAction),
    Edit,
    Stage(EditField, String),
    Apply,
    Cancel,
    Penalty(NewPenalty),
    Clear,
    Quit,
    Help,
}

fn parse_side(word: &str) -> Result<TeamSide, String> {
    match word.to_ascii_lowercase().as_str() {
        "a" => Ok(TeamSide::A),
        "b" => Ok(TeamSide::B),
        other => Err(format!("Expected team a or b, got {other}")),
    }
}

fn parse_result(word: &str) -> Result<ShotResult, String> {
    match word.to_ascii_lowercase().as_str() {
        "gol" | "goal" => Ok(ShotResult::Goal),
        "miss" | "missed" | "perdido" => Ok(ShotResult::Missed),
        other => Err(format!("Expected gol or miss, got {other}")),
    }
}

/// Parses one input line. `Ok(None)` means a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "score" => {
            let usage = "Usage: score <a> <b>";
            let a = words
                .next()
                .ok_or(usage)?
                .parse::<u32>()
                .map_err(|_| usage)?;
            let b = words
                .next()
                .ok_or(usage)?
                .parse::<u32>()
                .map_err(|_| usage)?;
            Command::Score(a, b)
        }
        "start" => Command::Timer(TimerAction::Start),
        "pause" => Command::Timer(TimerAction::Pause),
        "reset" => Command::Timer(TimerAction::ResetTimer),
        "edit" => Command::Edit,
        "apply" => Command::Apply,
        "cancel" => Command::Cancel,
        "name" => {
            let side = parse_side(words.next().ok_or("Usage: name <a|b> <text>")?)?;
            let text = words.collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return Err(String::from("Usage: name <a|b> <text>"));
            }
            let field = match side {
                TeamSide::A => EditField::TeamAName,
                TeamSide::B => EditField::TeamBName,
            };
            Command::Stage(field, text)
        }
        "status" => {
            let text = words.collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return Err(String::from("Usage: status <text>"));
            }
            Command::Stage(EditField::Status, text)
        }
        "stoppage" => {
            let minutes = words.next().ok_or("Usage: stoppage <minutes>")?;
            Command::Stage(EditField::Stoppage, minutes.to_string())
        }
        "logo" => {
            let side = parse_side(words.next().ok_or("Usage: logo <a|b> <url>")?)?;
            let url = words.next().ok_or("Usage: logo <a|b> <url>")?;
            let field = match side {
                TeamSide::A => EditField::LogoA,
                TeamSide::B => EditField::LogoB,
            };
            Command::Stage(field, url.to_string())
        }
        "penalty" => {
            let usage = "Usage: penalty <a|b> <player> <gol|miss>";
            let side = parse_side(words.next().ok_or(usage)?)?;
            let mut rest = words.collect::<Vec<_>>();
            let result = parse_result(rest.pop().ok_or(usage)?)?;
            if rest.is_empty() {
                return Err(String::from(usage));
            }
            Command::Penalty(NewPenalty {
                team: side,
                player: rest.join(" "),
                result,
            })
        }
        "clear" => Command::Clear,
        "quit" | "exit" => Command::Quit,
        "help" => Command::Help,
        other => return Err(format!("Unknown command: {other} (try help)")),
    };
    Ok(Some(command))
}

pub fn spawn_input_thread(
    session: Arc<Mutex<EditSession>>,
    actions: mpsc::Sender<AdminAction>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || input_loop(session, actions))
}

fn input_loop(session: Arc<Mutex<EditSession>>, actions: mpsc::Sender<AdminAction>) {
    let stdin = std::io::stdin();
    let mut pending_clear = false;

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };

        if pending_clear {
            pending_clear = false;
            if line.trim().eq_ignore_ascii_case("y") {
                send(&actions, AdminAction::ClearPenalties);
            } else {
                println!("Kept the penalty list.");
            }
            continue;
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Score(a, b) => {
                send(&actions, AdminAction::Update(MatchUpdate::scores(a, b)));
            }
            Command::Timer(action) => {
                send(&actions, AdminAction::Update(MatchUpdate::timer(action)));
            }
            Command::Edit => {
                session.lock().unwrap().begin();
                println!("Editing. Stage with name/status/stoppage/logo, then apply or cancel.");
            }
            Command::Stage(field, value) => {
                let mut session = session.lock().unwrap();
                if !session.is_focused() {
                    println!("Not editing; run edit first.");
                } else if let Err(message) = session.stage(field, &value) {
                    println!("{message}");
                }
            }
            Command::Apply => {
                let update = session.lock().unwrap().take();
                if update.is_empty() {
                    println!("Nothing staged.");
                } else {
                    send(&actions, AdminAction::Update(update));
                }
            }
            Command::Cancel => session.lock().unwrap().cancel(),
            Command::Penalty(penalty) => send(&actions, AdminAction::AddPenalty(penalty)),
            Command::Clear => {
                pending_clear = true;
                println!("Clear all penalties? Type y to confirm.");
            }
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
        }
    }

    let _ = actions.blocking_send(AdminAction::Shutdown);
    info!("Admin input loop finished");
}

fn send(actions: &mpsc::Sender<AdminAction>, action: AdminAction) {
    if actions.blocking_send(action).is_err() {
        warn!("Networking thread is gone, dropping the action");
    }
}

pub struct AdminView {
    elements: AdminElements,
    session: Arc<Mutex<EditSession>>,
}

impl AdminView {
    pub fn new(elements: AdminElements, session: Arc<Mutex<EditSession>>) -> Self {
        Self { elements, session }
    }

    fn frame(&self, staged: Option<&MatchUpdate>) -> String {
        use std::fmt::Write;

        let e = &self.elements;
        let mut frame = String::new();
        let marker = if staged.is_some() { " [editing]" } else { "" };
        let _ = writeln!(
            frame,
            "{}ADMIN{marker}  clock {}{}",
            style::BOLD,
            e.time_display,
            style::RESET
        );
        let _ = writeln!(
            frame,
            "  {} {} x {} {}",
            e.input_name_a, e.input_score_a, e.input_score_b, e.input_name_b
        );
        let _ = writeln!(
            frame,
            "  status: {}   stoppage: {}",
            e.input_status, e.input_stoppage
        );
        let _ = writeln!(
            frame,
            "  logos: [{}] [{}]",
            e.input_logo_a, e.input_logo_b
        );
        if let Some(staged) = staged {
            let _ = writeln!(frame, "  staged: {}", staged_summary(staged));
        }
        let _ = writeln!(frame, "{}{HELP}{}", style::DIM, style::RESET);
        frame
    }
}

fn staged_summary(staged: &MatchUpdate) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &staged.team_a_name {
        parts.push(format!("name a \"{name}\""));
    }
    if let Some(name) = &staged.team_b_name {
        parts.push(format!("name b \"{name}\""));
    }
    if let Some(status) = &staged.status {
        parts.push(format!("status \"{status}\""));
    }
    if let Some(minutes) = staged.stoppage_time {
        parts.push(format!("stoppage {minutes}"));
    }
    if let Some(url) = &staged.logo_a {
        parts.push(format!("logo a {url}"));
    }
    if let Some(url) = &staged.logo_b {
        parts.push(format!("logo b {url}"));
    }
    if parts.is_empty() {
        String::from("(nothing yet)")
    } else {
        parts.join(", ")
    }
}

impl Renderable for AdminView {
    fn render(&mut self, snapshot: &MatchState) -> String {
        let staged = {
            let session = self.session.lock().unwrap();
            session.is_focused().then(|| session.staged().clone())
        };

        // The poll must not clobber an in-progress edit; mirror the
        // snapshot only while nothing holds focus.
        if staged.is_none() {
            let elements = &mut self.elements;
            elements.input_score_a = snapshot.score_a.to_string();
            elements.input_score_b = snapshot.score_b.to_string();
            elements.input_name_a = snapshot.team_a_name.clone();
            elements.input_name_b = snapshot.team_b_name.clone();
            elements.input_status = snapshot.status.clone();
            elements.input_stoppage = snapshot.stoppage_time.to_string();
            elements.input_logo_a = snapshot.logo_a.clone().unwrap_or_default();
            elements.input_logo_b = snapshot.logo_b.clone().unwrap_or_default();
            elements.time_display = clock::time_string(snapshot.calculated_time_seconds);
        }

        self.frame(staged.as_ref())
    }
}

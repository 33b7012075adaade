use super::{Renderable, style};
use scorecast_common::{
    clock,
    match_state::{MatchState, TeamSide},
};
use std::fmt::Write;

/// The scoreboard's display slots. Injected at construction so tests can
/// inspect exactly what the page would show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardElements {
    pub team_a: String,
    pub team_b: String,
    pub score: String,
    pub status: String,
    pub timer: String,
    pub logo_a: String,
    pub logo_b: String,
}

impl Default for ScoreboardElements {
    fn default() -> Self {
        Self {
            team_a: String::from("TEAM A"),
            team_b: String::from("TEAM B"),
            score: String::from("0 X 0"),
            status: String::new(),
            timer: String::from("00:00"),
            logo_a: String::new(),
            logo_b: String::new(),
        }
    }
}

pub struct ScoreboardView {
    elements: ScoreboardElements,
}

impl ScoreboardView {
    pub fn new(elements: ScoreboardElements) -> Self {
        Self { elements }
    }

    fn frame(&self) -> String {
        let e = &self.elements;
        let mut frame = String::new();
        let _ = writeln!(
            frame,
            "{}{:^25}{:^11}{:^25}{}",
            style::BOLD,
            e.team_a,
            e.score,
            e.team_b,
            style::RESET
        );
        let _ = writeln!(frame, "{:^61}", e.status);
        let _ = writeln!(frame, "{:^61}", e.timer);
        if !e.logo_a.is_empty() || !e.logo_b.is_empty() {
            let _ = writeln!(
                frame,
                "{}{:^30} {:^30}{}",
                style::DIM,
                e.logo_a,
                e.logo_b,
                style::RESET
            );
        }
        frame
    }
}

impl Renderable for ScoreboardView {
    fn render(&mut self, snapshot: &MatchState) -> String {
        let elements = &mut self.elements;
        elements.team_a = snapshot.team_a_name.clone();
        elements.team_b = snapshot.team_b_name.clone();
        elements.score = snapshot.score_line();
        elements.status = snapshot.status.clone();
        elements.timer =
            clock::timer_line(snapshot.calculated_time_seconds, snapshot.stoppage_time);

        // Sticky last-known-good: a snapshot without a logo keeps whatever
        // was shown before.
        if let Some(url) = snapshot.logo_url(TeamSide::A) {
            elements.logo_a = url.to_string();
        }
        if let Some(url) = snapshot.logo_url(TeamSide::B) {
            elements.logo_b = url.to_string();
        }

        self.frame()
    }
}

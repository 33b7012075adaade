use super::{Renderable, style};
use scorecast_common::match_state::{MatchState, ShotResult};
use std::fmt::Write;

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyRow {
    pub position: usize,
    pub team: String,
    pub player: String,
    pub result: ShotResult,
}

pub struct PenaltiesView {
    rows: Vec<PenaltyRow>,
}

impl PenaltiesView {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn frame(&self) -> String {
        let mut frame = String::new();
        let _ = writeln!(
            frame,
            "{}{:>3}  {:^4}  {:<24}  RESULT{}",
            style::BOLD,
            "#",
            "TEAM",
            "PLAYER",
            style::RESET
        );
        for row in &self.rows {
            let color = match row.result {
                ShotResult::Goal => style::GREEN,
                ShotResult::Missed => style::RED,
            };
            let _ = writeln!(
                frame,
                "{:>3}  {:^4}  {:<24}  {color}{}{}",
                row.position,
                row.team,
                row.player,
                row.result,
                style::RESET
            );
        }
        frame
    }
}

impl Renderable for PenaltiesView {
    fn render(&mut self, snapshot: &MatchState) -> String {
        // Destructive rebuild from the snapshot on every cycle, no diffing.
        self.rows.clear();
        for (index, penalty) in snapshot.penalties.iter().enumerate() {
            self.rows.push(PenaltyRow {
                position: index + 1,
                team: penalty.team.to_string(),
                player: penalty.player_name.clone(),
                result: penalty.result,
            });
        }
        self.frame()
    }
}

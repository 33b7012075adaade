use scorecast_common::match_state::MatchState;

pub mod admin;
pub mod penalties;
pub mod scoreboard;

/// The one capability a view must provide: turn the latest snapshot into a
/// text frame. Views own whatever display state they carry between cycles
/// (sticky logos, the admin edit session).
pub trait Renderable {
    fn render(&mut self, snapshot: &MatchState) -> String;
}

pub(crate) mod style {
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const RESET: &str = "\x1b[0m";
}

use serde::{Deserialize, Serialize};

/// Which side of the match a penalty belongs to. Serialized as the bare
/// letter the backend stores (`"A"` / `"B"`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum TeamSide {
    A,
    B,
}

impl core::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Outcome of one shootout attempt. The wire tokens are fixed by the
/// backend contract and must survive round-trips unchanged.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ShotResult {
    #[serde(rename = "GOL")]
    Goal,
    #[serde(rename = "PERDIDO")]
    Missed,
}

impl ShotResult {
    pub fn wire_label(self) -> &'static str {
        match self {
            Self::Goal => "GOL",
            Self::Missed => "PERDIDO",
        }
    }
}

impl core::fmt::Display for ShotResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.wire_label())
    }
}

/// One recorded shootout attempt, as it appears in the state snapshot.
///
/// Note the field name mismatch with [`crate::backend::NewPenalty`]: the
/// backend accepts `player` on writes but reports `player_name` in reads.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Penalty {
    pub team: TeamSide,
    pub player_name: String,
    pub result: ShotResult,
}

/// Full replacement snapshot of the match, owned by the backend.
///
/// Every poll result discards the previous snapshot entirely; nothing is
/// merged client side. The backend row carries extra internal columns
/// (`id`, `start_timestamp`, `accumulated_seconds`, `is_running`) which are
/// ignored here.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub team_a_name: String,
    pub team_b_name: String,
    pub score_a: u32,
    pub score_b: u32,
    pub status: String,
    #[serde(default)]
    pub calculated_time_seconds: f64,
    #[serde(default)]
    pub stoppage_time: u32,
    #[serde(default)]
    pub logo_a: Option<String>,
    #[serde(default)]
    pub logo_b: Option<String>,
    #[serde(default)]
    pub penalties: Vec<Penalty>,
}

impl MatchState {
    /// The logo URL for a side, if one is actually set. The backend seeds
    /// the logo columns with empty strings, so `Some("")` counts as unset.
    pub fn logo_url(&self, side: TeamSide) -> Option<&str> {
        let url = match side {
            TeamSide::A => self.logo_a.as_deref(),
            TeamSide::B => self.logo_b.as_deref(),
        };
        url.filter(|url| !url.is_empty())
    }

    /// Score line in the form the scoreboard shows it (`"2 X 1"`).
    pub fn score_line(&self) -> String {
        format!("{} X {}", self.score_a, self.score_b)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            team_a_name: String::from("TEAM A"),
            team_b_name: String::from("TEAM B"),
            score_a: 0,
            score_b: 0,
            status: String::new(),
            calculated_time_seconds: 0.0,
            stoppage_time: 0,
            logo_a: None,
            logo_b: None,
            penalties: Vec::new(),
        }
    }
}

pub mod client;
pub mod wire;

use chrono::{DateTime, NaiveDate, Utc};

// ---------------------------------------------------------------------------
// Domain types, independent of the backend wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    /// Logo path as stored by the backend; may be relative to the backend
    /// base URL. Resolve with `KnockoutApi::logo_url`.
    pub logo: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Teams that have ever played in a tournament cannot be deleted.
    pub has_participated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TournamentStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TournamentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TournamentStatus::Pending => "Pending",
            TournamentStatus::InProgress => "In progress",
            TournamentStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    /// Tournament date as sent by the backend (`YYYY-MM-DD`).
    pub date: String,
    pub location: String,
    pub status: TournamentStatus,
    pub winner_id: Option<i64>,
    pub winner: Option<Team>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Human-readable tournament date, falling back to the raw string when
    /// the backend sends something other than `YYYY-MM-DD`.
    pub fn date_display(&self) -> String {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map(|d| d.format("%-d %B %Y").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Match {
    pub id: i64,
    pub tournament_id: i64,
    /// 0-based round, increasing toward the final.
    pub round: u32,
    /// 0-based slot within the round (backend sends a 1-based match_number).
    pub position: u32,
    pub team1_id: Option<i64>,
    pub team2_id: Option<i64>,
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub winner_id: Option<i64>,
    pub winner: Option<Team>,
    pub status: MatchStatus,
}

impl Match {
    /// A score can be entered only once both slots are decided and the
    /// match has not already been played.
    pub fn is_editable(&self) -> bool {
        self.team1_id.is_some() && self.team2_id.is_some() && self.status != MatchStatus::Completed
    }

    pub fn team_name(&self, slot: u8) -> &str {
        let team = if slot == 0 { &self.team1 } else { &self.team2 };
        team.as_ref().map(|t| t.name.as_str()).unwrap_or("TBD")
    }

    pub fn is_winner(&self, team_id: Option<i64>) -> bool {
        self.status == MatchStatus::Completed
            && team_id.is_some()
            && self.winner_id == team_id
    }
}

// ---------------------------------------------------------------------------
// Mutation payloads (camelCase side; wire translation lives in `wire`)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CreateTeam {
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateTournament {
    pub name: String,
    pub date: String,
    pub location: String,
    pub team_ids: Vec<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreUpdate {
    pub score1: u32,
    pub score2: u32,
}

/// Result of a score submission. The backend advances the winner server-side
/// and tells us whether that score decided the whole tournament.
#[derive(Debug, Clone, Default)]
pub struct MatchUpdate {
    pub updated: Match,
    pub tournament_completed: bool,
    pub tournament_winner_id: Option<i64>,
}

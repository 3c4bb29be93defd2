use crate::state::network::LoadingState;
use crate::state::query_cache::CacheKey;
use crossterm::event::KeyEvent;
use knockout_api::{
    CreateTeam, CreateTournament, Match, MatchUpdate, ScoreUpdate, Team, Tournament, UpdateTeam,
};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadTeams,
    LoadTournaments,
    LoadTournament { id: i64 },
    LoadMatches { tournament_id: i64 },
    CreateTeam { data: CreateTeam },
    UpdateTeam { id: i64, data: UpdateTeam },
    DeleteTeam { id: i64 },
    CreateTournament { data: CreateTournament },
    DeleteTournament { id: i64 },
    SubmitScore { match_id: i64, tournament_id: i64, scores: ScoreUpdate },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TeamsLoaded { teams: Vec<Team> },
    TournamentsLoaded { tournaments: Vec<Tournament> },
    TournamentLoaded { tournament: Tournament },
    MatchesLoaded { tournament_id: i64, matches: Vec<Match> },
    TeamSaved { team: Team, created: bool },
    TeamDeleted { id: i64 },
    TournamentCreated { tournament: Tournament },
    TournamentDeleted { id: i64 },
    ScoreSubmitted { tournament_id: i64, update: MatchUpdate },
    /// A read failed; the matching cache entry moves to its error state.
    FetchFailed { key: CacheKey, message: String },
    /// A write failed; the open dialog stays as-is and the message becomes a toast.
    MutationFailed { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// 80ms heartbeat, drives toast TTLs and delayed notifications.
    Tick,
}

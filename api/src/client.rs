use crate::wire::{
    CreateTeamBody, CreateTournamentBody, Envelope, ScoreUpdateBody, UpdateTeamBody, WireMatch,
    WireTeam, WireTournament,
};
use crate::{
    CreateTeam, CreateTournament, Match, MatchStatus, MatchUpdate, ScoreUpdate, Team, Tournament,
    TournamentStatus, UpdateTeam,
};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";

/// Tournament backend client. One HTTP round-trip per operation, no retries:
/// a failed attempt is surfaced to the caller immediately.
#[derive(Debug, Clone)]
pub struct KnockoutApi {
    client: Client,
    api_base: String,
    backend_base: String,
    timeout: Duration,
}

impl Default for KnockoutApi {
    fn default() -> Self {
        let api_base = std::env::var("KOTUI_API_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let backend_base = std::env::var("KOTUI_BACKEND_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
        Self::with_base(api_base, backend_base)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    /// The backend answered with `success: false`; carries its message
    /// (e.g. "cannot delete team participating in tournaments").
    Backend(String),
    Parsing(String, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Backend(msg) => write!(f, "{msg}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl KnockoutApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client against explicit base URLs. Tests point this at a mock server.
    pub fn with_base(api_base: impl Into<String>, backend_base: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("kotui/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            api_base: api_base.into(),
            backend_base: backend_base.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Resolve a team logo path against the backend base URL.
    /// Absolute `http…` logos pass through unchanged.
    pub fn logo_url(&self, logo: &str) -> String {
        if logo.starts_with("http") {
            logo.to_owned()
        } else {
            format!("{}{}", self.backend_base, logo)
        }
    }

    // -----------------------------------------------------------------------
    // Teams
    // -----------------------------------------------------------------------

    pub async fn list_teams(&self) -> ApiResult<Vec<Team>> {
        let url = format!("{}/teams", self.api_base);
        let raw: Vec<WireTeam> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_team).collect())
    }

    pub async fn get_team(&self, id: i64) -> ApiResult<Team> {
        let url = format!("{}/teams/{id}", self.api_base);
        Ok(map_team(self.get(&url).await?))
    }

    pub async fn create_team(&self, data: CreateTeam) -> ApiResult<Team> {
        let url = format!("{}/teams", self.api_base);
        let body = CreateTeamBody { name: data.name, logo: data.logo };
        let raw: WireTeam = self.send(self.client.post(&url).json(&body), &url).await?;
        Ok(map_team(raw))
    }

    pub async fn update_team(&self, id: i64, data: UpdateTeam) -> ApiResult<Team> {
        let url = format!("{}/teams/{id}", self.api_base);
        let body = UpdateTeamBody { name: data.name, logo: data.logo };
        let raw: WireTeam = self.send(self.client.put(&url).json(&body), &url).await?;
        Ok(map_team(raw))
    }

    /// Fails with `ApiError::Backend` when the team has ever participated in
    /// a tournament; the backend enforces that invariant, not us.
    pub async fn delete_team(&self, id: i64) -> ApiResult<()> {
        let url = format!("{}/teams/{id}", self.api_base);
        self.send_empty(self.client.delete(&url), &url).await
    }

    // -----------------------------------------------------------------------
    // Tournaments
    // -----------------------------------------------------------------------

    pub async fn list_tournaments(&self) -> ApiResult<Vec<Tournament>> {
        let url = format!("{}/tournaments", self.api_base);
        let raw: Vec<WireTournament> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_tournament).collect())
    }

    pub async fn get_tournament(&self, id: i64) -> ApiResult<Tournament> {
        let url = format!("{}/tournaments/{id}", self.api_base);
        Ok(map_tournament(self.get(&url).await?))
    }

    pub async fn create_tournament(&self, data: CreateTournament) -> ApiResult<Tournament> {
        let url = format!("{}/tournaments", self.api_base);
        let body = CreateTournamentBody {
            name: data.name,
            date: data.date,
            location: data.location,
            team_ids: data.team_ids,
        };
        let raw: WireTournament = self.send(self.client.post(&url).json(&body), &url).await?;
        Ok(map_tournament(raw))
    }

    /// Deletes the tournament and all of its matches server-side.
    pub async fn delete_tournament(&self, id: i64) -> ApiResult<()> {
        let url = format!("{}/tournaments/{id}", self.api_base);
        self.send_empty(self.client.delete(&url), &url).await
    }

    // -----------------------------------------------------------------------
    // Matches
    // -----------------------------------------------------------------------

    pub async fn list_matches(&self, tournament_id: i64) -> ApiResult<Vec<Match>> {
        let url = format!("{}/tournaments/{tournament_id}/matches", self.api_base);
        let raw: Vec<WireMatch> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_match).collect())
    }

    /// Submit a final score. The winner advances server-side; the response
    /// tells us whether this score completed the whole tournament.
    pub async fn update_match(&self, match_id: i64, scores: ScoreUpdate) -> ApiResult<MatchUpdate> {
        let url = format!("{}/matches/{match_id}", self.api_base);
        let body = ScoreUpdateBody { team1_score: scores.score1, team2_score: scores.score2 };
        let raw: WireMatch = self.send(self.client.put(&url).json(&body), &url).await?;
        Ok(MatchUpdate {
            tournament_completed: raw.tournament_completed.unwrap_or(false),
            tournament_winner_id: raw.tournament_winner_id,
            updated: map_match(raw),
        })
    }

    // -----------------------------------------------------------------------
    // Transport helpers
    // -----------------------------------------------------------------------

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.send(self.client.get(url), url).await
    }

    /// Run one request and unwrap the response envelope. A `success: false`
    /// envelope becomes `ApiError::Backend` carrying the backend's message.
    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> ApiResult<T> {
        let envelope: Envelope<T> = self.send_envelope(request, url).await?;
        envelope
            .data
            .ok_or_else(|| ApiError::Parsing("missing data in success envelope".into(), url.to_owned()))
    }

    /// Same as `send`, for endpoints whose success payload is `data: null`.
    async fn send_empty(&self, request: reqwest::RequestBuilder, url: &str) -> ApiResult<()> {
        let _: Envelope<serde_json::Value> = self.send_envelope(request, url).await?;
        Ok(())
    }

    async fn send_envelope<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> ApiResult<Envelope<T>> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e.to_string(), url.to_owned()))?;
        if !envelope.success {
            return Err(ApiError::Backend(
                envelope.message.unwrap_or_else(|| "request failed".to_owned()),
            ));
        }
        Ok(envelope)
    }
}

// ---------------------------------------------------------------------------
// Mapping: backend wire types → clean domain types (read direction)
// ---------------------------------------------------------------------------

fn map_team(raw: WireTeam) -> Team {
    Team {
        id: raw.id,
        name: raw.name,
        logo: raw.logo,
        created_at: parse_timestamp(raw.created_at.as_deref()),
        has_participated: raw.has_participated.unwrap_or(false),
    }
}

fn map_tournament(raw: WireTournament) -> Tournament {
    Tournament {
        id: raw.id,
        name: raw.name,
        date: raw.date.unwrap_or_default(),
        location: raw.location.unwrap_or_default(),
        status: parse_tournament_status(raw.status.as_deref()),
        winner_id: raw.winner_id,
        winner: raw.winner.map(map_team),
        created_at: parse_timestamp(raw.created_at.as_deref()),
    }
}

fn map_match(raw: WireMatch) -> Match {
    Match {
        id: raw.id,
        tournament_id: raw.tournament_id,
        round: raw.round.unwrap_or(0),
        // Backend numbers matches from 1; everything downstream is 0-based.
        position: raw.match_number.unwrap_or(1).saturating_sub(1),
        team1_id: raw.team1_id,
        team2_id: raw.team2_id,
        team1: raw.team1.map(map_team),
        team2: raw.team2.map(map_team),
        score1: raw.team1_score,
        score2: raw.team2_score,
        winner_id: raw.winner_id,
        winner: raw.winner.map(map_team),
        status: parse_match_status(raw.status.as_deref()),
    }
}

fn parse_tournament_status(s: Option<&str>) -> TournamentStatus {
    match s {
        Some("in_progress") => TournamentStatus::InProgress,
        Some("completed") => TournamentStatus::Completed,
        _ => TournamentStatus::Pending,
    }
}

fn parse_match_status(s: Option<&str>) -> MatchStatus {
    match s {
        Some("completed") => MatchStatus::Completed,
        _ => MatchStatus::Pending,
    }
}

fn parse_timestamp(s: Option<&str>) -> Option<DateTime<Utc>> {
    s.and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_number_is_translated_to_zero_based_position() {
        let raw = WireMatch { id: 10, tournament_id: 7, match_number: Some(1), ..WireMatch::default() };
        assert_eq!(map_match(raw).position, 0);

        let raw = WireMatch { id: 11, tournament_id: 7, match_number: Some(4), ..WireMatch::default() };
        assert_eq!(map_match(raw).position, 3);
    }

    #[test]
    fn match_scores_map_to_internal_names() {
        let raw = WireMatch {
            id: 10,
            tournament_id: 7,
            team1_score: Some(3),
            team2_score: Some(1),
            winner_id: Some(42),
            status: Some("completed".into()),
            ..WireMatch::default()
        };
        let m = map_match(raw);
        assert_eq!(m.score1, Some(3));
        assert_eq!(m.score2, Some(1));
        assert_eq!(m.winner_id, Some(42));
        assert_eq!(m.status, MatchStatus::Completed);
    }

    #[test]
    fn tournament_status_parsing_defaults_to_pending() {
        assert_eq!(parse_tournament_status(Some("in_progress")), TournamentStatus::InProgress);
        assert_eq!(parse_tournament_status(Some("completed")), TournamentStatus::Completed);
        assert_eq!(parse_tournament_status(Some("pending")), TournamentStatus::Pending);
        assert_eq!(parse_tournament_status(Some("garbage")), TournamentStatus::Pending);
        assert_eq!(parse_tournament_status(None), TournamentStatus::Pending);
    }

    #[test]
    fn logo_url_resolves_relative_paths_against_backend_base() {
        let api = KnockoutApi::with_base("http://x/api", "http://backend:3000");
        assert_eq!(api.logo_url("/uploads/logo.png"), "http://backend:3000/uploads/logo.png");
        assert_eq!(api.logo_url("https://cdn.example/logo.png"), "https://cdn.example/logo.png");
    }

    // -----------------------------------------------------------------------
    // HTTP round-trip tests against a mock backend
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_matches_unwraps_envelope_and_translates_fields() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"success":true,"data":[
            {"id":1,"tournament_id":7,"round":0,"match_number":1,
             "team1_id":4,"team2_id":8,
             "team1":{"id":4,"name":"FC Milano"},"team2":{"id":8,"name":"AS Roma"},
             "team1_score":2,"team2_score":0,"winner_id":4,"status":"completed"}
        ]}"#;
        let mock = server
            .mock("GET", "/tournaments/7/matches")
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let api = KnockoutApi::with_base(server.url(), server.url());
        let matches = api.list_matches(7).await.expect("list should succeed");
        mock.assert_async().await;

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.position, 0);
        assert_eq!(m.score1, Some(2));
        assert_eq!(m.score2, Some(0));
        assert_eq!(m.team1.as_ref().map(|t| t.name.as_str()), Some("FC Milano"));
        assert_eq!(m.status, MatchStatus::Completed);
    }

    #[tokio::test]
    async fn update_match_sends_backend_score_names_and_reads_completion_flags() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/matches/31")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"team1_score": 3, "team2_score": 1}),
            ))
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"data":{"id":31,"tournament_id":7,"round":2,"match_number":1,
                    "team1_id":4,"team2_id":9,"team1_score":3,"team2_score":1,"winner_id":4,
                    "status":"completed","tournament_completed":true,"tournament_winner_id":4}}"#,
            )
            .create_async()
            .await;

        let api = KnockoutApi::with_base(server.url(), server.url());
        let update = api
            .update_match(31, ScoreUpdate { score1: 3, score2: 1 })
            .await
            .expect("update should succeed");
        mock.assert_async().await;

        assert!(update.tournament_completed);
        assert_eq!(update.tournament_winner_id, Some(4));
        assert_eq!(update.updated.winner_id, Some(4));
    }

    #[tokio::test]
    async fn backend_failure_envelope_surfaces_its_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/teams/4")
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":false,"message":"cannot delete team participating in tournaments"}"#)
            .create_async()
            .await;

        let api = KnockoutApi::with_base(server.url(), server.url());
        let err = api.delete_team(4).await.expect_err("delete must fail");
        match err {
            ApiError::Backend(msg) => {
                assert_eq!(msg, "cannot delete team participating in tournaments");
            }
            other => panic!("expected Backend error, got {other}"),
        }
    }

    #[tokio::test]
    async fn delete_tournament_accepts_null_data() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/tournaments/7")
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"data":null}"#)
            .create_async()
            .await;

        let api = KnockoutApi::with_base(server.url(), server.url());
        api.delete_tournament(7).await.expect("delete should succeed");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn garbage_body_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/teams")
            .with_body("<html>gateway timeout</html>")
            .create_async()
            .await;

        let api = KnockoutApi::with_base(server.url(), server.url());
        let err = api.list_teams().await.expect_err("must fail");
        assert!(matches!(err, ApiError::Parsing(..)), "got {err}");
    }
}

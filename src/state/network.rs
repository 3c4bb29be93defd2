use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::query_cache::CacheKey;
use knockout_api::client::{ApiError, KnockoutApi};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

impl NetworkRequest {
    /// The cache entry a read populates. Writes return None; their failures
    /// surface as mutation errors instead of cache errors.
    fn cache_key(&self) -> Option<CacheKey> {
        match self {
            NetworkRequest::LoadTeams => Some(CacheKey::Teams),
            NetworkRequest::LoadTournaments => Some(CacheKey::Tournaments),
            NetworkRequest::LoadTournament { id } => Some(CacheKey::Tournament(*id)),
            NetworkRequest::LoadMatches { tournament_id } => {
                Some(CacheKey::Matches(*tournament_id))
            }
            _ => None,
        }
    }
}

pub struct NetworkWorker {
    client: KnockoutApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: KnockoutApi::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let failed_key = request.cache_key();
            let result = self.handle(request).await;

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| match failed_key {
                Some(key) => NetworkResponse::FetchFailed { key, message: err.to_string() },
                None => NetworkResponse::MutationFailed { message: err.to_string() },
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle(&self, request: NetworkRequest) -> Result<NetworkResponse, ApiError> {
        match request {
            NetworkRequest::LoadTeams => {
                debug!("loading teams");
                let teams = self.client.list_teams().await?;
                Ok(NetworkResponse::TeamsLoaded { teams })
            }
            NetworkRequest::LoadTournaments => {
                debug!("loading tournaments");
                let tournaments = self.client.list_tournaments().await?;
                Ok(NetworkResponse::TournamentsLoaded { tournaments })
            }
            NetworkRequest::LoadTournament { id } => {
                debug!("loading tournament {id}");
                let tournament = self.client.get_tournament(id).await?;
                Ok(NetworkResponse::TournamentLoaded { tournament })
            }
            NetworkRequest::LoadMatches { tournament_id } => {
                debug!("loading matches for tournament {tournament_id}");
                let matches = self.client.list_matches(tournament_id).await?;
                Ok(NetworkResponse::MatchesLoaded { tournament_id, matches })
            }
            NetworkRequest::CreateTeam { data } => {
                debug!("creating team {}", data.name);
                let team = self.client.create_team(data).await?;
                Ok(NetworkResponse::TeamSaved { team, created: true })
            }
            NetworkRequest::UpdateTeam { id, data } => {
                debug!("updating team {id}");
                let team = self.client.update_team(id, data).await?;
                Ok(NetworkResponse::TeamSaved { team, created: false })
            }
            NetworkRequest::DeleteTeam { id } => {
                debug!("deleting team {id}");
                self.client.delete_team(id).await?;
                Ok(NetworkResponse::TeamDeleted { id })
            }
            NetworkRequest::CreateTournament { data } => {
                debug!("creating tournament {}", data.name);
                let tournament = self.client.create_tournament(data).await?;
                Ok(NetworkResponse::TournamentCreated { tournament })
            }
            NetworkRequest::DeleteTournament { id } => {
                debug!("deleting tournament {id}");
                self.client.delete_tournament(id).await?;
                Ok(NetworkResponse::TournamentDeleted { id })
            }
            NetworkRequest::SubmitScore { match_id, tournament_id, scores } => {
                debug!("submitting score for match {match_id}");
                let update = self.client.update_match(match_id, scores).await?;
                Ok(NetworkResponse::ScoreSubmitted { tournament_id, update })
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

use crate::components::bracket::BracketLayout;
use crate::state::app_state::{
    AppState, CHAMPION_TOAST_DELAY_TICKS, Dialog, ToastKind, TournamentsView,
};
use crate::state::forms::{ScoreFormState, TeamFormState, TournamentFormState};
use crate::state::messages::NetworkRequest;
use crate::state::query_cache::CacheKey;
use crate::state::theme::ThemeContext;
use knockout_api::{Match, MatchUpdate, Team, Tournament};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Dashboard,
    Tournaments,
    Teams,
    Help,
}

pub struct App {
    pub theme: ThemeContext,
    pub state: AppState,
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
}

impl App {
    pub fn new() -> Self {
        Self {
            theme: ThemeContext::load(),
            state: AppState::default(),
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Fetch scheduling, called from main_ui_loop after every event
    // -----------------------------------------------------------------------

    /// Requests for every cache key the visible page reads that is missing or
    /// stale. The cache dedupes, so calling this every event is harmless.
    pub fn due_fetches(&mut self) -> Vec<NetworkRequest> {
        let mut keys = match self.active_tab {
            MenuItem::Dashboard => vec![CacheKey::Tournaments, CacheKey::Teams],
            MenuItem::Tournaments => match self.state.tournaments.view {
                TournamentsView::List => vec![CacheKey::Tournaments],
                TournamentsView::Bracket { tournament_id } => {
                    vec![CacheKey::Matches(tournament_id), CacheKey::Tournament(tournament_id)]
                }
            },
            MenuItem::Teams => vec![CacheKey::Teams],
            MenuItem::Help => vec![],
        };
        // The tournament form renders the team list for selection.
        if matches!(self.state.dialog, Some(Dialog::TournamentForm(_))) {
            keys.push(CacheKey::Teams);
        }
        keys.into_iter().filter_map(|key| self.state.cache.ensure(key)).collect()
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_teams_loaded(&mut self, teams: Vec<Team>) {
        let len = teams.len();
        self.state.cache.teams.resolve(teams);
        self.state.teams.selected = clamp_selection(self.state.teams.selected, len);
    }

    pub fn on_tournaments_loaded(&mut self, tournaments: Vec<Tournament>) {
        let len = tournaments.len();
        self.state.cache.tournaments.resolve(tournaments);
        self.state.tournaments.selected = clamp_selection(self.state.tournaments.selected, len);
    }

    pub fn on_tournament_loaded(&mut self, tournament: Tournament) {
        self.state.cache.tournament.entry(tournament.id).or_default().resolve(tournament);
    }

    pub fn on_matches_loaded(&mut self, tournament_id: i64, matches: Vec<Match>) {
        let len = matches.len();
        self.state.cache.matches.entry(tournament_id).or_default().resolve(matches);
        self.state.bracket.selected = clamp_selection(self.state.bracket.selected, len);
    }

    pub fn on_team_saved(&mut self, team: Team, created: bool) {
        self.state.mutation_in_flight = false;
        if matches!(self.state.dialog, Some(Dialog::TeamForm(_))) {
            self.state.dialog = None;
        }
        self.state.cache.invalidate(CacheKey::Teams);
        let title = if created { "Team created" } else { "Team updated" };
        self.state.toasts.push(ToastKind::Success, title, &team.name);
    }

    pub fn on_team_deleted(&mut self) {
        self.state.mutation_in_flight = false;
        if matches!(self.state.dialog, Some(Dialog::ConfirmDeleteTeam { .. })) {
            self.state.dialog = None;
        }
        self.state.cache.invalidate(CacheKey::Teams);
        self.state.toasts.push(ToastKind::Success, "Team deleted", "");
    }

    pub fn on_tournament_created(&mut self, tournament: Tournament) {
        self.state.mutation_in_flight = false;
        if matches!(self.state.dialog, Some(Dialog::TournamentForm(_))) {
            self.state.dialog = None;
        }
        self.state.cache.invalidate(CacheKey::Tournaments);
        self.state.toasts.push(ToastKind::Success, "Tournament created", &tournament.name);
        self.open_bracket(tournament.id);
    }

    pub fn on_tournament_deleted(&mut self, id: i64) {
        self.state.mutation_in_flight = false;
        if matches!(self.state.dialog, Some(Dialog::ConfirmDeleteTournament { .. })) {
            self.state.dialog = None;
        }
        self.state.cache.invalidate(CacheKey::Tournaments);
        if self.state.tournaments.view == (TournamentsView::Bracket { tournament_id: id }) {
            self.state.tournaments.view = TournamentsView::List;
        }
        self.state.toasts.push(ToastKind::Success, "Tournament deleted", "");
    }

    pub fn on_score_submitted(&mut self, tournament_id: i64, update: MatchUpdate) {
        self.state.mutation_in_flight = false;
        if matches!(self.state.dialog, Some(Dialog::Score(_))) {
            self.state.dialog = None;
        }
        for key in [
            CacheKey::Matches(tournament_id),
            CacheKey::Tournaments,
            CacheKey::Tournament(tournament_id),
        ] {
            self.state.cache.invalidate(key);
        }
        self.state.toasts.push(ToastKind::Success, "Scores saved", "");

        if update.tournament_completed {
            let champion = self
                .champion_name(update.tournament_winner_id, &update.updated)
                .unwrap_or_else(|| "The champion".to_string());
            self.state.toasts.push_delayed(
                ToastKind::Success,
                "We have a champion!",
                &format!("{champion} wins the tournament"),
                CHAMPION_TOAST_DELAY_TICKS,
            );
        }
    }

    fn champion_name(&self, winner_id: Option<i64>, final_match: &Match) -> Option<String> {
        let winner_id = winner_id?;
        if final_match.winner_id == Some(winner_id)
            && let Some(winner) = &final_match.winner
        {
            return Some(winner.name.clone());
        }
        self.state
            .cache
            .teams
            .data
            .as_ref()
            .and_then(|teams| teams.iter().find(|t| t.id == winner_id))
            .map(|t| t.name.clone())
    }

    pub fn on_fetch_failed(&mut self, key: CacheKey, message: String) {
        self.state.cache.fail(key, message);
    }

    pub fn on_mutation_failed(&mut self, message: String) {
        // The dialog stays open so the input is not lost.
        self.state.mutation_in_flight = false;
        self.state.toasts.push(ToastKind::Error, "Request failed", &message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.active_tab == next {
            return;
        }
        self.previous_tab = self.active_tab;
        self.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.active_tab == MenuItem::Help {
            self.active_tab = self.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.state.full_screen = !self.state.full_screen;
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    // -----------------------------------------------------------------------
    // List + bracket navigation
    // -----------------------------------------------------------------------

    pub fn tournaments_len(&self) -> usize {
        self.state.cache.tournaments.data.as_ref().map_or(0, Vec::len)
    }

    pub fn teams_len(&self) -> usize {
        self.state.cache.teams.data.as_ref().map_or(0, Vec::len)
    }

    pub fn selected_tournament(&self) -> Option<&Tournament> {
        self.state.cache.tournaments.data.as_ref()?.get(self.state.tournaments.selected)
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.state.cache.teams.data.as_ref()?.get(self.state.teams.selected)
    }

    pub fn tournaments_down(&mut self) {
        let len = self.tournaments_len();
        if len > 0 {
            self.state.tournaments.selected = (self.state.tournaments.selected + 1).min(len - 1);
        }
    }

    pub fn tournaments_up(&mut self) {
        self.state.tournaments.selected = self.state.tournaments.selected.saturating_sub(1);
    }

    pub fn teams_down(&mut self) {
        let len = self.teams_len();
        if len > 0 {
            self.state.teams.selected = (self.state.teams.selected + 1).min(len - 1);
        }
    }

    pub fn teams_up(&mut self) {
        self.state.teams.selected = self.state.teams.selected.saturating_sub(1);
    }

    pub fn open_bracket(&mut self, tournament_id: i64) {
        self.update_tab(MenuItem::Tournaments);
        self.state.tournaments.view = TournamentsView::Bracket { tournament_id };
        self.state.bracket.selected = 0;
    }

    pub fn close_bracket(&mut self) {
        self.state.tournaments.view = TournamentsView::List;
    }

    pub fn bracket_matches(&self) -> Option<&Vec<Match>> {
        let TournamentsView::Bracket { tournament_id } = self.state.tournaments.view else {
            return None;
        };
        self.state.cache.matches_entry(tournament_id)?.data.as_ref()
    }

    pub fn bracket_next(&mut self) {
        let count = self.bracket_matches().map_or(0, Vec::len);
        if count > 0 {
            self.state.bracket.selected = (self.state.bracket.selected + 1).min(count - 1);
        }
    }

    pub fn bracket_prev(&mut self) {
        self.state.bracket.selected = self.state.bracket.selected.saturating_sub(1);
    }

    /// The match under the bracket cursor, in flattened display order.
    pub fn selected_match(&self) -> Option<Match> {
        let layout = BracketLayout::build(self.bracket_matches()?);
        layout.match_at(self.state.bracket.selected).cloned()
    }

    // -----------------------------------------------------------------------
    // Dialog openers
    // -----------------------------------------------------------------------

    pub fn open_new_team_form(&mut self) {
        self.state.dialog = Some(Dialog::TeamForm(TeamFormState::new()));
    }

    pub fn open_edit_team_form(&mut self) {
        if let Some(team) = self.selected_team() {
            self.state.dialog = Some(Dialog::TeamForm(TeamFormState::editing(
                team.id,
                &team.name,
                team.logo.as_deref(),
            )));
        }
    }

    pub fn open_delete_team_confirm(&mut self) {
        if let Some(team) = self.selected_team() {
            self.state.dialog =
                Some(Dialog::ConfirmDeleteTeam { id: team.id, name: team.name.clone() });
        }
    }

    pub fn open_tournament_form(&mut self) {
        self.state.dialog = Some(Dialog::TournamentForm(TournamentFormState::new()));
    }

    pub fn open_delete_tournament_confirm(&mut self) {
        if let Some(t) = self.selected_tournament() {
            self.state.dialog =
                Some(Dialog::ConfirmDeleteTournament { id: t.id, name: t.name.clone() });
        }
    }

    /// Opens score entry for the selected bracket match if it is editable.
    pub fn open_score_dialog(&mut self) {
        if let Some(m) = self.selected_match()
            && m.is_editable()
        {
            self.state.dialog = Some(Dialog::Score(ScoreFormState::for_match(&m)));
        }
    }

    pub fn close_dialog(&mut self) {
        self.state.dialog = None;
    }
}

fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 { 0 } else { selected.min(len - 1) }
}

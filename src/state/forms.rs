use knockout_api::{CreateTeam, CreateTournament, ScoreUpdate, UpdateTeam};

pub const MIN_TOURNAMENT_TEAMS: usize = 2;
pub const MAX_TOURNAMENT_TEAMS: usize = 16;

/// Bracket sizes must halve cleanly every round, and a one-team bracket has
/// nothing to play.
pub fn is_power_of_two(n: usize) -> bool {
    n > 1 && (n & (n - 1)) == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamFormField {
    #[default]
    Name,
    Logo,
}

/// Create/edit team dialog state. `editing` carries the team id when the
/// dialog was opened on an existing team.
#[derive(Debug, Default)]
pub struct TeamFormState {
    pub editing: Option<i64>,
    pub name: String,
    pub logo: String,
    pub focus: TeamFormField,
    pub name_error: Option<String>,
}

impl TeamFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(id: i64, name: &str, logo: Option<&str>) -> Self {
        Self {
            editing: Some(id),
            name: name.to_string(),
            logo: logo.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            TeamFormField::Name => TeamFormField::Logo,
            TeamFormField::Logo => TeamFormField::Name,
        };
    }

    pub fn input_mut(&mut self) -> &mut String {
        match self.focus {
            TeamFormField::Name => &mut self.name,
            TeamFormField::Logo => &mut self.logo,
        }
    }

    fn logo_value(&self) -> Option<String> {
        let logo = self.logo.trim();
        (!logo.is_empty()).then(|| logo.to_string())
    }

    /// On success returns the payload to send; on failure records the field
    /// error and returns None.
    pub fn validate_create(&mut self) -> Option<CreateTeam> {
        self.check_name()?;
        Some(CreateTeam { name: self.name.trim().to_string(), logo: self.logo_value() })
    }

    pub fn validate_update(&mut self) -> Option<UpdateTeam> {
        self.check_name()?;
        Some(UpdateTeam { name: Some(self.name.trim().to_string()), logo: self.logo_value() })
    }

    fn check_name(&mut self) -> Option<()> {
        if self.name.trim().chars().count() < 3 {
            self.name_error = Some("Team name must be at least 3 characters".to_string());
            return None;
        }
        self.name_error = None;
        Some(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TournamentFormField {
    #[default]
    Name,
    Date,
    Location,
    Teams,
}

/// Create tournament dialog state. Team selection is cursor-driven over the
/// cached team list; `team_ids` holds the toggled selection in toggle order.
#[derive(Debug, Default)]
pub struct TournamentFormState {
    pub name: String,
    pub date: String,
    pub location: String,
    pub team_ids: Vec<i64>,
    pub focus: TournamentFormField,
    pub team_cursor: usize,
    pub name_error: Option<String>,
    pub date_error: Option<String>,
    pub location_error: Option<String>,
    pub teams_error: Option<String>,
}

impl TournamentFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            TournamentFormField::Name => TournamentFormField::Date,
            TournamentFormField::Date => TournamentFormField::Location,
            TournamentFormField::Location => TournamentFormField::Teams,
            TournamentFormField::Teams => TournamentFormField::Name,
        };
    }

    pub fn input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            TournamentFormField::Name => Some(&mut self.name),
            TournamentFormField::Date => Some(&mut self.date),
            TournamentFormField::Location => Some(&mut self.location),
            TournamentFormField::Teams => None,
        }
    }

    pub fn is_selected(&self, team_id: i64) -> bool {
        self.team_ids.contains(&team_id)
    }

    /// Toggle a team in or out of the selection. Selecting past the bracket
    /// cap is rejected and leaves the selection unchanged.
    pub fn toggle_team(&mut self, team_id: i64) {
        if let Some(pos) = self.team_ids.iter().position(|&id| id == team_id) {
            self.team_ids.remove(pos);
            self.teams_error = None;
            return;
        }
        if self.team_ids.len() >= MAX_TOURNAMENT_TEAMS {
            self.teams_error =
                Some(format!("A tournament allows at most {MAX_TOURNAMENT_TEAMS} teams"));
            return;
        }
        self.team_ids.push(team_id);
        self.teams_error = None;
    }

    pub fn validate(&mut self) -> Option<CreateTournament> {
        let mut ok = true;

        if self.name.trim().chars().count() < 3 {
            self.name_error = Some("Tournament name must be at least 3 characters".to_string());
            ok = false;
        } else {
            self.name_error = None;
        }

        if chrono::NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            self.date_error = Some("Date must be YYYY-MM-DD".to_string());
            ok = false;
        } else {
            self.date_error = None;
        }

        if self.location.trim().chars().count() < 3 {
            self.location_error = Some("Location must be at least 3 characters".to_string());
            ok = false;
        } else {
            self.location_error = None;
        }

        let count = self.team_ids.len();
        if count < MIN_TOURNAMENT_TEAMS {
            self.teams_error =
                Some(format!("Select at least {MIN_TOURNAMENT_TEAMS} teams"));
            ok = false;
        } else if !is_power_of_two(count) {
            self.teams_error =
                Some("Team count must be a power of two (2, 4, 8 or 16)".to_string());
            ok = false;
        } else {
            self.teams_error = None;
        }

        ok.then(|| CreateTournament {
            name: self.name.trim().to_string(),
            date: self.date.trim().to_string(),
            location: self.location.trim().to_string(),
            team_ids: self.team_ids.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreFormField {
    #[default]
    Score1,
    Score2,
}

/// Score entry dialog state for one editable match.
#[derive(Debug, Default)]
pub struct ScoreFormState {
    pub match_id: i64,
    pub tournament_id: i64,
    pub team1_name: String,
    pub team2_name: String,
    pub score1: String,
    pub score2: String,
    pub focus: ScoreFormField,
    pub score1_error: Option<String>,
    pub score2_error: Option<String>,
}

impl ScoreFormState {
    pub fn for_match(m: &knockout_api::Match) -> Self {
        Self {
            match_id: m.id,
            tournament_id: m.tournament_id,
            team1_name: m.team_name(0).to_string(),
            team2_name: m.team_name(1).to_string(),
            score1: m.score1.map(|s| s.to_string()).unwrap_or_default(),
            score2: m.score2.map(|s| s.to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ScoreFormField::Score1 => ScoreFormField::Score2,
            ScoreFormField::Score2 => ScoreFormField::Score1,
        };
    }

    pub fn input_mut(&mut self) -> &mut String {
        match self.focus {
            ScoreFormField::Score1 => &mut self.score1,
            ScoreFormField::Score2 => &mut self.score2,
        }
    }

    pub fn validate(&mut self) -> Option<ScoreUpdate> {
        let score1 = parse_score(&self.score1);
        let score2 = parse_score(&self.score2);
        self.score1_error =
            score1.is_none().then(|| "Score must be a non-negative number".to_string());
        self.score2_error =
            score2.is_none().then(|| "Score must be a non-negative number".to_string());

        let (score1, score2) = (score1?, score2?);
        if score1 == score2 {
            // Knockout matches must produce a winner.
            self.score2_error = Some("Ties are not allowed".to_string());
            return None;
        }
        Some(ScoreUpdate { score1, score2 })
    }
}

fn parse_score(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_excludes_one_and_zero() {
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(1));
        assert!(is_power_of_two(2));
        assert!(!is_power_of_two(3));
        assert!(is_power_of_two(4));
        assert!(!is_power_of_two(6));
        assert!(is_power_of_two(8));
        assert!(!is_power_of_two(12));
        assert!(is_power_of_two(16));
    }

    #[test]
    fn team_form_rejects_short_name() {
        let mut form = TeamFormState::new();
        form.name = " ab ".to_string();
        assert!(form.validate_create().is_none());
        assert!(form.name_error.is_some());

        form.name = "AC Torino".to_string();
        let payload = form.validate_create().unwrap();
        assert_eq!(payload.name, "AC Torino");
        assert_eq!(payload.logo, None);
        assert!(form.name_error.is_none());
    }

    #[test]
    fn team_form_trims_logo_and_drops_empty() {
        let mut form = TeamFormState::new();
        form.name = "AC Torino".to_string();
        form.logo = "  https://example.com/badge.png ".to_string();
        let payload = form.validate_create().unwrap();
        assert_eq!(payload.logo.as_deref(), Some("https://example.com/badge.png"));
    }

    #[test]
    fn tournament_form_requires_power_of_two_selection() {
        let mut form = TournamentFormState::new();
        form.name = "Summer Cup".to_string();
        form.date = "2026-07-01".to_string();
        form.location = "Lisbon".to_string();
        for id in [1, 2, 3] {
            form.toggle_team(id);
        }
        assert!(form.validate().is_none());
        assert!(form.teams_error.is_some());

        form.toggle_team(4);
        let payload = form.validate().unwrap();
        assert_eq!(payload.team_ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn tournament_form_rejects_single_team() {
        let mut form = TournamentFormState::new();
        form.name = "Summer Cup".to_string();
        form.date = "2026-07-01".to_string();
        form.location = "Lisbon".to_string();
        form.toggle_team(1);
        assert!(form.validate().is_none());
        assert_eq!(form.teams_error.as_deref(), Some("Select at least 2 teams"));
    }

    #[test]
    fn tournament_form_caps_selection_at_sixteen() {
        let mut form = TournamentFormState::new();
        for id in 1..=16 {
            form.toggle_team(id);
        }
        assert_eq!(form.team_ids.len(), 16);

        form.toggle_team(17);
        assert_eq!(form.team_ids.len(), 16, "17th selection must be rejected");
        assert!(!form.is_selected(17));
        assert!(form.teams_error.is_some());

        // Deselecting works and clears the error.
        form.toggle_team(16);
        assert_eq!(form.team_ids.len(), 15);
        assert!(form.teams_error.is_none());
    }

    #[test]
    fn tournament_form_rejects_bad_date() {
        let mut form = TournamentFormState::new();
        form.name = "Summer Cup".to_string();
        form.date = "01/07/2026".to_string();
        form.location = "Lisbon".to_string();
        for id in [1, 2] {
            form.toggle_team(id);
        }
        assert!(form.validate().is_none());
        assert!(form.date_error.is_some());
    }

    #[test]
    fn score_form_rejects_ties_and_garbage() {
        let mut form = ScoreFormState::default();
        form.score1 = "3".to_string();
        form.score2 = "3".to_string();
        assert!(form.validate().is_none());
        assert_eq!(form.score2_error.as_deref(), Some("Ties are not allowed"));

        form.score2 = "-1".to_string();
        assert!(form.validate().is_none());
        assert!(form.score2_error.is_some());

        form.score2 = "two".to_string();
        assert!(form.validate().is_none());

        form.score2 = "1".to_string();
        let payload = form.validate().unwrap();
        assert_eq!((payload.score1, payload.score2), (3, 1));
        assert!(form.score1_error.is_none());
        assert!(form.score2_error.is_none());
    }
}

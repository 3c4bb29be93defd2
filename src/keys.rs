use crate::app::{App, MenuItem};
use crate::state::app_state::Dialog;
use crate::state::forms::TournamentFormField;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // An open dialog captures all input.
    if guard.state.dialog.is_some() {
        let request = handle_dialog_key(key_event, &mut guard);
        drop(guard);
        if let Some(request) = request {
            let _ = network_requests.send(request).await;
        }
        return;
    }

    match (guard.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Dashboard),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Tournaments),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Teams),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Tournaments: list view
        (MenuItem::Tournaments, Char('j') | KeyCode::Down, _) if !guard.in_bracket() => {
            guard.tournaments_down();
        }
        (MenuItem::Tournaments, Char('k') | KeyCode::Up, _) if !guard.in_bracket() => {
            guard.tournaments_up();
        }
        (MenuItem::Tournaments, KeyCode::Enter, _) if !guard.in_bracket() => {
            if let Some(t) = guard.selected_tournament() {
                let id = t.id;
                guard.open_bracket(id);
            }
        }
        (MenuItem::Tournaments, Char('n'), _) if !guard.in_bracket() => {
            guard.open_tournament_form();
        }
        (MenuItem::Tournaments, Char('d'), _) if !guard.in_bracket() => {
            guard.open_delete_tournament_confirm();
        }

        // Tournaments: bracket view
        (MenuItem::Tournaments, Char('j') | Char('l') | KeyCode::Down | KeyCode::Right, _) => {
            guard.bracket_next();
        }
        (MenuItem::Tournaments, Char('k') | Char('h') | KeyCode::Up | KeyCode::Left, _) => {
            guard.bracket_prev();
        }
        (MenuItem::Tournaments, KeyCode::Enter, _) => guard.open_score_dialog(),
        (MenuItem::Tournaments, KeyCode::Esc, _) => guard.close_bracket(),

        // Teams
        (MenuItem::Teams, Char('j') | KeyCode::Down, _) => guard.teams_down(),
        (MenuItem::Teams, Char('k') | KeyCode::Up, _) => guard.teams_up(),
        (MenuItem::Teams, Char('n'), _) => guard.open_new_team_form(),
        (MenuItem::Teams, Char('e') | KeyCode::Enter, _) => guard.open_edit_team_form(),
        (MenuItem::Teams, Char('d'), _) => guard.open_delete_team_confirm(),

        // Global
        (_, Char('t'), _) => guard.toggle_theme(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

impl App {
    fn in_bracket(&self) -> bool {
        !matches!(
            self.state.tournaments.view,
            crate::state::app_state::TournamentsView::List
        )
    }
}

/// Routes a key press into the open dialog. Returns the mutation to send when
/// the dialog submitted successfully.
fn handle_dialog_key(key_event: KeyEvent, app: &mut App) -> Option<NetworkRequest> {
    if key_event.code == KeyCode::Esc {
        app.close_dialog();
        return None;
    }
    if app.state.mutation_in_flight {
        // One write at a time; ignore input until the response lands.
        return None;
    }

    let mut close = false;
    let request = match app.state.dialog.as_mut()? {
        Dialog::TeamForm(form) => match key_event.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                form.next_field();
                None
            }
            KeyCode::Backspace => {
                form.input_mut().pop();
                None
            }
            Char(c) => {
                form.input_mut().push(c);
                None
            }
            KeyCode::Enter => match form.editing {
                Some(id) => form
                    .validate_update()
                    .map(|data| NetworkRequest::UpdateTeam { id, data }),
                None => form.validate_create().map(|data| NetworkRequest::CreateTeam { data }),
            },
            _ => None,
        },

        Dialog::TournamentForm(form) => match key_event.code {
            KeyCode::Tab | KeyCode::BackTab => {
                form.next_field();
                None
            }
            KeyCode::Down if form.focus == TournamentFormField::Teams => {
                let len = app
                    .state
                    .cache
                    .teams
                    .data
                    .as_ref()
                    .map_or(0, Vec::len);
                if len > 0 {
                    form.team_cursor = (form.team_cursor + 1).min(len - 1);
                }
                None
            }
            KeyCode::Up if form.focus == TournamentFormField::Teams => {
                form.team_cursor = form.team_cursor.saturating_sub(1);
                None
            }
            Char(' ') if form.focus == TournamentFormField::Teams => {
                if let Some(team) = app
                    .state
                    .cache
                    .teams
                    .data
                    .as_ref()
                    .and_then(|teams| teams.get(form.team_cursor))
                {
                    let id = team.id;
                    form.toggle_team(id);
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(input) = form.input_mut() {
                    input.pop();
                }
                None
            }
            Char(c) => {
                if let Some(input) = form.input_mut() {
                    input.push(c);
                }
                None
            }
            KeyCode::Enter => {
                form.validate().map(|data| NetworkRequest::CreateTournament { data })
            }
            _ => None,
        },

        Dialog::Score(form) => match key_event.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                form.next_field();
                None
            }
            KeyCode::Backspace => {
                form.input_mut().pop();
                None
            }
            Char(c) if c.is_ascii_digit() => {
                form.input_mut().push(c);
                None
            }
            KeyCode::Enter => form.validate().map(|scores| NetworkRequest::SubmitScore {
                match_id: form.match_id,
                tournament_id: form.tournament_id,
                scores,
            }),
            _ => None,
        },

        Dialog::ConfirmDeleteTeam { id, .. } => match key_event.code {
            KeyCode::Enter | Char('y') => Some(NetworkRequest::DeleteTeam { id: *id }),
            Char('n') => {
                close = true;
                None
            }
            _ => None,
        },

        Dialog::ConfirmDeleteTournament { id, .. } => match key_event.code {
            KeyCode::Enter | Char('y') => Some(NetworkRequest::DeleteTournament { id: *id }),
            Char('n') => {
                close = true;
                None
            }
            _ => None,
        },
    };

    if close {
        app.close_dialog();
    }
    if request.is_some() {
        app.state.mutation_in_flight = true;
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_state::Dialog;
    use crate::state::theme::ThemeContext;
    use knockout_api::Team;

    fn test_app() -> App {
        // A per-process temp path no test in this module ever writes.
        let path = std::env::temp_dir()
            .join(format!("kotui-keys-tests-{}", std::process::id()))
            .join("theme");
        App {
            theme: ThemeContext::load_from(path),
            state: Default::default(),
            active_tab: Default::default(),
            previous_tab: Default::default(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_dialog_key(key(Char(c)), app);
        }
    }

    #[test]
    fn team_form_submits_after_typing_a_name() {
        let mut app = test_app();
        app.open_new_team_form();
        type_text(&mut app, "AC Torino");
        let request = handle_dialog_key(key(KeyCode::Enter), &mut app);
        match request {
            Some(NetworkRequest::CreateTeam { data }) => assert_eq!(data.name, "AC Torino"),
            other => panic!("expected CreateTeam, got {other:?}"),
        }
        assert!(app.state.mutation_in_flight);
    }

    #[test]
    fn invalid_team_form_does_not_submit() {
        let mut app = test_app();
        app.open_new_team_form();
        type_text(&mut app, "ab");
        assert!(handle_dialog_key(key(KeyCode::Enter), &mut app).is_none());
        assert!(!app.state.mutation_in_flight);
        let Some(Dialog::TeamForm(form)) = &app.state.dialog else {
            panic!("dialog must stay open");
        };
        assert!(form.name_error.is_some());
    }

    #[test]
    fn escape_closes_the_dialog() {
        let mut app = test_app();
        app.open_new_team_form();
        handle_dialog_key(key(KeyCode::Esc), &mut app);
        assert!(app.state.dialog.is_none());
    }

    #[test]
    fn in_flight_mutation_swallows_further_submits() {
        let mut app = test_app();
        app.open_new_team_form();
        type_text(&mut app, "AC Torino");
        assert!(handle_dialog_key(key(KeyCode::Enter), &mut app).is_some());
        assert!(handle_dialog_key(key(KeyCode::Enter), &mut app).is_none());
    }

    #[test]
    fn tournament_form_space_toggles_team_under_cursor() {
        let mut app = test_app();
        app.state.cache.teams.resolve(vec![
            Team { id: 10, name: "A".into(), ..Team::default() },
            Team { id: 20, name: "B".into(), ..Team::default() },
        ]);
        app.open_tournament_form();
        // Move focus to the team list: Name -> Date -> Location -> Teams.
        for _ in 0..3 {
            handle_dialog_key(key(KeyCode::Tab), &mut app);
        }
        handle_dialog_key(key(KeyCode::Down), &mut app);
        handle_dialog_key(key(Char(' ')), &mut app);
        let Some(Dialog::TournamentForm(form)) = &app.state.dialog else {
            panic!("dialog must stay open");
        };
        assert_eq!(form.team_ids, vec![20]);
    }

    #[test]
    fn score_form_ignores_non_digit_input() {
        let mut app = test_app();
        app.state.dialog = Some(Dialog::Score(Default::default()));
        type_text(&mut app, "3a");
        let Some(Dialog::Score(form)) = &app.state.dialog else {
            panic!("dialog must stay open");
        };
        assert_eq!(form.score1, "3");
    }

    #[test]
    fn confirm_delete_sends_the_delete_request() {
        let mut app = test_app();
        app.state.dialog = Some(Dialog::ConfirmDeleteTeam { id: 5, name: "A".into() });
        let request = handle_dialog_key(key(Char('y')), &mut app);
        assert!(matches!(request, Some(NetworkRequest::DeleteTeam { id: 5 })));
    }
}

use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::components::bracket::{BracketLayout, BracketView};
use crate::state::app_state::{Dialog, Toast, ToastKind, TournamentsView};
use crate::state::forms::{
    ScoreFormField, ScoreFormState, TeamFormField, TeamFormState, TournamentFormField,
    TournamentFormState,
};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::query_cache::Query;
use crate::state::theme::Palette;
use crate::ui::layout::LayoutAreas;
use knockout_api::{Team, Tournament, TournamentStatus};
use tui_logger::TuiLoggerWidget;

static TABS: &[&str; 3] = &["Dashboard", "Tournaments", "Teams"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);
    let palette = app.theme.palette();

    terminal
        .draw(|f| {
            layout.update(f.area(), app.state.full_screen);

            if !app.state.full_screen {
                draw_tabs(f, layout.tab_bar, app, palette);
                draw_hint_bar(f, layout.hint_bar, app, palette);
            }

            match app.active_tab {
                MenuItem::Dashboard => draw_dashboard(f, layout.main, app, palette),
                MenuItem::Tournaments => draw_tournaments(f, layout.main, app, palette),
                MenuItem::Teams => draw_teams(f, layout.main, app, palette),
                MenuItem::Help => draw_help(f, layout.main, palette),
            }

            if let Some(dialog) = &app.state.dialog {
                draw_dialog(f, f.area(), dialog, app, palette);
            }

            if app.state.show_logs {
                draw_logs(f, f.area(), palette);
            }

            draw_toasts(f, f.area(), app, palette);
            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App, palette: Palette) {
    let style = Style::default().fg(palette.text);
    let border_type = BorderType::Rounded;

    let tab_index = match app.active_tab {
        MenuItem::Dashboard => 0,
        MenuItem::Tournaments => 1,
        MenuItem::Teams => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(
            Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED),
        )
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_hint_bar(f: &mut Frame, area: Rect, app: &App, palette: Palette) {
    let hints = if app.state.dialog.is_some() {
        "Tab=next field  Enter=submit  Esc=cancel"
    } else {
        match app.active_tab {
            MenuItem::Dashboard => "1/2/3=tabs  t=theme  ?=help  q=quit",
            MenuItem::Tournaments => match app.state.tournaments.view {
                TournamentsView::List => {
                    "j/k=move  Enter=bracket  n=new  d=delete  t=theme  q=quit"
                }
                TournamentsView::Bracket { .. } => {
                    "h/j/k/l=move  Enter=enter score  Esc=back  q=quit"
                }
            },
            MenuItem::Teams => "j/k=move  n=new  e=edit  d=delete  t=theme  q=quit",
            MenuItem::Help => "Esc=back  q=quit",
        }
    };
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(palette.dim)),
        area,
    );
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App, palette: Palette) {
    let block = default_border(palette.border).title(" Dashboard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let tournaments = &app.state.cache.tournaments;
    let teams = &app.state.cache.teams;
    if let Some(msg) = query_status_line(tournaments).or_else(|| query_status_line(teams)) {
        draw_centered_message(f, inner, &msg, palette);
        return;
    }
    let (Some(tournaments), Some(teams)) = (tournaments.data.as_ref(), teams.data.as_ref())
    else {
        return;
    };

    let [stats_row, body] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(inner);
    draw_stat_cards(f, stats_row, tournaments, teams, palette);

    let [recent_area, fame_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(body);
    draw_recent_tournaments(f, recent_area, tournaments, palette);
    draw_hall_of_fame(f, fame_area, tournaments, palette);
}

fn draw_stat_cards(
    f: &mut Frame,
    area: Rect,
    tournaments: &[Tournament],
    teams: &[Team],
    palette: Palette,
) {
    let in_progress =
        tournaments.iter().filter(|t| t.status == TournamentStatus::InProgress).count();
    let completed =
        tournaments.iter().filter(|t| t.status == TournamentStatus::Completed).count();

    let cards = [
        ("Tournaments", tournaments.len()),
        ("In progress", in_progress),
        ("Completed", completed),
        ("Teams", teams.len()),
    ];
    let areas: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(area);
    for ((label, value), card_area) in cards.into_iter().zip(areas) {
        let block = default_border(palette.border);
        let card_inner = block.inner(card_area);
        f.render_widget(block, card_area);
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{value} "),
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(label, Style::default().fg(palette.dim)),
            ])),
            card_inner,
        );
    }
}

fn draw_recent_tournaments(
    f: &mut Frame,
    area: Rect,
    tournaments: &[Tournament],
    palette: Palette,
) {
    let block = default_border(palette.border).title(" Recent tournaments ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if tournaments.is_empty() {
        draw_centered_message(f, inner, "No tournaments yet. Press 2, then n.", palette);
        return;
    }

    let mut lines = Vec::new();
    for t in tournaments.iter().take(inner.height as usize) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", clip(&t.name, 23)), Style::default().fg(palette.text)),
            Span::styled(format!("{:<14}", t.date_display()), Style::default().fg(palette.dim)),
            Span::styled(t.status.label(), status_style(t.status, palette)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

/// Teams ranked by how many tournaments they have won.
fn draw_hall_of_fame(f: &mut Frame, area: Rect, tournaments: &[Tournament], palette: Palette) {
    let block = default_border(palette.border).title(" Hall of fame ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut wins: Vec<(&str, usize)> = Vec::new();
    for t in tournaments {
        if t.status != TournamentStatus::Completed {
            continue;
        }
        let Some(winner) = t.winner.as_ref() else {
            continue;
        };
        match wins.iter().position(|(name, _)| *name == winner.name) {
            Some(pos) => wins[pos].1 += 1,
            None => wins.push((&winner.name, 1)),
        }
    }
    if wins.is_empty() {
        draw_centered_message(f, inner, "No champions crowned yet", palette);
        return;
    }
    wins.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut lines = Vec::new();
    for (rank, (name, count)) in wins.iter().take(inner.height as usize).enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", rank + 1), Style::default().fg(palette.dim)),
            Span::styled(
                format!("{:<20}", clip(name, 19)),
                Style::default().fg(palette.winner).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{count} {}", if *count == 1 { "title" } else { "titles" }),
                Style::default().fg(palette.text),
            ),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

fn draw_tournaments(f: &mut Frame, area: Rect, app: &App, palette: Palette) {
    match app.state.tournaments.view {
        TournamentsView::List => draw_tournament_list(f, area, app, palette),
        TournamentsView::Bracket { tournament_id } => {
            draw_bracket_page(f, area, app, tournament_id, palette)
        }
    }
}

fn draw_tournament_list(f: &mut Frame, area: Rect, app: &App, palette: Palette) {
    let block = default_border(palette.border).title(" Tournaments ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let query = &app.state.cache.tournaments;
    if let Some(msg) = query_status_line(query) {
        draw_centered_message(f, inner, &msg, palette);
        return;
    }
    let Some(tournaments) = query.data.as_ref() else {
        return;
    };
    if tournaments.is_empty() {
        draw_centered_message(f, inner, "No tournaments yet. Press n to create one.", palette);
        return;
    }

    let mut lines = Vec::new();
    for (idx, t) in tournaments.iter().enumerate() {
        let marker = if idx == app.state.tournaments.selected { "> " } else { "  " };
        let base = if idx == app.state.tournaments.selected {
            Style::default().fg(palette.heading).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        let winner = t
            .winner
            .as_ref()
            .map(|w| format!("  🏆 {}", w.name))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<26}", clip(&t.name, 25)), base),
            Span::styled(format!("{:<14}", t.date_display()), Style::default().fg(palette.dim)),
            Span::styled(format!("{:<16}", clip(&t.location, 15)), Style::default().fg(palette.dim)),
            Span::styled(format!("{:<12}", t.status.label()), status_style(t.status, palette)),
            Span::styled(winner, Style::default().fg(palette.winner)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_bracket_page(f: &mut Frame, area: Rect, app: &App, tournament_id: i64, palette: Palette) {
    let title = app
        .state
        .cache
        .tournament_entry(tournament_id)
        .and_then(|q| q.data.as_ref())
        .map(|t| format!(" {} | {} | {} ", t.name, t.date_display(), t.status.label()))
        .unwrap_or_else(|| " Bracket ".to_string());
    let block = default_border(palette.border).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(query) = app.state.cache.matches_entry(tournament_id) else {
        draw_centered_message(f, inner, "Loading bracket...", palette);
        return;
    };
    if let Some(msg) = query_status_line(query) {
        draw_centered_message(f, inner, &msg, palette);
        return;
    }
    let Some(matches) = query.data.as_ref() else {
        return;
    };

    let layout = BracketLayout::build(matches);
    if layout.match_count() == 0 {
        draw_centered_message(f, inner, "This tournament has no matches", palette);
        return;
    }
    f.render_widget(
        BracketView { layout: &layout, selected: app.state.bracket.selected, palette },
        inner,
    );
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

fn draw_teams(f: &mut Frame, area: Rect, app: &App, palette: Palette) {
    let block = default_border(palette.border).title(" Teams ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let query = &app.state.cache.teams;
    if let Some(msg) = query_status_line(query) {
        draw_centered_message(f, inner, &msg, palette);
        return;
    }
    let Some(teams) = query.data.as_ref() else {
        return;
    };
    if teams.is_empty() {
        draw_centered_message(f, inner, "No teams yet. Press n to create one.", palette);
        return;
    }

    let mut lines = Vec::new();
    for (idx, team) in teams.iter().enumerate() {
        let marker = if idx == app.state.teams.selected { "> " } else { "  " };
        let base = if idx == app.state.teams.selected {
            Style::default().fg(palette.heading).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        let created = team
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let note = if team.has_participated { "in tournaments" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<28}", clip(&team.name, 27)), base),
            Span::styled(
                format!("{:<8}", if team.logo.is_some() { "logo" } else { "" }),
                Style::default().fg(palette.dim),
            ),
            Span::styled(format!("{created:<13}"), Style::default().fg(palette.dim)),
            Span::styled(note, Style::default().fg(palette.dim)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help(f: &mut Frame, area: Rect, palette: Palette) {
    let block = default_border(palette.border).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = "\
Tabs        1=Dashboard  2=Tournaments  3=Teams
Lists       j/k or arrows move, Enter opens
Tournaments n=new  d=delete  Enter=open bracket
Bracket     h/j/k/l move between matches, Enter enters a score
Teams       n=new  e=edit  d=delete
Forms       Tab=next field  Space=toggle team  Enter=submit  Esc=cancel
Global      t=theme  f=full screen  \"=logs  ?=help  q=quit";
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(palette.text)),
        inner,
    );
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

fn draw_dialog(f: &mut Frame, area: Rect, dialog: &Dialog, app: &App, palette: Palette) {
    match dialog {
        Dialog::TeamForm(form) => draw_team_form(f, area, form, palette),
        Dialog::TournamentForm(form) => draw_tournament_form(f, area, form, app, palette),
        Dialog::Score(form) => draw_score_form(f, area, form, palette),
        Dialog::ConfirmDeleteTeam { name, .. } => draw_confirm(
            f,
            area,
            " Delete team ",
            &format!("Delete team \"{name}\"?\n\ny/Enter=delete  n/Esc=cancel"),
            palette,
        ),
        Dialog::ConfirmDeleteTournament { name, .. } => draw_confirm(
            f,
            area,
            " Delete tournament ",
            &format!(
                "Delete tournament \"{name}\" and all its matches?\n\ny/Enter=delete  n/Esc=cancel"
            ),
            palette,
        ),
    }
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn field_line(
    label: &str,
    value: &str,
    focused: bool,
    error: Option<&str>,
    palette: Palette,
) -> Vec<Line<'static>> {
    let label_style = if focused {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.dim)
    };
    let cursor = if focused { "_" } else { "" };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::styled(format!("{value}{cursor}"), Style::default().fg(palette.text)),
    ])];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("          {error}"),
            Style::default().fg(palette.error),
        )));
    }
    lines
}

fn draw_team_form(f: &mut Frame, area: Rect, form: &TeamFormState, palette: Palette) {
    let title = if form.editing.is_some() { " Edit team " } else { " New team " };
    let popup = popup_area(area, 52, 9);
    f.render_widget(Clear, popup);
    let block = default_border(palette.accent).title(title);
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines = Vec::new();
    lines.extend(field_line(
        "Name",
        &form.name,
        form.focus == TeamFormField::Name,
        form.name_error.as_deref(),
        palette,
    ));
    lines.extend(field_line(
        "Logo URL",
        &form.logo,
        form.focus == TeamFormField::Logo,
        None,
        palette,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter=save  Esc=cancel",
        Style::default().fg(palette.dim),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_tournament_form(
    f: &mut Frame,
    area: Rect,
    form: &TournamentFormState,
    app: &App,
    palette: Palette,
) {
    let popup = popup_area(area, 64, 22);
    f.render_widget(Clear, popup);
    let block = default_border(palette.accent).title(" New tournament ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines = Vec::new();
    lines.extend(field_line(
        "Name",
        &form.name,
        form.focus == TournamentFormField::Name,
        form.name_error.as_deref(),
        palette,
    ));
    lines.extend(field_line(
        "Date",
        &form.date,
        form.focus == TournamentFormField::Date,
        form.date_error.as_deref(),
        palette,
    ));
    lines.extend(field_line(
        "Location",
        &form.location,
        form.focus == TournamentFormField::Location,
        form.location_error.as_deref(),
        palette,
    ));
    lines.push(Line::from(""));

    let teams_focused = form.focus == TournamentFormField::Teams;
    let teams_label_style = if teams_focused {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.dim)
    };
    lines.push(Line::from(Span::styled(
        format!("Teams ({} selected, need 2/4/8/16)", form.team_ids.len()),
        teams_label_style,
    )));
    if let Some(error) = form.teams_error.as_deref() {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(palette.error),
        )));
    }

    match app.state.cache.teams.data.as_ref() {
        Some(teams) if !teams.is_empty() => {
            let visible = inner.height.saturating_sub(lines.len() as u16 + 2) as usize;
            let offset = form.team_cursor.saturating_sub(visible.saturating_sub(1));
            for (idx, team) in teams.iter().enumerate().skip(offset).take(visible.max(1)) {
                let cursor = if teams_focused && idx == form.team_cursor { ">" } else { " " };
                let mark = if form.is_selected(team.id) { "[x]" } else { "[ ]" };
                let style = if form.is_selected(team.id) {
                    Style::default().fg(palette.success)
                } else {
                    Style::default().fg(palette.text)
                };
                lines.push(Line::from(Span::styled(
                    format!("{cursor} {mark} {}", clip(&team.name, 40)),
                    style,
                )));
            }
        }
        _ => lines.push(Line::from(Span::styled(
            "  Loading teams...",
            Style::default().fg(palette.dim),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab=field  ↑/↓=move  Space=toggle  Enter=create  Esc=cancel",
        Style::default().fg(palette.dim),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_score_form(f: &mut Frame, area: Rect, form: &ScoreFormState, palette: Palette) {
    let popup = popup_area(area, 52, 10);
    f.render_widget(Clear, popup);
    let block = default_border(palette.accent).title(" Enter score ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines = Vec::new();
    lines.extend(field_line(
        &clip(&form.team1_name, 18),
        &form.score1,
        form.focus == ScoreFormField::Score1,
        form.score1_error.as_deref(),
        palette,
    ));
    lines.extend(field_line(
        &clip(&form.team2_name, 18),
        &form.score2,
        form.focus == ScoreFormField::Score2,
        form.score2_error.as_deref(),
        palette,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter=save  Esc=cancel",
        Style::default().fg(palette.dim),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_confirm(f: &mut Frame, area: Rect, title: &str, body: &str, palette: Palette) {
    let popup = popup_area(area, 56, 7);
    f.render_widget(Clear, popup);
    let block = default_border(palette.error).title(title.to_string());
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    f.render_widget(
        Paragraph::new(body.to_string())
            .style(Style::default().fg(palette.text))
            .alignment(Alignment::Center),
        inner,
    );
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn draw_toasts(f: &mut Frame, area: Rect, app: &App, palette: Palette) {
    let toasts: Vec<&Toast> = app.state.toasts.visible().collect();
    let mut y = area.y + 1;
    for toast in toasts {
        let color = match toast.kind {
            ToastKind::Success => palette.success,
            ToastKind::Error => palette.error,
        };
        let body_width = toast.body.chars().count().min(40);
        let width = (toast.title.chars().count().max(body_width) as u16 + 4).min(area.width);
        let height = if toast.body.is_empty() { 3 } else { 4 };
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width.saturating_sub(width + 1), y, width, height);
        f.render_widget(Clear, rect);
        let block = default_border(color);
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let mut lines = vec![Line::from(Span::styled(
            toast.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        if !toast.body.is_empty() {
            lines.push(Line::from(Span::styled(
                clip(&toast.body, 40),
                Style::default().fg(palette.text),
            )));
        }
        f.render_widget(Paragraph::new(lines), inner);
        y += height;
    }
}

fn draw_logs(f: &mut Frame, area: Rect, palette: Palette) {
    let popup = popup_area(area, area.width.saturating_sub(8), area.height.saturating_sub(4));
    f.render_widget(Clear, popup);
    let logs = TuiLoggerWidget::default()
        .block(default_border(palette.border).title(" Logs "))
        .style_error(Style::default().fg(palette.error))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(palette.text))
        .style_debug(Style::default().fg(palette.dim));
    f.render_widget(logs, popup);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.state.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// "Loading..." while the first fetch is out, the error message after a
/// failure, None once data is available.
fn query_status_line<T>(query: &Query<T>) -> Option<String> {
    if let Some(error) = query.error.as_deref() {
        return Some(format!("Request failed:\n{error}"));
    }
    if query.data.is_none() {
        return Some("Loading...".to_string());
    }
    None
}

fn status_style(status: TournamentStatus, palette: Palette) -> Style {
    match status {
        TournamentStatus::Pending => Style::default().fg(palette.dim),
        TournamentStatus::InProgress => Style::default().fg(palette.accent),
        TournamentStatus::Completed => Style::default().fg(palette.success),
    }
}

fn draw_centered_message(f: &mut Frame, area: Rect, msg: &str, palette: Palette) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(palette.dim))
            .alignment(Alignment::Center),
        area,
    );
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

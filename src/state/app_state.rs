use crate::state::forms::{ScoreFormState, TeamFormState, TournamentFormState};
use crate::state::query_cache::QueryCache;

/// Toasts live for ~4 seconds of 80ms ticks.
const TOAST_TICKS: u16 = 50;
/// The champion announcement trails the score confirmation by ~500ms.
pub const CHAMPION_TOAST_DELAY_TICKS: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub body: String,
    pub ticks_left: u16,
    /// Ticks remaining before the toast becomes visible.
    pub delay: u16,
}

impl Toast {
    pub fn is_visible(&self) -> bool {
        self.delay == 0
    }
}

#[derive(Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

impl ToastState {
    pub fn push(&mut self, kind: ToastKind, title: &str, body: &str) {
        self.push_delayed(kind, title, body, 0);
    }

    pub fn push_delayed(&mut self, kind: ToastKind, title: &str, body: &str, delay: u16) {
        self.toasts.push(Toast {
            kind,
            title: title.to_string(),
            body: body.to_string(),
            ticks_left: TOAST_TICKS,
            delay,
        });
    }

    pub fn tick(&mut self) {
        for toast in &mut self.toasts {
            if toast.delay > 0 {
                toast.delay -= 1;
            } else {
                toast.ticks_left = toast.ticks_left.saturating_sub(1);
            }
        }
        self.toasts.retain(|t| t.ticks_left > 0);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().filter(|t| t.is_visible())
    }
}

/// Which modal is open, if any. At most one dialog at a time; all keyboard
/// input routes to it while present.
#[derive(Debug)]
pub enum Dialog {
    TeamForm(TeamFormState),
    TournamentForm(TournamentFormState),
    Score(ScoreFormState),
    ConfirmDeleteTeam { id: i64, name: String },
    ConfirmDeleteTournament { id: i64, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TournamentsView {
    #[default]
    List,
    Bracket {
        tournament_id: i64,
    },
}

#[derive(Debug, Default)]
pub struct TournamentsState {
    pub selected: usize,
    pub view: TournamentsView,
}

#[derive(Debug, Default)]
pub struct BracketState {
    /// Index into the bracket's flattened navigation order.
    pub selected: usize,
}

#[derive(Debug, Default)]
pub struct TeamsState {
    pub selected: usize,
}

/// Everything the draw code reads. Mutated only by the key handler and the
/// network response handler on the UI task.
#[derive(Debug, Default)]
pub struct AppState {
    pub cache: QueryCache,
    pub tournaments: TournamentsState,
    pub bracket: BracketState,
    pub teams: TeamsState,
    pub dialog: Option<Dialog>,
    pub toasts: ToastState,
    /// Set while a write is on the wire; blocks a second submit.
    pub mutation_in_flight: bool,
    pub full_screen: bool,
    pub show_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires_after_ttl() {
        let mut toasts = ToastState::default();
        toasts.push(ToastKind::Success, "Saved", "Team saved");
        for _ in 0..TOAST_TICKS - 1 {
            toasts.tick();
        }
        assert_eq!(toasts.toasts.len(), 1);
        toasts.tick();
        assert!(toasts.toasts.is_empty());
    }

    #[test]
    fn delayed_toast_stays_hidden_until_delay_elapses() {
        let mut toasts = ToastState::default();
        toasts.push(ToastKind::Success, "Scores saved", "");
        toasts.push_delayed(ToastKind::Success, "Champion", "FC Milano wins", 6);
        assert_eq!(toasts.visible().count(), 1);

        for _ in 0..6 {
            toasts.tick();
        }
        assert_eq!(toasts.visible().count(), 2);

        // The delayed toast outlives the immediate one by its delay.
        for _ in 0..TOAST_TICKS - 6 {
            toasts.tick();
        }
        let remaining: Vec<_> = toasts.visible().map(|t| t.title.as_str()).collect();
        assert_eq!(remaining, vec!["Champion"]);
    }
}

use crate::state::theme::Palette;
use knockout_api::{Match, MatchStatus};
use std::collections::BTreeMap;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Modifier, Style};
use tui::widgets::Widget;

/// Rows per match card: team1 line, score/status line, team2 line.
pub const MATCH_HEIGHT: u16 = 3;

/// Minimum card width before the view gives up rendering.
const CELL_W_MIN: u16 = 12;
const CELL_W_FULL: u16 = 24;
const COLUMN_GAP: u16 = 2;

/// One displayed column of the bracket: a round (or half of one).
#[derive(Debug, Clone)]
pub struct RoundColumn {
    pub round: u32,
    pub name: String,
    pub matches: Vec<Match>,
}

/// Two-sided bracket layout converging on the final in the center column.
///
/// Every round before the final is split in half: the first matches of the
/// round feed the left side, the rest feed the right. Left columns run
/// first-round to semifinal, right columns run semifinal to first-round, so
/// both sides read inward toward the final.
#[derive(Debug, Clone, Default)]
pub struct BracketLayout {
    pub left: Vec<RoundColumn>,
    pub center: Option<RoundColumn>,
    pub right: Vec<RoundColumn>,
    pub total_rounds: u32,
}

impl BracketLayout {
    pub fn build(matches: &[Match]) -> Self {
        if matches.is_empty() {
            return Self::default();
        }

        let mut rounds: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
        for m in matches {
            rounds.entry(m.round).or_default().push(m.clone());
        }
        for round in rounds.values_mut() {
            round.sort_by_key(|m| m.position);
        }

        let total_rounds = rounds.len() as u32;
        let final_round = *rounds.keys().next_back().unwrap_or(&0);

        let mut layout = Self { total_rounds, ..Self::default() };
        let mut right_rev = Vec::new();

        for (round, round_matches) in rounds {
            let name = round_name(round, total_rounds);
            if round == final_round {
                layout.center = Some(RoundColumn { round, name, matches: round_matches });
                continue;
            }
            // Ceiling split: an odd round keeps its extra match on the left.
            let mid = round_matches.len().div_ceil(2);
            let (left_half, right_half) = round_matches.split_at(mid);
            layout.left.push(RoundColumn {
                round,
                name: name.clone(),
                matches: left_half.to_vec(),
            });
            right_rev.push(RoundColumn { round, name, matches: right_half.to_vec() });
        }

        // Right side reads final-to-first, so later rounds sit closer to center.
        right_rev.reverse();
        layout.right = right_rev;
        layout
    }

    /// Columns in display order, left to right.
    pub fn columns(&self) -> impl Iterator<Item = &RoundColumn> {
        self.left.iter().chain(self.center.iter()).chain(self.right.iter())
    }

    pub fn match_count(&self) -> usize {
        self.columns().map(|c| c.matches.len()).sum()
    }

    /// Match at `index` in flattened display order (column by column, top to
    /// bottom). Drives keyboard navigation over the bracket.
    pub fn match_at(&self, index: usize) -> Option<&Match> {
        let mut remaining = index;
        for column in self.columns() {
            if remaining < column.matches.len() {
                return Some(&column.matches[remaining]);
            }
            remaining -= column.matches.len();
        }
        None
    }
}

/// Display name for a round, derived from its distance to the final.
pub fn round_name(round: u32, total_rounds: u32) -> String {
    match total_rounds.saturating_sub(1).saturating_sub(round) {
        0 => "Final".to_string(),
        1 => "Semifinals".to_string(),
        2 => "Quarterfinals".to_string(),
        3 => "Round of 16".to_string(),
        _ => format!("Round {}", round + 1),
    }
}

/// Renders a full tournament bracket: left half, centered final, right half.
pub struct BracketView<'a> {
    pub layout: &'a BracketLayout,
    /// Index into the flattened display order; highlights that card.
    pub selected: usize,
    pub palette: Palette,
}

impl<'a> Widget for BracketView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns: Vec<&RoundColumn> = self.layout.columns().collect();
        if columns.is_empty() || area.height < MATCH_HEIGHT + 2 {
            return;
        }

        let n_cols = columns.len() as u16;
        let gaps = COLUMN_GAP * n_cols.saturating_sub(1);
        let cell_width = (area.width.saturating_sub(gaps) / n_cols).min(CELL_W_FULL);
        if cell_width < CELL_W_MIN {
            let msg = "Terminal too narrow for the bracket";
            buf.set_string(area.x, area.y, msg, Style::default().fg(self.palette.dim));
            return;
        }

        let body = Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: area.height.saturating_sub(2),
        };

        let mut flat_index = 0usize;
        let mut x = area.x;
        for column in &columns {
            let header: String = column.name.chars().take(cell_width as usize).collect();
            buf.set_string(
                x,
                area.y,
                &header,
                Style::default().fg(self.palette.accent).add_modifier(Modifier::BOLD),
            );

            // Cards are spread evenly over the column height so each round's
            // matches sit centered between their feeders.
            let count = column.matches.len() as u16;
            let slot = (body.height / count.max(1)).max(MATCH_HEIGHT);
            for (i, m) in column.matches.iter().enumerate() {
                let center = i as u16 * slot + slot / 2;
                let selected = flat_index == self.selected;
                draw_match_card(m, x, center, cell_width, selected, self.palette, body, buf);
                flat_index += 1;
            }

            x += cell_width + COLUMN_GAP;
        }
    }
}

fn draw_match_card(
    m: &Match,
    x: u16,
    center_row: u16,
    width: u16,
    selected: bool,
    palette: Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let base_style = if selected {
        Style::default().fg(palette.heading).add_modifier(Modifier::BOLD)
    } else if m.is_editable() {
        Style::default().fg(palette.text)
    } else {
        Style::default().fg(palette.dim)
    };
    let winner_style = Style::default().fg(palette.winner).add_modifier(Modifier::BOLD);

    let limit_x = area.x + area.width;
    let avail = limit_x.saturating_sub(x) as usize;

    for (dy, slot) in [(0u16, 1u8), (1, 0), (2, 2)] {
        let row = center_row.saturating_sub(1) + dy;
        if row >= area.height {
            continue;
        }
        let y = area.y + row;

        let (content, style) = match slot {
            0 => format_status_line(m, width as usize, palette),
            _ => {
                let team_slot = if slot == 1 { 0 } else { 1 };
                let team_id = if slot == 1 { m.team1_id } else { m.team2_id };
                let score = if slot == 1 { m.score1 } else { m.score2 };
                let line = format_team_line(m.team_name(team_slot), score, width as usize);
                (line, if m.is_winner(team_id) { winner_style } else { base_style })
            }
        };

        let text: String = content.chars().take(avail).collect();
        buf.set_string(x, y, &text, style);
    }
}

/// `"name        score "`, padded to exactly `width` characters.
fn format_team_line(name: &str, score: Option<u32>, width: usize) -> String {
    let score_str = match score {
        Some(s) => format!("{s:3}"),
        None => "   ".to_string(),
    };
    let name_w = width.saturating_sub(5);
    let name_trunc: String = name.chars().take(name_w).collect();
    format!("{name_trunc:<name_w$} {score_str} ")
}

fn format_status_line(m: &Match, width: usize, palette: Palette) -> (String, Style) {
    let (raw, style) = match m.status {
        MatchStatus::Completed => (" FINAL", Style::default().fg(palette.success)),
        MatchStatus::Pending if m.is_editable() => {
            (" vs", Style::default().fg(palette.dim))
        }
        MatchStatus::Pending => (" awaiting teams", Style::default().fg(palette.dim)),
    };
    let padded = format!("{raw:<width$}");
    (padded.chars().take(width).collect(), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knockout_api::Match;

    fn m(id: i64, round: u32, position: u32) -> Match {
        Match { id, tournament_id: 1, round, position, ..Match::default() }
    }

    /// 8-team bracket: 4 quarterfinals, 2 semifinals, 1 final.
    fn eight_team_matches() -> Vec<Match> {
        vec![
            m(1, 0, 0),
            m(2, 0, 1),
            m(3, 0, 2),
            m(4, 0, 3),
            m(5, 1, 0),
            m(6, 1, 1),
            m(7, 2, 0),
        ]
    }

    #[test]
    fn eight_team_partition_recombines_to_full_set() {
        let layout = BracketLayout::build(&eight_team_matches());
        let mut ids: Vec<i64> = layout.columns().flat_map(|c| c.matches.iter().map(|m| m.id)).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(layout.match_count(), 7);
    }

    #[test]
    fn eight_team_split_shape() {
        let layout = BracketLayout::build(&eight_team_matches());
        assert_eq!(layout.total_rounds, 3);

        // Left: QF(2), SF(1). Center: Final. Right: SF(1), QF(2).
        let left: Vec<(u32, usize)> =
            layout.left.iter().map(|c| (c.round, c.matches.len())).collect();
        assert_eq!(left, vec![(0, 2), (1, 1)]);

        let center = layout.center.as_ref().unwrap();
        assert_eq!((center.round, center.matches.len()), (2, 1));

        let right: Vec<(u32, usize)> =
            layout.right.iter().map(|c| (c.round, c.matches.len())).collect();
        assert_eq!(right, vec![(1, 1), (0, 2)], "right side reads center-outward");

        // Position split: left takes the first half of each round.
        assert_eq!(layout.left[0].matches.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(layout.right[1].matches.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn odd_round_keeps_extra_match_on_the_left() {
        // Synthetic 3-match round ahead of a final.
        let matches = vec![m(1, 0, 0), m(2, 0, 1), m(3, 0, 2), m(4, 1, 0)];
        let layout = BracketLayout::build(&matches);
        assert_eq!(layout.left[0].matches.len(), 2);
        assert_eq!(layout.right[0].matches.len(), 1);
    }

    #[test]
    fn round_names_for_three_round_bracket() {
        assert_eq!(round_name(0, 3), "Quarterfinals");
        assert_eq!(round_name(1, 3), "Semifinals");
        assert_eq!(round_name(2, 3), "Final");
    }

    #[test]
    fn round_names_for_larger_brackets() {
        assert_eq!(round_name(0, 4), "Round of 16");
        assert_eq!(round_name(0, 1), "Final");
        assert_eq!(round_name(0, 2), "Semifinals");
        assert_eq!(round_name(0, 5), "Round 1");
    }

    #[test]
    fn empty_match_list_builds_empty_layout() {
        let layout = BracketLayout::build(&[]);
        assert_eq!(layout.match_count(), 0);
        assert!(layout.center.is_none());
        assert!(layout.match_at(0).is_none());
    }

    #[test]
    fn empty_layout_renders_nothing() {
        let layout = BracketLayout::build(&[]);
        let view = BracketView {
            layout: &layout,
            selected: 0,
            palette: crate::state::theme::Theme::Dark.palette(),
        };
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        // Buffer stays blank rather than panicking.
        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));
    }

    #[test]
    fn navigation_order_walks_columns_left_to_right() {
        let layout = BracketLayout::build(&eight_team_matches());
        let order: Vec<i64> =
            (0..layout.match_count()).map(|i| layout.match_at(i).unwrap().id).collect();
        // Left QFs, left SF, final, right SF, right QFs.
        assert_eq!(order, vec![1, 2, 5, 7, 6, 3, 4]);
        assert!(layout.match_at(7).is_none());
    }
}

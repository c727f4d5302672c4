use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::locale::Language;
use crate::mode::{self, ModeEntry};
use crate::ui::theme::Theme;

const CARD_HEIGHT: u16 = 5;

/// Dashboard grid: one card per selectable mode.
pub struct ModeMenu<'a> {
    selected: usize,
    columns: usize,
    language: Language,
    theme: &'a Theme,
}

impl<'a> ModeMenu<'a> {
    pub fn new(selected: usize, columns: usize, language: Language, theme: &'a Theme) -> Self {
        Self {
            selected,
            columns: columns.max(1),
            language,
            theme,
        }
    }

    fn render_card(&self, entry: &ModeEntry, is_selected: bool, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let locale = self.language.code();

        let border = if is_selected {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let indicator = if is_selected { ">" } else { " " };
        let title = Line::from(vec![
            Span::styled(
                format!("{indicator} [{}] {} ", entry.hotkey, entry.icon),
                Style::default().fg(colors.text_pending()),
            ),
            Span::styled(
                t!(entry.title_key, locale = locale),
                Style::default()
                    .fg(if is_selected {
                        colors.accent()
                    } else {
                        colors.fg()
                    })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            ),
        ]);
        let desc = Line::from(Span::styled(
            t!(entry.desc_key, locale = locale),
            Style::default().fg(colors.text_pending()),
        ));

        Paragraph::new(vec![title, desc])
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

impl Widget for &ModeMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let locale = self.language.code();
        let entries: Vec<&ModeEntry> = mode::selectable().collect();
        let rows = entries.len().div_ceil(self.columns);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(rows as u16 * CARD_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("app.welcome", locale = locale),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.tagline", locale = locale),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints((0..rows).map(|_| Constraint::Length(CARD_HEIGHT)).collect::<Vec<_>>())
            .split(layout[1]);

        for (row_idx, row_entries) in entries.chunks(self.columns).enumerate() {
            let Some(&row_area) = row_areas.get(row_idx) else {
                break;
            };
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    (0..self.columns)
                        .map(|_| Constraint::Ratio(1, self.columns as u32))
                        .collect::<Vec<_>>(),
                )
                .split(row_area);
            for (col_idx, entry) in row_entries.iter().enumerate() {
                let index = row_idx * self.columns + col_idx;
                self.render_card(entry, index == self.selected, cells[col_idx], buf);
            }
        }

        Paragraph::new(Line::from(Span::styled(
            t!("app.credit", locale = locale),
            Style::default().fg(colors.text_pending()),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[3], buf);
    }
}

use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::locale::Language;
use crate::typing::{SpeedTest, TypingHistory};
use crate::ui::theme::{Theme, ThemeColors};

/// Live statistics for the running test plus the recent-results list.
pub struct ResultPanel<'a> {
    test: &'a SpeedTest,
    history: &'a TypingHistory,
    now: Instant,
    language: Language,
    theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(
        test: &'a SpeedTest,
        history: &'a TypingHistory,
        now: Instant,
        language: Language,
        theme: &'a Theme,
    ) -> Self {
        Self {
            test,
            history,
            now,
            language,
            theme,
        }
    }
}

fn accuracy_color(accuracy: u8, colors: &ThemeColors) -> Color {
    if accuracy >= 95 {
        colors.success()
    } else if accuracy >= 85 {
        colors.warning()
    } else {
        colors.error()
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let locale = self.language.code();

        let block = Block::bordered()
            .title(format!(" {} ", t!("typing.stats", locale = locale)))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let label = |key: &str| Span::styled(format!("  {}: ", t!(key, locale = locale)), Style::default().fg(colors.fg()));

        let wpm_text = self
            .test
            .wpm()
            .map(|w| w.to_string())
            .unwrap_or_else(|| "--".to_string());
        Paragraph::new(Line::from(vec![
            label("typing.wpm"),
            Span::styled(
                wpm_text,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[0], buf);

        let accuracy = self.test.accuracy();
        Paragraph::new(Line::from(vec![
            label("typing.accuracy"),
            Span::styled(
                format!("{accuracy}%"),
                Style::default()
                    .fg(accuracy_color(accuracy, colors))
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[1], buf);

        let errors = self.test.errors();
        Paragraph::new(Line::from(vec![
            label("typing.errors"),
            Span::styled(
                errors.to_string(),
                Style::default().fg(if errors == 0 {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
        ]))
        .render(layout[2], buf);

        Paragraph::new(Line::from(vec![
            label("typing.elapsed"),
            Span::styled(
                format!("{:.1}s", self.test.elapsed_secs(self.now)),
                Style::default().fg(colors.fg()),
            ),
        ]))
        .render(layout[3], buf);

        let mut history_lines = vec![Line::from(Span::styled(
            format!("  {}", t!("typing.history", locale = locale)),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))];
        if self.history.is_empty() {
            history_lines.push(Line::from(Span::styled(
                format!("    {}", t!("typing.history_empty", locale = locale)),
                Style::default().fg(colors.text_pending()),
            )));
        }
        for entry in self.history.entries().iter().rev() {
            history_lines.push(Line::from(vec![
                Span::styled(
                    format!("    {} ", entry.date.format("%d %b %H:%M")),
                    Style::default().fg(colors.text_pending()),
                ),
                Span::styled(format!("{:>3} WPM ", entry.wpm), Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{:>3}%", entry.accuracy),
                    Style::default().fg(accuracy_color(entry.accuracy, colors)),
                ),
            ]));
        }
        Paragraph::new(history_lines).render(layout[5], buf);
    }
}

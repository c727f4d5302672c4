use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::locale::Language;
use crate::typing::{CharStatus, SpeedTest};
use crate::ui::theme::{Theme, ThemeColors};

/// Reference sentence coloured by what has been typed so far.
pub struct TypingArea<'a> {
    test: &'a SpeedTest,
    focused: bool,
    language: Language,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(test: &'a SpeedTest, focused: bool, language: Language, theme: &'a Theme) -> Self {
        Self {
            test,
            focused,
            language,
            theme,
        }
    }
}

fn status_spans<'s>(statuses: &[CharStatus], reference: &str, colors: &ThemeColors) -> Vec<Span<'s>> {
    let cursor = statuses
        .iter()
        .position(|s| *s == CharStatus::Pending)
        .unwrap_or(statuses.len());
    let expected_chars: Vec<char> = reference.chars().collect();
    let mut spans = Vec::with_capacity(statuses.len());

    for (idx, status) in statuses.iter().enumerate() {
        let expected = expected_chars.get(idx).copied();
        let (display, style) = match *status {
            CharStatus::Correct => (expected.unwrap_or(' '), Style::default().fg(colors.text_correct())),
            // Show what was typed so the mistake is visible in place.
            CharStatus::Incorrect(actual) => (
                if actual == ' ' { '·' } else { actual },
                Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg())
                    .add_modifier(Modifier::UNDERLINED),
            ),
            CharStatus::Extra(actual) => (
                actual,
                Style::default()
                    .fg(colors.text_incorrect())
                    .add_modifier(Modifier::CROSSED_OUT),
            ),
            CharStatus::Pending if idx == cursor => (
                expected.unwrap_or(' '),
                Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg()),
            ),
            CharStatus::Pending => (expected.unwrap_or(' '), Style::default().fg(colors.text_pending())),
        };
        spans.push(Span::styled(display.to_string(), style));
    }
    spans
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let locale = self.language.code();

        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(format!(" {} ", t!("typing.title", locale = locale)))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));

        let spans = status_spans(&self.test.char_statuses(), self.test.reference(), colors);
        let mut lines = vec![Line::from(""), Line::from(spans), Line::from("")];
        if !self.test.is_started() {
            lines.push(Line::from(Span::styled(
                t!("typing.placeholder", locale = locale),
                Style::default().fg(colors.text_pending()).add_modifier(Modifier::ITALIC),
            )));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

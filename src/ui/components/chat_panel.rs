use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::chat::{ChatMessage, Role};
use crate::locale::Language;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct ChatPanel<'a> {
    title: String,
    messages: &'a [ChatMessage],
    input: &'a LineInput,
    waiting: bool,
    notice: Option<&'a str>,
    scroll_back: usize,
    focused: bool,
    language: Language,
    theme: &'a Theme,
}

impl<'a> ChatPanel<'a> {
    pub fn new(
        title: String,
        messages: &'a [ChatMessage],
        input: &'a LineInput,
        language: Language,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            messages,
            input,
            waiting: false,
            notice: None,
            scroll_back: 0,
            focused: true,
            language,
            theme,
        }
    }

    pub fn waiting(mut self, waiting: bool) -> Self {
        self.waiting = waiting;
        self
    }

    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    pub fn scroll_back(mut self, lines: usize) -> Self {
        self.scroll_back = lines;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Hard-wrap `text` to `width` chars, honouring explicit newlines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for raw in text.split('\n') {
        let chars: Vec<char> = raw.chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(chars.chunks(width).map(|c| c.iter().collect::<String>()));
    }
    out
}

/// First line shown when the transcript is `total` lines tall and the
/// viewport `height` lines, scrolled `scroll_back` lines up from the bottom.
pub fn visible_start(total: usize, height: usize, scroll_back: usize) -> usize {
    let max_start = total.saturating_sub(height);
    max_start.saturating_sub(scroll_back)
}

impl ChatPanel<'_> {
    fn transcript_lines(&self, width: usize) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let locale = self.language.code();
        let mut lines = Vec::new();

        if self.messages.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(" {}", t!("chat.greeting", locale = locale)),
                Style::default()
                    .fg(colors.text_pending())
                    .add_modifier(Modifier::ITALIC),
            )));
            return lines;
        }

        for message in self.messages {
            let (who, color) = match message.role {
                Role::User => (t!("chat.you", locale = locale), colors.user_bubble()),
                Role::Model => (t!("chat.mentor", locale = locale), colors.model_bubble()),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {who} "),
                    Style::default()
                        .fg(colors.header_fg())
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", message.timestamp.format("%H:%M")),
                    Style::default().fg(colors.text_pending()),
                ),
            ]));
            for chunk in wrap_text(&message.text, width.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(
                    format!("  {chunk}"),
                    Style::default().fg(colors.fg()),
                )));
            }
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Widget for ChatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let locale = self.language.code();

        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(inner);

        let lines = self.transcript_lines(layout[0].width as usize);
        let height = layout[0].height as usize;
        let start = visible_start(lines.len(), height, self.scroll_back);
        let visible: Vec<Line> = lines.into_iter().skip(start).take(height).collect();
        Paragraph::new(visible).render(layout[0], buf);

        let status = if self.waiting {
            Some(Span::styled(
                format!(" {}", t!("chat.typing_indicator", locale = locale)),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            self.notice.map(|notice| {
                Span::styled(format!(" {notice}"), Style::default().fg(colors.warning()))
            })
        };
        if let Some(status) = status {
            Paragraph::new(Line::from(status)).render(layout[1], buf);
        }

        let input_block = Block::bordered().border_style(Style::default().fg(border));
        let (before, at, after) = self.input.render_parts();
        let line = if self.input.is_empty() && !self.focused {
            Line::from(Span::styled(
                t!("chat.placeholder", locale = locale),
                Style::default().fg(colors.text_pending()),
            ))
        } else {
            let cursor_style = if self.focused {
                Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg())
            } else {
                Style::default().fg(colors.fg())
            };
            Line::from(vec![
                Span::styled(before, Style::default().fg(colors.fg())),
                Span::styled(at.map(String::from).unwrap_or_else(|| " ".to_string()), cursor_style),
                Span::styled(after, Style::default().fg(colors.fg())),
            ])
        };
        Paragraph::new(line)
            .block(input_block)
            .render(layout[2], buf);
    }
}

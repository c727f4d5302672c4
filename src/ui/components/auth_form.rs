use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::app::{AuthField, AuthForm, AuthMode};
use crate::locale::Language;
use crate::ui::theme::Theme;

pub struct AuthFormView<'a> {
    form: &'a AuthForm,
    language: Language,
    theme: &'a Theme,
}

impl<'a> AuthFormView<'a> {
    pub fn new(form: &'a AuthForm, language: Language, theme: &'a Theme) -> Self {
        Self {
            form,
            language,
            theme,
        }
    }
}

fn label_key(field: AuthField) -> &'static str {
    match field {
        AuthField::Name => "auth.name",
        AuthField::Email => "auth.email",
        AuthField::Password => "auth.password",
        AuthField::Confirm => "auth.confirm_password",
        AuthField::Remember => "auth.remember_me",
    }
}

impl Widget for AuthFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let locale = self.language.code();
        let form = self.form;

        let heading_key = match form.mode {
            AuthMode::Login => "auth.login",
            AuthMode::Signup => "auth.signup",
        };
        let block = Block::bordered()
            .title(format!(" {} ", t!(heading_key, locale = locale)))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let fields = form.fields();
        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(fields.iter().map(|f| match f {
            AuthField::Remember => Constraint::Length(2),
            _ => Constraint::Length(3),
        }));
        constraints.extend([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ]);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        Paragraph::new(vec![
            Line::from(Span::styled(
                t!("app.name", locale = locale),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.tagline", locale = locale),
                Style::default().fg(colors.text_pending()),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[0], buf);

        for (i, field) in fields.iter().enumerate() {
            let focused = form.focus == *field;
            let slot = layout[i + 1];
            let label = t!(label_key(*field), locale = locale);

            match form.input(*field) {
                Some(input) => {
                    let border = if focused {
                        colors.border_focused()
                    } else {
                        colors.border()
                    };
                    let (before, at, after) = input.render_parts();
                    let mut spans = vec![Span::styled(before, Style::default().fg(colors.fg()))];
                    if focused {
                        spans.push(Span::styled(
                            at.map(String::from).unwrap_or_else(|| " ".to_string()),
                            Style::default()
                                .fg(colors.text_cursor_fg())
                                .bg(colors.text_cursor_bg()),
                        ));
                    } else if let Some(ch) = at {
                        spans.push(Span::styled(ch.to_string(), Style::default().fg(colors.fg())));
                    }
                    spans.push(Span::styled(after, Style::default().fg(colors.fg())));

                    Paragraph::new(Line::from(spans))
                        .block(
                            Block::bordered()
                                .title(format!(" {label} "))
                                .border_style(Style::default().fg(border)),
                        )
                        .render(slot, buf);
                }
                None => {
                    let mark = if form.remember { "[x]" } else { "[ ]" };
                    let style = if focused {
                        Style::default()
                            .fg(colors.accent())
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors.fg())
                    };
                    Paragraph::new(Line::from(Span::styled(format!(" {mark} {label}"), style)))
                        .render(slot, buf);
                }
            }
        }

        let after_fields = fields.len() + 1;
        if let Some(error) = &form.error {
            Paragraph::new(Line::from(Span::styled(
                format!(" {error}"),
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            )))
            .wrap(Wrap { trim: true })
            .render(layout[after_fields], buf);
        }

        let switch_key = match form.mode {
            AuthMode::Login => "auth.switch_to_signup",
            AuthMode::Signup => "auth.switch_to_login",
        };
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("[F3] {}", t!(switch_key, locale = locale)),
                Style::default().fg(colors.accent()),
            )),
        ])
        .alignment(Alignment::Center)
        .render(layout[after_fields + 1], buf);

        Paragraph::new(Line::from(Span::styled(
            t!("auth.demo_note", locale = locale),
            Style::default()
                .fg(colors.text_pending())
                .add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[after_fields + 2], buf);
    }
}

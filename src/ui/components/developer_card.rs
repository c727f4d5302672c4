use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::locale::Language;
use crate::ui::theme::Theme;

pub const DEVELOPER_NAME: &str = "Mohammed Faizal M";
const DEVELOPER_AGE: u8 = 19;

/// (title, organisation and length)
const EXPERIENCE: [(&str, &str); 3] = [
    ("HR Virtual Internship", "Shine Projects • 3 Months"),
    ("HR Assistance", "Yuva Intern • 6 Days"),
    ("Graphic Design Virtual Internship", "Oasis Infobyte • 1 Month"),
];

const CONTACTS: [(&str, &str); 3] = [
    ("WhatsApp", "https://wa.me/916383969289"),
    ("Email", "mailto:faizalmd10101@gmail.com"),
    ("LinkedIn", "https://www.linkedin.com/in/mohammed-faizal-m-b3242b311/"),
];

pub struct DeveloperCard<'a> {
    language: Language,
    theme: &'a Theme,
}

impl<'a> DeveloperCard<'a> {
    pub fn new(language: Language, theme: &'a Theme) -> Self {
        Self { language, theme }
    }
}

impl Widget for DeveloperCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let locale = self.language.code();
        let heading = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);

        let block = Block::bordered()
            .title(format!(" {} ", t!("modes.developer", locale = locale)))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(EXPERIENCE.len() as u16 * 2 + 2),
                Constraint::Min(0),
            ])
            .split(inner);

        let profile = vec![
            Line::from(Span::styled(
                format!("  {DEVELOPER_NAME}"),
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {}", t!("developer.degree", locale = locale)),
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                format!("  {}", t!("developer.college", locale = locale)),
                Style::default().fg(colors.text_pending()),
            )),
        ];
        Paragraph::new(profile).render(layout[0], buf);

        let facts = [
            ("developer.age", DEVELOPER_AGE.to_string()),
            ("developer.location", t!("developer.location_value", locale = locale).into_owned()),
            ("developer.role", t!("developer.role_value", locale = locale).into_owned()),
        ];
        let fact_lines: Vec<Line> = facts
            .into_iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::styled(format!("  {}: ", t!(key, locale = locale)), heading),
                    Span::styled(value, Style::default().fg(colors.fg())),
                ])
            })
            .collect();
        Paragraph::new(fact_lines)
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);

        let mut experience = vec![Line::from(Span::styled(
            format!("  {}", t!("developer.experience", locale = locale)),
            heading,
        ))];
        for (title, detail) in EXPERIENCE {
            experience.push(Line::from(Span::styled(
                format!("    {title}"),
                Style::default().fg(colors.fg()),
            )));
            experience.push(Line::from(Span::styled(
                format!("      {detail}"),
                Style::default().fg(colors.text_pending()),
            )));
        }
        Paragraph::new(experience).render(layout[2], buf);

        let mut contact = vec![Line::from(Span::styled(
            format!("  {}", t!("developer.contact", locale = locale)),
            heading,
        ))];
        contact.extend(CONTACTS.iter().map(|(label, link)| {
            Line::from(vec![
                Span::styled(format!("    {label:<10}"), Style::default().fg(colors.fg())),
                Span::styled(
                    *link,
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ])
        }));
        Paragraph::new(contact)
            .wrap(Wrap { trim: false })
            .render(layout[3], buf);
    }
}

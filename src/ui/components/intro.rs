use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::locale::Language;
use crate::ui::theme::Theme;

/// Post-login splash, advanced purely by elapsed time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntroStage {
    Blank,
    Reveal,
    Expand,
    Welcome,
}

const REVEAL_AT: Duration = Duration::from_millis(500);
const EXPAND_AT: Duration = Duration::from_millis(2000);
const WELCOME_AT: Duration = Duration::from_millis(3500);
pub const INTRO_DURATION: Duration = Duration::from_millis(5500);

impl IntroStage {
    /// `None` once the intro has run its course.
    pub fn at(elapsed: Duration) -> Option<Self> {
        if elapsed >= INTRO_DURATION {
            None
        } else if elapsed >= WELCOME_AT {
            Some(IntroStage::Welcome)
        } else if elapsed >= EXPAND_AT {
            Some(IntroStage::Expand)
        } else if elapsed >= REVEAL_AT {
            Some(IntroStage::Reveal)
        } else {
            Some(IntroStage::Blank)
        }
    }

    fn rule_width(self) -> usize {
        match self {
            IntroStage::Blank => 0,
            IntroStage::Reveal => 12,
            IntroStage::Expand | IntroStage::Welcome => 32,
        }
    }
}

pub struct Intro<'a> {
    stage: IntroStage,
    user_name: &'a str,
    language: Language,
    theme: &'a Theme,
}

impl<'a> Intro<'a> {
    pub fn new(stage: IntroStage, user_name: &'a str, language: Language, theme: &'a Theme) -> Self {
        Self {
            stage,
            user_name,
            language,
            theme,
        }
    }
}

impl Widget for Intro<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Block::default()
            .style(Style::default().bg(colors.bg()))
            .render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let rule = "━".repeat(self.stage.rule_width());
        Paragraph::new(Span::styled(rule, Style::default().fg(colors.accent())))
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        if self.stage >= IntroStage::Reveal {
            let name = t!("app.name", locale = self.language.code());
            Paragraph::new(Line::from(Span::styled(
                name,
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(layout[2], buf);
        }

        if self.stage == IntroStage::Welcome {
            let welcome = t!(
                "intro.welcome",
                locale = self.language.code(),
                name = self.user_name
            );
            Paragraph::new(Span::styled(welcome, Style::default().fg(colors.success())))
                .alignment(Alignment::Center)
                .render(layout[4], buf);
        }

        Paragraph::new(Span::styled(
            t!("intro.skip", locale = self.language.code()),
            Style::default().fg(colors.text_pending()),
        ))
        .alignment(Alignment::Center)
        .render(layout[6], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_follow_timeline() {
        assert_eq!(IntroStage::at(Duration::ZERO), Some(IntroStage::Blank));
        assert_eq!(IntroStage::at(Duration::from_millis(499)), Some(IntroStage::Blank));
        assert_eq!(IntroStage::at(Duration::from_millis(500)), Some(IntroStage::Reveal));
        assert_eq!(IntroStage::at(Duration::from_millis(2100)), Some(IntroStage::Expand));
        assert_eq!(IntroStage::at(Duration::from_millis(3500)), Some(IntroStage::Welcome));
        assert_eq!(IntroStage::at(Duration::from_millis(5499)), Some(IntroStage::Welcome));
        assert_eq!(IntroStage::at(INTRO_DURATION), None);
    }

    #[test]
    fn test_welcome_renders_user_name() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        Intro::new(IntroStage::Welcome, "Priya", Language::En, &theme).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("MentorBridge"));
        assert!(text.contains("Welcome, Priya"));
    }
}

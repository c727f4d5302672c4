//! Screen-level rendering. The shell body is chosen through
//! [`crate::mode::MODE_TABLE`]; each entry points at one of the view
//! functions below.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;

use crate::app::{App, AppScreen, ShellFocus};
use crate::mode::Mode;
use crate::ui::components::auth_form::AuthFormView;
use crate::ui::components::chat_panel::ChatPanel;
use crate::ui::components::developer_card::DeveloperCard;
use crate::ui::components::intro::{Intro, IntroStage};
use crate::ui::components::mode_menu::ModeMenu;
use crate::ui::components::result_panel::ResultPanel;
use crate::ui::components::typing_area::TypingArea;
use crate::ui::layout::{AppLayout, LayoutTier, centered_rect, pack_hint_lines};

pub fn render(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.colors.bg())),
        area,
    );
    match app.screen {
        AppScreen::Auth => render_auth(frame, app),
        AppScreen::Intro => render_intro(frame, app),
        AppScreen::Shell => render_shell(frame, app),
    }
}

fn hint_list(key: &str, app: &App) -> Vec<String> {
    t!(key, locale = app.language.code())
        .split("  ")
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, hints: &[String], app: &App) {
    let refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let lines: Vec<Line> = pack_hint_lines(&refs, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(app.theme.colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn render_auth(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let form_area = centered_rect(50, 80, layout[0]);
    frame.render_widget(AuthFormView::new(&app.auth, app.language, &app.theme), form_area);

    let hints = hint_list("auth.hints", app);
    render_footer(frame, layout[1], &hints, app);
}

pub fn render_intro(frame: &mut Frame<'_>, app: &App) {
    let stage = app.intro_stage(Instant::now()).unwrap_or(IntroStage::Welcome);
    let name = app.user.as_ref().map(|u| u.name.as_str()).unwrap_or_default();
    frame.render_widget(Intro::new(stage, name, app.language, &app.theme), frame.area());
}

pub fn render_shell(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let hint_key = match app.mode {
        Mode::Dashboard => "shell.hints_dashboard",
        Mode::TypingCoach => "shell.hints_typing",
        Mode::Developer => "shell.hints_developer",
        _ => "shell.hints_chat",
    };
    let hints = hint_list(hint_key, app);
    let refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let footer_lines = pack_hint_lines(&refs, area.width as usize).len() as u16;
    let app_layout = AppLayout::new(area, footer_lines);

    let header_style = Style::default().fg(colors.header_fg()).bg(colors.header_bg());
    let mut header = vec![
        Span::styled(
            format!(" {} ", t!("app.name", locale = app.language.code())),
            header_style.add_modifier(Modifier::BOLD),
        ),
    ];
    if app.mode != Mode::Dashboard {
        header.push(Span::styled(
            format!("| {} {} ", app.mode.entry().icon, app.mode.title(app.language)),
            header_style,
        ));
    }
    header.push(Span::styled(
        format!("  [F2] {} ", app.language.toggle_label()),
        Style::default().fg(colors.accent()).bg(colors.header_bg()),
    ));
    if let Some(user) = &app.user {
        header.push(Span::styled(
            format!(" ({}) {} ", user.initial(), user.name),
            header_style,
        ));
        header.push(Span::styled(
            format!(" [F10] {} ", t!("shell.logout", locale = app.language.code())),
            Style::default().fg(colors.warning()).bg(colors.header_bg()),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(header)).block(
            Block::bordered()
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.header_bg())),
        ),
        app_layout.header,
    );

    (app.mode.entry().view)(frame, app_layout.main, app);

    render_footer(frame, app_layout.footer, &hints, app);
}

// -------------------------------------------------------------------------
// Mode views
// -------------------------------------------------------------------------

pub fn dashboard(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let columns = LayoutTier::from_area(area).card_columns();
    let menu = ModeMenu::new(app.dashboard_selected, columns, app.language, &app.theme);
    frame.render_widget(&menu, area);
}

pub fn chat(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let panel = ChatPanel::new(
        app.mode.title(app.language),
        app.conversation.messages(),
        &app.chat_input,
        app.language,
        &app.theme,
    )
    .waiting(app.is_waiting_for_reply())
    .notice(app.chat_notice.as_deref())
    .scroll_back(app.chat_scroll_back)
    .focused(app.focus == ShellFocus::Chat);
    frame.render_widget(panel, area);
}

pub fn typing_coach(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let tier = LayoutTier::from_area(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(8)])
        .split(area);

    let typing_focused = app.focus == ShellFocus::Typing;
    let test = TypingArea::new(&app.typing, typing_focused, app.language, &app.theme);
    if tier.show_result_panel() {
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);
        frame.render_widget(test, top[0]);
        frame.render_widget(
            ResultPanel::new(
                &app.typing,
                &app.typing_history,
                Instant::now(),
                app.language,
                &app.theme,
            ),
            top[1],
        );
    } else {
        frame.render_widget(test, rows[0]);
    }

    chat(frame, rows[1], app);
}

pub fn developer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let card_area = centered_rect(70, 100, area);
    frame.render_widget(DeveloperCard::new(app.language, &app.theme), card_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::chat::OfflineClient;
    use crate::config::Config;
    use crate::store::MemoryStore;
    use crate::ui::theme::Theme;

    fn app() -> App {
        let config = Config {
            intro_enabled: false,
            ..Config::default()
        };
        App::new(
            config,
            Box::new(MemoryStore::new()),
            Arc::new(OfflineClient { var: "GEMINI_API_KEY".into() }),
            Theme::default(),
        )
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn logged_in() -> App {
        let mut app = app();
        app.auth.toggle_mode();
        app.auth.name.insert_str("Asha");
        app.auth.email.insert_str("asha@example.com");
        app.auth.password.insert_str("pw");
        app.auth.confirm.insert_str("pw");
        app.submit_auth(Instant::now());
        app
    }

    #[test]
    fn test_auth_screen_renders_hints() {
        let out = draw(&app());
        assert!(out.contains("Login"));
        assert!(out.contains("[Tab] Next field"));
    }

    #[test]
    fn test_every_mode_view_renders() {
        let mut app = logged_in();
        for mode in [
            Mode::Dashboard,
            Mode::CareerMentor,
            Mode::TypingCoach,
            Mode::TallyCoach,
            Mode::InterviewSim,
            Mode::ResumeGuide,
            Mode::Developer,
        ] {
            app.set_mode(mode);
            let out = draw(&app);
            assert!(out.contains("MentorBridge"), "header missing in {mode:?}");
        }
    }

    #[test]
    fn test_shell_header_shows_user_and_toggle() {
        let app = logged_in();
        let out = draw(&app);
        assert!(out.contains("(A) Asha"));
        assert!(out.contains("[F10] Logout"));
        assert!(out.contains("Career & Education Mentor"));
    }

    #[test]
    fn test_typing_coach_shows_test_above_chat() {
        let mut app = logged_in();
        app.set_mode(Mode::TypingCoach);
        let out = draw(&app);
        let test_at = out.find("Typing Speed Test").unwrap();
        let chat_at = out.find("How can I help you today?").unwrap();
        assert!(test_at < chat_at);
    }
}

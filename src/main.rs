use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use mentorbridge::app::{App, AppScreen, AuthField, ShellFocus};
use mentorbridge::chat::gemini::GeminiClient;
use mentorbridge::chat::{ModelClient, OfflineClient};
use mentorbridge::config::Config;
use mentorbridge::event::{AppEvent, EventHandler};
use mentorbridge::locale::Language;
use mentorbridge::mode::Mode;
use mentorbridge::store::{FileStore, KeyValueStore, MemoryStore};
use mentorbridge::ui::line_input::InputResult;
use mentorbridge::ui::theme::Theme;
use mentorbridge::ui::views;

const LOG_ENV: &str = "MENTORBRIDGE_LOG";
const CHAT_SCROLL_STEP: usize = 5;

#[derive(Parser)]
#[command(
    name = "mentorbridge",
    version,
    about = "Bilingual career mentor, typing coach and AI chat in your terminal"
)]
struct Cli {
    #[arg(short, long, value_parser = parse_language, help = "Interface language (en, ta)")]
    lang: Option<Language>,

    #[arg(long, help = "Directory for accounts, typing history and the log")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Gemini model id")]
    model: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Run without contacting the AI service")]
    offline: bool,

    #[arg(long, help = "Keep everything in memory for this session only")]
    ephemeral: bool,
}

fn parse_language(value: &str) -> Result<Language, String> {
    Language::from_code(value).ok_or_else(|| format!("unknown language '{value}' (expected en or ta)"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let data_dir = config.app_data_dir();
    init_logging(&data_dir);
    if let Some(err) = config_error {
        tracing::warn!(%err, path = %Config::config_path().display(), "config unreadable, using defaults");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), ephemeral = cli.ephemeral, "starting");

    let store: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(
            FileStore::with_base_dir(data_dir.clone())
                .with_context(|| format!("creating data directory {}", data_dir.display()))?,
        )
    };
    let client = build_client(&config, cli.offline);
    let theme = Theme::load_or_default(&config.theme);

    let mut app = App::new(config, store, client, theme);
    if let Some(lang) = cli.lang {
        app.override_language(lang);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(%err, "exiting after error");
        eprintln!("Error: {err:?}");
    }
    tracing::info!("shut down");

    Ok(())
}

/// Log to `<data_dir>/mentorbridge.log`; the terminal belongs to the UI.
/// Logging stays off if the file cannot be opened.
fn init_logging(dir: &Path) {
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("mentorbridge.log"))
    else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn build_client(config: &Config, offline: bool) -> Arc<dyn ModelClient> {
    let offline_client = || -> Arc<dyn ModelClient> {
        Arc::new(OfflineClient {
            var: config.api_key_env.clone(),
        })
    };
    if offline {
        tracing::info!("offline mode: chat replies will use the fallback message");
        return offline_client();
    }
    let Some(api_key) = config.api_key() else {
        tracing::warn!(var = %config.api_key_env, "no API key in environment, chat is offline");
        return offline_client();
    };
    match GeminiClient::new(
        api_key,
        config.model.clone(),
        config.api_base_url.clone(),
        config.request_timeout(),
    ) {
        Ok(client) => {
            tracing::info!(model = client.model(), "gemini client ready");
            Arc::new(client)
        }
        Err(err) => {
            tracing::error!(%err, "could not build HTTP client, chat is offline");
            offline_client()
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| views::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => app.paste(&text),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    if key.code == KeyCode::F(2) || (ctrl && key.code == KeyCode::Char('l')) {
        app.toggle_language();
        return;
    }

    match app.screen {
        AppScreen::Auth => handle_auth_key(app, key),
        AppScreen::Intro => app.finish_intro(),
        AppScreen::Shell => handle_shell_key(app, key),
    }
}

fn handle_auth_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::F(3) => {
            app.auth.toggle_mode();
            return;
        }
        KeyCode::Char(' ') if app.auth.focus == AuthField::Remember => {
            app.auth.remember = !app.auth.remember;
            return;
        }
        _ => {}
    }

    let result = match app.auth.active_input_mut() {
        Some(input) => input.handle(key),
        None => match key.code {
            KeyCode::Enter => InputResult::Submit,
            KeyCode::Esc => InputResult::Cancel,
            KeyCode::Tab | KeyCode::Down => InputResult::FocusNext,
            KeyCode::BackTab | KeyCode::Up => InputResult::FocusPrev,
            _ => InputResult::Continue,
        },
    };
    match result {
        InputResult::Submit => app.submit_auth(Instant::now()),
        InputResult::Cancel => app.should_quit = true,
        InputResult::FocusNext => app.auth.focus_next(),
        InputResult::FocusPrev => app.auth.focus_prev(),
        InputResult::Continue => {}
    }
}

fn handle_shell_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::F(10) {
        app.logout();
        return;
    }

    match app.mode {
        Mode::Dashboard => handle_dashboard_key(app, key),
        Mode::Developer => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                app.set_mode(Mode::Dashboard);
            }
        }
        Mode::TypingCoach if app.focus == ShellFocus::Typing => handle_typing_key(app, key),
        _ => handle_chat_key(app, key),
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(ch) if Mode::from_hotkey(ch).is_some() => {
            if let Some(mode) = Mode::from_hotkey(ch) {
                app.set_mode(mode);
            }
        }
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => app.select_prev_card(),
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => app.select_next_card(),
        KeyCode::Enter => app.open_selected_card(),
        _ => {}
    }
}

fn handle_typing_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.set_mode(Mode::Dashboard),
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('r') if ctrl => app.restart_typing(),
        KeyCode::Backspace => app.typing_backspace(Instant::now()),
        KeyCode::Char(ch) if !ctrl => app.typing_char(ch, Instant::now()),
        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('x') if ctrl => {
            app.cancel_reply();
            return;
        }
        KeyCode::Char('r') if ctrl && app.mode == Mode::TypingCoach => {
            app.restart_typing();
            return;
        }
        KeyCode::PageUp => {
            app.scroll_chat_up(CHAT_SCROLL_STEP);
            return;
        }
        KeyCode::PageDown => {
            app.scroll_chat_down(CHAT_SCROLL_STEP);
            return;
        }
        _ => {}
    }

    match app.chat_input.handle(key) {
        InputResult::Submit => app.send_chat_input(),
        InputResult::Cancel => app.set_mode(Mode::Dashboard),
        InputResult::FocusNext | InputResult::FocusPrev => app.toggle_focus(),
        InputResult::Continue => {}
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_i18n::t;

use crate::account::{Account, AccountStore, SignupForm};
use crate::chat::bridge::fallback_text;
use crate::chat::{BridgeError, ChatBridge, ChatMessage, Conversation, ModelClient, Role};
use crate::config::Config;
use crate::locale::Language;
use crate::mode::{self, Mode};
use crate::store::KeyValueStore;
use crate::store::schema;
use crate::typing::{Completion, SpeedTest, TypingHistory};
use crate::ui::components::intro::IntroStage;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Auth,
    Intro,
    Shell,
}

/// Which widget receives keystrokes in the typing coach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellFocus {
    Typing,
    Chat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
    Confirm,
    Remember,
}

const LOGIN_FIELDS: &[AuthField] = &[AuthField::Email, AuthField::Password, AuthField::Remember];
const SIGNUP_FIELDS: &[AuthField] = &[
    AuthField::Name,
    AuthField::Email,
    AuthField::Password,
    AuthField::Confirm,
    AuthField::Remember,
];

pub struct AuthForm {
    pub mode: AuthMode,
    pub name: LineInput,
    pub email: LineInput,
    pub password: LineInput,
    pub confirm: LineInput,
    pub remember: bool,
    pub focus: AuthField,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            name: LineInput::default(),
            email: LineInput::default(),
            password: LineInput::masked(),
            confirm: LineInput::masked(),
            remember: false,
            focus: Self::fields_for(mode)[0],
            error: None,
        }
    }

    fn fields_for(mode: AuthMode) -> &'static [AuthField] {
        match mode {
            AuthMode::Login => LOGIN_FIELDS,
            AuthMode::Signup => SIGNUP_FIELDS,
        }
    }

    pub fn fields(&self) -> &'static [AuthField] {
        Self::fields_for(self.mode)
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + fields.len() - 1) % fields.len()];
    }

    /// Flip between login and signup, keeping the typed email.
    pub fn toggle_mode(&mut self) {
        let email = self.email.value().to_string();
        let next = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        *self = Self::new(next);
        self.email = LineInput::new(&email);
        if next == AuthMode::Login && !email.is_empty() {
            self.focus = AuthField::Password;
        }
    }

    pub fn input(&self, field: AuthField) -> Option<&LineInput> {
        match field {
            AuthField::Name => Some(&self.name),
            AuthField::Email => Some(&self.email),
            AuthField::Password => Some(&self.password),
            AuthField::Confirm => Some(&self.confirm),
            AuthField::Remember => None,
        }
    }

    /// The text field under focus; `None` on the remember checkbox.
    pub fn active_input_mut(&mut self) -> Option<&mut LineInput> {
        match self.focus {
            AuthField::Name => Some(&mut self.name),
            AuthField::Email => Some(&mut self.email),
            AuthField::Password => Some(&mut self.password),
            AuthField::Confirm => Some(&mut self.confirm),
            AuthField::Remember => None,
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub mode: Mode,
    pub language: Language,
    pub user: Option<Account>,
    pub auth: AuthForm,
    pub intro_started_at: Option<Instant>,
    pub conversation: Conversation,
    pub chat_input: LineInput,
    pub chat_notice: Option<String>,
    /// Lines scrolled back from the newest message; 0 follows the bottom.
    pub chat_scroll_back: usize,
    pub typing: SpeedTest,
    pub typing_history: TypingHistory,
    pub last_completion: Option<Completion>,
    pub focus: ShellFocus,
    pub dashboard_selected: usize,
    pub theme: Theme,
    pub config: Config,
    pub should_quit: bool,
    bridge: ChatBridge,
    /// Typing summary held back while another reply is outstanding.
    deferred_summary: Option<String>,
    store: Box<dyn KeyValueStore>,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        store: Box<dyn KeyValueStore>,
        client: Arc<dyn ModelClient>,
        theme: Theme,
    ) -> Self {
        let language = schema::load_language(store.as_ref());
        let typing_history = TypingHistory::load(store.as_ref(), config.typing_history_len);
        let bridge = ChatBridge::new(client)
            .with_history_turns(config.history_turns)
            .with_temperature(config.temperature);
        let mut rng = SmallRng::from_entropy();
        let typing = SpeedTest::start(&mut rng);

        let mut app = Self {
            screen: AppScreen::Auth,
            mode: Mode::Dashboard,
            language,
            user: None,
            auth: AuthForm::new(AuthMode::Login),
            intro_started_at: None,
            conversation: Conversation::default(),
            chat_input: LineInput::default(),
            chat_notice: None,
            chat_scroll_back: 0,
            typing,
            typing_history,
            last_completion: None,
            focus: ShellFocus::Chat,
            dashboard_selected: 0,
            theme,
            config,
            should_quit: false,
            bridge,
            deferred_summary: None,
            store,
            rng,
        };

        let restored = AccountStore::new(app.store.as_ref()).restore_session();
        if let Some(account) = restored {
            tracing::info!("session restored from remember-me marker");
            app.enter_session(account, Instant::now());
        }
        app
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Use `language` for this run without persisting it.
    pub fn override_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
        if let Err(err) = schema::save_language(self.store.as_ref(), self.language) {
            tracing::warn!(%err, "could not persist language choice");
        }
    }

    // ---------------------------------------------------------------------
    // Auth / intro
    // ---------------------------------------------------------------------

    pub fn submit_auth(&mut self, now: Instant) {
        let accounts = AccountStore::new(self.store.as_ref());
        let form = &self.auth;
        let result = match form.mode {
            AuthMode::Login => accounts.login(form.email.value(), form.password.value(), form.remember),
            AuthMode::Signup => accounts.signup(
                &SignupForm {
                    name: form.name.value().to_string(),
                    email: form.email.value().to_string(),
                    password: form.password.value().to_string(),
                    confirm: form.confirm.value().to_string(),
                },
                form.remember,
            ),
        };

        match result {
            Ok(account) => {
                self.auth = AuthForm::new(AuthMode::Login);
                self.enter_session(account, now);
            }
            Err(err) => self.auth.error = Some(err.localized(self.language)),
        }
    }

    fn enter_session(&mut self, account: Account, now: Instant) {
        self.user = Some(account);
        self.mode = Mode::Dashboard;
        self.dashboard_selected = 0;
        if self.config.intro_enabled {
            self.screen = AppScreen::Intro;
            self.intro_started_at = Some(now);
        } else {
            self.screen = AppScreen::Shell;
        }
    }

    pub fn intro_stage(&self, now: Instant) -> Option<IntroStage> {
        let started = self.intro_started_at?;
        IntroStage::at(now.saturating_duration_since(started))
    }

    pub fn finish_intro(&mut self) {
        if self.screen == AppScreen::Intro {
            self.screen = AppScreen::Shell;
            self.intro_started_at = None;
        }
    }

    pub fn logout(&mut self) {
        if let Err(err) = AccountStore::new(self.store.as_ref()).logout() {
            tracing::warn!(%err, "could not clear session marker");
        }
        self.bridge.cancel();
        self.deferred_summary = None;
        self.conversation.clear();
        self.chat_input.clear();
        self.chat_notice = None;
        self.chat_scroll_back = 0;
        self.last_completion = None;
        self.mode = Mode::Dashboard;
        self.user = None;
        self.intro_started_at = None;
        self.auth = AuthForm::new(AuthMode::Login);
        self.screen = AppScreen::Auth;
    }

    /// Advance timers and drain the chat bridge.
    pub fn tick(&mut self, now: Instant) {
        if self.screen == AppScreen::Intro && self.intro_stage(now).is_none() {
            self.finish_intro();
        }
        if let Some(reply) = self.bridge.poll() {
            self.push_reply(reply.text);
        }
        self.flush_deferred_summary();
    }

    // ---------------------------------------------------------------------
    // Shell
    // ---------------------------------------------------------------------

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        if !mode.has_chat() && self.bridge.cancel() {
            self.chat_notice = None;
        }
        if self.deferred_summary.take().is_some() {
            tracing::debug!("dropping held typing summary on mode switch");
        }
        if mode == Mode::TypingCoach {
            self.restart_typing();
            self.focus = ShellFocus::Typing;
        } else {
            self.focus = ShellFocus::Chat;
        }
        tracing::debug!(from = self.mode.api_name(), to = mode.api_name(), "mode switched");
        self.mode = mode;
        self.chat_scroll_back = 0;
    }

    pub fn select_next_card(&mut self) {
        let count = mode::selectable().count();
        self.dashboard_selected = (self.dashboard_selected + 1) % count;
    }

    pub fn select_prev_card(&mut self) {
        let count = mode::selectable().count();
        self.dashboard_selected = (self.dashboard_selected + count - 1) % count;
    }

    pub fn open_selected_card(&mut self) {
        if let Some(entry) = mode::selectable().nth(self.dashboard_selected) {
            self.set_mode(entry.mode);
        }
    }

    pub fn toggle_focus(&mut self) {
        if self.mode == Mode::TypingCoach {
            self.focus = match self.focus {
                ShellFocus::Typing => ShellFocus::Chat,
                ShellFocus::Chat => ShellFocus::Typing,
            };
        }
    }

    pub fn is_waiting_for_reply(&self) -> bool {
        self.bridge.is_pending()
    }

    pub fn send_chat_input(&mut self) {
        let text = self.chat_input.value().trim().to_string();
        if text.is_empty() {
            return;
        }
        if self.send_message(text) {
            self.chat_input.clear();
        }
    }

    /// Append `text` as a user turn and ask the model. Returns false when
    /// rejected because a reply is still outstanding.
    pub fn send_message(&mut self, text: String) -> bool {
        match self
            .bridge
            .send(self.conversation.messages(), &text, self.mode, self.language)
        {
            Ok(_) => {
                self.conversation.push(ChatMessage::new(Role::User, text));
                self.chat_notice = None;
                self.chat_scroll_back = 0;
                true
            }
            Err(BridgeError::Busy) => {
                self.chat_notice = Some(t!("chat.busy", locale = self.language.code()).into_owned());
                false
            }
            Err(err) => {
                tracing::error!(%err, "could not dispatch chat request");
                self.conversation.push(ChatMessage::new(Role::User, text));
                self.push_reply(fallback_text(&err, self.language));
                true
            }
        }
    }

    pub fn cancel_reply(&mut self) {
        if self.bridge.cancel() {
            self.chat_notice = Some(t!("chat.cancelled", locale = self.language.code()).into_owned());
        }
    }

    /// Block until the outstanding reply lands or `timeout` passes.
    pub fn wait_for_reply(&mut self, timeout: Duration) -> bool {
        match self.bridge.wait(timeout) {
            Some(reply) => {
                self.push_reply(reply.text);
                self.flush_deferred_summary();
                true
            }
            None => false,
        }
    }

    fn push_reply(&mut self, text: String) {
        self.conversation.push(ChatMessage::new(Role::Model, text));
        self.chat_notice = None;
        self.chat_scroll_back = 0;
    }

    pub fn scroll_chat_up(&mut self, lines: usize) {
        self.chat_scroll_back = self.chat_scroll_back.saturating_add(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: usize) {
        self.chat_scroll_back = self.chat_scroll_back.saturating_sub(lines);
    }

    // ---------------------------------------------------------------------
    // Typing coach
    // ---------------------------------------------------------------------

    pub fn typing_char(&mut self, ch: char, now: Instant) {
        if let Some(done) = self.typing.push_char(ch, now) {
            self.finish_typing(done);
        }
    }

    pub fn typing_backspace(&mut self, now: Instant) {
        if let Some(done) = self.typing.backspace(now) {
            self.finish_typing(done);
        }
    }

    pub fn restart_typing(&mut self) {
        self.typing.restart(&mut self.rng);
        self.last_completion = None;
    }

    fn finish_typing(&mut self, done: Completion) {
        tracing::info!(wpm = done.result.wpm, accuracy = done.result.accuracy, "typing test completed");
        self.typing_history.record(done.result.clone());
        if let Err(err) = self.typing_history.save(self.store.as_ref()) {
            tracing::warn!(%err, "could not persist typing history");
        }
        let summary = done.summary(self.language);
        self.last_completion = Some(done);
        if !self.send_message(summary.clone()) {
            self.deferred_summary = Some(summary);
            self.chat_notice =
                Some(t!("chat.summary_queued", locale = self.language.code()).into_owned());
        }
    }

    pub fn has_deferred_summary(&self) -> bool {
        self.deferred_summary.is_some()
    }

    /// Send the held summary once the bridge is free.
    fn flush_deferred_summary(&mut self) {
        if self.bridge.is_pending() {
            return;
        }
        if let Some(summary) = self.deferred_summary.take() {
            tracing::debug!("sending held typing summary");
            self.send_message(summary);
        }
    }

    // ---------------------------------------------------------------------
    // Paste
    // ---------------------------------------------------------------------

    pub fn paste(&mut self, text: &str) {
        match self.screen {
            AppScreen::Auth => {
                if let Some(input) = self.auth.active_input_mut() {
                    input.insert_str(text);
                }
            }
            AppScreen::Shell if self.mode.has_chat() && self.focus == ShellFocus::Chat => {
                self.chat_input.insert_str(text);
            }
            _ => tracing::debug!("paste ignored outside a text field"),
        }
    }
}

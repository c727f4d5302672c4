use ratatui::Frame;
use ratatui::layout::Rect;
use rust_i18n::t;

use crate::app::App;
use crate::locale::Language;
use crate::ui::views;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Dashboard,
    CareerMentor,
    TypingCoach,
    TallyCoach,
    InterviewSim,
    ResumeGuide,
    Developer,
}

pub type ViewFn = fn(&mut Frame<'_>, Rect, &App);

pub struct ModeEntry {
    pub mode: Mode,
    pub hotkey: char,
    pub icon: &'static str,
    pub title_key: &'static str,
    pub desc_key: &'static str,
    pub has_chat: bool,
    pub view: ViewFn,
}

/// Indexed by `Mode as usize`.
pub static MODE_TABLE: [ModeEntry; 7] = [
    ModeEntry {
        mode: Mode::Dashboard,
        hotkey: '0',
        icon: "🏠",
        title_key: "app.welcome",
        desc_key: "app.tagline",
        has_chat: false,
        view: views::dashboard,
    },
    ModeEntry {
        mode: Mode::CareerMentor,
        hotkey: '1',
        icon: "🎓",
        title_key: "modes.career",
        desc_key: "mode_desc.career",
        has_chat: true,
        view: views::chat,
    },
    ModeEntry {
        mode: Mode::TypingCoach,
        hotkey: '2',
        icon: "⌨",
        title_key: "modes.typing",
        desc_key: "mode_desc.typing",
        has_chat: true,
        view: views::typing_coach,
    },
    ModeEntry {
        mode: Mode::TallyCoach,
        hotkey: '3',
        icon: "📊",
        title_key: "modes.tally",
        desc_key: "mode_desc.tally",
        has_chat: true,
        view: views::chat,
    },
    ModeEntry {
        mode: Mode::InterviewSim,
        hotkey: '4',
        icon: "🤝",
        title_key: "modes.interview",
        desc_key: "mode_desc.interview",
        has_chat: true,
        view: views::chat,
    },
    ModeEntry {
        mode: Mode::ResumeGuide,
        hotkey: '5',
        icon: "📄",
        title_key: "modes.resume",
        desc_key: "mode_desc.resume",
        has_chat: true,
        view: views::chat,
    },
    ModeEntry {
        mode: Mode::Developer,
        hotkey: '6',
        icon: "💻",
        title_key: "modes.developer",
        desc_key: "mode_desc.developer",
        has_chat: false,
        view: views::developer,
    },
];

impl Mode {
    pub fn entry(self) -> &'static ModeEntry {
        &MODE_TABLE[self as usize]
    }

    /// Identifier the model sees in its instructions.
    pub fn api_name(self) -> &'static str {
        match self {
            Mode::Dashboard => "DASHBOARD",
            Mode::CareerMentor => "CAREER_MENTOR",
            Mode::TypingCoach => "TYPING_COACH",
            Mode::TallyCoach => "TALLY_COACH",
            Mode::InterviewSim => "INTERVIEW_SIM",
            Mode::ResumeGuide => "RESUME_GUIDE",
            Mode::Developer => "DEVELOPER",
        }
    }

    pub fn has_chat(self) -> bool {
        self.entry().has_chat
    }

    pub fn title(self, lang: Language) -> String {
        t!(self.entry().title_key, locale = lang.code()).into_owned()
    }

    pub fn description(self, lang: Language) -> String {
        t!(self.entry().desc_key, locale = lang.code()).into_owned()
    }

    pub fn from_hotkey(key: char) -> Option<Self> {
        selectable().find(|e| e.hotkey == key).map(|e| e.mode)
    }
}

/// Entries offered on the dashboard (everything but the dashboard itself).
pub fn selectable() -> impl Iterator<Item = &'static ModeEntry> {
    MODE_TABLE.iter().filter(|e| e.mode != Mode::Dashboard)
}

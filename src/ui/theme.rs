use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "default";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex strings as written in theme files. Missing keys fall back to the
/// built-in palette.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub accent: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub user_bubble: String,
    pub model_bubble: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// Looks for `<config_dir>/mentorbridge/themes/<name>.toml`.
    pub fn load(name: &str) -> Option<Self> {
        if name == DEFAULT_THEME {
            return Some(Self::default());
        }
        let path = Self::user_theme_dir()?.join(format!("{name}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        match toml::from_str::<Theme>(&content) {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed theme file");
                None
            }
        }
    }

    /// Named theme, or the built-in palette when it cannot be found.
    pub fn load_or_default(name: &str) -> Self {
        Self::load(name).unwrap_or_else(|| {
            tracing::debug!(theme = name, "theme not found, using default");
            Self::default()
        })
    }

    fn user_theme_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mentorbridge").join("themes"))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0f172a".to_string(),
            fg: "#e2e8f0".to_string(),
            text_correct: "#4ade80".to_string(),
            text_incorrect: "#f87171".to_string(),
            text_incorrect_bg: "#450a0a".to_string(),
            text_pending: "#64748b".to_string(),
            text_cursor_bg: "#e2e8f0".to_string(),
            text_cursor_fg: "#0f172a".to_string(),
            accent: "#60a5fa".to_string(),
            border: "#334155".to_string(),
            border_focused: "#60a5fa".to_string(),
            header_bg: "#1e293b".to_string(),
            header_fg: "#f8fafc".to_string(),
            user_bubble: "#2563eb".to_string(),
            model_bubble: "#334155".to_string(),
            error: "#f87171".to_string(),
            warning: "#facc15".to_string(),
            success: "#4ade80".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn text_cursor_bg(&self) -> Color { Self::parse_color(&self.text_cursor_bg) }
    pub fn text_cursor_fg(&self) -> Color { Self::parse_color(&self.text_cursor_fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn user_bubble(&self) -> Color { Self::parse_color(&self.user_bubble) }
    pub fn model_bubble(&self) -> Color { Self::parse_color(&self.model_bubble) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}

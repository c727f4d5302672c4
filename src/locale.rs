use serde::{Deserialize, Serialize};

/// UI language. Serialized as its ISO code so the stored value reads `"en"` / `"ta"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ta,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ta => "ta",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "ta" | "tamil" => Some(Language::Ta),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ta,
            Language::Ta => Language::En,
        }
    }

    /// Name used when telling the model which language to answer in.
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ta => "Tamil (தமிழ்)",
        }
    }

    /// Label for the toggle button, i.e. the language you would switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::En => "தமிழ்",
            Language::Ta => "English",
        }
    }
}

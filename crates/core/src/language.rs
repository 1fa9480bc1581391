// Language codes accepted by the Hospital Authority feeds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language of an upstream feed.
///
/// The feeds publish `en`, `tc` (Traditional Chinese) and `sc` (Simplified
/// Chinese) variants. Anything else is kept verbatim and substituted into the
/// URL as-is; the upstream decides whether such a file exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Language {
    #[default]
    En,
    Tc,
    Sc,
    Other(String),
}

impl Language {
    /// Codes advertised in tool schemas.
    pub const KNOWN: [&'static str; 3] = ["en", "tc", "sc"];

    /// Parse a language code. Empty input falls back to English.
    pub fn parse(code: &str) -> Self {
        match code {
            "" | "en" => Self::En,
            "tc" => Self::Tc,
            "sc" => Self::Sc,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::En => "en",
            Self::Tc => "tc",
            Self::Sc => "sc",
            Self::Other(code) => code,
        }
    }

    /// Whether this is one of the published feed languages.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}

impl From<Option<String>> for Language {
    fn from(code: Option<String>) -> Self {
        code.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

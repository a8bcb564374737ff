use serde::{Deserialize, Serialize};

/// Languages the species tables carry names for.
///
/// Spanish, Italian and Portuguese reuse the English names and are not listed;
/// Spanish still participates in the cross-locale consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "de")]
    De,
    #[serde(rename = "ko")]
    Ko,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "zh-Hant")]
    ZhHant,
}

impl Language {
    /// Target languages recorded in the translated-name document.
    pub const SUPPORTED: [Language; 6] = [
        Language::En,
        Language::Fr,
        Language::De,
        Language::Ko,
        Language::Ja,
        Language::ZhHant,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Ko => "ko",
            Language::Ja => "ja",
            Language::ZhHant => "zh-Hant",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

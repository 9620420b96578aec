//! Locale handling and the compiled-in UI dictionaries.

pub mod dictionaries;

pub use dictionaries::Dictionary;

use serde::{Deserialize, Serialize};

/// Supported UI locales. Arabic is the default and reads right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    En,
}

pub const LOCALES: [Locale; 2] = [Locale::Ar, Locale::En];
pub const DEFAULT_LOCALE: Locale = Locale::Ar;

impl Locale {
    /// Exact tag match; anything else is unsupported.
    pub fn parse(tag: &str) -> Option<Locale> {
        match tag {
            "ar" => Some(Locale::Ar),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    pub fn direction(&self) -> &'static str {
        match self {
            Locale::Ar => "rtl",
            Locale::En => "ltr",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::Ar => "العربية",
            Locale::En => "English",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full UI string table for a locale.
pub fn dictionary(locale: Locale) -> &'static Dictionary {
    match locale {
        Locale::Ar => &dictionaries::AR,
        Locale::En => &dictionaries::EN,
    }
}

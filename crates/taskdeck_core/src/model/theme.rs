//! Display theme preference.
//!
//! The theme is persisted in its own slot as a bare wire string (not JSON),
//! so the stored bytes are exactly [`THEME_LIGHT`] or [`THEME_DARK`].

/// Wire string for the light theme.
pub const THEME_LIGHT: &str = "light";
/// Wire string for the dark theme.
pub const THEME_DARK: &str = "dark";

/// Rendering theme chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// The fallback for missing or unrecognized stored values.
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stable wire string for this theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => THEME_LIGHT,
            Self::Dark => THEME_DARK,
        }
    }

    /// Parses a stored wire string; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            THEME_LIGHT => Some(Self::Light),
            THEME_DARK => Some(Self::Dark),
            _ => None,
        }
    }

    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

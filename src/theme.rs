//! Theme
//!
//! Light and dark palettes as CSS custom properties. [`apply`] is the only place a theme
//! reaches the outside world.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unknown theme name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme: {0}")]
pub struct ThemeError(pub String);

/// Colour theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    #[default]
    Light,

    /// Dark theme
    Dark,
}

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// `color-scheme` value
    pub color_scheme: &'static str,

    /// Meta `theme-color` for mobile browsers
    pub meta_theme_color: &'static str,

    /// CSS custom properties, in a fixed order
    pub properties: [(&'static str, &'static str); 7],
}

const LIGHT: Palette = Palette {
    color_scheme: "light",
    meta_theme_color: "#ffffff",
    properties: [
        ("--nav-bg", "#ffffff"),
        ("--nav-border", "#e2e8f0"),
        ("--card-bg", "#ffffff"),
        ("--card-border", "#e2e8f0"),
        ("--text-primary", "#0f172a"),
        ("--text-secondary", "#475569"),
        ("--sidebar-bg", "#f8fafc"),
    ],
};

const DARK: Palette = Palette {
    color_scheme: "dark",
    meta_theme_color: "#0f172a",
    properties: [
        ("--nav-bg", "#0f172a"),
        ("--nav-border", "#334155"),
        ("--card-bg", "#1e293b"),
        ("--card-border", "#475569"),
        ("--text-primary", "#f8fafc"),
        ("--text-secondary", "#cbd5e1"),
        ("--sidebar-bg", "#0c1426"),
    ],
};

impl Theme {
    /// Theme for a stored dark mode flag.
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    /// Whether this is the dark theme
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// The other theme
    #[must_use]
    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    /// Name, `light` or `dark`
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Colours for this theme
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ThemeError(s.to_string())),
        }
    }
}

/// Receives the side effects of switching theme.
pub trait ThemeSink {
    /// Toggle the `dark` class on the document root.
    fn set_dark_class(&mut self, dark: bool);

    /// Set a CSS property on the document root.
    fn set_property(&mut self, name: &str, value: &str);

    /// Set the meta `theme-color`.
    fn set_meta_theme_color(&mut self, color: &str);
}

/// Push a theme's palette into `sink`.
pub fn apply(theme: Theme, sink: &mut dyn ThemeSink) {
    let palette = theme.palette();

    sink.set_dark_class(theme.is_dark());
    sink.set_property("color-scheme", palette.color_scheme);

    for (name, value) in palette.properties {
        sink.set_property(name, value);
    }

    sink.set_meta_theme_color(palette.meta_theme_color);
}

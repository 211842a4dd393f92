//! Theme provider for MyJSI
//!
//! Supplies the color tokens for the light and dark modes. Screens are
//! painted on an opaque background so that the layer parked underneath a
//! transition never shows through the one sliding over it.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{get_theme, ThemeName};
//!
//! let theme = get_theme(ThemeName::Dark);
//! assert!(theme.is_dark());
//! let bg = &theme.colors.background;
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#FFFFFF")
pub type Color = String;

// =============================================================================
// Brand Colors
// =============================================================================

/// MyJSI brand colors
pub mod brand {
    /// Charcoal used for primary text and actions
    pub const CHARCOAL: &str = "#353535";
    /// Warm accent
    pub const ACCENT: &str = "#AD8A77";
    /// Warm off-white page background
    pub const CANVAS: &str = "#F0EDE8";
    /// Pure white
    pub const WHITE: &str = "#FFFFFF";
    /// Near black used by the dark mode canvas
    pub const NIGHT: &str = "#1E1E1E";
}

// =============================================================================
// Theme Definition
// =============================================================================

/// Theme name enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl ThemeName {
    /// The other mode
    pub fn toggled(&self) -> ThemeName {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Light => write!(f, "Light"),
            ThemeName::Dark => write!(f, "Dark"),
        }
    }
}

impl std::str::FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Semantic color tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Screen background
    pub background: Color,
    /// Cards and sheets
    pub surface: Color,
    /// Primary actions
    pub primary: Color,
    /// Accent highlights
    pub accent: Color,
    /// Body text
    pub text_primary: Color,
    /// Secondary text
    pub text_secondary: Color,
    /// Hairlines and dividers
    pub border: Color,
    /// Shadow cast by the sliding screen onto the one underneath
    pub edge_shadow: Color,
}

/// Complete theme definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: ThemeName,
    /// Semantic colors
    pub colors: ThemeColors,
}

impl Theme {
    /// Check if this is a dark theme
    pub fn is_dark(&self) -> bool {
        self.name == ThemeName::Dark
    }
}

/// Light mode
pub fn light_theme() -> Theme {
    Theme {
        name: ThemeName::Light,
        colors: ThemeColors {
            background: brand::CANVAS.to_string(),
            surface: brand::WHITE.to_string(),
            primary: brand::CHARCOAL.to_string(),
            accent: brand::ACCENT.to_string(),
            text_primary: brand::CHARCOAL.to_string(),
            text_secondary: "#666666".to_string(),
            border: "#E3E0D8".to_string(),
            edge_shadow: "#00000026".to_string(),
        },
    }
}

/// Dark mode
pub fn dark_theme() -> Theme {
    Theme {
        name: ThemeName::Dark,
        colors: ThemeColors {
            background: brand::NIGHT.to_string(),
            surface: "#2A2A2A".to_string(),
            primary: brand::CANVAS.to_string(),
            accent: "#BBA193".to_string(),
            text_primary: "#F5F5F5".to_string(),
            text_secondary: "#A3A3A3".to_string(),
            border: "#3A3A3A".to_string(),
            edge_shadow: "#00000066".to_string(),
        },
    }
}

// =============================================================================
// Theme Provider
// =============================================================================

/// Get a theme by name
pub fn get_theme(name: ThemeName) -> Theme {
    match name {
        ThemeName::Light => light_theme(),
        ThemeName::Dark => dark_theme(),
    }
}

/// Theme provider state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeState {
    /// Current theme name
    pub theme_name: ThemeName,
    /// Current theme (regenerated on deserialization)
    #[serde(skip, default = "light_theme")]
    pub theme: Theme,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(ThemeName::Light)
    }
}

impl ThemeState {
    /// Create a new theme state with the given theme
    pub fn new(theme_name: ThemeName) -> Self {
        Self {
            theme_name,
            theme: get_theme(theme_name),
        }
    }

    /// Set the current theme
    pub fn set_theme(&mut self, theme_name: ThemeName) {
        self.theme_name = theme_name;
        self.theme = get_theme(theme_name);
    }

    /// Switch between light and dark
    pub fn toggle(&mut self) {
        self.set_theme(self.theme_name.toggled());
    }

    /// Get the current theme
    pub fn current_theme(&self) -> &Theme {
        &self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_name_from_str() {
        assert_eq!("light".parse::<ThemeName>().unwrap(), ThemeName::Light);
        assert_eq!("DARK".parse::<ThemeName>().unwrap(), ThemeName::Dark);
        assert!("dim".parse::<ThemeName>().is_err());
    }

    #[test]
    fn test_themes_differ() {
        let light = light_theme();
        let dark = dark_theme();
        assert!(!light.is_dark());
        assert!(dark.is_dark());
        assert_ne!(light.colors.background, dark.colors.background);
    }

    fn is_hex_color(color: &str) -> bool {
        let Some(hex) = color.strip_prefix('#') else {
            return false;
        };
        matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn test_all_colors_are_hex() {
        for theme in [light_theme(), dark_theme()] {
            let c = &theme.colors;
            for color in [
                &c.background,
                &c.surface,
                &c.primary,
                &c.accent,
                &c.text_primary,
                &c.text_secondary,
                &c.border,
                &c.edge_shadow,
            ] {
                assert!(is_hex_color(color), "bad color {}", color);
            }
        }
    }

    #[test]
    fn test_theme_state_toggle() {
        let mut state = ThemeState::default();
        assert_eq!(state.theme_name, ThemeName::Light);

        state.toggle();
        assert_eq!(state.theme_name, ThemeName::Dark);
        assert!(state.current_theme().is_dark());

        state.toggle();
        assert!(!state.current_theme().is_dark());
    }

    #[test]
    fn test_theme_state_serialization() {
        let state = ThemeState::new(ThemeName::Dark);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"theme_name":"dark"}"#);

        let parsed: ThemeState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.theme_name, ThemeName::Dark);
    }
}

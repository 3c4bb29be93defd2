use log::warn;
use std::path::PathBuf;
use tui::style::Color;

/// Persisted UI theme. Dark is the default when no preference is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: Color::Gray,
                heading: Color::White,
                accent: Color::Cyan,
                dim: Color::DarkGray,
                winner: Color::LightCyan,
                success: Color::Green,
                error: Color::Red,
                border: Color::DarkGray,
            },
            Theme::Light => Palette {
                text: Color::Black,
                heading: Color::Black,
                accent: Color::Blue,
                dim: Color::Gray,
                winner: Color::Blue,
                success: Color::Green,
                error: Color::Red,
                border: Color::Gray,
            },
        }
    }
}

/// Colors every widget draws with, selected once per frame from the theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub heading: Color,
    pub accent: Color,
    pub dim: Color,
    pub winner: Color,
    pub success: Color,
    pub error: Color,
    pub border: Color,
}

/// Application-scoped theme context: loaded once at startup, written back
/// synchronously on every toggle, passed explicitly to the draw code.
#[derive(Debug)]
pub struct ThemeContext {
    theme: Theme,
    path: PathBuf,
}

impl ThemeContext {
    pub fn load() -> Self {
        Self::load_from(theme_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let theme = std::fs::read_to_string(&path)
            .map(|s| Theme::from_str(&s))
            .unwrap_or_default();
        Self { theme, path }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn toggle(&mut self) {
        self.theme = self.theme.toggled();
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&self.path, self.theme.as_str()) {
            warn!("could not persist theme preference: {e}");
        }
    }
}

fn theme_path() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("kotui").join("theme");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join("kotui").join("theme");
    }
    PathBuf::from("theme")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_theme_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kotui-theme-{tag}-{}", std::process::id()))
    }

    #[test]
    fn missing_preference_defaults_to_dark() {
        let dir = test_theme_dir("missing");
        let _ = std::fs::remove_dir_all(&dir);
        let ctx = ThemeContext::load_from(dir.join("theme"));
        assert_eq!(ctx.theme(), Theme::Dark);
    }

    #[test]
    fn from_str_only_recognizes_light() {
        assert_eq!(Theme::from_str("light"), Theme::Light);
        assert_eq!(Theme::from_str("dark"), Theme::Dark);
        assert_eq!(Theme::from_str(" light\n"), Theme::Light);
        assert_eq!(Theme::from_str("solarized"), Theme::Dark);
        assert_eq!(Theme::from_str(""), Theme::Dark);
    }

    #[test]
    fn toggle_round_trips_through_the_file() {
        let dir = test_theme_dir("round-trip");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("theme");
        let mut ctx = ThemeContext::load_from(path.clone());
        assert_eq!(ctx.theme(), Theme::Dark);

        ctx.toggle();
        assert_eq!(ctx.theme(), Theme::Light);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "light");

        // A fresh context sees the persisted preference.
        let reloaded = ThemeContext::load_from(path.clone());
        assert_eq!(reloaded.theme(), Theme::Light);

        let _ = std::fs::remove_dir_all(dir);
    }
}

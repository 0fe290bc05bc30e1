//! Light and dark color themes.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colors are drawn at all.
///
/// Disabled by the `--no-color` flag or any value of `NO_COLOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors on unless `--no-color` was passed or `NO_COLOR` is set.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on regardless of the environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Whether colors are drawn.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Theme =====

/// Every style the catalog screen uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Background and default text.
    pub base: Style,
    /// Title bar and help section headings.
    pub header: Style,
    /// Card text and ordinary status lines.
    pub card: Style,
    /// Card under the selection.
    pub card_selected: Style,
    /// Secondary text such as ids, cover URLs and unfocused borders.
    pub muted: Style,
    /// Selected borders, key names and the Load More hint.
    pub accent: Style,
    /// Error status messages.
    pub error: Style,
    /// Text cursor in inputs.
    pub cursor: Style,
}

impl Theme {
    /// Pick the light or dark palette.
    pub fn new(dark_mode: bool, colors: ColorConfig) -> Self {
        if !colors.colors_enabled() {
            return Self::monochrome();
        }
        if dark_mode { Self::dark() } else { Self::light() }
    }

    fn light() -> Self {
        Self {
            base: Style::default().fg(Color::Black).bg(Color::White),
            header: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            card: Style::default().fg(Color::Black),
            card_selected: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            accent: Style::default().fg(Color::Blue),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            cursor: Style::default().fg(Color::White).bg(Color::Black),
        }
    }

    fn dark() -> Self {
        Self {
            base: Style::default().fg(Color::Gray).bg(Color::Black),
            header: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            card: Style::default().fg(Color::Gray),
            card_selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            accent: Style::default().fg(Color::Yellow),
            error: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            cursor: Style::default().fg(Color::Black).bg(Color::Gray),
        }
    }

    fn monochrome() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            base: Style::default(),
            header: bold,
            card: Style::default(),
            card_selected: Style::default().add_modifier(Modifier::REVERSED),
            muted: Style::default().add_modifier(Modifier::DIM),
            accent: bold,
            error: bold,
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

//! Color palette and preset styles.

use ratatui::style::{Color, Modifier, Style};

use churn_core::domain::assessment::RiskLevel;

pub struct Theme;

impl Theme {
    /// Error red, also used for the high-risk state.
    pub const DANGER: Color = Color::Rgb(255, 107, 107);

    /// Low-risk green.
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129);

    pub const ACCENT: Color = Color::Rgb(59, 130, 246);
    pub const TEXT: Color = Color::Rgb(248, 250, 252);
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);
    pub const BORDER: Color = Color::Rgb(71, 85, 105);

    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn border_invalid() -> Style {
        Style::default().fg(Self::DANGER)
    }

    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// The dimmed submit bar, the analogue of a disabled button.
    pub fn disabled() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn risk(risk: RiskLevel) -> Style {
        match risk {
            RiskLevel::High => Style::default().fg(Self::DANGER),
            RiskLevel::Low => Style::default().fg(Self::SUCCESS),
        }
    }
}

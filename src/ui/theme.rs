use ratatui::style::{Color, Modifier, Style};

/// Styles for the single diskfill screen.
#[derive(Clone)]
pub struct Theme {
    pub frame:       Style,
    pub title:       Style,
    pub label:       Style,
    pub value:       Style,
    pub button:      Style,
    pub button_edge: Style,
    pub button_busy: Style,
    pub done:        Style,
    pub warn:        Style,
    pub error:       Style,
    pub footer_bg:   Style,
    pub footer_key:  Style,
    pub footer_text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            frame:       Style::default().fg(Color::DarkGray),
            title:       Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            label:       Style::default().fg(Color::Gray),
            value:       Style::default().fg(Color::White),
            button:      Style::default().fg(Color::Black).bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            button_edge: Style::default().fg(Color::LightBlue),
            button_busy: Style::default().fg(Color::Gray).bg(Color::DarkGray),
            done:        Style::default().fg(Color::Green),
            warn:        Style::default().fg(Color::Yellow),
            error:       Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            footer_bg:   Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:  Style::default().bg(Color::DarkGray).fg(Color::LightBlue).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }
}

impl Theme {
    /// Gauge colour for a filesystem that is `pct` full. Past the point where
    /// only the headroom is left the bar turns red.
    pub fn gauge_style(&self, pct: f64) -> Style {
        if pct >= 99.0      { Style::default().fg(Color::Red) }
        else if pct >= 90.0 { Style::default().fg(Color::Yellow) }
        else                { Style::default().fg(Color::Green) }
    }
}

use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEYS: &[(&str, &str)] = &[
    ("Enter/Space", "Press button"),
    ("click", "Press button"),
    ("Esc", "Dismiss"),
    ("q", "Quit"),
];

pub fn render_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];

    for (key, desc) in KEYS {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.footer_bg), area);
}

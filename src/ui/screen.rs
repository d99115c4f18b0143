use crate::app::{App, Message};
use crate::ui::footer;
use diskfill::util::human::{fmt_bytes, fmt_pct};
use diskfill::StatusRecord;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const PANEL_WIDTH:  u16 = 62;
const PANEL_HEIGHT: u16 = 16;
const BUTTON_WIDTH: u16 = 24;

/// Draw the whole screen and return where the button ended up.
pub fn render(f: &mut Frame, app: &App) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    footer::render_footer(f, rows[1], &app.theme);

    let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, rows[0]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.frame)
        .title(Span::styled(" diskfill ", app.theme.title));
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // status text
            Constraint::Length(2), // temp-file gauge
            Constraint::Length(3), // button
            Constraint::Min(1),    // message
        ])
        .split(inner);

    render_status(f, parts[0], &app.session.status(), app);
    render_gauge(f, parts[1], &app.session.status(), app);
    let button = centered_rect(BUTTON_WIDTH, 3, parts[2]);
    render_button(f, button, app);
    render_message(f, parts[3], app);

    button
}

fn render_status(f: &mut Frame, area: Rect, status: &StatusRecord, app: &App) {
    let t = &app.theme;
    let row = |label: &'static str, bytes: u64| {
        Line::from(vec![
            Span::styled(format!("  {:<22}", label), t.label),
            Span::styled(format!("{:>16}", bytes), t.value),
            Span::styled(format!("  {:>10}", fmt_bytes(bytes)), t.label),
        ])
    };
    let lines = vec![
        Line::from(""),
        row("Total Disk Space", status.total_disk_space),
        row("Available Disk Space", status.available_disk_space),
        row("Temp File Size", status.temp_file_size),
        Line::from(Span::styled(
            format!("  {}", app.session.path().display()),
            t.label,
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_gauge(f: &mut Frame, area: Rect, status: &StatusRecord, app: &App) {
    let pct = status.use_pct();
    let area = Rect { x: area.x + 2, width: area.width.saturating_sub(4), height: 1, ..area };
    let label = format!(
        "used {}  (temp file {})",
        fmt_pct(pct),
        fmt_pct(status.temp_pct()),
    );
    let gauge = Gauge::default()
        .gauge_style(app.theme.gauge_style(pct))
        .ratio((pct / 100.0).clamp(0.0, 1.0))
        .label(Span::styled(label, app.theme.value));
    f.render_widget(gauge, area);
}

fn render_button(f: &mut Frame, area: Rect, app: &App) {
    let busy = app.session.is_busy();
    let (label, style, border) = match (&app.message, busy) {
        (Message::Finishing(_), _) => ("Finishing…", app.theme.button_busy, app.theme.frame),
        (_, true)                  => ("Working…", app.theme.button_busy, app.theme.frame),
        (_, false)                 => (app.session.mode().label(), app.theme.button, app.theme.button_edge),
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let button = Paragraph::new(Line::from(Span::styled(format!(" {} ", label), style)))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(button, area);
}

fn render_message(f: &mut Frame, area: Rect, app: &App) {
    let t = &app.theme;
    let line = match &app.message {
        Message::None => return,
        Message::Working(mode) => Span::styled(
            match mode {
                diskfill::Mode::Fill  => "Writing temp file…",
                diskfill::Mode::Clear => "Deleting temp file…",
            },
            t.label,
        ),
        Message::Finishing(mode) => Span::styled(
            match mode {
                diskfill::Mode::Fill  => "Finishing the fill before quitting…",
                diskfill::Mode::Clear => "Finishing the clear before quitting…",
            },
            t.warn,
        ),
        Message::Done(mode) => Span::styled(
            match mode {
                diskfill::Mode::Fill  => "Disk filled.",
                diskfill::Mode::Clear => "Disk cleared.",
            },
            t.done,
        ),
        Message::Warning(msg) => Span::styled(msg.as_str(), t.warn),
        Message::Error(msg)   => Span::styled(msg.as_str(), t.error),
    };
    f.render_widget(
        Paragraph::new(Line::from(line))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true }),
        area,
    );
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    Rect::new(
        r.x + (r.width.saturating_sub(w)) / 2,
        r.y + (r.height.saturating_sub(h)) / 2,
        w, h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_parent() {
        let parent = Rect::new(0, 0, 80, 24);
        let r = centered_rect(62, 16, parent);
        assert_eq!(r, Rect::new(9, 4, 62, 16));

        let tiny = centered_rect(62, 16, Rect::new(0, 0, 20, 5));
        assert_eq!(tiny, Rect::new(0, 0, 20, 5));
    }
}

use crate::input::{handle_key, Action};
use crate::ui::screen;
use crate::ui::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use diskfill::{DiskFillError, Mode, Session};
use ratatui::layout::Rect;
use std::time::Duration;

// ── Last outcome shown under the button ───────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    None,
    Working(Mode),
    Finishing(Mode),
    Done(Mode),
    Warning(String),
    Error(String),
}

// ── App ───────────────────────────────────────────────────────────────

pub struct App {
    pub session: Session,

    pub theme: Theme,

    pub message: Message,

    // Last rendered button rectangle, for mouse hit-testing
    pub button_area: Option<Rect>,

    poll_timeout: Duration,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, tick_ms: u64) -> Self {
        Self {
            session,
            theme:        Theme::default(),
            message:      Message::None,
            button_area:  None,
            poll_timeout: Duration::from_millis(tick_ms),
            should_quit:  false,
        }
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            self.consume_outcome();

            terminal.draw(|f| {
                let button = screen::render(f, self);
                self.button_area = Some(button);
            })?;

            if event::poll(self.poll_timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        let action = handle_key(key);
                        self.handle_action(action);
                    }
                    Event::Mouse(me) => {
                        if let MouseEventKind::Down(MouseButton::Left) = me.kind {
                            self.handle_mouse_click(me.column, me.row);
                        }
                    }
                    _ => {}
                }
            }

            if self.should_quit { break; }
        }

        // Let a running fill finish so no partial file is left behind.
        if self.begin_finishing() {
            terminal.draw(|f| {
                screen::render(f, self);
            })?;
            let _ = self.session.wait();
        }
        Ok(())
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Press => self.press(),
            Action::DismissMessage => {
                if !self.session.is_busy() {
                    self.message = Message::None;
                }
            }
            Action::None => {}
        }
    }

    /// Switch the message to "finishing" when an operation is still running.
    fn begin_finishing(&mut self) -> bool {
        if !self.session.is_busy() { return false; }
        let mode = match self.message {
            Message::Working(mode) => mode,
            _ => self.session.mode(),
        };
        self.message = Message::Finishing(mode);
        true
    }

    fn handle_mouse_click(&mut self, col: u16, row: u16) {
        let Some(area) = self.button_area else { return };
        let inside = col >= area.x && col < area.x + area.width
            && row >= area.y && row < area.y + area.height;
        if inside {
            self.press();
        }
    }

    fn press(&mut self) {
        let mode = self.session.mode();
        match self.session.request() {
            Ok(()) => self.message = Message::Working(mode),
            // Button is disabled while busy; ignore the extra press.
            Err(DiskFillError::Busy) => {}
            Err(e) => self.message = Message::Error(e.to_string()),
        }
    }

    fn consume_outcome(&mut self) {
        let Message::Working(mode) = self.message else {
            // Nothing requested through the UI, but drain anyway.
            let _ = self.session.poll();
            return;
        };
        match self.session.poll() {
            None => {}
            Some(Ok(_)) => self.message = Message::Done(mode),
            Some(Err(e)) if e.is_insufficient_space() => {
                self.message = Message::Warning(e.to_string());
            }
            Some(Err(e)) => self.message = Message::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diskfill::collectors::space::SpaceProbe;
    use diskfill::ops::fill::HEADROOM;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let session = Session::open(dir.path(), "app.tmp").unwrap();
        App::new(session, 150)
    }

    #[test]
    fn quit_action() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    struct RoomyProbe;

    impl SpaceProbe for RoomyProbe {
        fn total_space(&self) -> diskfill::Result<u64> { Ok(HEADROOM * 4) }
        fn available_space(&self) -> diskfill::Result<u64> { Ok(HEADROOM + 64) }
    }

    fn screen_text(app: &App) -> String {
        let mut term = Terminal::new(TestBackend::new(80, 24)).unwrap();
        term.draw(|f| { screen::render(f, app); }).unwrap();
        term.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn quitting_while_busy_draws_finishing_state() {
        let dir = TempDir::new().unwrap();
        let session = Session::with_probe(dir.path().join("app.tmp"), Arc::new(RoomyProbe)).unwrap();
        let mut app = App::new(session, 150);

        app.handle_action(Action::Press);
        assert_eq!(app.message, Message::Working(Mode::Fill));

        assert!(app.begin_finishing());
        assert_eq!(app.message, Message::Finishing(Mode::Fill));
        let text = screen_text(&app);
        assert!(text.contains("Finishing…"));
        assert!(text.contains("Finishing the fill before quitting"));

        assert!(app.session.wait().unwrap().is_ok());
        assert!(!app.begin_finishing());
    }

    #[test]
    fn idle_quit_skips_finishing() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert!(!app.begin_finishing());
        assert_eq!(app.message, Message::None);
        assert!(screen_text(&app).contains("Fill Disk"));
    }

    #[test]
    fn click_outside_button_does_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.button_area = Some(Rect::new(10, 10, 20, 3));
        app.handle_mouse_click(0, 0);
        assert!(!app.session.is_busy());
        assert_eq!(app.message, Message::None);
    }
}

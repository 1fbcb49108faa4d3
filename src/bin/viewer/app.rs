//! Application state and key handling
//!
//! Two panes, source on the left and generated C# on the right. Each keeps its
//! own cursor line; the focused pane receives movement keys.

use super::model::{Focus, Model};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Lines moved by PageUp / PageDown
const PAGE_SIZE: usize = 20;

/// Cursor and scroll state of one pane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneState {
    pub cursor: usize,
    pub scroll: usize,
}

impl PaneState {
    fn move_by(&mut self, delta: isize, line_count: usize) {
        let last = line_count.saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Keep the cursor inside a window of `height` lines
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }
}

/// The main application
pub struct App {
    pub model: Model,
    pub focus: Focus,
    pub source: PaneState,
    pub generated: PaneState,
    pub should_quit: bool,
}

impl App {
    pub fn new(model: Model) -> Self {
        App {
            model,
            focus: Focus::default(),
            source: PaneState::default(),
            generated: PaneState::default(),
            should_quit: false,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    /// Handle a keyboard event
    ///
    /// Returns whether the state changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                true
            }
            KeyCode::Tab => {
                self.toggle_focus();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(PAGE_SIZE as isize),
            KeyCode::PageUp => self.move_cursor(-(PAGE_SIZE as isize)),
            KeyCode::Home | KeyCode::Char('g') => self.move_cursor(isize::MIN),
            KeyCode::End | KeyCode::Char('G') => self.move_cursor(isize::MAX),
            _ => false,
        }
    }

    fn move_cursor(&mut self, delta: isize) -> bool {
        let (pane, line_count) = match self.focus {
            Focus::Source => (&mut self.source, self.model.source_lines.len()),
            Focus::Generated => (&mut self.generated, self.model.generated_lines.len()),
        };
        let before = *pane;
        pane.move_by(delta, line_count);
        *pane != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easysharp::ProgramLayout;

    fn app(source: &str) -> App {
        App::new(Model::new(source, &ProgramLayout::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_creation() {
        let app = app("print 1");
        assert_eq!(app.focus, Focus::Source);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_focus_toggle() {
        let mut app = app("print 1");
        assert!(app.handle_key(key(KeyCode::Tab)));
        assert_eq!(app.focus, Focus::Generated);
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Source);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut app = app("a = 1\nb = 2");
        assert!(app.handle_key(key(KeyCode::Down)));
        assert!(!app.handle_key(key(KeyCode::Down)));
        assert_eq!(app.source.cursor, 1);
        assert!(app.handle_key(key(KeyCode::Home)));
        assert_eq!(app.source.cursor, 0);
        assert!(!app.handle_key(key(KeyCode::Up)));
    }

    #[test]
    fn test_cursor_moves_focused_pane_only() {
        let mut app = app("a = 1");
        app.toggle_focus();
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.source.cursor, 0);
        assert_eq!(app.generated.cursor, app.model.generated_lines.len() - 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app("");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut pane = PaneState {
            cursor: 30,
            scroll: 0,
        };
        pane.scroll_into_view(10);
        assert_eq!(pane.scroll, 21);
        pane.cursor = 5;
        pane.scroll_into_view(10);
        assert_eq!(pane.scroll, 5);
    }
}

//! Terminal implementation of the slider panel, drawn with ratatui on crossterm.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{debug, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::slider_panel::{Result, SliderBackend, SliderError};
use board::SliderBoard;

mod board;
mod render;

/// Puts the terminal back into its normal state. Safe to call when it already is.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn enter_alternate_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Runs `undo` when `result` is an error, and hands `result` back either way.
fn undo_on_error<T>(
    result: io::Result<T>,
    undo: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    if result.is_err() {
        if let Err(e) = undo() {
            warn!("Could not restore the terminal: {}", e);
        }
    }
    result
}

#[derive(Default)]
pub struct TerminalBackend {
    board: SliderBoard,
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
}

impl TerminalBackend {
    pub fn new() -> Self {
        TerminalBackend::default()
    }

    /// Shown underneath the sliders until replaced.
    pub fn set_status(&mut self, status: String) {
        self.board.status = Some(status);
    }

    /// Draws the panel, then waits at most `timeout` for a key press.
    ///
    /// The key is applied to the sliders before it is returned, so the caller only has to look
    /// for the keys it cares about itself, like quitting.
    pub fn wait_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        let board = &self.board;
        if let Some(terminal) = self.terminal.as_mut() {
            terminal
                .draw(|f| render::draw(f, board))
                .map_err(SliderError::Backend)?;
        }

        if !event::poll(timeout).map_err(SliderError::Backend)? {
            return Ok(None);
        }

        match event::read().map_err(SliderError::Backend)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.board.handle_key(key);
                Ok(Some(key))
            }
            _ => Ok(None),
        }
    }
}

impl SliderBackend for TerminalBackend {
    fn open_panel(&mut self, title: &str) -> Result<()> {
        self.board = SliderBoard::new(title);

        if self.terminal.is_some() {
            return Ok(());
        }

        enable_raw_mode().map_err(SliderError::Backend)?;
        // Raw mode is on from here, and `close_panel` only undoes it once a terminal is stored.
        let terminal = undo_on_error(enter_alternate_screen(), restore_terminal)
            .map_err(SliderError::Backend)?;
        self.terminal = Some(terminal);

        debug!("Opened terminal panel '{}'.", title);

        Ok(())
    }

    fn create_slider(&mut self, name: &str, initial: i32, max: i32) -> Result<()> {
        self.board.add(name, initial, max);
        Ok(())
    }

    fn position(&self, name: &str) -> Option<i32> {
        self.board.row(name).map(|row| row.value)
    }

    fn set_position(&mut self, name: &str, value: i32) -> Result<()> {
        if self.board.set(name, value) {
            Ok(())
        } else {
            Err(SliderError::MissingKey(name.to_owned()))
        }
    }

    fn close_panel(&mut self) -> Result<()> {
        self.board.clear();

        if let Some(mut terminal) = self.terminal.take() {
            restore_terminal().map_err(SliderError::Backend)?;
            terminal.show_cursor().map_err(SliderError::Backend)?;
            debug!("Closed terminal panel '{}'.", self.board.title);
        }

        Ok(())
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        if self.terminal.is_some() {
            if let Err(e) = self.close_panel() {
                warn!("Could not restore the terminal: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;
    use std::io;

    use crate::slider_panel::{SliderBackend, SliderError};
    use crate::terminal_ui::{undo_on_error, TerminalBackend};

    #[test]
    fn failed_setup_step_is_undone() {
        let undone = Cell::new(false);

        let result: io::Result<()> = undo_on_error(
            Err(io::Error::new(io::ErrorKind::Other, "no alternate screen")),
            || {
                undone.set(true);
                Ok(())
            },
        );

        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn successful_setup_step_is_kept() {
        let undone = Cell::new(false);

        let result = undo_on_error(Ok(7), || {
            undone.set(true);
            Ok(())
        });

        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }

    #[test]
    fn error_from_undo_does_not_replace_original_error() {
        let result: io::Result<()> = undo_on_error(
            Err(io::Error::new(io::ErrorKind::Other, "setup")),
            || Err(io::Error::new(io::ErrorKind::Other, "undo")),
        );

        assert_eq!(result.unwrap_err().to_string(), "setup");
    }

    // The terminal is never opened here, only the slider bookkeeping is exercised.

    #[test]
    fn sliders_live_on_the_board() {
        let mut backend = TerminalBackend::new();
        backend.create_slider("LowH", 3, 179).unwrap();

        assert_eq!(backend.position("LowH"), Some(3));

        backend.set_position("LowH", 500).unwrap();
        assert_eq!(backend.position("LowH"), Some(179));
    }

    #[test]
    fn set_position_of_unknown_slider_fails() {
        let mut backend = TerminalBackend::new();

        assert!(matches!(
            backend.set_position("LowH", 1),
            Err(SliderError::MissingKey(_))
        ));
    }

    #[test]
    fn close_without_open_terminal_clears_board() {
        let mut backend = TerminalBackend::new();
        backend.create_slider("LowH", 3, 179).unwrap();
        backend.set_status("hello".to_string());

        backend.close_panel().unwrap();

        assert_eq!(backend.position("LowH"), None);
        assert!(backend.board.status.is_none());
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::trace;

const PAGE_STEP: i32 = 10;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SliderRow {
    pub name: String,
    pub value: i32,
    pub initial: i32,
    pub max: i32,
}

impl SliderRow {
    /// Fraction of the slider that is filled, for gauges.
    pub fn ratio(&self) -> f64 {
        if self.max <= 0 {
            return 0.0;
        }
        f64::from(self.value) / f64::from(self.max)
    }

    fn set(&mut self, value: i32) {
        self.value = value.clamp(0, self.max);
    }

    fn step(&mut self, delta: i32) {
        self.set(self.value.saturating_add(delta));
    }
}

/// Everything the terminal panel shows, without the terminal.
#[derive(Debug, Default)]
pub struct SliderBoard {
    pub title: String,
    pub rows: Vec<SliderRow>,
    pub selected: usize,
    pub status: Option<String>,
}

impl SliderBoard {
    pub fn new(title: &str) -> Self {
        SliderBoard {
            title: title.to_owned(),
            ..SliderBoard::default()
        }
    }

    pub fn add(&mut self, name: &str, initial: i32, max: i32) {
        self.rows.push(SliderRow {
            name: name.to_owned(),
            value: initial,
            initial,
            max,
        });
    }

    pub fn row(&self, name: &str) -> Option<&SliderRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Returns false if there is no such row.
    pub fn set(&mut self, name: &str, value: i32) -> bool {
        match self.rows.iter_mut().find(|row| row.name == name) {
            Some(row) => {
                row.set(value);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.selected = 0;
        self.status = None;
    }

    /// Moves the selection or the selected slider. Key releases are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release || self.rows.is_empty() {
            return;
        }

        let count = self.rows.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Left | KeyCode::Char('h') => self.selected_row().step(-1),
            KeyCode::Right | KeyCode::Char('l') => self.selected_row().step(1),
            KeyCode::PageDown => self.selected_row().step(-PAGE_STEP),
            KeyCode::PageUp => self.selected_row().step(PAGE_STEP),
            KeyCode::Home => self.selected_row().set(0),
            KeyCode::End => {
                let row = self.selected_row();
                let max = row.max;
                row.set(max);
            }
            KeyCode::Char('r') => {
                let row = self.selected_row();
                let initial = row.initial;
                row.set(initial);
            }
            _ => return,
        }

        trace!("Key {:?} applied to slider board.", key.code);
    }

    fn selected_row(&mut self) -> &mut SliderRow {
        let index = self.selected.min(self.rows.len() - 1);
        &mut self.rows[index]
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use crate::terminal_ui::board::SliderBoard;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn board() -> SliderBoard {
        let mut board = SliderBoard::new("HSV Controls");
        board.add("LowH", 0, 179);
        board.add("HighH", 179, 179);
        board.add("LowS", 0, 255);
        board
    }

    #[test]
    fn arrows_move_selected_slider_within_range() {
        let mut board = board();

        board.handle_key(press(KeyCode::Right));
        board.handle_key(press(KeyCode::Right));
        assert_eq!(board.row("LowH").unwrap().value, 2);

        board.handle_key(press(KeyCode::Left));
        board.handle_key(press(KeyCode::Left));
        board.handle_key(press(KeyCode::Left));
        assert_eq!(board.row("LowH").unwrap().value, 0);
    }

    #[test]
    fn selection_wraps_around() {
        let mut board = board();

        board.handle_key(press(KeyCode::Up));
        assert_eq!(board.selected, 2);

        board.handle_key(press(KeyCode::Char('j')));
        assert_eq!(board.selected, 0);
    }

    #[test]
    fn page_home_end_and_reset() {
        let mut board = board();
        board.handle_key(press(KeyCode::Down));

        board.handle_key(press(KeyCode::PageUp));
        assert_eq!(board.row("HighH").unwrap().value, 179);

        board.handle_key(press(KeyCode::PageDown));
        assert_eq!(board.row("HighH").unwrap().value, 169);

        board.handle_key(press(KeyCode::Home));
        assert_eq!(board.row("HighH").unwrap().value, 0);

        board.handle_key(press(KeyCode::End));
        assert_eq!(board.row("HighH").unwrap().value, 179);

        board.handle_key(press(KeyCode::Home));
        board.handle_key(press(KeyCode::Char('r')));
        assert_eq!(board.row("HighH").unwrap().value, 179);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut board = board();

        board.handle_key(KeyEvent {
            code: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });

        assert_eq!(board.row("LowH").unwrap().value, 0);
    }

    #[test]
    fn keys_on_empty_board_do_nothing() {
        let mut board = SliderBoard::new("Empty");

        board.handle_key(press(KeyCode::Right));
        board.handle_key(press(KeyCode::Down));

        assert_eq!(board.selected, 0);
    }

    #[test]
    fn set_clamps_and_reports_unknown_rows() {
        let mut board = board();

        assert!(board.set("LowS", 300));
        assert_eq!(board.row("LowS").unwrap().value, 255);
        assert!(!board.set("Nope", 1));
    }

    #[test]
    fn ratio_of_zero_width_slider() {
        let mut board = SliderBoard::new("t");
        board.add("flat", 0, 0);

        assert_eq!(board.row("flat").unwrap().ratio(), 0.0);
        assert_eq!(board.row("flat").unwrap().value, 0);
    }
}

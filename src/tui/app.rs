use ratatui::widgets::ListState;

/// View state: the article list, or one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Viewing(usize),
}

pub const PAGE_SIZE: usize = 10;

/// Navigation state machine.
///
/// Owns the cursor, the current mode, and the article-view scroll offset;
/// mutated only by user actions and refresh.
pub struct TuiApp {
    pub mode: Mode,
    pub cursor: usize,
    pub scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub is_refreshing: bool,
    pub list_state: ListState,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            mode: Mode::List,
            cursor: 0,
            scroll: 0,
            should_quit: false,
            status_message: None,
            is_refreshing: false,
            list_state,
        }
    }

    pub fn move_up(&mut self, rows: usize) {
        match self.mode {
            Mode::List => {
                if self.cursor > 0 {
                    self.set_cursor(self.cursor - 1, rows);
                }
            }
            Mode::Viewing(_) => self.scroll = self.scroll.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self, rows: usize) {
        match self.mode {
            Mode::List => {
                if rows > 0 && self.cursor < rows - 1 {
                    self.set_cursor(self.cursor + 1, rows);
                }
            }
            Mode::Viewing(_) => self.scroll = self.scroll.saturating_add(1),
        }
    }

    pub fn page_up(&mut self, rows: usize) {
        match self.mode {
            Mode::List => self.set_cursor(self.cursor.saturating_sub(PAGE_SIZE), rows),
            Mode::Viewing(_) => self.scroll = self.scroll.saturating_sub(PAGE_SIZE as u16),
        }
    }

    pub fn page_down(&mut self, rows: usize) {
        match self.mode {
            Mode::List => {
                let max_index = rows.saturating_sub(1);
                self.set_cursor((self.cursor + PAGE_SIZE).min(max_index), rows);
            }
            Mode::Viewing(_) => self.scroll = self.scroll.saturating_add(PAGE_SIZE as u16),
        }
    }

    /// Digit shortcut: move the cursor to a 1-based row. Out-of-range rows
    /// are ignored, not fatal.
    pub fn jump_to_row(&mut self, row: usize, rows: usize) {
        if self.mode != Mode::List {
            return;
        }
        if row >= 1 && row <= rows {
            self.set_cursor(row - 1, rows);
        }
    }

    pub fn view(&mut self, index: usize) {
        self.mode = Mode::Viewing(index);
        self.scroll = 0;
    }

    pub fn back(&mut self) {
        self.mode = Mode::List;
        self.scroll = 0;
    }

    /// Keep the cursor inside a freshly reset list.
    pub fn clamp_cursor(&mut self, rows: usize) {
        let clamped = self.cursor.min(rows.saturating_sub(1));
        self.set_cursor(clamped, rows);
    }

    fn set_cursor(&mut self, cursor: usize, rows: usize) {
        self.cursor = cursor;
        if rows > 0 {
            self.list_state.select(Some(self.cursor));
        } else {
            self.list_state.select(None);
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_list() {
        let app = TuiApp::new();
        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_cursor_clamps_at_ends() {
        let mut app = TuiApp::new();
        app.move_up(5);
        assert_eq!(app.cursor, 0);

        for _ in 0..10 {
            app.move_down(5);
        }
        assert_eq!(app.cursor, 4);
    }

    #[test]
    fn test_jump_to_row_in_range() {
        let mut app = TuiApp::new();
        app.jump_to_row(3, 10);
        assert_eq!(app.cursor, 2);

        app.jump_to_row(10, 10);
        assert_eq!(app.cursor, 9);
    }

    #[test]
    fn test_jump_to_row_out_of_range_is_ignored() {
        let mut app = TuiApp::new();
        app.jump_to_row(3, 10);
        app.jump_to_row(11, 10);
        assert_eq!(app.cursor, 2);

        app.jump_to_row(1, 0);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_jump_ignored_while_viewing() {
        let mut app = TuiApp::new();
        app.view(0);
        app.jump_to_row(3, 10);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_view_and_back() {
        let mut app = TuiApp::new();
        app.view(4);
        assert_eq!(app.mode, Mode::Viewing(4));

        app.move_down(10);
        assert_eq!(app.scroll, 1);

        app.back();
        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_paging() {
        let mut app = TuiApp::new();
        app.page_down(25);
        assert_eq!(app.cursor, PAGE_SIZE);
        app.page_down(25);
        assert_eq!(app.cursor, 20);
        app.page_down(25);
        assert_eq!(app.cursor, 24);
        app.page_up(25);
        assert_eq!(app.cursor, 14);
    }

    #[test]
    fn test_clamp_cursor_after_reset() {
        let mut app = TuiApp::new();
        app.jump_to_row(9, 10);
        app.clamp_cursor(3);
        assert_eq!(app.cursor, 2);
    }
}

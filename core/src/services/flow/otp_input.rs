//! Six-cell one-time-code input model
//!
//! Models the code entry widget as an ordered sequence of single-digit
//! cells with a focus cursor. Entering a digit auto-advances, backspace
//! on an empty cell retreats and deletes, and the arrow keys move focus
//! without mutating content.

/// Number of cells
pub const CELL_COUNT: usize = 6;

/// State of the code entry widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpInput {
    cells: [Option<u8>; CELL_COUNT],
    focus: usize,
}

impl Default for OtpInput {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpInput {
    /// Empty input focused on the first cell
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            focus: 0,
        }
    }

    /// Currently focused cell index
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Enter a digit at the focused cell; focus auto-advances unless
    /// already on the last cell. Values above 9 are ignored.
    pub fn enter_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        self.cells[self.focus] = Some(digit);
        if self.focus < CELL_COUNT - 1 {
            self.focus += 1;
        }
    }

    /// Backspace: a filled cell clears in place; an empty cell retreats
    /// focus and clears the previous cell.
    pub fn backspace(&mut self) {
        if self.cells[self.focus].is_some() {
            self.cells[self.focus] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
            self.cells[self.focus] = None;
        }
    }

    /// Move focus left without mutating content
    pub fn move_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    /// Move focus right without mutating content
    pub fn move_right(&mut self) {
        if self.focus < CELL_COUNT - 1 {
            self.focus += 1;
        }
    }

    /// Whether every cell holds a digit
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The entered code as a digit string, in cell order, skipping
    /// empty cells; submit paths should gate on [`is_complete`]
    ///
    /// [`is_complete`]: OtpInput::is_complete
    pub fn value(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|d| char::from(b'0' + d))
            .collect()
    }

    /// Clear every cell and return focus to the first
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Browsing position over the live window.
///
/// Holds a relative position in `[0, len]` where `len` is the blank line
/// after the newest entry. The cursor does not own the store, so every move
/// takes the current length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self, len: usize) -> bool {
        self.position >= len
    }

    pub fn move_to_first(&mut self, len: usize) -> bool {
        if len > 0 && self.position != 0 {
            self.position = 0;
            return true;
        }
        false
    }

    pub fn move_to_last(&mut self, len: usize) -> bool {
        match len.checked_sub(1) {
            Some(last) if last != self.position => {
                self.position = last;
                true
            }
            _ => false,
        }
    }

    pub fn move_to_end(&mut self, len: usize) {
        self.position = len;
    }

    pub fn previous(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        if self.position >= len {
            return false;
        }
        self.position += 1;
        true
    }

    /// Jump to a relative position; fails unless it names a live entry
    pub fn move_to_position(&mut self, position: usize, len: usize) -> bool {
        if position < len {
            self.position = position;
            return true;
        }
        false
    }

    /// Pull the cursor back inside `[0, len]`
    pub fn clamp(&mut self, len: usize) {
        self.position = self.position.min(len);
    }
}

//! Search field state.
//!
//! The field only captures text. Deciding whether the text is usable is the
//! fetcher's job, so an empty submission is still a submission.

/// A key press delivered to the focused search field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
}

/// Request to look up the city currently in the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    text: String,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Apply a key press. Enter submits the current value; other keys edit it.
    pub fn handle_key(&mut self, key: Key) -> Option<Submit> {
        match key {
            Key::Char(c) => {
                self.text.push(c);
                None
            }
            Key::Backspace => {
                self.text.pop();
                None
            }
            Key::Enter => Some(self.activate_search()),
        }
    }

    /// The search icon was activated.
    pub fn activate_search(&self) -> Submit {
        Submit {
            city: self.text.clone(),
        }
    }
}

use alloc::string::String;

use crate::{Key, KeyInput};

/// Default time after the last accepted key before the search buffer is cleared.
pub const DEFAULT_TYPEAHEAD_DELAY_MS: u64 = 300;

/// Whether `input` takes part in typeahead search.
///
/// Letters, digits and `,` `-` `.` are accepted; anything typed with ctrl/alt/meta held is not.
pub fn is_typeahead_key(input: &KeyInput) -> bool {
    if input.is_combo() {
        return false;
    }
    match input.key {
        Key::Char(c) => c.is_alphanumeric() || matches!(c, ',' | '-' | '.'),
        _ => false,
    }
}

/// A search buffer that decays after a period without input.
///
/// Time is supplied by the host (`now_ms`), so the buffer works the same under a real clock,
/// a frame clock, or a test.
#[derive(Clone, Debug)]
pub struct Typeahead {
    buffer: String,
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl Typeahead {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            buffer: String::new(),
            delay_ms,
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Feeds a key. Returns the updated buffer when the key was accepted.
    ///
    /// An accepted key restarts the decay; if the previous decay already elapsed the buffer
    /// starts over.
    pub fn push(&mut self, input: &KeyInput, now_ms: u64) -> Option<&str> {
        if !is_typeahead_key(input) {
            return None;
        }
        let Key::Char(c) = input.key else {
            return None;
        };
        self.tick(now_ms);
        self.buffer.extend(c.to_lowercase());
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
        ltrace!(buffer = %self.buffer, now_ms, "Typeahead::push");
        Some(&self.buffer)
    }

    /// Clears the buffer once the decay deadline has passed.
    pub fn tick(&mut self, now_ms: u64) {
        let Some(deadline) = self.deadline_ms else {
            return;
        };
        if now_ms >= deadline {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deadline_ms = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline_ms.is_some()
    }
}

impl Default for Typeahead {
    fn default() -> Self {
        Self::new(DEFAULT_TYPEAHEAD_DELAY_MS)
    }
}

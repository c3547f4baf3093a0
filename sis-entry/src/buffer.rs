//! Transient per-field edit state
//!
//! A [`FieldBuffer`] mirrors one form widget: current text plus caret offset.
//! When normalization rewrites an edit, the surface writes the rewritten text
//! back into the widget, which fires one more change notification. The buffer
//! arms a suppress-once flag so that echo is consumed instead of being
//! normalized again - a rewrite is a terminal action, not a new user edit.

use crate::normalize::{normalize, FieldId};

/// Result of feeding one change notification through a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit was accepted as-is; the widget already shows it
    Unchanged,
    /// The surface must write this text and caret back into the widget
    Rewritten { text: String, cursor: usize },
}

/// Editable text + caret state for one form field
#[derive(Debug, Clone)]
pub struct FieldBuffer {
    field: FieldId,
    text: String,
    cursor: usize,
    suppress_next: bool,
}

impl FieldBuffer {
    pub fn new(field: FieldId) -> Self {
        FieldBuffer {
            field,
            text: String::new(),
            cursor: 0,
            suppress_next: false,
        }
    }

    pub fn field(&self) -> FieldId {
        self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle one change notification from the surface
    ///
    /// Every keystroke routes through here. The echo notification produced by
    /// applying a returned rewrite must also be routed here; the armed flag
    /// swallows exactly that one call.
    pub fn on_text_changed(&mut self, text: &str, cursor: usize) -> EditOutcome {
        if self.suppress_next {
            // Echo of our own rewrite; the buffer already holds the result
            self.suppress_next = false;
            return EditOutcome::Unchanged;
        }

        let (rewritten, new_cursor) = normalize(self.field, &self.text, text, cursor);
        if rewritten == text {
            self.text = rewritten;
            self.cursor = new_cursor;
            EditOutcome::Unchanged
        } else {
            self.text = rewritten.clone();
            self.cursor = new_cursor;
            self.suppress_next = true;
            EditOutcome::Rewritten {
                text: rewritten,
                cursor: new_cursor,
            }
        }
    }

    /// Insert a character at the caret, as the Ñ/ñ buttons do
    ///
    /// The insertion runs through the field's normal rules; returns the text
    /// and caret the widget should show afterwards.
    pub fn insert_char(&mut self, ch: char) -> (String, usize) {
        let mut text: String = self.text.chars().take(self.cursor).collect();
        text.push(ch);
        text.extend(self.text.chars().skip(self.cursor));
        let cursor = self.cursor + 1;
        self.on_text_changed(&text, cursor);
        (self.text.clone(), self.cursor)
    }

    /// Clear text, caret, and any armed suppression
    pub fn reset(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.suppress_next = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_edit_updates_state() {
        let mut buf = FieldBuffer::new(FieldId::Barangay);
        let outcome = buf.on_text_changed("Sta. Lucia", 10);
        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(buf.text(), "Sta. Lucia");
        assert_eq!(buf.cursor(), 10);
    }

    #[test]
    fn test_rewrite_then_echo_is_suppressed() {
        let mut buf = FieldBuffer::new(FieldId::GivenName);
        let outcome = buf.on_text_changed("john", 4);
        let EditOutcome::Rewritten { text, cursor } = outcome else {
            panic!("expected a rewrite");
        };
        assert_eq!(text, "John");
        assert_eq!(cursor, 4);

        // The surface applies the rewrite; the widget echoes it back
        let echo = buf.on_text_changed(&text, cursor);
        assert_eq!(echo, EditOutcome::Unchanged);
        assert_eq!(buf.text(), "John");

        // Suppression is consumed: the next real edit normalizes again
        let outcome = buf.on_text_changed("John s", 6);
        assert_eq!(
            outcome,
            EditOutcome::Rewritten {
                text: "John S".to_string(),
                cursor: 6
            }
        );
    }

    #[test]
    fn test_rejected_contact_digit_reverts() {
        let mut buf = FieldBuffer::new(FieldId::EmergencyContact);
        buf.on_text_changed("0917", 4);
        let outcome = buf.on_text_changed("0917a", 5);
        assert_eq!(
            outcome,
            EditOutcome::Rewritten {
                text: "0917".to_string(),
                cursor: 4
            }
        );
        // Echo of the revert
        assert_eq!(buf.on_text_changed("0917", 4), EditOutcome::Unchanged);
        assert_eq!(buf.text(), "0917");
    }

    #[test]
    fn test_insert_char_at_cursor() {
        let mut buf = FieldBuffer::new(FieldId::Surname);
        buf.on_text_changed("PEAFLOR", 2);
        let (text, cursor) = buf.insert_char('Ñ');
        assert_eq!(text, "PEÑAFLOR");
        assert_eq!(cursor, 3);
    }

    #[test]
    fn test_insert_char_normalizes() {
        let mut buf = FieldBuffer::new(FieldId::Surname);
        buf.on_text_changed("PEAFLOR", 2);
        let (text, _) = buf.insert_char('ñ');
        assert_eq!(text, "PEÑAFLOR");
    }

    #[test]
    fn test_reset_clears_suppression() {
        let mut buf = FieldBuffer::new(FieldId::GivenName);
        buf.on_text_changed("john", 4);
        buf.reset();
        assert_eq!(buf.text(), "");
        // A fresh edit after reset must not be swallowed
        let outcome = buf.on_text_changed("anna", 4);
        assert!(matches!(outcome, EditOutcome::Rewritten { .. }));
    }
}

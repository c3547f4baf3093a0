//! Per-field text normalization
//!
//! Pure rewrite rules applied on every edit. `normalize` is idempotent:
//! feeding its own output back through it changes nothing further. It never
//! fails; fields without a rule pass through unchanged.
//!
//! Cursor offsets are in characters, not bytes.

/// Editable form fields across both record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldId {
    Surname,
    GivenName,
    MiddleInitial,
    Extension,
    Barangay,
    Town,
    Province,
    RecordId,
    Department,
    Position,
    EmergencyName,
    EmergencyRelation,
    EmergencyContact,
}

/// Maximum digits in an emergency contact number
pub const CONTACT_NUMBER_LEN: usize = 11;

/// Apply the field's rewrite rule to an edited value
///
/// `previous` is the field content before the edit, `text` the content after
/// it, `cursor` the caret offset within `text`. Returns the content the field
/// should hold and the caret offset within it. For most edits this is `text`
/// and `cursor` unchanged.
pub fn normalize(field: FieldId, previous: &str, text: &str, cursor: usize) -> (String, usize) {
    match field {
        FieldId::Surname => {
            let rewritten: String = text.chars().flat_map(char::to_uppercase).collect();
            let len = rewritten.chars().count();
            (rewritten, cursor.min(len))
        }
        FieldId::GivenName => {
            // Joining on the original separators preserves a trailing space,
            // so typing continues into a new capitalized word.
            let rewritten = text
                .split(' ')
                .map(capitalize_word)
                .collect::<Vec<_>>()
                .join(" ");
            let len = rewritten.chars().count();
            (rewritten, cursor.min(len))
        }
        FieldId::MiddleInitial => {
            // One initial plus a trailing period; later characters are
            // discarded rather than appended. Multi-char uppercase
            // expansions (ß -> SS) keep only their first char so the
            // result stays at two characters.
            let Some(initial) = text.chars().next().and_then(|c| c.to_uppercase().next()) else {
                return (String::new(), 0);
            };
            (format!("{}.", initial), 2)
        }
        FieldId::EmergencyContact => {
            let len = text.chars().count();
            if len <= CONTACT_NUMBER_LEN && text.chars().all(|c| c.is_ascii_digit()) {
                (text.to_string(), cursor.min(len))
            } else {
                // Reject the keystroke outright: revert to the previous
                // content and pull the caret back past the rejected input.
                let prev_len = previous.chars().count();
                let reverted_cursor = cursor
                    .saturating_sub(len.saturating_sub(prev_len))
                    .min(prev_len);
                (previous.to_string(), reverted_cursor)
            }
        }
        _ => {
            let len = text.chars().count();
            (text.to_string(), cursor.min(len))
        }
    }
}

/// First character title-cased, remainder lowercased
///
/// When the first character's uppercase expands to several chars (ß -> SS),
/// only the leading char stays capital, so re-applying this is a fixpoint:
/// "ß" -> "Ss" -> "Ss".
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let head = upper.next().unwrap_or(first);
    std::iter::once(head)
        .chain(upper.flat_map(char::to_lowercase))
        .chain(chars.flat_map(char::to_lowercase))
        .collect()
}

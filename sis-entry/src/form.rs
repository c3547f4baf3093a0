//! FormSession - surface entry points for one open registration form
//!
//! One session per open form. It owns a FieldBuffer per editable field of its
//! kind plus the Year/Program combo selections, assembles the submission
//! snapshot, and clears everything after a successful submit. Both record
//! kinds share this one implementation; the field set is the only per-kind
//! difference.

use crate::buffer::{EditOutcome, FieldBuffer};
use crate::normalize::FieldId;
use crate::submit::{submit, SubmitError};
use sis_common::model::{CommonFields, KindDetail, PersonRecord, Program, RecordKind, Year};
use sis_common::Store;

/// Editable fields of an enrollee form, in display order
const ENROLLEE_FIELDS: &[FieldId] = &[
    FieldId::Surname,
    FieldId::GivenName,
    FieldId::MiddleInitial,
    FieldId::Extension,
    FieldId::Barangay,
    FieldId::Town,
    FieldId::Province,
    FieldId::RecordId,
    FieldId::EmergencyName,
    FieldId::EmergencyRelation,
    FieldId::EmergencyContact,
];

/// Editable fields of a staff form, in display order
const STAFF_FIELDS: &[FieldId] = &[
    FieldId::Surname,
    FieldId::GivenName,
    FieldId::MiddleInitial,
    FieldId::Extension,
    FieldId::Barangay,
    FieldId::Town,
    FieldId::Province,
    FieldId::RecordId,
    FieldId::Department,
    FieldId::Position,
    FieldId::EmergencyName,
    FieldId::EmergencyRelation,
    FieldId::EmergencyContact,
];

/// State of one open registration form
#[derive(Debug)]
pub struct FormSession {
    kind: RecordKind,
    buffers: Vec<FieldBuffer>,
    year: Year,
    program: Program,
    enye_uppercase: bool,
}

impl FormSession {
    /// Open a form of the given kind with empty fields and default selections
    pub fn new(kind: RecordKind) -> Self {
        let fields = match kind {
            RecordKind::Enrollee => ENROLLEE_FIELDS,
            RecordKind::Staff => STAFF_FIELDS,
        };
        FormSession {
            kind,
            buffers: fields.iter().map(|f| FieldBuffer::new(*f)).collect(),
            year: Year::First,
            program: Program::Accountancy,
            enye_uppercase: true,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Fields this form edits, in display order
    pub fn fields(&self) -> Vec<FieldId> {
        self.buffers.iter().map(|b| b.field()).collect()
    }

    /// Current text of a field; empty for fields this kind does not have
    pub fn field_text(&self, field: FieldId) -> &str {
        self.buffer(field).map(|b| b.text()).unwrap_or("")
    }

    /// Route one change notification from the surface into the field's buffer
    ///
    /// Returns the rewrite the surface must apply back to the widget, if any.
    /// Edits to fields this kind does not have pass through unchanged.
    pub fn on_field_edited(&mut self, field: FieldId, text: &str, cursor: usize) -> EditOutcome {
        match self.buffer_mut(field) {
            Some(buffer) => buffer.on_text_changed(text, cursor),
            None => EditOutcome::Unchanged,
        }
    }

    /// Insert Ñ or ñ at the caret of the focused field, alternating case
    /// across presses
    pub fn insert_enye(&mut self, field: FieldId) -> Option<(String, usize)> {
        let ch = if self.enye_uppercase { 'Ñ' } else { 'ñ' };
        self.enye_uppercase = !self.enye_uppercase;
        self.buffer_mut(field).map(|b| b.insert_char(ch))
    }

    /// Insert a specific character at the caret of the focused field
    pub fn insert_char(&mut self, field: FieldId, ch: char) -> Option<(String, usize)> {
        self.buffer_mut(field).map(|b| b.insert_char(ch))
    }

    /// Year combo selection (enrollee forms)
    pub fn set_year(&mut self, year: Year) {
        self.year = year;
    }

    /// Program combo selection (enrollee forms)
    pub fn set_program(&mut self, program: Program) {
        self.program = program;
    }

    /// Assemble the submission snapshot from current field state
    pub fn snapshot(&self) -> PersonRecord {
        let common = CommonFields {
            surname: self.field_text(FieldId::Surname).to_string(),
            given_name: self.field_text(FieldId::GivenName).to_string(),
            middle_initial: self.field_text(FieldId::MiddleInitial).to_string(),
            extension: self.field_text(FieldId::Extension).to_string(),
            barangay: self.field_text(FieldId::Barangay).to_string(),
            town: self.field_text(FieldId::Town).to_string(),
            province: self.field_text(FieldId::Province).to_string(),
            emergency_name: self.field_text(FieldId::EmergencyName).to_string(),
            emergency_relation: self.field_text(FieldId::EmergencyRelation).to_string(),
            emergency_contact: self.field_text(FieldId::EmergencyContact).to_string(),
        };
        let detail = match self.kind {
            RecordKind::Enrollee => KindDetail::Enrollee {
                year: self.year,
                program: self.program,
            },
            RecordKind::Staff => KindDetail::Staff {
                department: self.field_text(FieldId::Department).to_string(),
                position: self.field_text(FieldId::Position).to_string(),
            },
        };
        PersonRecord {
            record_id: self.field_text(FieldId::RecordId).to_string(),
            common,
            detail,
        }
    }

    /// Submit the current snapshot; on success the form is cleared
    pub async fn on_submit(&mut self, store: &Store) -> Result<(), SubmitError> {
        let record = self.snapshot();
        submit(store, &record).await?;
        self.reset();
        Ok(())
    }

    /// Clear every field and restore default combo selections
    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.reset();
        }
        self.year = Year::First;
        self.program = Program::Accountancy;
    }

    fn buffer(&self, field: FieldId) -> Option<&FieldBuffer> {
        self.buffers.iter().find(|b| b.field() == field)
    }

    fn buffer_mut(&mut self, field: FieldId) -> Option<&mut FieldBuffer> {
        self.buffers.iter_mut().find(|b| b.field() == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(session: &mut FormSession, field: FieldId, text: &str) {
        let outcome = session.on_field_edited(field, text, text.chars().count());
        if let EditOutcome::Rewritten { text, cursor } = outcome {
            // Echo of the applied rewrite, as the widget would produce
            session.on_field_edited(field, &text, cursor);
        }
    }

    #[test]
    fn test_snapshot_reflects_normalized_fields() {
        let mut session = FormSession::new(RecordKind::Enrollee);
        type_text(&mut session, FieldId::Surname, "dela cruz");
        type_text(&mut session, FieldId::GivenName, "juan miguel");
        type_text(&mut session, FieldId::MiddleInitial, "m");
        session.set_year(Year::Second);
        session.set_program(Program::ComputerScience);

        let record = session.snapshot();
        assert_eq!(record.common.surname, "DELA CRUZ");
        assert_eq!(record.common.given_name, "Juan Miguel");
        assert_eq!(record.common.middle_initial, "M.");
        assert!(matches!(
            record.detail,
            KindDetail::Enrollee {
                year: Year::Second,
                program: Program::ComputerScience
            }
        ));
    }

    #[test]
    fn test_staff_form_has_department_and_position() {
        let mut session = FormSession::new(RecordKind::Staff);
        assert!(session.fields().contains(&FieldId::Department));
        type_text(&mut session, FieldId::Department, "Registrar");
        type_text(&mut session, FieldId::Position, "Clerk");

        let record = session.snapshot();
        let KindDetail::Staff {
            department,
            position,
        } = record.detail
        else {
            panic!("expected staff detail");
        };
        assert_eq!(department, "Registrar");
        assert_eq!(position, "Clerk");
    }

    #[test]
    fn test_enrollee_form_ignores_staff_fields() {
        let mut session = FormSession::new(RecordKind::Enrollee);
        let outcome = session.on_field_edited(FieldId::Department, "Registrar", 9);
        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(session.field_text(FieldId::Department), "");
    }

    #[test]
    fn test_enye_alternates_case() {
        let mut session = FormSession::new(RecordKind::Enrollee);
        let (text, _) = session.insert_enye(FieldId::Barangay).unwrap();
        assert_eq!(text, "Ñ");
        session.on_field_edited(FieldId::Barangay, "", 0);
        let (text, _) = session.insert_enye(FieldId::Barangay).unwrap();
        assert_eq!(text, "ñ");
    }

    #[test]
    fn test_reset_clears_fields_and_selections() {
        let mut session = FormSession::new(RecordKind::Enrollee);
        type_text(&mut session, FieldId::Surname, "cruz");
        session.set_year(Year::Fourth);
        session.reset();
        assert_eq!(session.field_text(FieldId::Surname), "");
        let record = session.snapshot();
        assert!(matches!(
            record.detail,
            KindDetail::Enrollee {
                year: Year::First,
                ..
            }
        ));
    }
}

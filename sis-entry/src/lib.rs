//! sis-entry - Registration form core
//!
//! Everything behind the data-entry surface except the widgets themselves:
//! - Per-field text normalization applied on every keystroke
//! - FieldBuffer state with rewrite-echo suppression
//! - FormSession entry points for the presentation surface
//! - SubmissionController: validate, dedup, persist

pub mod buffer;
pub mod form;
pub mod normalize;
pub mod submit;

pub use buffer::{EditOutcome, FieldBuffer};
pub use form::FormSession;
pub use normalize::FieldId;
pub use submit::{submit, SubmitError};

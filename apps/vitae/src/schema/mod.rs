// Schema layer: data model, declarative field rules, and the validator.
// Validation happens here and only here — the store performs none by design.

pub mod record;
pub mod rules;
pub mod validate;

pub use record::{RawResume, ResumeRecord, SkillLevel};
pub use validate::{validate, FieldErrors};

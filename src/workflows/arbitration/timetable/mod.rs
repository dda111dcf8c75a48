//! Procedural timetable: milestones with deadlines, compliance tracking,
//! extension-of-time requests, and spreadsheet import.

pub mod domain;
pub mod extensions;
pub mod import;

pub use domain::{
    ComplianceStatus, ExtensionDecision, ExtensionRequest, ExtensionStatus, TimetableEvent,
};
pub use extensions::TimetableError;
pub use import::{TimetableImportError, TimetableImporter};

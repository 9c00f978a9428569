//! Profile module - the per-role profile documents.
//!
//! A user keeps one profile per role: a [`StudentProfile`] in the
//! `studentProfiles` collection and/or a [`TutorProfile`] in
//! `tutorProfiles`, both keyed by user id.
//!
//! # Domain Invariants
//!
//! 1. At most one profile document per user id per role collection
//! 2. A missing document is a valid state and reads as the empty profile
//! 3. Profiles are written whole; there is no partial merge
//! 4. A tutor's availability always has exactly seven days, Monday first

mod document;
mod preferences;
mod role;
mod student;
mod tutor;

pub use document::{DocumentFields, SchemaError};
pub use preferences::{Language, Preferences, Theme};
pub use role::{Role, RoleProfile};
pub use student::{StudentProfile, COURSE_OPTIONS, FACULTY_OPTIONS, YEAR_OPTIONS};
pub use tutor::{DayAvailability, TutorProfile, WeeklyAvailability, NOT_AVAILABLE};

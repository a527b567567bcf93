//! Programme domain models.
//!
//! Two parallel output shapes share the same ingestion pipeline:
//!
//! | Timetable | Booklet | Join key |
//! |-----------|---------|----------|
//! | [`Session`] | [`Section`] | session/section number |
//! | [`Presentation`] | [`Abstract`] | presentation code |
//!
//! Group→member relationships are exclusive containment: a presentation
//! belongs to exactly one session, an abstract to exactly one section,
//! established by a single `add_*` call during assembly.

mod booklet;
mod person;
mod planning;
mod thesis;

pub use booklet::{Abstract, Section};
pub use person::{Advisor, AdvisorRole, Student};
pub use planning::{Event, PlanningEntry, Presentation, Session};
pub use thesis::Thesis;

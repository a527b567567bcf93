//! Timetable models: presentations, sessions, plain events.
//!
//! A presentation is the passage of one thesis in front of the audience.
//! A session is a group of presentations between two breaks, chaired by one
//! person. The planning also carries plain events (breaks, speeches) that
//! never receive presentations; both kinds sort chronologically in the
//! timetable view.
//!
//! # Lifecycle
//!
//! A [`Presentation`] is created from a roster row without any timing, then
//! enriched in place by the timing applier (day, session number, order,
//! duration), and finally time-stamped by the session assembler. Start and
//! stop stay `None` until computed, so re-running the pipeline on identical
//! inputs yields identical output.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Thesis;

/// The passage of one thesis, keyed by a unique code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Unique code, the cross-table join key.
    pub code: String,
    /// Presented thesis.
    pub thesis: Option<Thesis>,
    /// Duration in minutes. `None` until timing is applied.
    pub duration_min: Option<i64>,
    /// Computed start. `None` until the session is assembled.
    pub start: Option<NaiveDateTime>,
    /// Computed stop. `None` until the session is assembled.
    pub stop: Option<NaiveDateTime>,
    /// Day number from the repartition table. 0 = unscheduled.
    pub day: u32,
    /// Session this presentation belongs to. 0 = unscheduled.
    pub session: u32,
    /// Sequencing key within the session.
    pub order: u32,
}

impl Presentation {
    /// Creates an un-scheduled presentation with the given code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            thesis: None,
            duration_min: None,
            start: None,
            stop: None,
            day: 0,
            session: 0,
            order: 0,
        }
    }

    /// Attaches the presented thesis.
    pub fn set_thesis(&mut self, thesis: Thesis) {
        debug!(code = %self.code, thesis = %thesis.title, "attach thesis");
        self.thesis = Some(thesis);
    }

    /// Duration as a time span, when timing has been applied.
    pub fn duration(&self) -> Option<Duration> {
        self.duration_min.map(Duration::minutes)
    }

    /// Whether timing has assigned this presentation to a session.
    pub fn is_scheduled(&self) -> bool {
        self.session != 0
    }
}

/// A chaired group of presentations between two breaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session number, the join key for the repartition table.
    pub number: u32,
    /// Banner color, passed through to the renderer as-is.
    pub color: String,
    /// Chairing presenter.
    pub chairman: String,
    /// Day of the session.
    pub day: NaiveDate,
    /// Nominal start, from the session definition.
    pub start: NaiveDateTime,
    /// Configured closing time, when one exists. The assembler fails the
    /// run if the computed stop exceeds it.
    pub closing: Option<NaiveDateTime>,
    /// Fixed padding in minutes added after the last presentation.
    pub extra_min: Option<i64>,
    /// Computed stop: last attached presentation's stop plus padding.
    /// `None` until assembled.
    pub stop: Option<NaiveDateTime>,
    /// Attached presentations, in passage order.
    pub presentations: Vec<Presentation>,
}

impl Session {
    /// Creates an empty session.
    pub fn new(number: u32, day: NaiveDate, start: NaiveDateTime) -> Self {
        Self {
            number,
            color: String::new(),
            chairman: String::new(),
            day,
            start,
            closing: None,
            extra_min: None,
            stop: None,
            presentations: Vec::new(),
        }
    }

    /// Sets the banner color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the chairman.
    pub fn with_chairman(mut self, chairman: impl Into<String>) -> Self {
        self.chairman = chairman.into();
        self
    }

    /// Sets the configured closing time.
    pub fn with_closing(mut self, closing: NaiveDateTime) -> Self {
        self.closing = Some(closing);
        self
    }

    /// Sets the extra padding.
    pub fn with_extra_min(mut self, extra_min: i64) -> Self {
        self.extra_min = Some(extra_min);
        self
    }

    /// Appends a presentation. The append order is the canonical passage
    /// order for rendering; the assembler sorts before attaching.
    pub fn add_presentation(&mut self, presentation: Presentation) {
        debug!(code = %presentation.code, session = self.number, "attach presentation");
        self.presentations.push(presentation);
    }

    /// Number of attached presentations.
    pub fn presentation_count(&self) -> usize {
        self.presentations.len()
    }
}

/// A plain planning entry: break, speech, anything that is not a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Display name (capitalized row type).
    pub name: String,
    /// Entry number; 0 when the planning row leaves it blank.
    pub number: u32,
    /// Banner color, passed through as-is.
    pub color: String,
    /// Speaker or organizer, may be empty.
    pub chairman: String,
    /// Day of the event.
    pub day: NaiveDate,
    /// Start of the event.
    pub start: NaiveDateTime,
    /// End of the event.
    pub stop: NaiveDateTime,
}

/// One entry of the timetable, chronological view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlanningEntry {
    /// A session carrying presentations.
    Session(Session),
    /// A plain event.
    Event(Event),
}

impl PlanningEntry {
    /// Start timestamp, the chronological sort key.
    pub fn start(&self) -> NaiveDateTime {
        match self {
            PlanningEntry::Session(s) => s.start,
            PlanningEntry::Event(e) => e.start,
        }
    }

    /// The session inside this entry, if it is one.
    pub fn as_session(&self) -> Option<&Session> {
        match self {
            PlanningEntry::Session(s) => Some(s),
            PlanningEntry::Event(_) => None,
        }
    }
}

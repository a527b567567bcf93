//! Timing application: merging the repartition table into built records.
//!
//! The repartition table carries one row per presentation: code, day,
//! session number, passage order and length in minutes. Each row is
//! resolved against the roster by code and its fields written onto the
//! matching record in place.
//!
//! Two row defects are recoverable and merely skip the row: a code that
//! matches no presentation (orphan — the student may have cancelled after
//! the repartition was drawn up) and a row with no day (not yet placed).
//! Both are logged and accumulated in the [`TimingReport`]; the
//! presentation concerned simply keeps its un-scheduled defaults and never
//! appears in any assembled group. Unparsable numbers remain fatal.

use tracing::warn;

use crate::error::Result;
use crate::models::{Abstract, Presentation};
use crate::resolve::position_by_code;
use crate::row::{field, field_u32, parse_u32, Row};

const TABLE: &str = "repartition";

/// Outcome summary of a timing pass.
#[derive(Debug, Clone, Default)]
pub struct TimingReport {
    /// Rows successfully applied.
    pub applied: usize,
    /// Codes of rows matching no record.
    pub orphan_codes: Vec<String>,
    /// Codes of rows with an empty day.
    pub dayless_codes: Vec<String>,
}

impl TimingReport {
    /// Number of rows skipped for either reason.
    pub fn skipped(&self) -> usize {
        self.orphan_codes.len() + self.dayless_codes.len()
    }
}

/// Merges repartition rows into the presentation set.
///
/// Sets day, session number, order and duration on each resolved
/// presentation. Mutates in place; returns the accumulated report.
pub fn apply_repartitions(
    presentations: &mut [Presentation],
    rows: &[Row],
) -> Result<TimingReport> {
    let mut report = TimingReport::default();

    for row in rows {
        let code = field(row, TABLE, "code")?;

        let index = match position_by_code(presentations, code) {
            Some(index) => index,
            None => {
                warn!(code, "repartition row matches no presentation");
                report.orphan_codes.push(code.to_string());
                continue;
            }
        };

        let day = field(row, TABLE, "day")?;
        if day.is_empty() {
            warn!(code, "repartition row has no day");
            report.dayless_codes.push(code.to_string());
            continue;
        }

        let presentation = &mut presentations[index];
        presentation.day = parse_u32(day, TABLE, "day")?;
        presentation.session = field_u32(row, TABLE, "session")?;
        presentation.order = field_u32(row, TABLE, "order")?;
        presentation.duration_min = Some(i64::from(field_u32(row, TABLE, "length")?));
        report.applied += 1;
    }

    Ok(report)
}

/// Merges repartition rows into the abstract set.
///
/// The booklet reuses the timetable's repartition: the session number of a
/// presentation is the section number of its abstract. Only section and
/// order are taken; days and lengths do not apply to the booklet.
pub fn apply_section_repartitions(abstracts: &mut [Abstract], rows: &[Row]) -> Result<TimingReport> {
    let mut report = TimingReport::default();

    for row in rows {
        let code = field(row, TABLE, "code")?;

        let index = match position_by_code(abstracts, code) {
            Some(index) => index,
            None => {
                warn!(code, "repartition row matches no abstract");
                report.orphan_codes.push(code.to_string());
                continue;
            }
        };

        let abstract_ = &mut abstracts[index];
        abstract_.section = field_u32(row, TABLE, "session")?;
        abstract_.order = field_u32(row, TABLE, "order")?;
        report.applied += 1;
    }

    Ok(report)
}

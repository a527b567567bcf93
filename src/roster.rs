//! Roster ingestion: building theses and presentations from listing rows.
//!
//! One roster row describes one presentation: the student, the thesis, and
//! a numbered sequence of advisors. Advisor columns follow a fixed prefix
//! scheme — `s1-name`, `s1-title`, ... for supervisors, `d1-name`, ... for
//! directors — and are collected by a contiguous-prefix scan starting at
//! index 1 that stops at the first absent or empty name. A present name at
//! a later index behind a gap is unreachable by design.
//!
//! Rows whose attendance flag resolves to "does not come" are excluded
//! entirely from the returned set. Missing mandatory columns or an
//! unrecognized attendance token abort the run: every downstream join
//! depends on a complete roster.

use std::collections::HashSet;

use tracing::debug;

use crate::config::BuilderConfig;
use crate::error::{Error, Result};
use crate::models::{Advisor, AdvisorRole, Presentation, Student, Thesis};
use crate::row::{field, field_opt, Row};

const TABLE: &str = "roster";

/// One attending roster entry: the join code and its thesis aggregate.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    /// Presentation code.
    pub code: String,
    /// Fully built thesis (student and advisors attached).
    pub thesis: Thesis,
}

/// Builds the attending roster entries from listing rows.
///
/// Non-attending rows are dropped, not retained anywhere. Duplicate codes
/// among attending rows are rejected.
pub fn build_roster(rows: &[Row], config: &BuilderConfig) -> Result<Vec<RosterEntry>> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for row in rows {
        let code = field(row, TABLE, "code")?.to_string();
        let come = field(row, TABLE, "come")?;
        if !config.attendance(come)? {
            continue;
        }

        if !seen.insert(code.clone()) {
            return Err(Error::DuplicateCode(code));
        }

        let thesis = build_thesis(row, config)?;
        debug!(%code, thesis = %thesis.title, "roster entry built");
        entries.push(RosterEntry { code, thesis });
    }

    Ok(entries)
}

/// Builds presentations from listing rows.
///
/// Same ingestion as [`build_roster`], wrapped in un-scheduled
/// [`Presentation`] values ready for the timing applier.
pub fn build_presentations(rows: &[Row], config: &BuilderConfig) -> Result<Vec<Presentation>> {
    let entries = build_roster(rows, config)?;
    Ok(entries
        .into_iter()
        .map(|entry| {
            let mut presentation = Presentation::new(entry.code);
            presentation.set_thesis(entry.thesis);
            presentation
        })
        .collect())
}

/// Builds the thesis aggregate of one roster row.
fn build_thesis(row: &Row, config: &BuilderConfig) -> Result<Thesis> {
    let mut thesis =
        Thesis::new(field(row, TABLE, "title")?).with_funding(field(row, TABLE, "funding")?);

    thesis.set_student(build_student(row, config)?);

    for advisor in collect_advisors(row, config, AdvisorRole::Supervisor)? {
        thesis.add_supervisor(advisor)?;
    }
    for advisor in collect_advisors(row, config, AdvisorRole::Director)? {
        thesis.add_director(advisor)?;
    }

    Ok(thesis)
}

/// Builds the student of one roster row.
fn build_student(row: &Row, config: &BuilderConfig) -> Result<Student> {
    let first_name = field(row, TABLE, "first-name")?;
    let name = field(row, TABLE, "name")?;

    let mut student = Student::new(format!("{first_name} {name}"));
    student.grade = field(row, TABLE, "grade")?.to_string();
    student.department = field(row, TABLE, "department")?.trim().to_string();
    student.unit = field(row, TABLE, "unit")?.trim().to_string();
    student.location = config.expand_location(field(row, TABLE, "location")?);
    student.email = field(row, TABLE, "email")?.to_string();
    Ok(student)
}

/// Collects the numbered advisor sequence of one role.
///
/// Contiguous-prefix scan: compose `{prefix}{i}-name` from i = 1, stop at
/// the first absent or empty name, otherwise read the full field set of
/// that index. Department and unit columns exist for supervisors only.
fn collect_advisors(row: &Row, config: &BuilderConfig, role: AdvisorRole) -> Result<Vec<Advisor>> {
    let prefix = match role {
        AdvisorRole::Supervisor => 's',
        AdvisorRole::Director => 'd',
    };

    let mut advisors = Vec::new();
    for i in 1.. {
        let name = match field_opt(row, &format!("{prefix}{i}-name")) {
            Some(name) => name,
            None => break,
        };

        let title = field(row, TABLE, &format!("{prefix}{i}-title"))?;
        let mut advisor = Advisor::new(role, name)
            .with_title(config.abbreviate_title(title))
            .with_origin(field(row, TABLE, &format!("{prefix}{i}-origin"))?);

        if role == AdvisorRole::Supervisor {
            advisor = advisor
                .with_department(field(row, TABLE, &format!("{prefix}{i}-department"))?.trim())
                .with_unit(field(row, TABLE, &format!("{prefix}{i}-unit"))?.trim());
        }

        advisors.push(advisor);
    }

    Ok(advisors)
}

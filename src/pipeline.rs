//! Top-level orchestration: timetable and booklet assembly.
//!
//! Sequences ingestion (roster builder), timing application and group
//! assembly, then performs the top-level sorts. The two views sort
//! differently by design: a timetable is read chronologically, so planning
//! entries sort by start timestamp; a booklet is read by topic grouping,
//! so sections sort by their declared number.
//!
//! Everything is buffered in memory and validated before anything is
//! handed over: a session overrun detected on the last session must not
//! leave a half-written output tree behind, so no caller gets a partial
//! result. The returned structures are fully resolved — every join done,
//! every timestamp computed — and serialize to the plain nested mappings
//! the template renderer consumes.

use tracing::{info, warn};

use crate::assemble::assemble_sessions;
use crate::config::BuilderConfig;
use crate::error::Result;
use crate::models::{Abstract, Event, PlanningEntry, Presentation, Section, Session};
use crate::resolve::position_by_code;
use crate::roster::{build_presentations, build_roster};
use crate::row::{field, field_opt, field_u32, parse_date, parse_time_on, parse_u32, Row};
use crate::timing::{apply_repartitions, apply_section_repartitions, TimingReport};

const PLANNING: &str = "planning";
const BOOKLET: &str = "booklet";
const ABSTRACTS: &str = "abstracts";

/// Assembled timetable, chronological view.
#[derive(Debug, Clone)]
pub struct Planning {
    /// Sessions and plain events, sorted by start timestamp.
    pub entries: Vec<PlanningEntry>,
    /// Skips accumulated while applying the repartition table.
    pub report: TimingReport,
    /// Presentations left out of every session: never referenced by a
    /// repartition row, skipped rows, or session numbers matching no
    /// definition.
    pub unscheduled: Vec<Presentation>,
}

/// Assembled booklet, numbered-section view.
#[derive(Debug, Clone)]
pub struct Booklet {
    /// Sections sorted by number, each with its abstracts in order.
    pub sections: Vec<Section>,
    /// Skips accumulated while applying the repartition table.
    pub report: TimingReport,
    /// Abstracts left out of every section.
    pub unassigned: Vec<Abstract>,
}

/// Builds the full timetable from the three input tables.
///
/// Fatal conditions (malformed rows, unknown attendance flags, duplicate
/// codes, session overruns) abort before anything is returned.
pub fn build_planning(
    config: &BuilderConfig,
    planning_rows: &[Row],
    roster_rows: &[Row],
    repartition_rows: &[Row],
) -> Result<Planning> {
    let (mut sessions, events) = parse_planning_rows(planning_rows)?;

    let mut presentations = build_presentations(roster_rows, config)?;
    let report = apply_repartitions(&mut presentations, repartition_rows)?;
    let unscheduled = assemble_sessions(&mut sessions, presentations)?;

    if !unscheduled.is_empty() {
        warn!(
            count = unscheduled.len(),
            "presentations excluded from every session"
        );
    }

    let mut entries: Vec<PlanningEntry> = sessions
        .into_iter()
        .map(PlanningEntry::Session)
        .chain(events.into_iter().map(PlanningEntry::Event))
        .collect();
    entries.sort_by_key(PlanningEntry::start);

    info!(entries = entries.len(), "planning assembled");
    Ok(Planning {
        entries,
        report,
        unscheduled,
    })
}

/// Builds the booklet of short abstracts from the four input tables.
pub fn build_booklet(
    config: &BuilderConfig,
    section_rows: &[Row],
    abstract_rows: &[Row],
    roster_rows: &[Row],
    repartition_rows: &[Row],
) -> Result<Booklet> {
    let mut sections = parse_section_rows(section_rows)?;
    let mut abstracts = parse_abstract_rows(abstract_rows)?;

    attach_theses(&mut abstracts, roster_rows, config)?;
    let report = apply_section_repartitions(&mut abstracts, repartition_rows)?;

    sections.sort_by_key(|s| s.number);
    let unassigned = assemble_sections(&mut sections, abstracts);

    if !unassigned.is_empty() {
        warn!(
            count = unassigned.len(),
            "abstracts excluded from every section"
        );
    }

    info!(sections = sections.len(), "booklet assembled");
    Ok(Booklet {
        sections,
        report,
        unassigned,
    })
}

/// Parses the planning table into session and plain-event definitions.
///
/// A row typed `session` (case-insensitive) becomes a [`Session`]; its
/// `stop` column, when non-empty, is the closing time enforced by the
/// assembler, and an `extra` column adds fixed padding after the last
/// presentation. Any other type becomes an [`Event`], which requires a
/// stop time and may leave its number blank.
fn parse_planning_rows(rows: &[Row]) -> Result<(Vec<Session>, Vec<Event>)> {
    let mut sessions = Vec::new();
    let mut events = Vec::new();

    for row in rows {
        let day = parse_date(field(row, PLANNING, "day")?, PLANNING, "day")?;
        let start = parse_time_on(day, field(row, PLANNING, "start")?, PLANNING, "start")?;
        let color = field(row, PLANNING, "color")?.to_string();
        let chairman = field(row, PLANNING, "chairman")?.to_string();

        let kind = field(row, PLANNING, "type")?;
        if kind.eq_ignore_ascii_case("session") {
            let mut session = Session::new(field_u32(row, PLANNING, "number")?, day, start)
                .with_color(color)
                .with_chairman(chairman);
            if let Some(stop) = field_opt(row, "stop") {
                session = session.with_closing(parse_time_on(day, stop, PLANNING, "stop")?);
            }
            if let Some(extra) = field_opt(row, "extra") {
                session = session.with_extra_min(i64::from(parse_u32(extra, PLANNING, "extra")?));
            }
            sessions.push(session);
        } else {
            let stop = parse_time_on(day, field(row, PLANNING, "stop")?, PLANNING, "stop")?;
            let number = match field_opt(row, "number") {
                Some(value) => parse_u32(value, PLANNING, "number")?,
                None => 0,
            };
            events.push(Event {
                name: title_case(kind),
                number,
                color,
                chairman,
                day,
                start,
                stop,
            });
        }
    }

    Ok((sessions, events))
}

/// Parses the booklet table into empty sections.
fn parse_section_rows(rows: &[Row]) -> Result<Vec<Section>> {
    rows.iter()
        .map(|row| {
            Ok(Section::new(
                field_u32(row, BOOKLET, "number")?,
                field(row, BOOKLET, "color")?,
            ))
        })
        .collect()
}

/// Parses the abstracts table.
///
/// A row with no abstract text is warned about and skipped; keywords are
/// split on commas (semicolons normalized first) and trimmed.
fn parse_abstract_rows(rows: &[Row]) -> Result<Vec<Abstract>> {
    let mut abstracts = Vec::new();

    for row in rows {
        let code = field(row, ABSTRACTS, "code")?;
        let text = field(row, ABSTRACTS, "text")?;
        if text.is_empty() {
            warn!(code, "abstract row has no text");
            continue;
        }

        let keywords = field(row, ABSTRACTS, "keywords")?
            .replace(';', ",")
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect();

        abstracts.push(Abstract::new(code, text).with_keywords(keywords));
    }

    Ok(abstracts)
}

/// Builds the roster and attaches each thesis to its abstract by code.
///
/// A roster entry with no matching abstract is warned about and skipped;
/// its student simply has no page in the booklet.
fn attach_theses(abstracts: &mut [Abstract], roster_rows: &[Row], config: &BuilderConfig) -> Result<()> {
    for entry in build_roster(roster_rows, config)? {
        match position_by_code(abstracts, &entry.code) {
            Some(index) => abstracts[index].set_thesis(entry.thesis),
            None => warn!(code = %entry.code, "roster entry matches no abstract"),
        }
    }
    Ok(())
}

/// Distributes abstracts into their sections, sorted by order, inheriting
/// the section color. Returns the unassigned remainder.
fn assemble_sections(sections: &mut [Section], mut abstracts: Vec<Abstract>) -> Vec<Abstract> {
    for section in sections.iter_mut() {
        let mut selected = Vec::new();
        let mut rest = Vec::with_capacity(abstracts.len());
        for abstract_ in abstracts {
            if abstract_.section != 0 && abstract_.section == section.number {
                selected.push(abstract_);
            } else {
                rest.push(abstract_);
            }
        }
        abstracts = rest;

        // Stable: ties on order keep their input order.
        selected.sort_by_key(|a| a.order);
        for mut abstract_ in selected {
            abstract_.color = section.color.clone();
            section.add_abstract(abstract_);
        }
    }

    abstracts
}

/// Capitalizes the first letter of each whitespace-separated word.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn roster_row(code: &str) -> Row {
        row(&[
            ("code", code),
            ("come", "oui"),
            ("title", "Thesis T"),
            ("funding", ""),
            ("first-name", "Ada"),
            ("name", "Lovelace"),
            ("grade", "2A"),
            ("department", "D"),
            ("unit", "U"),
            ("location", ""),
            ("email", ""),
            ("s1-title", ""),
            ("s1-name", "X"),
            ("s1-origin", "Lab"),
            ("s1-department", "D"),
            ("s1-unit", "U"),
        ])
    }

    fn repartition_row(code: &str, day: &str, session: &str, order: &str, length: &str) -> Row {
        row(&[
            ("code", code),
            ("day", day),
            ("session", session),
            ("order", order),
            ("length", length),
        ])
    }

    fn session_row(number: &str, start: &str, stop: &str) -> Row {
        row(&[
            ("type", "session"),
            ("number", number),
            ("day", "2024-06-12"),
            ("start", start),
            ("stop", stop),
            ("color", "#aabbcc"),
            ("chairman", "Dr. Chair"),
        ])
    }

    #[test]
    fn test_round_trip_single_presentation() {
        let planning = vec![session_row("1", "09:00", "")];
        let roster = vec![roster_row("P1")];
        let repartition = vec![repartition_row("P1", "1", "1", "1", "30")];

        let result =
            build_planning(&BuilderConfig::new(), &planning, &roster, &repartition).unwrap();

        assert_eq!(result.entries.len(), 1);
        assert!(result.unscheduled.is_empty());
        assert_eq!(result.report.applied, 1);

        let session = result.entries[0].as_session().unwrap();
        assert_eq!(session.presentation_count(), 1);
        let p = &session.presentations[0];
        assert_eq!(p.start.unwrap().to_string(), "2024-06-12 09:00:00");
        assert_eq!(p.stop.unwrap().to_string(), "2024-06-12 09:30:00");
        assert_eq!(session.stop, p.stop);
        assert_eq!(p.thesis.as_ref().unwrap().student.as_ref().unwrap().name, "Ada Lovelace");
    }

    #[test]
    fn test_entries_sorted_chronologically() {
        let planning = vec![
            session_row("2", "14:00", ""),
            row(&[
                ("type", "coffee break"),
                ("number", ""),
                ("day", "2024-06-12"),
                ("start", "10:30"),
                ("stop", "11:00"),
                ("color", "#ffffff"),
                ("chairman", ""),
            ]),
            session_row("1", "09:00", ""),
        ];

        let result = build_planning(&BuilderConfig::new(), &planning, &[], &[]).unwrap();
        let starts: Vec<_> = result.entries.iter().map(|e| e.start().to_string()).collect();
        assert_eq!(
            starts,
            vec![
                "2024-06-12 09:00:00",
                "2024-06-12 10:30:00",
                "2024-06-12 14:00:00",
            ]
        );

        match &result.entries[1] {
            PlanningEntry::Event(event) => {
                assert_eq!(event.name, "Coffee Break");
                assert_eq!(event.number, 0);
            }
            other => panic!("expected an event, got {other:?}"),
        }
    }

    #[test]
    fn test_lost_presentations_accounting() {
        // P1 scheduled; P2 never referenced; orphan row P9; dayless row P3.
        let planning = vec![session_row("1", "09:00", "")];
        let roster = vec![roster_row("P1"), roster_row("P2"), roster_row("P3")];
        let repartition = vec![
            repartition_row("P1", "1", "1", "1", "20"),
            repartition_row("P9", "1", "1", "2", "20"),
            repartition_row("P3", "", "1", "3", "20"),
        ];

        let result =
            build_planning(&BuilderConfig::new(), &planning, &roster, &repartition).unwrap();

        assert_eq!(result.report.orphan_codes, vec!["P9"]);
        assert_eq!(result.report.dayless_codes, vec!["P3"]);
        // Lost = skipped rows' presentations + never-referenced ones.
        assert_eq!(result.unscheduled.len(), 2);
        let lost: Vec<_> = result.unscheduled.iter().map(|p| p.code.as_str()).collect();
        assert!(lost.contains(&"P2"));
        assert!(lost.contains(&"P3"));
    }

    #[test]
    fn test_overrun_aborts_run() {
        let planning = vec![session_row("1", "09:00", "09:15")];
        let roster = vec![roster_row("P1")];
        let repartition = vec![repartition_row("P1", "1", "1", "1", "30")];

        let err = build_planning(&BuilderConfig::new(), &planning, &roster, &repartition)
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::SessionOverrun { number: 1, .. }));
    }

    #[test]
    fn test_planning_is_deterministic() {
        let planning = vec![session_row("1", "09:00", ""), session_row("2", "14:00", "")];
        let roster = vec![roster_row("P1"), roster_row("P2")];
        let repartition = vec![
            repartition_row("P1", "1", "1", "1", "30"),
            repartition_row("P2", "1", "2", "1", "25"),
        ];

        let cfg = BuilderConfig::new();
        let first = build_planning(&cfg, &planning, &roster, &repartition).unwrap();
        let second = build_planning(&cfg, &planning, &roster, &repartition).unwrap();

        let a = serde_json::to_string(&first.entries).unwrap();
        let b = serde_json::to_string(&second.entries).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialized_tree_is_fully_resolved() {
        let planning = vec![session_row("1", "09:00", "")];
        let roster = vec![roster_row("P1")];
        let repartition = vec![repartition_row("P1", "1", "1", "1", "30")];

        let result =
            build_planning(&BuilderConfig::new(), &planning, &roster, &repartition).unwrap();
        let value = serde_json::to_value(&result.entries).unwrap();

        // The renderer gets a plain nested mapping with every join done.
        let session = &value[0]["Session"];
        assert_eq!(session["chairman"], "Dr. Chair");
        let presentation = &session["presentations"][0];
        assert_eq!(presentation["code"], "P1");
        assert_eq!(
            presentation["thesis"]["supervisors"][0]["name"],
            "X"
        );
    }

    #[test]
    fn test_build_booklet() {
        let sections = vec![
            row(&[("number", "2"), ("color", "#222222")]),
            row(&[("number", "1"), ("color", "#111111")]),
        ];
        let abstracts = vec![
            row(&[("code", "P1"), ("text", "Sound science."), ("keywords", "a; b , c")]),
            row(&[("code", "P2"), ("text", "More science."), ("keywords", "")]),
            row(&[("code", "P3"), ("text", ""), ("keywords", "")]),
        ];
        let roster = vec![roster_row("P1"), roster_row("P2")];
        let repartition = vec![
            repartition_row("P1", "1", "2", "1", "20"),
            repartition_row("P2", "1", "1", "1", "20"),
        ];

        let result = build_booklet(
            &BuilderConfig::new(),
            &sections,
            &abstracts,
            &roster,
            &repartition,
        )
        .unwrap();

        // Sections sorted by number, not input order.
        assert_eq!(result.sections[0].number, 1);
        assert_eq!(result.sections[1].number, 2);

        let first = &result.sections[0].abstracts[0];
        assert_eq!(first.code, "P2");
        assert_eq!(first.color, "#111111");
        assert!(first.thesis.is_some());

        let second = &result.sections[1].abstracts[0];
        assert_eq!(second.code, "P1");
        assert_eq!(second.keywords, vec!["a", "b", "c"]);

        // P3 had no text: skipped entirely, not even unassigned.
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_booklet_orphan_abstract_unassigned() {
        let sections = vec![row(&[("number", "1"), ("color", "#111111")])];
        let abstracts = vec![row(&[("code", "P1"), ("text", "T"), ("keywords", "")])];

        let result =
            build_booklet(&BuilderConfig::new(), &sections, &abstracts, &[], &[]).unwrap();
        assert_eq!(result.sections[0].abstract_count(), 0);
        assert_eq!(result.unassigned.len(), 1);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("coffee break"), "Coffee Break");
        assert_eq!(title_case("KEYNOTE"), "Keynote");
        assert_eq!(title_case(""), "");
    }
}

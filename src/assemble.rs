//! Session assembly: grouping, ordering and time-stamping presentations.
//!
//! # Algorithm
//!
//! For each session, in session-number order:
//!
//! 1. Select the presentations whose session number matches.
//! 2. Sort the selection by passage order (stable: equal orders keep their
//!    input order).
//! 3. Walk the selection with a running clock starting at the session
//!    start: each presentation starts at the clock, stops at start +
//!    duration, and the clock advances to its stop.
//! 4. Attach each presentation as it is stamped; the session's computed
//!    stop is the final clock, plus the fixed extra padding when one is
//!    configured.
//! 5. If the computed stop exceeds the session's configured closing time,
//!    the run fails naming the session: the papers do not fit the slot and
//!    silently truncating or resizing would corrupt the printed programme.
//!
//! A session with no matching presentations ends at its own start (plus
//! padding) and stays in the output with an empty list.

use chrono::Duration;

use crate::error::{Error, Result};
use crate::models::{Presentation, Session};

/// Assembles every session from the timing-annotated presentation set.
///
/// Presentations move into their session (exclusive containment); the
/// remainder — un-scheduled presentations and presentations whose session
/// number matches no definition — is returned to the caller.
pub fn assemble_sessions(
    sessions: &mut [Session],
    mut presentations: Vec<Presentation>,
) -> Result<Vec<Presentation>> {
    let mut by_number: Vec<usize> = (0..sessions.len()).collect();
    by_number.sort_by_key(|&i| sessions[i].number);

    for &index in &by_number {
        let session = &mut sessions[index];

        let mut selected = Vec::new();
        let mut rest = Vec::with_capacity(presentations.len());
        for presentation in presentations {
            if presentation.is_scheduled() && presentation.session == session.number {
                selected.push(presentation);
            } else {
                rest.push(presentation);
            }
        }
        presentations = rest;

        // Stable: ties on order keep their roster order.
        selected.sort_by_key(|p| p.order);
        assemble_session(session, selected)?;
    }

    Ok(presentations)
}

/// Time-stamps and attaches one session's sorted presentations.
fn assemble_session(session: &mut Session, presentations: Vec<Presentation>) -> Result<()> {
    let mut clock = session.start;

    for mut presentation in presentations {
        let duration = presentation.duration().ok_or_else(|| {
            Error::Internal(format!(
                "presentation \"{}\" is assigned to session {} without a duration",
                presentation.code, session.number
            ))
        })?;

        presentation.start = Some(clock);
        clock += duration;
        presentation.stop = Some(clock);
        session.add_presentation(presentation);
    }

    if let Some(extra) = session.extra_min {
        clock += Duration::minutes(extra);
    }
    session.stop = Some(clock);

    if let Some(closing) = session.closing {
        if clock > closing {
            return Err(Error::SessionOverrun {
                number: session.number,
                stop: clock,
                closing,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn scheduled(code: &str, session: u32, order: u32, minutes: i64) -> Presentation {
        let mut p = Presentation::new(code);
        p.session = session;
        p.order = order;
        p.duration_min = Some(minutes);
        p
    }

    #[test]
    fn test_cumulative_clock() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0))];
        let presentations = vec![
            scheduled("P1", 1, 1, 30),
            scheduled("P2", 1, 2, 20),
            scheduled("P3", 1, 3, 15),
        ];

        let rest = assemble_sessions(&mut sessions, presentations).unwrap();
        assert!(rest.is_empty());

        let session = &sessions[0];
        assert_eq!(session.presentation_count(), 3);
        assert_eq!(session.presentations[0].start, Some(at(9, 0)));
        assert_eq!(session.presentations[0].stop, Some(at(9, 30)));
        assert_eq!(session.presentations[1].start, Some(at(9, 30)));
        assert_eq!(session.presentations[1].stop, Some(at(9, 50)));
        assert_eq!(session.presentations[2].start, Some(at(9, 50)));
        assert_eq!(session.presentations[2].stop, Some(at(10, 5)));
        assert_eq!(session.stop, Some(at(10, 5)));
    }

    #[test]
    fn test_sorted_by_order_not_input() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0))];
        let presentations = vec![scheduled("late", 1, 2, 10), scheduled("early", 1, 1, 10)];

        assemble_sessions(&mut sessions, presentations).unwrap();
        assert_eq!(sessions[0].presentations[0].code, "early");
        assert_eq!(sessions[0].presentations[1].code, "late");
    }

    #[test]
    fn test_equal_order_ties_are_stable() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0))];
        let presentations = vec![
            scheduled("first", 1, 1, 10),
            scheduled("second", 1, 1, 10),
            scheduled("third", 1, 1, 10),
        ];

        assemble_sessions(&mut sessions, presentations).unwrap();
        let codes: Vec<_> = sessions[0]
            .presentations
            .iter()
            .map(|p| p.code.as_str())
            .collect();
        assert_eq!(codes, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_extra_padding_added_to_stop() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0)).with_extra_min(10)];
        let presentations = vec![scheduled("P1", 1, 1, 30)];

        assemble_sessions(&mut sessions, presentations).unwrap();
        assert_eq!(sessions[0].presentations[0].stop, Some(at(9, 30)));
        assert_eq!(sessions[0].stop, Some(at(9, 40)));
    }

    #[test]
    fn test_overrun_is_fatal_and_names_session() {
        let mut sessions = vec![Session::new(3, day(), at(9, 0)).with_closing(at(9, 45))];
        let presentations = vec![scheduled("P1", 3, 1, 30), scheduled("P2", 3, 2, 30)];

        let err = assemble_sessions(&mut sessions, presentations).unwrap_err();
        match err {
            Error::SessionOverrun {
                number,
                stop,
                closing,
            } => {
                assert_eq!(number, 3);
                assert_eq!(stop, at(10, 0));
                assert_eq!(closing, at(9, 45));
            }
            other => panic!("expected SessionOverrun, got {other}"),
        }
    }

    #[test]
    fn test_exact_fit_passes() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0)).with_closing(at(9, 30))];
        let presentations = vec![scheduled("P1", 1, 1, 30)];

        assemble_sessions(&mut sessions, presentations).unwrap();
        assert_eq!(sessions[0].stop, Some(at(9, 30)));
    }

    #[test]
    fn test_empty_session_stops_at_start() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0)).with_closing(at(10, 0))];

        let rest = assemble_sessions(&mut sessions, Vec::new()).unwrap();
        assert!(rest.is_empty());
        assert_eq!(sessions[0].presentation_count(), 0);
        assert_eq!(sessions[0].stop, Some(at(9, 0)));
    }

    #[test]
    fn test_unscheduled_never_attached() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0))];
        let presentations = vec![Presentation::new("unplaced"), scheduled("P1", 1, 1, 10)];

        let rest = assemble_sessions(&mut sessions, presentations).unwrap();
        assert_eq!(sessions[0].presentation_count(), 1);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].code, "unplaced");
    }

    #[test]
    fn test_unknown_session_number_left_over() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0))];
        let presentations = vec![scheduled("P1", 7, 1, 10)];

        let rest = assemble_sessions(&mut sessions, presentations).unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(sessions[0].presentation_count(), 0);
    }

    #[test]
    fn test_missing_duration_is_internal_error() {
        let mut sessions = vec![Session::new(1, day(), at(9, 0))];
        let mut p = Presentation::new("P1");
        p.session = 1;

        let err = assemble_sessions(&mut sessions, vec![p]).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn test_sessions_assembled_in_number_order() {
        // Definitions out of order; assembly still picks per-session sets.
        let mut sessions = vec![
            Session::new(2, day(), at(14, 0)),
            Session::new(1, day(), at(9, 0)),
        ];
        let presentations = vec![scheduled("B", 2, 1, 10), scheduled("A", 1, 1, 10)];

        assemble_sessions(&mut sessions, presentations).unwrap();
        assert_eq!(sessions[0].presentations[0].code, "B");
        assert_eq!(sessions[1].presentations[0].code, "A");
    }
}

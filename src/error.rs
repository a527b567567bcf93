//! Error taxonomy for programme assembly.
//!
//! Two classes of failure exist:
//!
//! - **Fatal** (everything in [`Error`]): malformed input rows, unrecognized
//!   attendance flags, duplicate presentation codes, session overruns. These
//!   abort the whole run — downstream joins depend on a complete roster, and
//!   a half-validated schedule must never reach the renderer.
//! - **Recoverable**: orphan repartition rows and rows without a day. These
//!   are logged and accumulated in a [`crate::timing::TimingReport`], never
//!   surfaced as `Error`.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type for programme assembly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal assembly errors.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is absent from an input row.
    #[error("missing field \"{field}\" in {table} row")]
    MissingField {
        /// Logical table the row belongs to (roster, repartition, planning...).
        table: &'static str,
        /// Column name.
        field: String,
    },

    /// A field is present but its value cannot be parsed.
    #[error("invalid value \"{value}\" for field \"{field}\" in {table} row")]
    InvalidField {
        /// Logical table the row belongs to.
        table: &'static str,
        /// Column name.
        field: String,
        /// Offending raw value.
        value: String,
    },

    /// An attendance flag token is not in the configured vocabulary.
    #[error("unrecognized attendance flag \"{0}\"")]
    UnknownAttendanceFlag(String),

    /// Two roster rows share the same presentation code.
    #[error("duplicate presentation code \"{0}\" in roster")]
    DuplicateCode(String),

    /// A session's presentations do not fit its allotted slot.
    #[error("session {number} overruns its closing time: ends at {stop}, closes at {closing}")]
    SessionOverrun {
        /// Offending session number.
        number: u32,
        /// Computed end of the last presentation (plus extra padding).
        stop: NaiveDateTime,
        /// Configured closing time.
        closing: NaiveDateTime,
    },

    /// An advisor was attached under the wrong role.
    ///
    /// Programmer-facing: unreachable given correct orchestration, but the
    /// attach operations verify rather than silently coerce.
    #[error("cannot attach a {found} as a {expected}")]
    RoleMismatch {
        /// Role the attach operation expected.
        expected: &'static str,
        /// Role actually carried by the advisor.
        found: &'static str,
    },

    /// Internal invariant breakage (e.g. a session-assigned presentation
    /// without a duration).
    #[error("internal error: {0}")]
    Internal(String),
}

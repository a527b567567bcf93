//! Injected lookup tables for roster ingestion.
//!
//! The builder needs three small vocabularies: which tokens of the roster's
//! attendance column mean "comes" or "does not come", how to abbreviate
//! academic titles, and how to expand site abbreviations into full location
//! names. All three are plain data passed in at construction time, so the
//! prefix-scan and lookup behavior stay testable with injected tables.
//!
//! Attendance is strict: an unrecognized token is a fatal error, because a
//! typo there silently drops a presentation from the whole programme.
//! Title and location lookups are lenient: a miss logs a warning and passes
//! the value through unchanged.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{Error, Result};

/// Lookup tables consumed by the roster builder.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Attendance token → attending? Keys are lowercase.
    attendance: HashMap<String, bool>,
    /// Full academic title → abbreviation. Keys are lowercase.
    titles: HashMap<String, String>,
    /// Site abbreviation → full location name. Keys are lowercase.
    locations: HashMap<String, String>,
}

impl BuilderConfig {
    /// Creates a configuration with empty title/location tables and the
    /// default attendance vocabulary (`yes`/`no` in English and French,
    /// `true`/`false`, `1`/`0`, `on`/`off`).
    pub fn new() -> Self {
        let mut attendance = HashMap::new();
        for token in ["yes", "oui", "true", "1", "on"] {
            attendance.insert(token.to_string(), true);
        }
        for token in ["no", "non", "false", "0", "off"] {
            attendance.insert(token.to_string(), false);
        }
        Self {
            attendance,
            titles: HashMap::new(),
            locations: HashMap::new(),
        }
    }

    /// Adds an attendance token.
    pub fn with_attendance_token(mut self, token: impl Into<String>, attending: bool) -> Self {
        self.attendance.insert(token.into().to_lowercase(), attending);
        self
    }

    /// Adds a title abbreviation.
    pub fn with_title(mut self, full: impl Into<String>, short: impl Into<String>) -> Self {
        self.titles.insert(full.into().to_lowercase(), short.into());
        self
    }

    /// Adds a location expansion.
    pub fn with_location(mut self, short: impl Into<String>, full: impl Into<String>) -> Self {
        self.locations.insert(short.into().to_lowercase(), full.into());
        self
    }

    /// Interprets an attendance flag token.
    ///
    /// Matching is case-insensitive. An unrecognized token is a fatal
    /// error, never defaulted.
    pub fn attendance(&self, token: &str) -> Result<bool> {
        self.attendance
            .get(&token.to_lowercase())
            .copied()
            .ok_or_else(|| Error::UnknownAttendanceFlag(token.to_string()))
    }

    /// Abbreviates an academic title.
    ///
    /// An empty title stays empty. An unknown title is passed through
    /// unchanged with a warning.
    pub fn abbreviate_title(&self, title: &str) -> String {
        if title.is_empty() {
            return String::new();
        }
        match self.titles.get(&title.to_lowercase()) {
            Some(short) => short.clone(),
            None => {
                warn!(title, "no abbreviation for title");
                title.to_string()
            }
        }
    }

    /// Expands a site abbreviation into a full location name.
    ///
    /// An empty location stays empty. An unknown abbreviation is passed
    /// through unchanged with a warning.
    pub fn expand_location(&self, location: &str) -> String {
        if location.is_empty() {
            return String::new();
        }
        match self.locations.get(&location.to_lowercase()) {
            Some(full) => full.clone(),
            None => {
                warn!(location, "no expansion for location");
                location.to_string()
            }
        }
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new()
    }
}

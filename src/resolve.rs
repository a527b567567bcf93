//! Record resolution: code and group-number lookups.
//!
//! Every cross-table join in the pipeline goes through these two lookups:
//! resolve a record by its unique code (repartition → presentation, roster
//! → abstract) and collect all records of one group number (session
//! assembly, booklet sections). Both are linear scans over in-memory
//! collections — input sizes are a few hundred rows — and both are
//! read-only and order-stable: `indices_in_group` preserves insertion
//! order, and `find_by_code` returns the first match.
//!
//! Duplicate codes never reach these lookups; the roster builder rejects
//! them at construction.

use crate::models::{Abstract, Presentation};

/// A record that can be joined by code and grouped by number.
pub trait Keyed {
    /// Unique cross-table join key.
    fn code(&self) -> &str;
    /// Group number (session or section). 0 = unassigned.
    fn group(&self) -> u32;
}

impl Keyed for Presentation {
    fn code(&self) -> &str {
        &self.code
    }

    fn group(&self) -> u32 {
        self.session
    }
}

impl Keyed for Abstract {
    fn code(&self) -> &str {
        &self.code
    }

    fn group(&self) -> u32 {
        self.section
    }
}

/// Finds the first record with the given code.
pub fn find_by_code<'a, T: Keyed>(records: &'a [T], code: &str) -> Option<&'a T> {
    records.iter().find(|r| r.code() == code)
}

/// Finds the index of the first record with the given code.
///
/// Index form of [`find_by_code`], for callers that mutate the record in
/// place.
pub fn position_by_code<T: Keyed>(records: &[T], code: &str) -> Option<usize> {
    records.iter().position(|r| r.code() == code)
}

/// Collects the indices of all records in the given group, in insertion
/// order.
pub fn indices_in_group<T: Keyed>(records: &[T], number: u32) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.group() == number)
        .map(|(i, _)| i)
        .collect()
}

//! Booklet models: sections of short abstracts.
//!
//! The booklet groups short abstracts by session; each group is a section.
//! The join and lifecycle mirror the timetable side: an [`Abstract`] is
//! keyed by the presentation code, enriched with a section number and an
//! order from the repartition table, then attached to its [`Section`]
//! sorted by that order. Abstracts inherit the display color of their
//! section.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Thesis;

/// One short abstract of the booklet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Abstract {
    /// Unique code, the cross-table join key.
    pub code: String,
    /// Abstract body text.
    pub text: String,
    /// Keywords, trimmed.
    pub keywords: Vec<String>,
    /// Section this abstract belongs to. 0 = unassigned.
    pub section: u32,
    /// Sequencing key within the section, same order as the timetable.
    pub order: u32,
    /// Banner color, inherited from the section at assembly.
    pub color: String,
    /// Thesis the abstract belongs to.
    pub thesis: Option<Thesis>,
}

impl Abstract {
    /// Creates an unassigned abstract.
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
            keywords: Vec::new(),
            section: 0,
            order: 0,
            color: String::new(),
            thesis: None,
        }
    }

    /// Sets the keywords.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Attaches the thesis.
    pub fn set_thesis(&mut self, thesis: Thesis) {
        debug!(code = %self.code, thesis = %thesis.title, "attach thesis");
        self.thesis = Some(thesis);
    }
}

/// A booklet section: all abstracts of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section number, equal to the session number of its abstracts.
    pub number: u32,
    /// Banner color for every abstract in the section.
    pub color: String,
    /// Attached abstracts, in passage order.
    pub abstracts: Vec<Abstract>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(number: u32, color: impl Into<String>) -> Self {
        Self {
            number,
            color: color.into(),
            abstracts: Vec::new(),
        }
    }

    /// Appends an abstract. The append order is the canonical order for
    /// rendering; the orchestrator sorts before attaching.
    pub fn add_abstract(&mut self, abstract_: Abstract) {
        debug!(code = %abstract_.code, section = self.number, "attach abstract");
        self.abstracts.push(abstract_);
    }

    /// Number of attached abstracts.
    pub fn abstract_count(&self) -> usize {
        self.abstracts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abstract_defaults() {
        let a = Abstract::new("P1", "We show that...")
            .with_keywords(vec!["waves".into(), "particles".into()]);
        assert_eq!(a.section, 0);
        assert_eq!(a.order, 0);
        assert!(a.thesis.is_none());
        assert_eq!(a.keywords.len(), 2);
    }

    #[test]
    fn test_section_attach() {
        let mut section = Section::new(2, "#112233");
        section.add_abstract(Abstract::new("P1", "text"));
        section.add_abstract(Abstract::new("P2", "text"));
        assert_eq!(section.abstract_count(), 2);
        assert_eq!(section.abstracts[0].code, "P1");
    }
}

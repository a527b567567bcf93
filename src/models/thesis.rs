//! Thesis aggregate.
//!
//! A thesis groups the work item being presented: title, funding source,
//! ordered advisor lists and the owning student. Advisor lists preserve the
//! order the roster row declared them in.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::{Advisor, AdvisorRole, Student};

/// A thesis presented at the conference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thesis {
    /// Thesis title.
    pub title: String,
    /// Funding source.
    pub funding: String,
    /// Supervisors, in roster order.
    pub supervisors: Vec<Advisor>,
    /// Directors, in roster order.
    pub directors: Vec<Advisor>,
    /// Owning student. Set after construction, exactly one once set.
    pub student: Option<Student>,
}

impl Thesis {
    /// Creates a thesis with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the funding source.
    pub fn with_funding(mut self, funding: impl Into<String>) -> Self {
        self.funding = funding.into();
        self
    }

    /// Assigns the owning student.
    pub fn set_student(&mut self, student: Student) {
        debug!(student = %student.name, thesis = %self.title, "attach student");
        self.student = Some(student);
    }

    /// Appends a supervisor.
    ///
    /// Fails if the advisor carries the director role; the two lists are
    /// rendered differently and must not be mixed up silently.
    pub fn add_supervisor(&mut self, advisor: Advisor) -> Result<()> {
        if advisor.role != AdvisorRole::Supervisor {
            return Err(Error::RoleMismatch {
                expected: AdvisorRole::Supervisor.name(),
                found: advisor.role.name(),
            });
        }
        debug!(advisor = %advisor.name, thesis = %self.title, "attach supervisor");
        self.supervisors.push(advisor);
        Ok(())
    }

    /// Appends a director.
    pub fn add_director(&mut self, advisor: Advisor) -> Result<()> {
        if advisor.role != AdvisorRole::Director {
            return Err(Error::RoleMismatch {
                expected: AdvisorRole::Director.name(),
                found: advisor.role.name(),
            });
        }
        debug!(advisor = %advisor.name, thesis = %self.title, "attach director");
        self.directors.push(advisor);
        Ok(())
    }

    /// Number of supervisors.
    pub fn supervisor_count(&self) -> usize {
        self.supervisors.len()
    }

    /// Number of directors.
    pub fn director_count(&self) -> usize {
        self.directors.len()
    }
}

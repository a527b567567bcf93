//! People appearing in the programme.
//!
//! A roster row describes one student and a numbered sequence of advisors
//! (supervisors and thesis directors). Supervisors and directors share the
//! same field set; they differ only in how the renderer presents them, so
//! both are one [`Advisor`] value carrying a [`AdvisorRole`] tag. Needing
//! the other rendering view means constructing a fresh value with
//! [`Advisor::with_role`], never mutating the tag of a shared instance.
//!
//! None of these types implement equality: two people with identical names
//! are distinct entities, and the resolver joins on presentation codes, not
//! on person values.

use serde::{Deserialize, Serialize};

/// Role tag distinguishing the two advisor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisorRole {
    /// Day-to-day supervisor.
    Supervisor,
    /// Thesis director.
    Director,
}

impl AdvisorRole {
    /// Lowercase role name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            AdvisorRole::Supervisor => "supervisor",
            AdvisorRole::Director => "director",
        }
    }
}

/// A presenting student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Student {
    /// Full name (first name + surname).
    pub name: String,
    /// Year of study.
    pub grade: String,
    /// Organizational department.
    pub department: String,
    /// Sub-unit within the department.
    pub unit: String,
    /// Full site/location name (expanded from an abbreviation at build time).
    pub location: String,
    /// Contact address.
    pub email: String,
    /// Picture file reference, if one exists.
    pub picture: Option<String>,
}

impl Student {
    /// Creates a student with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A supervisor or thesis director.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisor {
    /// Role tag ([`Supervisor`](AdvisorRole::Supervisor) or
    /// [`Director`](AdvisorRole::Director)).
    pub role: AdvisorRole,
    /// Academic title, abbreviated at build time. May be empty.
    pub title: String,
    /// Full name.
    pub name: String,
    /// Originating lab.
    pub origin: String,
    /// Organizational department (supervisors only; empty for directors).
    pub department: String,
    /// Sub-unit within the department (supervisors only).
    pub unit: String,
}

impl Advisor {
    /// Creates an advisor with the given role and name.
    pub fn new(role: AdvisorRole, name: impl Into<String>) -> Self {
        Self {
            role,
            title: String::new(),
            name: name.into(),
            origin: String::new(),
            department: String::new(),
            unit: String::new(),
        }
    }

    /// Sets the academic title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the originating lab.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the sub-unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Returns a copy of this advisor under another role.
    ///
    /// Used when a session programme needs a director rendered in the
    /// supervisor style; the original value is left untouched.
    pub fn with_role(&self, role: AdvisorRole) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }
}

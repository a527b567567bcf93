//! Conference programme assembly.
//!
//! Turns three independently-sourced tabular inputs — a roster of
//! presentations, a repartition table (day/session/order/length per
//! presentation code) and a table of session definitions — into fully
//! resolved, render-ready structures: a chronological timetable of
//! sessions and events, and a booklet of short abstracts grouped in
//! sections.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Presentation`, `Session`, `Event`,
//!   `Abstract`, `Section`, `Thesis`, `Student`, `Advisor`
//! - **`roster`**: Builds theses and presentations from listing rows
//! - **`timing`**: Merges the repartition table into built records
//! - **`assemble`**: Groups, orders and time-stamps session presentations
//! - **`pipeline`**: End-to-end orchestration and top-level sorting
//! - **`resolve`**: Code and group-number lookups shared by the joins
//! - **`row`**: String-keyed row mappings, the input boundary
//! - **`config`**: Injected lookup tables (attendance, titles, locations)
//! - **`error`**: Fatal error taxonomy
//!
//! # Boundaries
//!
//! CSV/INI parsing, template rendering, color parsing and file writing are
//! external collaborators. This crate consumes row mappings and produces
//! serializable trees; it never touches the filesystem.

pub mod assemble;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod resolve;
pub mod roster;
pub mod row;
pub mod timing;

pub use config::BuilderConfig;
pub use error::{Error, Result};
pub use pipeline::{build_booklet, build_planning, Booklet, Planning};

//! Shared test utilities for the sync-selection workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`records`]: terse builders for resources and sync records
//! - [`scenarios`]: canned record sets with a selection, as used across suites
//! - [`workspace`]: [`workspace::TestWorkspace`] for tests that read snapshot files

pub mod records;
pub mod scenarios;
pub mod workspace;

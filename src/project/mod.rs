//! Snyk project representation and collections.
//!
//! ## Main Parts
//!
//! - [`Project`] - A single Snyk project as returned by the list endpoint
//! - [`Projects`] - A collection of projects with summary and selection helpers

#[allow(clippy::module_inception)]
pub mod project;
pub mod projects;

pub use project::Project;
pub use projects::Projects;

//! Snyk REST API access.
//!
//! [`SnykApi`] is the seam the update driver talks to; [`SnykClient`] is the
//! blocking HTTPS implementation used by the CLI.

pub mod client;
pub(crate) mod models;

pub use client::{API_VERSION, DEFAULT_API_HOST, SnykClient};

use crate::config::TestFrequency;
use crate::error::ApiError;
use crate::project::Project;

/// The two Snyk operations this tool needs.
pub trait SnykApi {
    /// List the organization's projects, optionally restricted to the given
    /// project types. An empty `types` slice means no restriction.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; [`ApiError::Unauthorized`] for a rejected token.
    fn list_projects(&self, org_id: &str, types: &[&str]) -> Result<Vec<Project>, ApiError>;

    /// Set the recurring test frequency of one project.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] describing why the update was rejected.
    fn update_frequency(
        &self,
        org_id: &str,
        project_id: &str,
        frequency: TestFrequency,
    ) -> Result<(), ApiError>;
}

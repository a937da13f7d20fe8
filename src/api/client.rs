//! Blocking HTTPS client for the Snyk REST API.

use std::time::Duration;

use reqwest::{
    StatusCode,
    blocking::{Client, RequestBuilder, Response},
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use tracing::{debug, warn};
use url::Url;

use super::SnykApi;
use super::models::{ProjectListResponse, UpdateProjectRequest};
use crate::config::TestFrequency;
use crate::error::ApiError;
use crate::project::Project;

/// Public Snyk API host. Regional tenants use e.g. `https://api.eu.snyk.io`.
pub const DEFAULT_API_HOST: &str = "https://api.snyk.io";

/// REST API version sent with every request.
pub const API_VERSION: &str = "2024-05-23";

const PAGE_LIMIT: &str = "100";

const JSON_API: &str = "application/vnd.api+json";

/// Snyk REST API client authenticated with an API token.
#[derive(Clone)]
pub struct SnykClient {
    http: Client,
    host: Url,
    token: String,

    /// Pause after every request
    delay: Duration,
}

impl SnykClient {
    /// Create a client for the given API host.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `host` is not a URL, or
    /// [`ApiError::Network`] if the HTTP client cannot be initialized.
    pub fn new(host: &str, token: impl Into<String>) -> Result<Self, ApiError> {
        let host = Url::parse(host)?;
        if host.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        let http = Client::builder()
            .user_agent(format!("snyk-test-frequency/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            host,
            token: token.into(),
            delay: Duration::ZERO,
        })
    }

    /// Pause for `delay` after every request.
    #[must_use]
    pub const fn with_request_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// `{host}/rest/{segments...}`, each segment percent-encoded on its own.
    fn rest_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.host.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push("rest")
            .extend(segments);
        Ok(url)
    }

    fn projects_url(&self, org_id: &str, types: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.rest_url(&["orgs", org_id, "projects"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("version", API_VERSION)
                .append_pair("limit", PAGE_LIMIT);
            for t in types {
                query.append_pair("types", t);
            }
        }
        Ok(url)
    }

    /// Send an authenticated request and turn non-success statuses into errors.
    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, JSON_API)
            .send();

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let response = response?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        debug!(status = status.as_u16(), %body, "request failed");
        Err(ApiError::from_status(status.as_u16(), body))
    }
}

impl SnykApi for SnykClient {
    fn list_projects(&self, org_id: &str, types: &[&str]) -> Result<Vec<Project>, ApiError> {
        let mut projects = Vec::new();
        let mut next = Some(self.projects_url(org_id, types)?);

        while let Some(url) = next.take() {
            debug!(path = url.path(), "fetching projects page");

            let body = self.send(self.http.get(url.clone()))?.text()?;
            let page: ProjectListResponse =
                serde_json::from_str(&body).map_err(|source| ApiError::Decode {
                    url: url.to_string(),
                    source,
                })?;

            projects.extend(page.data.into_iter().map(Project::from));

            if let Some(link) = page.links.and_then(|l| l.next)
                && !link.is_empty()
            {
                // Relative links resolve against the host, absolute ones replace it.
                let next_url = self.host.join(&link)?;
                if next_url == url {
                    warn!(%next_url, "pagination link points at the current page, stopping");
                } else {
                    next = Some(next_url);
                }
            }
        }

        debug!(count = projects.len(), "fetched projects");
        Ok(projects)
    }

    fn update_frequency(
        &self,
        org_id: &str,
        project_id: &str,
        frequency: TestFrequency,
    ) -> Result<(), ApiError> {
        let mut url = self.rest_url(&["orgs", org_id, "projects", project_id])?;
        url.query_pairs_mut().append_pair("version", API_VERSION);

        let body = UpdateProjectRequest::test_frequency(project_id, frequency.as_str());
        let request = self
            .http
            .patch(url)
            .header(CONTENT_TYPE, JSON_API)
            .json(&body);

        let status = self.send(request)?.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        debug!(project_id, %frequency, "updated project");
        Ok(())
    }
}

//! JSON:API wire models for the project endpoints.

use serde::{Deserialize, Serialize};

use crate::project::{Project, project::UNKNOWN_NAME};

/// One page of `GET /orgs/{org_id}/projects`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectListResponse {
    #[serde(default)]
    pub(crate) data: Vec<ProjectResource>,
    #[serde(default)]
    pub(crate) links: Option<Links>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Links {
    pub(crate) next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectResource {
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) attributes: ProjectAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectAttributes {
    pub(crate) name: Option<String>,
    #[serde(rename = "type")]
    pub(crate) project_type: Option<String>,
    pub(crate) settings: Option<ProjectSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectSettings {
    pub(crate) recurring_tests: Option<RecurringTests>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecurringTests {
    pub(crate) frequency: Option<String>,
}

impl From<ProjectResource> for Project {
    fn from(resource: ProjectResource) -> Self {
        let ProjectAttributes {
            name,
            project_type,
            settings,
        } = resource.attributes;

        Self {
            id: resource.id.filter(|id| !id.is_empty()),
            name: name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            project_type: project_type.unwrap_or_default(),
            test_frequency: settings
                .and_then(|s| s.recurring_tests)
                .and_then(|r| r.frequency),
        }
    }
}

/// Body of `PATCH /orgs/{org_id}/projects/{project_id}`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateProjectRequest<'a> {
    pub(crate) data: UpdateProjectData<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateProjectData<'a> {
    #[serde(rename = "type")]
    pub(crate) resource_type: &'static str,
    pub(crate) id: &'a str,
    pub(crate) relationships: serde_json::Map<String, serde_json::Value>,
    pub(crate) attributes: UpdateProjectAttributes<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateProjectAttributes<'a> {
    pub(crate) test_frequency: &'a str,
}

impl<'a> UpdateProjectRequest<'a> {
    pub(crate) fn test_frequency(project_id: &'a str, frequency: &'a str) -> Self {
        Self {
            data: UpdateProjectData {
                resource_type: "project",
                id: project_id,
                relationships: serde_json::Map::new(),
                attributes: UpdateProjectAttributes {
                    test_frequency: frequency,
                },
            },
        }
    }
}

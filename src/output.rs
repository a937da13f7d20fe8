//! JSON report for `--json` mode.
//!
//! A single document is printed to stdout at the end of the run, so the tool
//! can be driven from scripts and CI jobs.

use chrono::Utc;
use serde::Serialize;

use crate::config::{ProjectFilter, TestFrequency};
use crate::project::{Project, Projects};
use crate::updater::{UpdateAborted, UpdateResult, UpdateStatus};

/// Settings of the run, echoed at the top of the report.
#[derive(Clone, Copy, Debug)]
pub struct RunContext<'a> {
    pub org_id: &'a str,
    pub filter: &'a ProjectFilter,
    pub frequency: TestFrequency,
}

/// Top-level JSON report.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub generated_at: String,
    pub org_id: String,
    pub filter: String,
    pub frequency: TestFrequency,
    pub dry_run: bool,
    pub projects: Vec<JsonProject>,
    pub summary: JsonSummary,

    /// Why the run stopped early, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

/// One project in the report.
#[derive(Debug, Serialize)]
pub struct JsonProject {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub current_frequency: Option<String>,

    /// `pending` (dry run), `updated`, `failed` or `skipped`
    pub status: &'static str,

    /// Failure or skip reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate counts.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct JsonSummary {
    pub total: usize,
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl JsonProject {
    fn new(project: &Project, status: &'static str, error: Option<String>) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            project_type: project.project_type.clone(),
            current_frequency: project.test_frequency.clone(),
            status,
            error,
        }
    }
}

impl JsonOutput {
    fn with_context(context: RunContext<'_>, dry_run: bool) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            org_id: context.org_id.to_string(),
            filter: context.filter.to_string(),
            frequency: context.frequency,
            dry_run,
            projects: Vec::new(),
            summary: JsonSummary::default(),
            aborted: None,
        }
    }

    /// Report for a dry run: every matching project, nothing sent.
    #[must_use]
    pub fn from_dry_run(context: RunContext<'_>, projects: &Projects) -> Self {
        let mut output = Self::with_context(context, true);

        output.projects = projects
            .as_slice()
            .iter()
            .map(|p| JsonProject::new(p, "pending", None))
            .collect();
        output.summary.total = output.projects.len();

        output
    }

    /// Report for a completed update run.
    #[must_use]
    pub fn from_result(context: RunContext<'_>, result: &UpdateResult) -> Self {
        let mut output = Self::with_context(context, false);

        output.projects = result
            .outcomes
            .iter()
            .map(|o| match &o.status {
                UpdateStatus::Updated => JsonProject::new(&o.project, "updated", None),
                UpdateStatus::Failed(reason) => {
                    JsonProject::new(&o.project, "failed", Some(reason.clone()))
                }
                UpdateStatus::Skipped(reason) => {
                    JsonProject::new(&o.project, "skipped", Some(reason.clone()))
                }
            })
            .collect();
        output.summary = JsonSummary {
            total: result.total(),
            updated: result.updated_count(),
            failed: result.failed_count(),
            skipped: result.skipped_count(),
        };

        output
    }

    /// Report for a run stopped by a fatal error, with the outcomes so far.
    #[must_use]
    pub fn from_aborted(context: RunContext<'_>, aborted: &UpdateAborted) -> Self {
        let mut output = Self::from_result(context, &aborted.result);
        output.aborted = Some(aborted.error.to_string());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use crate::updater::ProjectOutcome;

    fn context(filter: &ProjectFilter) -> RunContext<'_> {
        RunContext {
            org_id: "org-1",
            filter,
            frequency: TestFrequency::Weekly,
        }
    }

    #[test]
    fn test_dry_run_report() {
        let filter = ProjectFilter::Category(Category::Sca);
        let projects: Projects = vec![
            Project::new("1", "web", "npm").with_test_frequency("daily"),
            Project::new("2", "api", "maven"),
        ]
        .into();

        let output = JsonOutput::from_dry_run(context(&filter), &projects);
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["dry_run"], true);
        assert_eq!(json["org_id"], "org-1");
        assert_eq!(json["filter"], "open source");
        assert_eq!(json["frequency"], "weekly");
        assert_eq!(json["projects"][0]["status"], "pending");
        assert_eq!(json["projects"][0]["type"], "npm");
        assert_eq!(json["projects"][0]["current_frequency"], "daily");
        assert!(json["projects"][0].get("error").is_none());
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["updated"], 0);
    }

    #[test]
    fn test_result_report() {
        let filter = ProjectFilter::default();
        let result = UpdateResult {
            outcomes: vec![
                ProjectOutcome {
                    project: Project::new("1", "web", "npm"),
                    status: UpdateStatus::Updated,
                },
                ProjectOutcome {
                    project: Project::new("2", "infra", "k8sconfig"),
                    status: UpdateStatus::Failed("HTTP 500".to_string()),
                },
                ProjectOutcome {
                    project: Project::new("3", "image", "apk"),
                    status: UpdateStatus::Skipped("already set to weekly".to_string()),
                },
            ],
        };

        let output = JsonOutput::from_result(context(&filter), &result);

        assert!(!output.dry_run);
        assert_eq!(
            output.summary,
            JsonSummary {
                total: 3,
                updated: 1,
                failed: 1,
                skipped: 1,
            }
        );
        assert_eq!(output.projects[1].status, "failed");
        assert_eq!(output.projects[1].error.as_deref(), Some("HTTP 500"));
        assert_eq!(output.projects[2].status, "skipped");
    }

    #[test]
    fn test_aborted_report() {
        let filter = ProjectFilter::Category(Category::Sca);
        let aborted = UpdateAborted {
            result: UpdateResult {
                outcomes: vec![
                    ProjectOutcome {
                        project: Project::new("1", "web", "npm"),
                        status: UpdateStatus::Updated,
                    },
                    ProjectOutcome {
                        project: Project::new("2", "api", "maven"),
                        status: UpdateStatus::Failed("revoked".to_string()),
                    },
                ],
            },
            error: crate::error::ApiError::from_status(401, "revoked".to_string()),
        };

        let json = serde_json::to_value(JsonOutput::from_aborted(context(&filter), &aborted)).unwrap();

        assert_eq!(json["summary"]["updated"], 1);
        assert_eq!(json["summary"]["failed"], 1);
        assert!(
            json["aborted"]
                .as_str()
                .is_some_and(|reason| reason.contains("HTTP 401"))
        );
    }

    #[test]
    fn test_completed_report_has_no_abort_reason() {
        let filter = ProjectFilter::default();
        let output = JsonOutput::from_result(context(&filter), &UpdateResult::default());

        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("aborted").is_none());
    }
}

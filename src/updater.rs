//! Test frequency update driver.
//!
//! This module fetches the projects matching a filter and applies the new
//! test frequency to them one at a time, recording an outcome per project.
//! A failed update never stops the run, except for an authentication failure,
//! after which no request can succeed. An aborted run still hands back the
//! outcomes gathered so far.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::debug;

use crate::api::SnykApi;
use crate::config::{ExecutionOptions, ProjectFilter};
use crate::error::ApiError;
use crate::filtering::filter_projects;
use crate::project::{Project, Projects};

/// What happened to a single project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The API accepted the new frequency
    Updated,

    /// The update was not applied; the message says why
    Failed(String),

    /// No request was sent; the message says why
    Skipped(String),
}

/// A project together with the result of updating it.
#[derive(Clone, Debug)]
pub struct ProjectOutcome {
    pub project: Project,
    pub status: UpdateStatus,
}

/// Outcomes of an update run, in processing order.
#[derive(Clone, Debug, Default)]
pub struct UpdateResult {
    pub outcomes: Vec<ProjectOutcome>,
}

impl UpdateResult {
    /// Number of projects successfully updated.
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.count(|s| matches!(s, UpdateStatus::Updated))
    }

    /// Number of projects whose update failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, UpdateStatus::Failed(_)))
    }

    /// Number of projects left untouched on purpose.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, UpdateStatus::Skipped(_)))
    }

    /// Number of projects processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// `"<project>: <reason>"` for every failed project.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                UpdateStatus::Failed(reason) => Some(format!("{}: {reason}", o.project)),
                _ => None,
            })
            .collect()
    }

    /// Print the per-project errors and the final counts.
    ///
    /// # Output Format
    ///
    /// ```text
    /// 📊 Update Summary:
    ///   ✅ Successfully updated: 41 projects
    ///   ❌ Failed to update: 1 projects
    ///   🎯 Total projects: 42
    /// ```
    pub fn print_summary(&self) {
        let errors = self.errors();

        if !errors.is_empty() {
            println!("\n{}", "⚠️  Some updates failed:".yellow());
            for error in &errors {
                eprintln!("  {}", error.red());
            }
        }

        println!("\n{}", "📊 Update Summary:".bold());
        println!(
            "  ✅ Successfully updated: {} projects",
            self.updated_count().to_string().green()
        );

        if self.failed_count() > 0 {
            println!(
                "  ❌ Failed to update: {} projects",
                self.failed_count().to_string().red()
            );
        }

        if self.skipped_count() > 0 {
            println!(
                "  ⏭️  Skipped: {} projects",
                self.skipped_count().to_string().yellow()
            );
        }

        println!(
            "  🎯 Total projects: {}",
            self.total().to_string().bright_white().bold()
        );
    }

    fn count(&self, predicate: impl Fn(&UpdateStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }
}

/// A run stopped by a fatal API error.
///
/// `result` holds every project processed before the abort, the project that
/// hit the error (as failed) and the remaining ones (as skipped).
#[derive(Debug, Error)]
#[error("update run aborted")]
pub struct UpdateAborted {
    pub result: UpdateResult,
    #[source]
    pub error: ApiError,
}

/// Drives list and update calls against a [`SnykApi`].
pub struct Updater<'a, A: SnykApi + ?Sized> {
    api: &'a A,

    /// When `true`, hides the progress bar (used by `--json` mode and tests).
    quiet: bool,
}

impl<'a, A: SnykApi + ?Sized> Updater<'a, A> {
    /// Create an updater talking to `api`.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api, quiet: false }
    }

    /// Enable or disable quiet mode (suppresses the progress bar).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// List the organization's projects and keep those matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns the API error if listing fails. Listing failures are always
    /// fatal for a run: there is nothing to update without the list.
    pub fn fetch_matching(
        &self,
        org_id: &str,
        filter: &ProjectFilter,
    ) -> Result<Projects, ApiError> {
        let projects = self.api.list_projects(org_id, &filter.api_types())?;

        Ok(filter_projects(projects, filter).into())
    }

    /// Apply `options.frequency` to every project, one at a time.
    ///
    /// Projects without an ID are recorded as failed. With
    /// `options.skip_unchanged`, projects already at the target frequency are
    /// recorded as skipped without a request.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateAborted`] as soon as the API rejects the token. It
    /// carries the outcomes so far; every other error is recorded against its
    /// project and the run goes on.
    pub fn update_projects(
        &self,
        org_id: &str,
        projects: Projects,
        options: &ExecutionOptions,
    ) -> Result<UpdateResult, UpdateAborted> {
        let total = projects.len();
        let frequency = options.frequency;

        if !self.quiet {
            println!(
                "\n{}",
                format!("🔄 Setting test frequency to {frequency}...").cyan()
            );
        }

        let progress = self.progress_bar(total);
        let mut result = UpdateResult::default();
        let mut fatal: Option<ApiError> = None;

        for (index, project) in projects.into_iter().enumerate() {
            if fatal.is_some() {
                result.outcomes.push(ProjectOutcome {
                    project,
                    status: UpdateStatus::Skipped("not attempted: run aborted".to_string()),
                });
                continue;
            }

            debug!(index = index + 1, total, project = %project, "processing project");

            let status = match project.id.as_deref() {
                None => UpdateStatus::Failed("no project ID found".to_string()),
                Some(_)
                    if options.skip_unchanged
                        && project.test_frequency.as_deref() == Some(frequency.as_str()) =>
                {
                    UpdateStatus::Skipped(format!("already set to {frequency}"))
                }
                Some(id) => match self.api.update_frequency(org_id, id, frequency) {
                    Ok(()) => UpdateStatus::Updated,
                    Err(e) => {
                        debug!(project = %project, error = %e, "update failed");
                        let status = UpdateStatus::Failed(e.to_string());
                        if e.is_fatal() {
                            fatal = Some(e);
                        }
                        status
                    }
                },
            };

            progress.println(format!(
                "[{}/{total}] {} {}",
                index + 1,
                project.name,
                status_line(&status)
            ));
            progress.set_message(project.name.clone());
            progress.inc(1);
            result.outcomes.push(ProjectOutcome { project, status });
        }

        if let Some(error) = fatal {
            progress.abandon_with_message("❌ Aborted");
            return Err(UpdateAborted { result, error });
        }

        progress.finish_with_message("✅ Updates complete");

        Ok(result)
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        progress
    }
}

/// Colored outcome for the per-project progress line.
fn status_line(status: &UpdateStatus) -> String {
    match status {
        UpdateStatus::Updated => "✅ updated".green().to_string(),
        UpdateStatus::Failed(reason) => format!("❌ {reason}").red().to_string(),
        UpdateStatus::Skipped(reason) => format!("⏭️  {reason}").yellow().to_string(),
    }
}

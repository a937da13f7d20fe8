//! Collection management for Snyk projects.
//!
//! This module provides the `Projects` struct which wraps the projects
//! selected for an update run and offers summary reporting and interactive
//! selection on top of them.

use anyhow::Result;
use colored::Colorize;
use inquire::MultiSelect;

use crate::classifier::Category;

use super::Project;

/// A collection of Snyk projects with associated operations.
#[derive(Clone, Debug, Default)]
pub struct Projects(Vec<Project>);

impl From<Vec<Project>> for Projects {
    fn from(projects: Vec<Project>) -> Self {
        Self(projects)
    }
}

impl IntoIterator for Projects {
    type Item = Project;
    type IntoIter = std::vec::IntoIter<Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Projects {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Per-category project counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub sca: usize,
    pub iac: usize,
    pub container: usize,
    pub other: usize,
}

impl Projects {
    /// Get the number of projects in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection holds no projects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the projects as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Project] {
        &self.0
    }

    /// Count projects per category.
    #[must_use]
    pub fn category_counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();

        for project in &self.0 {
            match project.category() {
                Some(Category::Sca) => counts.sca += 1,
                Some(Category::Iac) => counts.iac += 1,
                Some(Category::Container) => counts.container += 1,
                Some(Category::All) | None => counts.other += 1,
            }
        }

        counts
    }

    /// Present a multi-select prompt for choosing which projects to update.
    ///
    /// All projects are selected by default.
    ///
    /// # Errors
    ///
    /// Fails if the terminal is not interactive or the user cancels the prompt.
    pub fn interactive_selection(&self) -> Result<Self> {
        let defaults: Vec<usize> = (0..self.0.len()).collect();

        let selected = MultiSelect::new("Select projects to update:", self.0.clone())
            .with_default(&defaults)
            .with_page_size(15)
            .prompt()?;

        Ok(Self(selected))
    }

    /// Print how many matching projects fall into each category.
    ///
    /// # Output Format
    ///
    /// ```text
    ///   📦 5 open source projects
    ///   🏗️ 2 IaC projects
    ///   🐳 1 container projects
    ///   🎯 Total matching projects: 8
    /// ```
    pub fn print_summary(&self) {
        let counts = self.category_counts();

        for (icon, count, label) in [
            ("📦", counts.sca, Category::Sca.label()),
            ("🏗️", counts.iac, Category::Iac.label()),
            ("🐳", counts.container, Category::Container.label()),
            ("🔍", counts.other, "other"),
        ] {
            if count > 0 {
                println!(
                    "  {icon} {} {label} projects",
                    count.to_string().bright_white()
                );
            }
        }

        println!(
            "  🎯 Total matching projects: {}",
            self.0.len().to_string().bright_green().bold()
        );
    }

    /// Print every project on its own line, as used by dry runs.
    pub fn print_list(&self) {
        for project in &self.0 {
            println!("  {project}");
        }
    }
}

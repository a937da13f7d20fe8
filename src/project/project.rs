//! Core project data structure.

use std::fmt::{Display, Formatter, Result};

use crate::classifier::{Category, classify};

/// Name shown for projects the API returned without one.
pub const UNKNOWN_NAME: &str = "Unknown Name";

/// A Snyk project, as far as this tool cares about it.
///
/// Only a transient copy: the project itself lives in the Snyk service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    /// Project ID. Absent only when the API returned a malformed entry.
    pub id: Option<String>,

    /// Display name of the project
    pub name: String,

    /// Snyk project type (`npm`, `terraformconfig`, `dockerfile`, ...)
    pub project_type: String,

    /// Current recurring test frequency, if the API reported one
    pub test_frequency: Option<String>,
}

impl Project {
    /// Create a project with an ID and no known test frequency.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        project_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            project_type: project_type.into(),
            test_frequency: None,
        }
    }

    /// Set the current test frequency.
    #[must_use]
    pub fn with_test_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.test_frequency = Some(frequency.into());
        self
    }

    /// The category this project's type falls into, if any.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        classify(&self.project_type)
    }

    /// Icon for the project's category.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self.category() {
            Some(Category::Sca) => "📦",
            Some(Category::Iac) => "🏗️",
            Some(Category::Container) => "🐳",
            Some(Category::All) | None => "🔍",
        }
    }
}

impl Display for Project {
    /// Format the project with its category icon, name, type and ID.
    ///
    /// - `📦 web-frontend [npm] (ID: 4a1c...)`
    /// - `🔍 broken-entry [sast] (no ID)`
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let icon = self.icon();

        match &self.id {
            Some(id) => write!(f, "{icon} {} [{}] (ID: {id})", self.name, self.project_type),
            None => write!(f, "{icon} {} [{}] (no ID)", self.name, self.project_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_category() {
        assert_eq!(Project::new("1", "a", "npm").category(), Some(Category::Sca));
        assert_eq!(
            Project::new("2", "b", "k8sconfig").category(),
            Some(Category::Iac)
        );
        assert_eq!(
            Project::new("3", "c", "dockerfile").category(),
            Some(Category::Container)
        );
        assert_eq!(Project::new("4", "d", "sast").category(), None);
    }

    #[test]
    fn test_project_display() {
        let project = Project::new("abc", "web", "npm");
        assert_eq!(project.to_string(), "📦 web [npm] (ID: abc)");

        let mut broken = Project::new("x", "broken", "sast");
        broken.id = None;
        assert_eq!(broken.to_string(), "🔍 broken [sast] (no ID)");
    }

    #[test]
    fn test_with_test_frequency() {
        let project = Project::new("abc", "web", "npm").with_test_frequency("weekly");
        assert_eq!(project.test_frequency.as_deref(), Some("weekly"));
    }
}

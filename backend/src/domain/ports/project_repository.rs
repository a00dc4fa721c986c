//! Port for project storage.

use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::domain::project::{
    NewProject, Project, ProjectChanges, ProjectStatus, ProjectStatusCount,
};

/// Port for reading and mutating projects.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectRepository: Send + Sync {
    /// Create a project and return it with its assigned id.
    fn insert(&self, project: &NewProject) -> Result<Project, RepositoryError>;

    /// All projects, newest first.
    fn list(&self) -> Result<Vec<Project>, RepositoryError>;

    /// Apply a partial update and return the stored row.
    fn update(&self, project_id: i32, changes: &ProjectChanges)
    -> Result<Project, RepositoryError>;

    /// Remove a project permanently.
    fn delete(&self, project_id: i32) -> Result<(), RepositoryError>;

    /// Project tallies per lifecycle state, in canonical state order.
    fn status_counts(&self) -> Result<Vec<ProjectStatusCount>, RepositoryError>;
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryProjectRepository {
    rows: Mutex<Vec<Project>>,
}

impl MemoryProjectRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut Vec<Project>) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl ProjectRepository for MemoryProjectRepository {
    fn insert(&self, project: &NewProject) -> Result<Project, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let project = Project {
                id,
                name: project.name.clone(),
                client: project.client.clone(),
                start_date: project.start_date,
                end_date: project.end_date,
                status: project.status,
                total_budget: project.total_budget,
                currency: project.currency.clone(),
                company_id: None,
                branch_id: None,
                client_id: project.client_id,
                description: project.description.clone(),
                progress: project.progress,
            };
            rows.push(project.clone());
            project
        }))
    }

    fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut projects = rows.clone();
            projects.sort_by_key(|p| std::cmp::Reverse(p.id));
            projects
        }))
    }

    fn update(
        &self,
        project_id: i32,
        changes: &ProjectChanges,
    ) -> Result<Project, RepositoryError> {
        self.with_rows(|rows| {
            let project = rows
                .iter_mut()
                .find(|p| p.id == project_id)
                .ok_or_else(|| RepositoryError::missing("project", project_id))?;
            if let Some(status) = changes.status {
                project.status = status;
            }
            if let Some(progress) = changes.progress {
                project.progress = progress;
            }
            if let Some(budget) = changes.total_budget {
                project.total_budget = budget;
            }
            Ok(project.clone())
        })
    }

    fn delete(&self, project_id: i32) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let before = rows.len();
            rows.retain(|p| p.id != project_id);
            if rows.len() == before {
                return Err(RepositoryError::missing("project", project_id));
            }
            Ok(())
        })
    }

    fn status_counts(&self) -> Result<Vec<ProjectStatusCount>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            ProjectStatus::ALL
                .iter()
                .map(|status| ProjectStatusCount {
                    status: *status,
                    count: rows.iter().filter(|p| p.status == *status).count() as i64,
                })
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn repo() -> MemoryProjectRepository {
        let repo = MemoryProjectRepository::new();
        repo.insert(&NewProject::new("Ring Road Extension")).unwrap();
        let mut second = NewProject::new("Harbour Crane Pad");
        second.status = ProjectStatus::Active;
        repo.insert(&second).unwrap();
        repo
    }

    #[rstest]
    fn list_returns_newest_first(repo: MemoryProjectRepository) {
        let projects = repo.list().unwrap();
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Harbour Crane Pad", "Ring Road Extension"]);
    }

    #[rstest]
    fn update_applies_only_provided_fields(repo: MemoryProjectRepository) {
        let changes = ProjectChanges {
            progress: Some(40),
            ..ProjectChanges::default()
        };

        let updated = repo.update(1, &changes).unwrap();
        assert_eq!(updated.progress, 40);
        assert_eq!(updated.status, ProjectStatus::Planned);
        assert_eq!(updated.name, "Ring Road Extension");
    }

    #[rstest]
    fn update_missing_project_reports_missing(repo: MemoryProjectRepository) {
        let err = repo.update(42, &ProjectChanges::default()).unwrap_err();
        assert_eq!(err, RepositoryError::missing("project", 42_i32));
    }

    #[rstest]
    fn status_counts_cover_every_state(repo: MemoryProjectRepository) {
        let counts = repo.status_counts().unwrap();
        assert_eq!(counts.len(), ProjectStatus::ALL.len());

        let planned = counts
            .iter()
            .find(|c| c.status == ProjectStatus::Planned)
            .unwrap();
        assert_eq!(planned.count, 1);
        let active = counts
            .iter()
            .find(|c| c.status == ProjectStatus::Active)
            .unwrap();
        assert_eq!(active.count, 1);
    }
}

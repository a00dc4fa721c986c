//! Project management screen: the portfolio register.

use std::sync::Arc;

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::ProjectRepository;
use crate::domain::project::{NewProject, Project, ProjectChanges, ProjectStatusCount};
use crate::domain::session::Session;

fn check_progress(progress: i32) -> Result<(), ModuleError> {
    if (0..=100).contains(&progress) {
        Ok(())
    } else {
        Err(ValidationError::out_of_range("progress", "must be between 0 and 100").into())
    }
}

/// Service behind the project management screen.
#[derive(Clone)]
pub struct ProjectService<R> {
    repo: Arc<R>,
}

impl<R> ProjectService<R>
where
    R: ProjectRepository,
{
    /// Create a project service over the given store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a project.
    pub fn create(&self, session: &Session, project: NewProject) -> Result<Project, ModuleError> {
        authorize(session, Screen::Projects)?;
        require_text("name", &project.name)?;
        check_progress(project.progress)?;
        Ok(self.repo.insert(&project)?)
    }

    /// The portfolio, newest first.
    pub fn list(&self, session: &Session) -> Result<Vec<Project>, ModuleError> {
        authorize(session, Screen::Projects)?;
        Ok(self.repo.list()?)
    }

    /// Apply a partial update and return the stored row.
    pub fn update(
        &self,
        session: &Session,
        project_id: i32,
        changes: ProjectChanges,
    ) -> Result<Project, ModuleError> {
        authorize(session, Screen::Projects)?;
        if let Some(progress) = changes.progress {
            check_progress(progress)?;
        }
        Ok(self.repo.update(project_id, &changes)?)
    }

    /// Remove a project permanently.
    pub fn remove(&self, session: &Session, project_id: i32) -> Result<(), ModuleError> {
        authorize(session, Screen::Projects)?;
        Ok(self.repo.delete(project_id)?)
    }

    /// Portfolio tallies per lifecycle state.
    pub fn status_summary(
        &self,
        session: &Session,
    ) -> Result<Vec<ProjectStatusCount>, ModuleError> {
        authorize(session, Screen::Projects)?;
        Ok(self.repo.status_counts()?)
    }
}

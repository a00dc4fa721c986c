//! Database-backed `ProjectRepository` implementation using Diesel.

use diesel::prelude::*;

use crate::domain::ports::{ProjectRepository, RepositoryError};
use crate::domain::project::{
    NewProject, Project, ProjectChanges, ProjectStatus, ProjectStatusCount,
};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error, parse_label};
use super::models::{NewProjectRow, ProjectRow, ProjectRowChanges};
use super::pool::DbPool;
use super::schema::projects;

/// Diesel-backed implementation of the project repository port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a stored row into a domain project.
fn row_to_project(row: ProjectRow) -> Result<Project, RepositoryError> {
    let ProjectRow {
        id,
        name,
        client,
        start_date,
        end_date,
        status,
        total_budget,
        currency,
        company_id,
        branch_id,
        client_id,
        description,
        progress,
    } = row;

    Ok(Project {
        id,
        name,
        client,
        start_date,
        end_date,
        status: parse_label(&status)?,
        total_budget,
        currency,
        company_id,
        branch_id,
        client_id,
        description,
        progress,
    })
}

impl ProjectRepository for DieselProjectRepository {
    fn insert(&self, project: &NewProject) -> Result<Project, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewProjectRow {
                    name: &project.name,
                    client: project.client.as_deref(),
                    start_date: project.start_date,
                    end_date: project.end_date,
                    status: project.status.as_str(),
                    total_budget: project.total_budget,
                    currency: &project.currency,
                    client_id: project.client_id,
                    description: project.description.as_deref(),
                    progress: project.progress,
                };
                diesel::insert_into(projects::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                projects::table
                    .find(id)
                    .select(ProjectRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_project(row)
    }

    fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .order(projects::id.desc())
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_project).collect()
    }

    fn update(
        &self,
        project_id: i32,
        changes: &ProjectChanges,
    ) -> Result<Project, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        // Diesel rejects an empty changeset, so skip the UPDATE when every
        // field is None and fall through to the re-read.
        let has_changes =
            changes.status.is_some() || changes.progress.is_some() || changes.total_budget.is_some();
        if has_changes {
            let row_changes = ProjectRowChanges {
                status: changes.status.map(ProjectStatus::as_str),
                progress: changes.progress,
                total_budget: changes.total_budget,
            };
            let affected = diesel::update(projects::table.find(project_id))
                .set(&row_changes)
                .execute(&mut conn)
                .map_err(map_diesel_error)?;
            if affected == 0 {
                return Err(RepositoryError::missing("project", project_id));
            }
        }
        let row = projects::table
            .find(project_id)
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| RepositoryError::missing("project", project_id))?;
        row_to_project(row)
    }

    fn delete(&self, project_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::delete(projects::table.find(project_id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("project", project_id));
        }
        Ok(())
    }

    fn status_counts(&self) -> Result<Vec<ProjectStatusCount>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let labels: Vec<String> = projects::table
            .select(projects::status)
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(ProjectStatus::ALL
            .iter()
            .map(|status| ProjectStatusCount {
                status: *status,
                count: labels.iter().filter(|label| *label == status.as_str()).count() as i64,
            })
            .collect())
    }
}

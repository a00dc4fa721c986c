//! Planning and estimation screen: cost breakdowns against project budgets.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::error::ModuleError;
use crate::domain::menu::Screen;
use crate::domain::modules::authorize;
use crate::domain::planning::{
    EstimateInputs, EstimateSummary, Milestone, estimate, milestone_plan,
};
use crate::domain::ports::ProjectRepository;
use crate::domain::project::Project;
use crate::domain::session::Session;

/// Service behind the planning and estimation screen.
///
/// Estimation itself is pure arithmetic; the store is only consulted to
/// offer the project picker and to compare an estimate against a chosen
/// project's target budget.
#[derive(Clone)]
pub struct PlanningService<R> {
    projects: Arc<R>,
}

impl<R> PlanningService<R>
where
    R: ProjectRepository,
{
    /// Create a planning service over the project store.
    pub fn new(projects: Arc<R>) -> Self {
        Self { projects }
    }

    /// Projects offered by the estimation picker, newest first.
    pub fn projects(&self, session: &Session) -> Result<Vec<Project>, ModuleError> {
        authorize(session, Screen::Planning)?;
        Ok(self.projects.list()?)
    }

    /// Compute an estimation summary from entered cost components.
    pub fn estimate(
        &self,
        session: &Session,
        inputs: EstimateInputs,
    ) -> Result<EstimateSummary, ModuleError> {
        authorize(session, Screen::Planning)?;
        Ok(estimate(inputs)?)
    }

    /// Headroom left in a project's budget after an estimate; negative when
    /// the estimate overshoots.
    pub fn budget_variance(
        &self,
        session: &Session,
        project_id: i32,
        summary: &EstimateSummary,
    ) -> Result<f64, ModuleError> {
        authorize(session, Screen::Planning)?;
        let project = self
            .projects
            .list()?
            .into_iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| ModuleError::not_found("project", project_id))?;
        Ok(summary.variance_against(project.total_budget))
    }

    /// The standard four-phase timeline from a start date.
    pub fn milestones(
        &self,
        session: &Session,
        project_start: NaiveDate,
    ) -> Result<Vec<Milestone>, ModuleError> {
        authorize(session, Screen::Planning)?;
        Ok(milestone_plan(project_start))
    }
}

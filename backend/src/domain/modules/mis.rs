//! Info. System (MIS) screen: cross-module summaries and the export centre.
//!
//! The one screen every role can open. It reads what the other modules
//! wrote and never writes anything itself.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::audit::AuditRecord;
use crate::domain::audit_trail::AuditTrail;
use crate::domain::error::ModuleError;
use crate::domain::finance::FinanceTotals;
use crate::domain::menu::Screen;
use crate::domain::modules::authorize;
use crate::domain::ports::{FinanceRepository, ProjectRepository};
use crate::domain::project::ProjectStatus;
use crate::domain::session::Session;
use crate::export::{ExportSource, Exporter};

/// How many trail records the recent activity panel shows.
pub const RECENT_ACTIVITY_LIMIT: i64 = 100;

/// One row of the project progress report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProgress {
    /// Project name.
    pub name: String,
    /// Target budget.
    pub total_budget: f64,
    /// Lifecycle state.
    pub status: ProjectStatus,
    /// Completion percentage, 0 to 100.
    pub progress: i32,
}

/// Service behind the MIS screen.
#[derive(Clone)]
pub struct MisService<F, P> {
    finance: Arc<F>,
    projects: Arc<P>,
    trail: AuditTrail,
    exporter: Exporter,
}

impl<F, P> MisService<F, P>
where
    F: FinanceRepository,
    P: ProjectRepository,
{
    /// Create an MIS service over the ledgers, the project register, the
    /// trail, and the export pathway.
    pub fn new(finance: Arc<F>, projects: Arc<P>, trail: AuditTrail, exporter: Exporter) -> Self {
        Self {
            finance,
            projects,
            trail,
            exporter,
        }
    }

    /// Income, expense, and net across the whole ledger.
    pub fn financial_summary(&self, session: &Session) -> Result<FinanceTotals, ModuleError> {
        authorize(session, Screen::ManagementInformation)?;
        Ok(self.finance.totals()?)
    }

    /// One progress row per project, newest first.
    pub fn project_progress(&self, session: &Session) -> Result<Vec<ProjectProgress>, ModuleError> {
        authorize(session, Screen::ManagementInformation)?;
        let rows = self
            .projects
            .list()?
            .into_iter()
            .map(|project| ProjectProgress {
                name: project.name,
                total_budget: project.total_budget,
                status: project.status,
                progress: project.progress,
            })
            .collect();
        Ok(rows)
    }

    /// The newest trail records, capped at [`RECENT_ACTIVITY_LIMIT`].
    pub fn recent_activity(&self, session: &Session) -> Result<Vec<AuditRecord>, ModuleError> {
        authorize(session, Screen::ManagementInformation)?;
        self.trail.recent(RECENT_ACTIVITY_LIMIT)
    }

    /// Render one source as delimited text for download.
    pub fn export(&self, session: &Session, source: ExportSource) -> Result<String, ModuleError> {
        authorize(session, Screen::ManagementInformation)?;
        Ok(self.exporter.export(source)?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::finance::{NewFinanceRecord, TransactionKind};
    use crate::domain::ports::{
        MemoryAuditLog, MemoryCrmRepository, MemoryFinanceRepository, MemoryInventoryRepository,
        MemoryProcurementRepository, MemoryProjectRepository, MemoryWorkforceRepository,
    };
    use crate::domain::project::NewProject;
    use crate::domain::user::Role;
    use crate::test_support::{fixture_clock, fixture_today, session_as};

    type Service = MisService<MemoryFinanceRepository, MemoryProjectRepository>;

    #[fixture]
    fn service() -> Service {
        let finance = Arc::new(MemoryFinanceRepository::new());
        let projects = Arc::new(MemoryProjectRepository::new());
        let trail = AuditTrail::new(Arc::new(MemoryAuditLog::new()), fixture_clock());
        let exporter = Exporter::new(
            projects.clone(),
            Arc::new(MemoryCrmRepository::new()),
            Arc::new(MemoryProcurementRepository::new()),
            Arc::new(MemoryInventoryRepository::new()),
            finance.clone(),
            Arc::new(MemoryWorkforceRepository::new()),
            Arc::new(MemoryAuditLog::new()),
        );
        MisService::new(finance, projects, trail, exporter)
    }

    fn entry(kind: TransactionKind, amount: f64) -> NewFinanceRecord {
        NewFinanceRecord::new(fixture_today(), kind, amount)
    }

    #[rstest]
    #[case::owner(Role::Owner)]
    #[case::director(Role::Director)]
    #[case::accounting(Role::AccountingStaff)]
    fn the_summary_is_open_to_every_role(service: Service, #[case] role: Role) {
        service
            .finance
            .post_entry(&entry(TransactionKind::Income, 2_000.0))
            .unwrap();
        service
            .finance
            .post_entry(&entry(TransactionKind::Expense, 900.0))
            .unwrap();

        let totals = service.financial_summary(&session_as(role)).unwrap();

        assert_eq!(totals.income, 2_000.0);
        assert_eq!(totals.expense, 900.0);
        assert_eq!(totals.net(), 1_100.0);
    }

    #[rstest]
    fn progress_rows_mirror_the_register(service: Service) {
        let mut bridge = NewProject::new("Metro Bridge");
        bridge.total_budget = 500_000.0;
        bridge.progress = 40;
        service.projects.insert(&bridge).unwrap();
        service.projects.insert(&NewProject::new("Depot")).unwrap();

        let rows = service
            .project_progress(&session_as(Role::Director))
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Depot");
        assert_eq!(
            rows[1],
            ProjectProgress {
                name: "Metro Bridge".to_owned(),
                total_budget: 500_000.0,
                status: ProjectStatus::Planned,
                progress: 40,
            }
        );
    }

    #[rstest]
    fn recent_activity_reads_newest_first(service: Service) {
        service.trail.record(Some(1), "Navigation", None);
        service.trail.record(Some(1), "Logout", None);

        let records = service
            .recent_activity(&session_as(Role::AccountingStaff))
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, "Logout");
        assert_eq!(RECENT_ACTIVITY_LIMIT, 100);
    }

    #[rstest]
    fn the_export_centre_serves_any_source(service: Service) {
        service.projects.insert(&NewProject::new("Metro Bridge")).unwrap();

        let text = service
            .export(&session_as(Role::Owner), ExportSource::Projects)
            .unwrap();

        assert!(text.starts_with("id,name,"));
        assert!(text.contains("Metro Bridge"));
        assert_eq!(ExportSource::Projects.file_name(), "projects.csv");
    }

}

//! Delimited-text exports for the MIS export centre and the ops binary.
//!
//! Each supported source projects one store's rows into a [`tabular::Table`]
//! and renders it as RFC 4180 text. Money renders with two decimals, absent
//! optional fields render as empty cells, and every export leads with a
//! header row. Exports never mutate the store.

use std::sync::Arc;

use tabular::{Table, TabularError, format};
use thiserror::Error;

use crate::domain::audit::AuditQuery;
use crate::domain::error::{ModuleError, StorageError};
use crate::domain::labels::define_label_enum;
use crate::domain::ports::{
    AuditLog, CrmRepository, FinanceRepository, InventoryRepository, ProcurementRepository,
    ProjectRepository, RepositoryError, WorkforceRepository,
};

define_label_enum! {
    /// Tables the export pathway can serialize.
    ///
    /// The label doubles as the download stem, so it stays lowercase.
    pub enum ExportSource as "export source" {
        Projects => "projects",
        Clients => "clients",
        Vendors => "vendors",
        PurchaseOrders => "purchase_orders",
        InventoryItems => "inventory_items",
        FinanceRecords => "finance_records",
        Employees => "employees",
        AuditRecords => "audit_records",
    }
}

impl ExportSource {
    /// Suggested download name for this source.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.csv", self.as_str())
    }
}

/// Failures raised while assembling or rendering an export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// A source store could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The table could not be shaped or rendered.
    #[error(transparent)]
    Table(#[from] TabularError),
}

impl From<RepositoryError> for ExportError {
    fn from(error: RepositoryError) -> Self {
        Self::Storage(error.into())
    }
}

impl From<ExportError> for ModuleError {
    fn from(error: ExportError) -> Self {
        match error {
            ExportError::Storage(storage) => Self::Storage(storage),
            ExportError::Table(table) => Self::Storage(StorageError::backend(table.to_string())),
        }
    }
}

/// Read-only projection of the stores into delimited text.
#[derive(Clone)]
pub struct Exporter {
    projects: Arc<dyn ProjectRepository>,
    crm: Arc<dyn CrmRepository>,
    procurement: Arc<dyn ProcurementRepository>,
    inventory: Arc<dyn InventoryRepository>,
    finance: Arc<dyn FinanceRepository>,
    workforce: Arc<dyn WorkforceRepository>,
    trail: Arc<dyn AuditLog>,
}

impl Exporter {
    /// Create an exporter over every source store.
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        crm: Arc<dyn CrmRepository>,
        procurement: Arc<dyn ProcurementRepository>,
        inventory: Arc<dyn InventoryRepository>,
        finance: Arc<dyn FinanceRepository>,
        workforce: Arc<dyn WorkforceRepository>,
        trail: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            projects,
            crm,
            procurement,
            inventory,
            finance,
            workforce,
            trail,
        }
    }

    /// Render one source as delimited text, header row first.
    pub fn export(&self, source: ExportSource) -> Result<String, ExportError> {
        let table = match source {
            ExportSource::Projects => self.project_rows()?,
            ExportSource::Clients => self.client_rows()?,
            ExportSource::Vendors => self.vendor_rows()?,
            ExportSource::PurchaseOrders => self.order_rows()?,
            ExportSource::InventoryItems => self.inventory_rows()?,
            ExportSource::FinanceRecords => self.finance_rows()?,
            ExportSource::Employees => self.employee_rows()?,
            ExportSource::AuditRecords => self.trail_rows()?,
        };
        Ok(table.to_csv()?)
    }

    fn project_rows(&self) -> Result<Table, ExportError> {
        let mut table = Table::new([
            "id",
            "name",
            "client",
            "status",
            "start_date",
            "end_date",
            "total_budget",
            "currency",
            "progress",
        ])?;
        for project in self.projects.list()? {
            table.push_row([
                project.id.to_string(),
                project.name,
                format::optional(project.client.as_ref()),
                project.status.as_str().to_owned(),
                format::optional(project.start_date.as_ref()),
                format::optional(project.end_date.as_ref()),
                format::money(project.total_budget),
                project.currency,
                project.progress.to_string(),
            ])?;
        }
        Ok(table)
    }

    fn client_rows(&self) -> Result<Table, ExportError> {
        let mut table = Table::new([
            "id", "name", "company", "email", "phone", "address", "status", "created_at",
        ])?;
        for client in self.crm.list_clients()? {
            table.push_row([
                client.id.to_string(),
                client.name,
                format::optional(client.company.as_ref()),
                format::optional(client.email.as_ref()),
                format::optional(client.phone.as_ref()),
                format::optional(client.address.as_ref()),
                client.status.as_str().to_owned(),
                client.created_at.to_string(),
            ])?;
        }
        Ok(table)
    }

    fn vendor_rows(&self) -> Result<Table, ExportError> {
        let mut table =
            Table::new(["id", "name", "contact_person", "phone", "email", "rating"])?;
        for vendor in self.procurement.list_vendors()? {
            table.push_row([
                vendor.id.to_string(),
                vendor.name,
                format::optional(vendor.contact_person.as_ref()),
                format::optional(vendor.phone.as_ref()),
                format::optional(vendor.email.as_ref()),
                vendor.rating.to_string(),
            ])?;
        }
        Ok(table)
    }

    fn order_rows(&self) -> Result<Table, ExportError> {
        let mut table = Table::new([
            "id",
            "vendor_id",
            "order_date",
            "expected_delivery",
            "total_amount",
            "currency",
            "status",
        ])?;
        for order in self.procurement.list_orders()? {
            table.push_row([
                order.id.to_string(),
                format::optional(order.vendor_id.as_ref()),
                order.order_date.to_string(),
                format::optional(order.expected_delivery.as_ref()),
                format::money(order.total_amount),
                order.currency,
                order.status.as_str().to_owned(),
            ])?;
        }
        Ok(table)
    }

    fn inventory_rows(&self) -> Result<Table, ExportError> {
        let mut table = Table::new([
            "id",
            "name",
            "category",
            "current_stock",
            "unit",
            "min_stock_alert",
            "location",
            "last_updated",
        ])?;
        for item in self.inventory.list()? {
            table.push_row([
                item.id.to_string(),
                item.name,
                format::optional(item.category.as_ref()),
                item.current_stock.to_string(),
                format::optional(item.unit.as_ref()),
                item.min_stock_alert.to_string(),
                format::optional(item.location.as_ref()),
                item.last_updated.to_string(),
            ])?;
        }
        Ok(table)
    }

    fn finance_rows(&self) -> Result<Table, ExportError> {
        let mut table = Table::new([
            "id",
            "date",
            "kind",
            "category",
            "amount",
            "currency",
            "description",
            "payment_method",
        ])?;
        for record in self.finance.list_entries()? {
            table.push_row([
                record.id.to_string(),
                record.date.to_string(),
                record.kind.as_str().to_owned(),
                format::optional(record.category.as_ref()),
                format::money(record.amount),
                record.currency,
                format::optional(record.description.as_ref()),
                format::optional(record.payment_method.as_ref()),
            ])?;
        }
        Ok(table)
    }

    fn employee_rows(&self) -> Result<Table, ExportError> {
        let mut table = Table::new([
            "id",
            "name",
            "role",
            "department",
            "joining_date",
            "salary",
            "contract_type",
            "active",
        ])?;
        for employee in self.workforce.list_employees(false)? {
            table.push_row([
                employee.id.to_string(),
                employee.name,
                format::optional(employee.role.as_ref()),
                format::optional(employee.department.as_ref()),
                format::optional(employee.joining_date.as_ref()),
                format::money(employee.salary),
                format::optional(employee.contract_type.as_ref()),
                format::flag(employee.active).to_owned(),
            ])?;
        }
        Ok(table)
    }

    /// The trail export mirrors the compliance screen's default view.
    fn trail_rows(&self) -> Result<Table, ExportError> {
        let mut table = Table::new(["id", "user_id", "action", "details", "timestamp"])?;
        for record in self.trail.query(&AuditQuery::default())? {
            table.push_row([
                record.id.to_string(),
                format::optional(record.user_id.as_ref()),
                record.action,
                format::optional(record.details.as_ref()),
                record.timestamp.to_string(),
            ])?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{
        MemoryAuditLog, MemoryCrmRepository, MemoryFinanceRepository, MemoryInventoryRepository,
        MemoryProcurementRepository, MemoryProjectRepository, MemoryWorkforceRepository,
        NewAuditRecord,
    };
    use crate::domain::project::NewProject;
    use crate::domain::workforce::NewEmployee;
    use crate::test_support::fixture_now;

    struct Stores {
        projects: Arc<MemoryProjectRepository>,
        workforce: Arc<MemoryWorkforceRepository>,
        trail: Arc<MemoryAuditLog>,
        exporter: Exporter,
    }

    #[fixture]
    fn stores() -> Stores {
        let projects = Arc::new(MemoryProjectRepository::new());
        let workforce = Arc::new(MemoryWorkforceRepository::new());
        let trail = Arc::new(MemoryAuditLog::new());
        let exporter = Exporter::new(
            projects.clone(),
            Arc::new(MemoryCrmRepository::new()),
            Arc::new(MemoryProcurementRepository::new()),
            Arc::new(MemoryInventoryRepository::new()),
            Arc::new(MemoryFinanceRepository::new()),
            workforce.clone(),
            trail.clone(),
        );
        Stores {
            projects,
            workforce,
            trail,
            exporter,
        }
    }

    #[rstest]
    fn every_source_renders_a_header_row(stores: Stores) {
        for source in ExportSource::ALL {
            let text = stores.exporter.export(*source).unwrap();
            assert_eq!(text.lines().count(), 1, "source {source} should be header only");
            assert!(text.ends_with('\n'));
        }
    }

    #[rstest]
    fn money_and_optionals_follow_the_conventions(stores: Stores) {
        let mut project = NewProject::new("Metro Bridge");
        project.total_budget = 1250.5;
        project.progress = 40;
        stores.projects.insert(&project).unwrap();

        let text = stores.exporter.export(ExportSource::Projects).unwrap();

        assert_eq!(
            text,
            "id,name,client,status,start_date,end_date,total_budget,currency,progress\n\
             1,Metro Bridge,,Planned,,,1250.50,INR,40\n"
        );
    }

    #[rstest]
    fn employees_render_active_as_yes_no(stores: Stores) {
        stores
            .workforce
            .insert_employee(&NewEmployee::new("Site Foreman"))
            .unwrap();

        let text = stores.exporter.export(ExportSource::Employees).unwrap();

        assert_eq!(
            text,
            "id,name,role,department,joining_date,salary,contract_type,active\n\
             1,Site Foreman,,,,0.00,,Yes\n"
        );
    }

    #[rstest]
    fn the_trail_export_reads_newest_first(stores: Stores) {
        for action in ["Navigation", "Logout"] {
            stores
                .trail
                .append(&NewAuditRecord {
                    user_id: Some(1),
                    action: action.to_owned(),
                    details: None,
                    timestamp: fixture_now(),
                })
                .unwrap();
        }

        let text = stores.exporter.export(ExportSource::AuditRecords).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Logout"));
        assert!(lines[2].contains("Navigation"));
    }

    #[rstest]
    fn file_names_carry_the_source_stem() {
        assert_eq!(ExportSource::PurchaseOrders.file_name(), "purchase_orders.csv");
        assert_eq!(
            "audit_records".parse::<ExportSource>(),
            Ok(ExportSource::AuditRecords)
        );
    }

    #[rstest]
    fn export_failures_fold_into_module_errors() {
        let storage: ModuleError =
            ExportError::from(StorageError::connection_failed("pool down")).into();
        assert_eq!(
            storage,
            ModuleError::Storage(StorageError::connection_failed("pool down"))
        );

        let table: ModuleError = ExportError::Table(TabularError::EmptyHeader).into();
        assert_eq!(
            table,
            ModuleError::Storage(StorageError::backend(
                "table header must contain at least one column"
            ))
        );
    }
}

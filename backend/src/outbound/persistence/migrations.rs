//! Schema creation and column additions for both supported backends.
//!
//! There is no migration journal: every statement is existence-checked, so
//! [`run`] is safe to rerun and repairs a crash partway through. Table
//! creation uses `CREATE TABLE IF NOT EXISTS` with the primary-key spelling
//! the backend expects; the later column additions bring databases created
//! by earlier releases up to the multi-company schema.

use diesel::prelude::*;
use diesel::sql_query;
use tracing::{debug, info};

use super::pool::{AnyConnection, DbPool, PoolError};

/// Failures raised while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// No connection could be checked out to run the migrations.
    #[error("migration connection failed: {message}")]
    Connection {
        /// Driver-reported reason.
        message: String,
    },
    /// A DDL statement was rejected by the backend.
    #[error("migration statement failed: {message}")]
    Statement {
        /// Driver-reported reason.
        message: String,
    },
}

impl MigrationError {
    fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    fn statement(message: impl Into<String>) -> Self {
        Self::Statement {
            message: message.into(),
        }
    }
}

impl From<PoolError> for MigrationError {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::connection(message)
            }
        }
    }
}

/// Columns added after the first release, applied to databases that predate
/// them. Freshly created tables already include every column here.
const COLUMN_ADDITIONS: &[(&str, &str, &str)] = &[
    ("users", "company_id", "INTEGER"),
    ("users", "branch_id", "INTEGER"),
    ("projects", "currency", "VARCHAR(10) NOT NULL DEFAULT 'INR'"),
    ("projects", "company_id", "INTEGER"),
    ("projects", "branch_id", "INTEGER"),
    ("projects", "client_id", "INTEGER"),
    (
        "purchase_orders",
        "currency",
        "VARCHAR(10) NOT NULL DEFAULT 'INR'",
    ),
    (
        "finance_records",
        "currency",
        "VARCHAR(10) NOT NULL DEFAULT 'INR'",
    ),
    (
        "finance_records",
        "exchange_rate",
        "DOUBLE PRECISION NOT NULL DEFAULT 1.0",
    ),
    ("finance_records", "company_id", "INTEGER"),
    ("finance_records", "branch_id", "INTEGER"),
];

/// Bring the connected database fully up to date.
pub fn run(pool: &DbPool) -> Result<(), MigrationError> {
    let mut conn = pool.get()?;
    ensure_schema(&mut conn)?;
    apply_column_additions(&mut conn)?;
    info!("database schema is up to date");
    Ok(())
}

/// Create every table that does not exist yet.
fn ensure_schema(conn: &mut AnyConnection) -> Result<(), MigrationError> {
    let id = match conn {
        AnyConnection::Postgresql(_) => "SERIAL PRIMARY KEY",
        AnyConnection::Sqlite(_) => "INTEGER PRIMARY KEY AUTOINCREMENT",
    };
    for (table, statement) in create_table_statements(id) {
        sql_query(statement)
            .execute(conn)
            .map_err(|error| MigrationError::statement(error.to_string()))?;
        debug!(table, "ensured table");
    }
    Ok(())
}

/// Add the post-release columns that are still missing.
fn apply_column_additions(conn: &mut AnyConnection) -> Result<(), MigrationError> {
    for (table, column, definition) in COLUMN_ADDITIONS {
        match conn {
            AnyConnection::Postgresql(conn) => {
                sql_query(format!(
                    "ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {column} {definition}"
                ))
                .execute(conn)
                .map_err(|error| MigrationError::statement(error.to_string()))?;
            }
            AnyConnection::Sqlite(conn) => {
                if sqlite_has_column(conn, table, column)
                    .map_err(|error| MigrationError::statement(error.to_string()))?
                {
                    continue;
                }
                sql_query(format!(
                    "ALTER TABLE {table} ADD COLUMN {column} {definition}"
                ))
                .execute(conn)
                .map_err(|error| MigrationError::statement(error.to_string()))?;
                debug!(table, column, "added missing column");
            }
        }
    }
    Ok(())
}

#[derive(QueryableByName)]
struct ColumnInfo {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}

/// SQLite has no `ADD COLUMN IF NOT EXISTS`; inspect the table instead.
fn sqlite_has_column(
    conn: &mut diesel::SqliteConnection,
    table: &str,
    column: &str,
) -> QueryResult<bool> {
    let columns: Vec<ColumnInfo> = sql_query(format!("PRAGMA table_info({table})")).load(conn)?;
    Ok(columns.iter().any(|info| info.name == column))
}

fn create_table_statements(id: &str) -> Vec<(&'static str, String)> {
    vec![
        (
            "companies",
            format!(
                "CREATE TABLE IF NOT EXISTS companies (
                    id {id},
                    name VARCHAR(200) NOT NULL,
                    fiscal_year_start DATE,
                    base_currency VARCHAR(10) NOT NULL DEFAULT 'INR',
                    registration_number VARCHAR(100),
                    address TEXT
                )"
            ),
        ),
        (
            "branches",
            format!(
                "CREATE TABLE IF NOT EXISTS branches (
                    id {id},
                    company_id INTEGER,
                    name VARCHAR(200) NOT NULL,
                    location VARCHAR(200)
                )"
            ),
        ),
        (
            "users",
            format!(
                "CREATE TABLE IF NOT EXISTS users (
                    id {id},
                    username VARCHAR(80) NOT NULL,
                    email VARCHAR(120) NOT NULL UNIQUE,
                    password_hash VARCHAR(128) NOT NULL,
                    role VARCHAR(50) NOT NULL,
                    company_id INTEGER,
                    branch_id INTEGER,
                    is_active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMP NOT NULL
                )"
            ),
        ),
        (
            "audit_records",
            format!(
                "CREATE TABLE IF NOT EXISTS audit_records (
                    id {id},
                    user_id INTEGER,
                    action VARCHAR(200) NOT NULL,
                    details TEXT,
                    timestamp TIMESTAMP NOT NULL
                )"
            ),
        ),
        (
            "projects",
            format!(
                "CREATE TABLE IF NOT EXISTS projects (
                    id {id},
                    name VARCHAR(200) NOT NULL,
                    client VARCHAR(200),
                    start_date DATE,
                    end_date DATE,
                    status VARCHAR(50) NOT NULL DEFAULT 'Planned',
                    total_budget DOUBLE PRECISION NOT NULL DEFAULT 0,
                    currency VARCHAR(10) NOT NULL DEFAULT 'INR',
                    company_id INTEGER,
                    branch_id INTEGER,
                    client_id INTEGER,
                    description TEXT,
                    progress INTEGER NOT NULL DEFAULT 0
                )"
            ),
        ),
        (
            "clients",
            format!(
                "CREATE TABLE IF NOT EXISTS clients (
                    id {id},
                    name VARCHAR(200) NOT NULL,
                    company VARCHAR(200),
                    email VARCHAR(120),
                    phone VARCHAR(50),
                    address TEXT,
                    status VARCHAR(50) NOT NULL DEFAULT 'Lead',
                    created_at TIMESTAMP NOT NULL
                )"
            ),
        ),
        (
            "vendors",
            format!(
                "CREATE TABLE IF NOT EXISTS vendors (
                    id {id},
                    name VARCHAR(200) NOT NULL,
                    contact_person VARCHAR(200),
                    phone VARCHAR(50),
                    email VARCHAR(120),
                    rating INTEGER NOT NULL DEFAULT 3
                )"
            ),
        ),
        (
            "purchase_orders",
            format!(
                "CREATE TABLE IF NOT EXISTS purchase_orders (
                    id {id},
                    vendor_id INTEGER,
                    order_date DATE NOT NULL,
                    expected_delivery DATE,
                    total_amount DOUBLE PRECISION NOT NULL DEFAULT 0,
                    currency VARCHAR(10) NOT NULL DEFAULT 'INR',
                    status VARCHAR(50) NOT NULL DEFAULT 'Pending'
                )"
            ),
        ),
        (
            "inventory_items",
            format!(
                "CREATE TABLE IF NOT EXISTS inventory_items (
                    id {id},
                    name VARCHAR(200) NOT NULL,
                    category VARCHAR(100),
                    current_stock DOUBLE PRECISION NOT NULL DEFAULT 0,
                    unit VARCHAR(50),
                    min_stock_alert DOUBLE PRECISION NOT NULL DEFAULT 10,
                    location VARCHAR(200),
                    last_updated TIMESTAMP NOT NULL
                )"
            ),
        ),
        (
            "assets",
            format!(
                "CREATE TABLE IF NOT EXISTS assets (
                    id {id},
                    name VARCHAR(200) NOT NULL,
                    type VARCHAR(100),
                    purchase_date DATE,
                    last_service_date DATE,
                    next_service_due DATE,
                    status VARCHAR(50) NOT NULL DEFAULT 'Active'
                )"
            ),
        ),
        (
            "asset_logs",
            format!(
                "CREATE TABLE IF NOT EXISTS asset_logs (
                    id {id},
                    asset_id INTEGER,
                    date DATE NOT NULL,
                    hours_used DOUBLE PRECISION NOT NULL DEFAULT 0,
                    fuel_consumed DOUBLE PRECISION NOT NULL DEFAULT 0,
                    notes TEXT
                )"
            ),
        ),
        (
            "finance_records",
            format!(
                "CREATE TABLE IF NOT EXISTS finance_records (
                    id {id},
                    date DATE NOT NULL,
                    type VARCHAR(50) NOT NULL,
                    category VARCHAR(100),
                    amount DOUBLE PRECISION NOT NULL,
                    currency VARCHAR(10) NOT NULL DEFAULT 'INR',
                    exchange_rate DOUBLE PRECISION NOT NULL DEFAULT 1.0,
                    company_id INTEGER,
                    branch_id INTEGER,
                    description TEXT,
                    payment_method VARCHAR(50)
                )"
            ),
        ),
        (
            "employees",
            format!(
                "CREATE TABLE IF NOT EXISTS employees (
                    id {id},
                    name VARCHAR(200) NOT NULL,
                    role VARCHAR(100),
                    department VARCHAR(100),
                    joining_date DATE,
                    salary DOUBLE PRECISION NOT NULL DEFAULT 0,
                    contract_type VARCHAR(50),
                    is_active BOOLEAN NOT NULL DEFAULT TRUE
                )"
            ),
        ),
        (
            "payroll",
            format!(
                "CREATE TABLE IF NOT EXISTS payroll (
                    id {id},
                    employee_id INTEGER,
                    month VARCHAR(7) NOT NULL,
                    basic_salary DOUBLE PRECISION,
                    deductions DOUBLE PRECISION NOT NULL DEFAULT 0,
                    net_salary DOUBLE PRECISION,
                    status VARCHAR(50) NOT NULL DEFAULT 'Pending'
                )"
            ),
        ),
        (
            "attendance",
            format!(
                "CREATE TABLE IF NOT EXISTS attendance (
                    id {id},
                    employee_id INTEGER,
                    date DATE NOT NULL,
                    status VARCHAR(50) NOT NULL,
                    hours_worked DOUBLE PRECISION NOT NULL DEFAULT 8.0
                )"
            ),
        ),
        (
            "production_logs",
            format!(
                "CREATE TABLE IF NOT EXISTS production_logs (
                    id {id},
                    date DATE NOT NULL,
                    project_id INTEGER,
                    quantity_produced DOUBLE PRECISION NOT NULL DEFAULT 0,
                    efficiency DOUBLE PRECISION,
                    waste_generated DOUBLE PRECISION NOT NULL DEFAULT 0,
                    notes TEXT
                )"
            ),
        ),
        (
            "software_assets",
            format!(
                "CREATE TABLE IF NOT EXISTS software_assets (
                    id {id},
                    name VARCHAR(200) NOT NULL,
                    version VARCHAR(50),
                    license_key VARCHAR(200),
                    expiry_date DATE,
                    status VARCHAR(50) NOT NULL DEFAULT 'Active',
                    assigned_to VARCHAR(200)
                )"
            ),
        ),
        (
            "maintenance_schedules",
            format!(
                "CREATE TABLE IF NOT EXISTS maintenance_schedules (
                    id {id},
                    asset_id INTEGER,
                    task_name VARCHAR(200) NOT NULL,
                    scheduled_date DATE,
                    performed_date DATE,
                    status VARCHAR(50) NOT NULL DEFAULT 'Scheduled',
                    cost DOUBLE PRECISION NOT NULL DEFAULT 0,
                    technician VARCHAR(200)
                )"
            ),
        ),
        (
            "invoices",
            format!(
                "CREATE TABLE IF NOT EXISTS invoices (
                    id {id},
                    project_id INTEGER,
                    invoice_number VARCHAR(100) NOT NULL UNIQUE,
                    date_issued DATE NOT NULL,
                    due_date DATE,
                    amount DOUBLE PRECISION NOT NULL,
                    status VARCHAR(50) NOT NULL DEFAULT 'Unpaid'
                )"
            ),
        ),
        (
            "bills",
            format!(
                "CREATE TABLE IF NOT EXISTS bills (
                    id {id},
                    vendor_id INTEGER,
                    po_id INTEGER,
                    bill_number VARCHAR(100),
                    date_received DATE NOT NULL,
                    due_date DATE,
                    amount DOUBLE PRECISION NOT NULL,
                    status VARCHAR(50) NOT NULL DEFAULT 'Unpaid'
                )"
            ),
        ),
        (
            "hse_records",
            format!(
                "CREATE TABLE IF NOT EXISTS hse_records (
                    id {id},
                    date DATE NOT NULL,
                    project_id INTEGER,
                    incident_type VARCHAR(100),
                    description TEXT,
                    action_taken TEXT,
                    reported_by VARCHAR(200),
                    status VARCHAR(50) NOT NULL DEFAULT 'Open'
                )"
            ),
        ),
        (
            "quality_checks",
            format!(
                "CREATE TABLE IF NOT EXISTS quality_checks (
                    id {id},
                    date DATE NOT NULL,
                    production_id INTEGER,
                    parameter VARCHAR(200),
                    result VARCHAR(50),
                    remarks TEXT
                )"
            ),
        ),
        (
            "document_assets",
            format!(
                "CREATE TABLE IF NOT EXISTS document_assets (
                    id {id},
                    title VARCHAR(200) NOT NULL,
                    category VARCHAR(100),
                    file_path VARCHAR(500),
                    upload_date DATE NOT NULL,
                    project_id INTEGER
                )"
            ),
        ),
        (
            "training_records",
            format!(
                "CREATE TABLE IF NOT EXISTS training_records (
                    id {id},
                    employee_id INTEGER,
                    training_name VARCHAR(200),
                    date_completed DATE,
                    expiry_date DATE,
                    score VARCHAR(50)
                )"
            ),
        ),
        (
            "contracts",
            format!(
                "CREATE TABLE IF NOT EXISTS contracts (
                    id {id},
                    title VARCHAR(200) NOT NULL,
                    client_id INTEGER,
                    project_id INTEGER,
                    contract_value DOUBLE PRECISION NOT NULL DEFAULT 0,
                    start_date DATE,
                    end_date DATE,
                    status VARCHAR(50) NOT NULL DEFAULT 'Draft',
                    terms TEXT
                )"
            ),
        ),
        (
            "system_settings",
            format!(
                "CREATE TABLE IF NOT EXISTS system_settings (
                    id {id},
                    category VARCHAR(100),
                    key VARCHAR(100) NOT NULL UNIQUE,
                    value TEXT,
                    description TEXT
                )"
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn every_table_has_a_create_statement() {
        let statements = create_table_statements("SERIAL PRIMARY KEY");

        assert_eq!(statements.len(), 26);
        for (table, statement) in &statements {
            assert!(
                statement.starts_with("CREATE TABLE IF NOT EXISTS"),
                "{table} must be rerun-safe"
            );
            assert!(statement.contains(table), "{table} must name its table");
        }
    }

    #[rstest]
    fn primary_key_spelling_is_injected() {
        let postgres = create_table_statements("SERIAL PRIMARY KEY");
        let sqlite = create_table_statements("INTEGER PRIMARY KEY AUTOINCREMENT");

        assert!(postgres.iter().all(|(_, s)| s.contains("SERIAL PRIMARY KEY")));
        assert!(sqlite.iter().all(|(_, s)| s.contains("AUTOINCREMENT")));
    }

    #[rstest]
    fn column_additions_cover_the_multi_company_upgrade() {
        assert_eq!(COLUMN_ADDITIONS.len(), 11);
        assert!(
            COLUMN_ADDITIONS
                .iter()
                .any(|(table, column, _)| *table == "finance_records" && *column == "exchange_rate")
        );
        assert!(
            COLUMN_ADDITIONS
                .iter()
                .any(|(table, column, _)| *table == "projects" && *column == "client_id")
        );
    }

    #[rstest]
    fn unique_columns_are_declared_inline() {
        let statements = create_table_statements("SERIAL PRIMARY KEY");
        let users = statements
            .iter()
            .find(|(table, _)| *table == "users")
            .map(|(_, s)| s.as_str())
            .unwrap_or_default();
        let invoices = statements
            .iter()
            .find(|(table, _)| *table == "invoices")
            .map(|(_, s)| s.as_str())
            .unwrap_or_default();

        assert!(users.contains("email VARCHAR(120) NOT NULL UNIQUE"));
        assert!(invoices.contains("invoice_number VARCHAR(100) NOT NULL UNIQUE"));
    }
}

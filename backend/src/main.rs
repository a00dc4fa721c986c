//! Ops binary: migrations, demo seeding, account bootstrap, exports, and
//! activity-trail inspection from the console.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use backend::Settings;
use backend::domain::audit::AuditQuery;
use backend::domain::auth::{AuthService, RegisterRequest};
use backend::domain::menu::validate_menu_registry;
use backend::domain::ports::AuditLog;
use backend::domain::user::{DisplayName, EmailAddress, Role};
use backend::export::{ExportSource, Exporter};
use backend::outbound::persistence::{
    DbPool, DieselAuditLog, DieselCrmRepository, DieselFinanceRepository,
    DieselInventoryRepository, DieselPrincipalRepository, DieselProcurementRepository,
    DieselProjectRepository, DieselWorkforceRepository, migrations,
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

/// `groundwork` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "groundwork",
    about = "Construction ERP operations console",
    version
)]
struct CliArgs {
    /// Storage URL override; takes priority over environment and files.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bring the schema up to date and validate the menu registry.
    Migrate,
    /// Load a named demo dataset unless the store already holds accounts.
    #[cfg(feature = "example-data")]
    Seed {
        /// Registry entry to load.
        #[arg(long = "seed", value_name = "name")]
        seed: String,
    },
    /// Bootstrap an account from the console.
    CreateUser {
        /// Display name for the account.
        #[arg(long, value_name = "name")]
        name: String,
        /// Unique login email.
        #[arg(long, value_name = "email")]
        email: String,
        /// Access role label: Owner, Director, or Accounting Staff.
        #[arg(long, value_name = "role")]
        role: Role,
        /// File holding the initial password; prompted for when omitted.
        #[arg(long = "password-file", value_name = "path")]
        password_file: Option<PathBuf>,
    },
    /// Write one table's delimited export.
    Export {
        /// Source table, e.g. "projects" or "finance_records".
        #[arg(long, value_name = "source")]
        source: ExportSource,
        /// Output file path.
        #[arg(long, value_name = "path")]
        out: PathBuf,
    },
    /// Print recent activity-trail records, newest first.
    Audit {
        /// Maximum records printed.
        #[arg(long, value_name = "n", default_value_t = 20)]
        limit: i64,
        /// Restrict to one acting principal.
        #[arg(long, value_name = "id")]
        user: Option<i32>,
        /// Restrict to action labels containing this text.
        #[arg(long, value_name = "text")]
        contains: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = load_settings(args.database_url)?;
    run(args.command, &settings)
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Migrate => migrate(settings),
        #[cfg(feature = "example-data")]
        Command::Seed { seed } => seed_demo(settings, &seed),
        Command::CreateUser {
            name,
            email,
            role,
            password_file,
        } => create_user(settings, &name, &email, role, password_file.as_deref()),
        Command::Export { source, out } => export(settings, source, &out),
        Command::Audit {
            limit,
            user,
            contains,
        } => audit(settings, limit, user, contains),
    }
}

/// Layer environment and file configuration, then the CLI override on top.
fn load_settings(database_url_override: Option<String>) -> Result<Settings> {
    let mut settings = Settings::load_from_iter([OsString::from("groundwork")])
        .wrap_err("failed to load configuration")?;
    if let Some(url) = database_url_override {
        settings.database_url = Some(url);
    }
    Ok(settings)
}

/// Open the pool eagerly so a bad URL or unreachable store fails here.
fn connect(settings: &Settings) -> Result<DbPool> {
    let config = settings
        .pool_config()
        .wrap_err("failed to resolve the storage URL")?;
    DbPool::new(config).wrap_err("failed to connect to the store")
}

fn migrate(settings: &Settings) -> Result<()> {
    let pool = connect(settings)?;
    migrations::run(&pool).wrap_err("migrations failed")?;
    validate_menu_registry().wrap_err("menu registry is inconsistent")?;
    println!("schema is up to date");
    Ok(())
}

#[cfg(feature = "example-data")]
fn seed_demo(settings: &Settings, seed_name: &str) -> Result<()> {
    use backend::example_data::{SeedOutcome, seed_from_embedded_registry};

    let pool = connect(settings)?;
    migrations::run(&pool).wrap_err("migrations failed")?;
    match seed_from_embedded_registry(&pool, seed_name).wrap_err("seeding failed")? {
        SeedOutcome::Applied { accounts, rows } => {
            println!("seeded {accounts} accounts and {rows} rows");
        }
        SeedOutcome::SkippedPopulated { existing_accounts } => {
            println!("store already holds {existing_accounts} accounts; nothing seeded");
        }
    }
    Ok(())
}

fn create_user(
    settings: &Settings,
    name: &str,
    email: &str,
    role: Role,
    password_file: Option<&Path>,
) -> Result<()> {
    let secret = read_password(password_file)?;
    let pool = connect(settings)?;
    let auth = AuthService::new(
        Arc::new(DieselPrincipalRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let request = RegisterRequest {
        display_name: DisplayName::new(name).wrap_err("invalid display name")?,
        email: EmailAddress::new(email).wrap_err("invalid email")?,
        secret,
        role,
        company_id: None,
        branch_id: None,
    };
    let principal = auth.register(request).wrap_err("account creation failed")?;
    println!("created {} account {}", principal.role, principal.email);
    Ok(())
}

fn export(settings: &Settings, source: ExportSource, out: &Path) -> Result<()> {
    let pool = connect(settings)?;
    let exporter = Exporter::new(
        Arc::new(DieselProjectRepository::new(pool.clone())),
        Arc::new(DieselCrmRepository::new(pool.clone())),
        Arc::new(DieselProcurementRepository::new(pool.clone())),
        Arc::new(DieselInventoryRepository::new(pool.clone())),
        Arc::new(DieselFinanceRepository::new(pool.clone())),
        Arc::new(DieselWorkforceRepository::new(pool.clone())),
        Arc::new(DieselAuditLog::new(pool)),
    );
    let rendered = exporter.export(source).wrap_err("export failed")?;
    fs::write(out, rendered).wrap_err_with(|| format!("failed to write {}", out.display()))?;
    println!("wrote {} to {}", source.file_name(), out.display());
    Ok(())
}

fn audit(
    settings: &Settings,
    limit: i64,
    user: Option<i32>,
    contains: Option<String>,
) -> Result<()> {
    let pool = connect(settings)?;
    let trail = DieselAuditLog::new(pool);

    let mut query = AuditQuery::newest(limit);
    if let Some(user_id) = user {
        query = query.by_user(user_id);
    }
    if let Some(text) = contains {
        query = query.with_action_containing(text);
    }

    for record in trail.query(&query).wrap_err("trail query failed")? {
        let acting = record
            .user_id
            .map_or_else(|| "-".to_owned(), |id| id.to_string());
        println!(
            "{}  {:>6}  {:<20}  {}",
            record.timestamp,
            acting,
            record.action,
            record.details.unwrap_or_default()
        );
    }
    Ok(())
}

/// Read the initial password from a file, or prompt on the console.
///
/// Trailing line endings are stripped either way; length policy is enforced
/// during registration.
fn read_password(password_file: Option<&Path>) -> Result<Zeroizing<String>> {
    match password_file {
        Some(path) => {
            let contents = Zeroizing::new(
                fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read password file {}", path.display()))?,
            );
            Ok(Zeroizing::new(
                contents.trim_end_matches(['\r', '\n']).to_owned(),
            ))
        }
        None => prompt_password(),
    }
}

fn prompt_password() -> Result<Zeroizing<String>> {
    print!("password: ");
    io::stdout().flush().wrap_err("failed to flush the prompt")?;
    let mut line = Zeroizing::new(String::new());
    io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("failed to read the password")?;
    Ok(Zeroizing::new(
        line.trim_end_matches(['\r', '\n']).to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use std::io::Write as _;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    #[rstest]
    fn export_sources_parse_from_their_stems() {
        let args = CliArgs::try_parse_from([
            "groundwork",
            "export",
            "--source",
            "finance_records",
            "--out",
            "finance.csv",
        ])
        .expect("args should parse");

        match args.command {
            Command::Export { source, out } => {
                assert_eq!(source, ExportSource::FinanceRecords);
                assert_eq!(out, PathBuf::from("finance.csv"));
            }
            other => panic!("expected export command, got {other:?}"),
        }
    }

    #[rstest]
    fn unknown_export_sources_are_rejected() {
        let result = CliArgs::try_parse_from([
            "groundwork",
            "export",
            "--source",
            "payroll",
            "--out",
            "payroll.csv",
        ]);
        assert!(result.is_err());
    }

    #[rstest]
    fn role_labels_parse_including_the_two_word_one() {
        let args = CliArgs::try_parse_from([
            "groundwork",
            "create-user",
            "--name",
            "Asha Verma",
            "--email",
            "asha@company.com",
            "--role",
            "Accounting Staff",
        ])
        .expect("args should parse");

        match args.command {
            Command::CreateUser { role, .. } => assert_eq!(role, Role::AccountingStaff),
            other => panic!("expected create-user command, got {other:?}"),
        }
    }

    #[rstest]
    fn audit_defaults_to_twenty_records() {
        let args = CliArgs::try_parse_from(["groundwork", "audit"]).expect("args should parse");

        match args.command {
            Command::Audit {
                limit,
                user,
                contains,
            } => {
                assert_eq!(limit, 20);
                assert!(user.is_none());
                assert!(contains.is_none());
            }
            other => panic!("expected audit command, got {other:?}"),
        }
    }

    #[rstest]
    fn password_files_are_stripped_of_line_endings() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "hunter2!").expect("write fixture");

        let secret = read_password(Some(file.path())).expect("password should read");
        assert_eq!(secret.as_str(), "hunter2!");
    }
}

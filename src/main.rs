use analytics::export::write_csv;
use analytics::{AggregateResult, AnalyticsEngine, FilterSpec};
use anyhow::Context;
use auth::AuthService;
use clap::{Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, ServerOverrides};
use database::{DbRepository, EmployeeStore};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use web_server::StorageBackend;

/// The main entry point for the Workforce HR dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file may carry DATABASE_URL and WORKFORCE__ overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config_from(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, config).await,
        Commands::Stats(args) => handle_stats(args, &config).await,
        Commands::Export(args) => handle_export(args, &config).await,
        Commands::CreateUser(args) => handle_create_user(args, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// An HR dashboard: employee records, filters, CSV export and analytics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Print aggregate statistics for the employees matching the filters.
    Stats(StatsArgs),
    /// Write the employees matching the filters to a CSV file.
    Export(ExportArgs),
    /// Register a dashboard user.
    CreateUser(CreateUserArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[command(flatten)]
    overrides: ServerOverrides,

    /// Keep everything in memory instead of using Postgres.
    #[arg(long)]
    in_memory: bool,
}

#[derive(Args)]
struct StatsArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Print the statistics as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Destination file.
    #[arg(long, short, default_value = analytics::export::EXPORT_FILE_NAME)]
    output: PathBuf,
}

#[derive(Args)]
struct CreateUserArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

/// Filter flags shared by `stats` and `export`.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Case-insensitive substring of the name.
    #[arg(long)]
    name: Option<String>,
    /// Case-insensitive substring of the name or role.
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    role: Option<String>,
    /// Exact department. Repeat `--departments` instead to allow several.
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    departments: Vec<String>,
    #[arg(long)]
    salary_min: Option<Decimal>,
    #[arg(long)]
    salary_max: Option<Decimal>,
    #[arg(long)]
    performance_min: Option<u8>,
    #[arg(long)]
    performance_max: Option<u8>,
    #[arg(long)]
    joining_year: Option<i32>,
    #[arg(long)]
    joining_year_min: Option<i32>,
    #[arg(long)]
    joining_year_max: Option<i32>,
}

impl From<FilterArgs> for FilterSpec {
    fn from(args: FilterArgs) -> Self {
        FilterSpec {
            name: args.name,
            search: args.search,
            role: args.role,
            department: args.department,
            departments: args.departments,
            salary_min: args.salary_min,
            salary_max: args.salary_max,
            performance_min: args.performance_min,
            performance_max: args.performance_max,
            joining_year: args.joining_year,
            joining_year_min: args.joining_year_min,
            joining_year_max: args.joining_year_max,
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    config.apply_overrides(&args.overrides);
    let backend = if args.in_memory {
        StorageBackend::InMemory
    } else {
        StorageBackend::Postgres
    };
    web_server::run_server(config, backend).await
}

async fn open_repository(config: &Config) -> anyhow::Result<DbRepository> {
    let db_pool = database::connect(
        config.database.max_connections,
        config.database.acquire_timeout(),
    )
    .await?;
    database::run_migrations(&db_pool).await?;
    Ok(DbRepository::new(db_pool))
}

async fn handle_stats(args: StatsArgs, config: &Config) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    let snapshot = repo.list().await?;
    let result = AnalyticsEngine::new().apply(&snapshot, &args.filters.into());
    tracing::debug!(matched = result.stats.total_count, "Computed statistics.");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.stats)?);
    } else {
        print_stats(&result.stats, snapshot.len());
    }
    Ok(())
}

fn print_stats(stats: &AggregateResult, total_employees: usize) {
    let mut summary = Table::new();
    summary.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    summary.add_row(vec![
        "Employees".to_string(),
        format!("{} of {}", stats.total_count, total_employees),
    ]);
    summary.add_row(vec![
        "Average Salary".to_string(),
        stats.average_salary.round_dp(2).to_string(),
    ]);
    summary.add_row(vec![
        "Average Performance".to_string(),
        format!("{}/5", stats.average_performance.round_dp(2)),
    ]);
    summary.add_row(vec![
        "Total Promotions".to_string(),
        stats.total_promotions.to_string(),
    ]);
    println!("{summary}");

    if stats.per_department.is_empty() {
        println!("No employees match the given filters.");
        return;
    }

    let mut departments = Table::new();
    departments
        .load_preset(UTF8_FULL)
        .set_header(vec!["Department", "Employees", "Average Salary"]);
    for (name, department) in &stats.per_department {
        departments.add_row(vec![
            name.clone(),
            department.count.to_string(),
            department.average_salary.round_dp(2).to_string(),
        ]);
    }
    println!("{departments}");
}

async fn handle_export(args: ExportArgs, config: &Config) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    let snapshot = repo.list().await?;
    let result = AnalyticsEngine::new().apply(&snapshot, &args.filters.into());

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_csv(BufWriter::new(file), &result.filtered)?;

    tracing::info!(
        count = result.filtered.len(),
        path = %args.output.display(),
        "Exported employees."
    );
    Ok(())
}

async fn handle_create_user(args: CreateUserArgs, config: &Config) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    AuthService::new(repo)
        .register(&args.username, &args.password)
        .await?;
    tracing::info!(username = %args.username.trim(), "User created.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_flags_become_a_filter() {
        let cli = Cli::parse_from([
            "workforce",
            "stats",
            "--department",
            "IT",
            "--salary-min",
            "50000",
            "--departments",
            "IT",
            "--departments",
            "HR",
        ]);
        let Commands::Stats(args) = cli.command else {
            panic!("expected the stats command");
        };

        let spec: FilterSpec = args.filters.into();

        assert_eq!(spec.department.as_deref(), Some("IT"));
        assert_eq!(spec.salary_min, Some(Decimal::from(50000)));
        assert_eq!(spec.departments, vec!["IT".to_string(), "HR".to_string()]);
        assert!(!args.json);
    }
}

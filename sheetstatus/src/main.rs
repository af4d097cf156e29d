use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetstatus_core::config::TOKEN_ENV_VAR;
use sheetstatus_core::store::SmartsheetClient;
use sheetstatus_core::{Category, MemoryStore, ReportConfig, SheetStore, StatusReporter};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod formatter;
mod menu;

#[derive(Parser)]
#[command(name = "sheetstatus")]
#[command(about = "NEBS/SG project status reports from Smartsheet workspaces", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// API access token (overrides the environment and the config file)
    #[arg(long, value_name = "TOKEN", global = true)]
    token: Option<String>,

    /// Read from a JSON snapshot instead of the API
    #[arg(long, value_name = "JSON", global = true)]
    snapshot: Option<PathBuf>,

    /// Directory for exported reports (overrides the config file)
    #[arg(short, long, value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Append the report rows to the configured publish sheet
    #[arg(long, global = true)]
    publish: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build and export the NEBS report
    Nebs,
    /// Build and export the SmartGrid report
    Sg,
    /// Print the record a single sheet would produce
    Inspect {
        #[arg(value_name = "SHEET_ID")]
        sheet_id: u64,

        #[arg(long, value_enum, default_value = "sg")]
        category: CategoryArg,
    },
    /// List accessible workspaces
    Workspaces,
    /// Interactive menu (default)
    Menu,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Nebs,
    Sg,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Nebs => Category::Nebs,
            CategoryArg::Sg => Category::Sg,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output
    Json,
}

/// Per-invocation output settings shared by commands and the menu
struct RunOptions<'a> {
    output_dir: Option<&'a Path>,
    format: OutputFormat,
    publish: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let store = open_store(&cli, &config)?;
    let reporter = StatusReporter::new(store.as_ref(), config);

    let options = RunOptions {
        output_dir: cli.output_dir.as_deref(),
        format: cli.format,
        publish: cli.publish,
    };

    match cli.command.unwrap_or(Command::Menu) {
        Command::Nebs => run_category(&reporter, Category::Nebs, &options),
        Command::Sg => run_category(&reporter, Category::Sg, &options),
        Command::Inspect { sheet_id, category } => {
            inspect_sheet(&reporter, sheet_id, category.into(), &options)
        }
        Command::Workspaces => list_workspaces(store.as_ref(), &options),
        Command::Menu => {
            let stdin = std::io::stdin();
            menu::run(stdin.lock(), |choice| menu_action(&reporter, choice, &options))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "sheetstatus=debug,sheetstatus_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    if let Some(config_path) = path {
        return ReportConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    // Try to load default config from current directory if it exists
    let default_config_path = PathBuf::from("sheetstatus.toml");
    if default_config_path.exists() {
        ReportConfig::from_file(&default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(ReportConfig::default())
    }
}

fn open_store(cli: &Cli, config: &ReportConfig) -> Result<Box<dyn SheetStore>> {
    if let Some(snapshot) = &cli.snapshot {
        debug!(path = %snapshot.display(), "using snapshot store");
        let store = MemoryStore::from_snapshot_file(snapshot)
            .with_context(|| format!("Failed to load snapshot: {}", snapshot.display()))?;
        return Ok(Box::new(store));
    }

    let env_token = std::env::var(TOKEN_ENV_VAR).ok();
    let token = config
        .resolve_token(cli.token.as_deref(), env_token.as_deref())
        .with_context(|| {
            format!(
                "No access token: pass --token, set {} or add access_token to the config file",
                TOKEN_ENV_VAR
            )
        })?;

    let client = SmartsheetClient::with_options(
        token,
        &config.api_base_url,
        Duration::from_secs(config.timeout_seconds),
    )
    .context("Failed to create API client")?;
    Ok(Box::new(client))
}

fn run_category(reporter: &StatusReporter, category: Category, options: &RunOptions) -> Result<()> {
    let (report, path) = reporter.run(category, options.output_dir)?;

    let published = if options.publish {
        Some(reporter.publish(&report)?)
    } else {
        None
    };

    match options.format {
        OutputFormat::Human => formatter::print_report_human(&report, &path, published),
        OutputFormat::Json => formatter::print_report_json(&report, &path, published)?,
    }
    Ok(())
}

fn inspect_sheet(
    reporter: &StatusReporter,
    sheet_id: u64,
    category: Category,
    options: &RunOptions,
) -> Result<()> {
    let inspection = reporter.inspect_sheet(sheet_id, category)?;
    match options.format {
        OutputFormat::Human => formatter::print_inspection_human(&inspection),
        OutputFormat::Json => formatter::print_json(&inspection)?,
    }
    Ok(())
}

fn list_workspaces(store: &dyn SheetStore, options: &RunOptions) -> Result<()> {
    let workspaces = store
        .list_workspaces()
        .context("Failed to list workspaces")?;
    match options.format {
        OutputFormat::Human => formatter::print_workspaces_human(&workspaces),
        OutputFormat::Json => formatter::print_json(&workspaces)?,
    }
    Ok(())
}

fn menu_action(reporter: &StatusReporter, choice: menu::Choice, options: &RunOptions) -> Result<()> {
    match choice {
        menu::Choice::Main | menu::Choice::Nebs => run_category(reporter, Category::Nebs, options),
        menu::Choice::SmartGrid => run_category(reporter, Category::Sg, options),
        menu::Choice::Test { sheet_id, category } => {
            inspect_sheet(reporter, sheet_id, category, options)
        }
    }
}

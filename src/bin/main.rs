//! condo-reports CLI - serve the reporting API or run reports against it
//!
//! Usage:
//!   condo-reports serve
//!   condo-reports catalog [--server <url>] [--token <jwt>]
//!   condo-reports run [<report>] [-f key=value]... [--format table|csv|json]
//!   condo-reports token --role <role> [--id <user>]
//!
//! Examples:
//!   condo-reports serve
//!   condo-reports run manager_property_summary -f property_id=12
//!   condo-reports run board_member_pending_approvals -f board_member_id=3 --format csv --save

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use condo_reports::auth::JwtConfig;
use condo_reports::client::{render, ApiClient, ClientError};
use condo_reports::config::Settings;
use condo_reports::model::Role;
use std::fs;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "condo-reports")]
#[command(about = "Condo reports - role-gated reporting over condo-management SQL views")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Remote {
    /// Base URL of the reporting server
    #[arg(long, env = "CONDO_REPORTS_URL", default_value = "http://localhost:5000")]
    server: String,

    /// Bearer token (see `condo-reports token`)
    #[arg(long, env = "CONDO_REPORTS_TOKEN")]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the reporting API server
    Serve,

    /// Print the loaded configuration (secrets masked) and validate it
    CheckConfig,

    /// List the reports your account can run
    Catalog {
        #[command(flatten)]
        remote: Remote,
    },

    /// List the properties and board members available as filters
    Filters {
        #[command(flatten)]
        remote: Remote,
    },

    /// Run a report (the first in your catalog if none is named)
    Run {
        /// Report id
        report: Option<String>,

        /// Filter as key=value; repeatable
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,

        /// Also write the output to a timestamped file named after the report
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        remote: Remote,
    },

    /// Mint a development token signed with the configured secret
    Token {
        /// Role to embed in the token (manager, board, resident, admin)
        #[arg(long)]
        role: Role,

        /// User id to embed in the token
        #[arg(long, default_value = "dev")]
        id: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Aligned text table
    Table,
    /// Comma-separated values
    Csv,
    /// Raw JSON rows
    Json,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,condo_reports=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => cmd_serve().await,
        Commands::CheckConfig => cmd_check_config(),
        Commands::Catalog { remote } => cmd_catalog(remote).await,
        Commands::Filters { remote } => cmd_filters(remote).await,
        Commands::Run {
            report,
            filters,
            format,
            save,
            remote,
        } => cmd_run(report, filters, format, save, remote).await,
        Commands::Token {
            role,
            id,
            email,
            name,
        } => cmd_token(role, id, email, name),
    }
}

fn load_settings() -> Option<Settings> {
    match Settings::load() {
        Ok(settings) => Some(settings),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            None
        }
    }
}

async fn cmd_serve() -> ExitCode {
    let Some(settings) = load_settings() else {
        return ExitCode::FAILURE;
    };

    match condo_reports::web::serve(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_check_config() -> ExitCode {
    let Some(mut settings) = load_settings() else {
        return ExitCode::FAILURE;
    };

    let valid = settings.validate();
    if !settings.mysql.password.is_empty() {
        settings.mysql.password = "***".to_string();
    }
    if !settings.auth.jwt_secret.is_empty() {
        settings.auth.jwt_secret = "***".to_string();
    }

    match toml::to_string_pretty(&settings) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to print settings: {}", e),
    }

    match valid {
        Ok(()) => {
            println!("OK: configuration is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn client(remote: &Remote) -> Result<ApiClient, ClientError> {
    let client = ApiClient::new(&remote.server)?;
    Ok(match &remote.token {
        Some(token) => client.with_token(token),
        None => client,
    })
}

fn report_failure(e: ClientError) -> ExitCode {
    eprintln!("Error: {}", e);
    ExitCode::FAILURE
}

async fn cmd_catalog(remote: Remote) -> ExitCode {
    let response = match client(&remote) {
        Ok(c) => c.catalog().await,
        Err(e) => Err(e),
    };
    let response = match response {
        Ok(r) => r,
        Err(e) => return report_failure(e),
    };

    println!("Source: {}", response.provider);
    println!();
    if response.catalog.is_empty() {
        println!("No reports available.");
        return ExitCode::SUCCESS;
    }

    println!("Reports:");
    for entry in &response.catalog {
        if entry.filters.is_empty() {
            println!("  - {} ({})", entry.id, entry.title);
        } else {
            println!(
                "  - {} ({}) filters: {}",
                entry.id,
                entry.title,
                entry.filters.join(", ")
            );
        }
    }
    ExitCode::SUCCESS
}

async fn cmd_filters(remote: Remote) -> ExitCode {
    let response = match client(&remote) {
        Ok(c) => c.filters().await,
        Err(e) => Err(e),
    };
    let response = match response {
        Ok(r) => r,
        Err(e) => return report_failure(e),
    };

    println!("Source: {}", response.provider);
    println!();
    println!("Properties:");
    println!("{}", render::render_table(&response.properties));
    println!("Board members:");
    println!("{}", render::render_table(&response.board_members));
    ExitCode::SUCCESS
}

async fn cmd_run(
    report: Option<String>,
    filters: Vec<(String, String)>,
    format: OutputFormat,
    save: bool,
    remote: Remote,
) -> ExitCode {
    let outcome = match client(&remote) {
        Ok(c) => c.run_from_catalog(report.as_deref(), &filters).await,
        Err(e) => Err(e),
    };
    let outcome = match outcome {
        Ok(o) => o,
        Err(e) => return report_failure(e),
    };

    let rows = &outcome.response.rows;
    let output = match format {
        OutputFormat::Table => {
            let mut text = format!("{}\n", outcome.response.report.title);
            text.push_str(&format!("Source: {}\n", outcome.response.provider));
            if let Some(summary) = render::filters_summary(&outcome.applied) {
                text.push_str(&summary);
                text.push('\n');
            }
            text.push('\n');
            text.push_str(&render::render_table(rows));
            text
        }
        OutputFormat::Csv => match render::render_csv(rows) {
            Ok(csv) => csv,
            Err(e) => return report_failure(e),
        },
        OutputFormat::Json => match serde_json::to_string_pretty(rows) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to encode rows: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }

    if save {
        let path = render::export_filename(
            &outcome.entry.title,
            format.extension(),
            Local::now().naive_local(),
        );
        if let Err(e) = fs::write(&path, &output) {
            eprintln!("Error writing '{}': {}", path, e);
            return ExitCode::FAILURE;
        }
        eprintln!("Saved {} rows to {}", outcome.response.count, path);
    }

    ExitCode::SUCCESS
}

fn cmd_token(role: Role, id: String, email: Option<String>, name: Option<String>) -> ExitCode {
    let Some(settings) = load_settings() else {
        return ExitCode::FAILURE;
    };
    if settings.auth.jwt_secret.is_empty() {
        eprintln!("Configuration error: auth.jwt_secret (JWT_SECRET) must be set");
        return ExitCode::FAILURE;
    }

    let jwt = JwtConfig::new(&settings.auth.jwt_secret, settings.auth.token_ttl_hours);
    match jwt.issue(id, role, email, name) {
        Ok(token) => {
            println!("{}", token);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

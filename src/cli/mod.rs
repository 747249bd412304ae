//! Command-line front-end.
//!
//! Subcommands:
//! - `list` - Equipment table, optionally filtered
//! - `facets` - Statuses, categories and brands present in the data
//! - `specs <id>` - Technical specifications of one equipment
//! - `request <id> <status>` - Log in and request a loan
//! - `loans` / `users` - Raw listings from the backend
//! - `shell` - Interactive session

pub mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::{
    models::{Equipment, LoginCredentials, SearchQuery},
    services::{directory::StatusChange, filter::Facets, specifications::SpecificationViewer},
    AppState,
};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "techlab-monitor")]
#[command(author, version, about = "Tech Lab equipment monitor", long_about = None)]
pub struct Cli {
    /// Base URL of the equipment API (overrides configuration)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List equipment
    List {
        /// Free-text search on name, description and brand
        #[arg(short, long)]
        search: Option<String>,
        /// Exact status (e.g. "EN USO")
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the available filter values
    Facets,

    /// Show technical specifications of an equipment
    Specs {
        /// Equipment ID
        id: i64,
    },

    /// Request a loan, changing the equipment status
    Request {
        /// Equipment ID
        id: i64,
        /// Target status (e.g. "EN USO")
        status: String,
        #[arg(long, env = "TECHLAB_EMAIL")]
        email: String,
        #[arg(long, env = "TECHLAB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List loan records
    Loans,

    /// List users
    Users,

    /// Interactive session
    Shell,
}

/// Run a CLI command
pub async fn run_command(cli: &Cli, state: &mut AppState) -> Result<()> {
    match &cli.command {
        Commands::List {
            search,
            status,
            brand,
            category,
        } => {
            let mut query = SearchQuery::new(search.clone().unwrap_or_default());
            if let Some(status) = status {
                query = query.with_status(status.as_str());
            }
            if let Some(brand) = brand {
                query = query.with_brand(brand.as_str());
            }
            if let Some(category) = category {
                query = query.with_category(category.as_str());
            }
            cmd_list(state, &query).await
        }
        Commands::Facets => cmd_facets(state).await,
        Commands::Specs { id } => cmd_specs(state, *id).await,
        Commands::Request {
            id,
            status,
            email,
            password,
        } => cmd_request(state, *id, status, LoginCredentials::new(email.as_str(), password.as_str())).await,
        Commands::Loans => cmd_loans(state).await,
        Commands::Users => cmd_users(state).await,
        Commands::Shell => shell::run(state).await,
    }
}

async fn load(state: &mut AppState) -> Result<()> {
    let directory = &mut state.services.directory;
    if let Err(e) = directory.load().await {
        anyhow::bail!("{}", e.user_message());
    }
    Ok(())
}

async fn cmd_list(state: &mut AppState, query: &SearchQuery) -> Result<()> {
    load(state).await?;
    print_equipment(&state.services.directory.view(query));
    Ok(())
}

async fn cmd_facets(state: &mut AppState) -> Result<()> {
    load(state).await?;
    print_facets(&state.services.directory.facets());
    Ok(())
}

async fn cmd_specs(state: &mut AppState, id: i64) -> Result<()> {
    load(state).await?;
    let equipment = state
        .services
        .directory
        .find(id)
        .cloned()
        .with_context(|| format!("Equipment {} not found", id))?;

    let viewer = &mut state.services.specifications;
    if let Err(e) = viewer.open(equipment).await {
        anyhow::bail!("{}", e.user_message());
    }
    print_specifications(viewer);
    viewer.close();
    Ok(())
}

async fn cmd_request(
    state: &mut AppState,
    id: i64,
    status: &str,
    credentials: LoginCredentials,
) -> Result<()> {
    load(state).await?;

    if let Err(e) = state.services.session.login(&credentials).await {
        anyhow::bail!("{}", e.user_message());
    }

    let outcome = state
        .services
        .change_status(id, status)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    print_outcome(&outcome);

    match outcome {
        StatusChange::Applied { .. } => Ok(()),
        StatusChange::Failed { message, .. } => anyhow::bail!(message),
        StatusChange::LoginRequired { .. } | StatusChange::AlreadyPending => {
            anyhow::bail!("Status not changed")
        }
    }
}

async fn cmd_loans(state: &mut AppState) -> Result<()> {
    let loans = state
        .services
        .directory
        .loans()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if loans.is_empty() {
        println!("No loans found.");
        return Ok(());
    }

    println!();
    println!("{:<8}  {:<8}  {:<10}  {:<12}", "ID", "USER", "EQUIPMENT", "STATUS");
    println!("{}", "-".repeat(44));
    for loan in loans {
        println!(
            "{:<8}  {:<8}  {:<10}  {:<12}",
            opt(loan.id),
            opt(loan.user_id),
            opt(loan.equipment_id),
            loan.status.as_deref().unwrap_or("-")
        );
    }
    println!();
    Ok(())
}

async fn cmd_users(state: &mut AppState) -> Result<()> {
    let users = state
        .services
        .session
        .users()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!();
    println!("{:<6}  {:<32}  {:<30}", "ID", "EMAIL", "NAME");
    println!("{}", "-".repeat(72));
    for user in users {
        println!(
            "{:<6}  {:<32}  {:<30}",
            user.id,
            truncate(&user.email, 32),
            truncate(&user.full_name(), 30)
        );
    }
    println!();
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

pub(crate) fn print_equipment(records: &[Equipment]) {
    if records.is_empty() {
        println!("No equipment matches.");
        return;
    }

    println!();
    println!(
        "{:<6}  {:<28}  {:<16}  {:<14}  {:<10}  {:<12}",
        "ID", "NAME", "CATEGORY", "BRAND", "QUANTITY", "STATUS"
    );
    println!("{}", "-".repeat(96));
    for record in records {
        println!(
            "{:<6}  {:<28}  {:<16}  {:<14}  {:<10}  {:<12}",
            record.id,
            truncate(&record.name, 28),
            truncate(&record.category, 16),
            truncate(&record.brand, 14),
            record.quantity_display(),
            record.status_label()
        );
    }
    println!();
}

pub(crate) fn print_facets(facets: &Facets) {
    println!();
    println!("Statuses:");
    for status in &facets.statuses {
        println!("  {:<12} {}", status.value, status.label);
    }
    println!("Categories:");
    for category in &facets.categories {
        println!("  {}", category);
    }
    println!("Brands:");
    for brand in &facets.brands {
        println!("  {}", brand);
    }
    println!();
}

pub(crate) fn print_specifications(viewer: &SpecificationViewer) {
    let Some(equipment) = viewer.selected() else {
        return;
    };

    println!();
    println!("=== {} ===", equipment.name);
    for (field, value) in viewer.header() {
        println!("  {:<22} {}", field, value);
    }

    let rows = viewer.rows();
    println!();
    if rows.is_empty() {
        println!("  No technical specifications available.");
    }
    for row in rows {
        if row.is_link {
            println!(
                "  {:<28} {} <{}>",
                row.field,
                row.value,
                crate::models::specification::link_target(&row.value)
            );
        } else {
            println!("  {:<28} {}", row.field, row.value);
        }
    }
    println!();
}

pub(crate) fn print_outcome(outcome: &StatusChange) {
    match outcome {
        StatusChange::Applied { record, .. } => {
            println!("[OK] {} is now {}", record.name, record.status_label());
        }
        StatusChange::Failed { revert_to, message } => {
            println!("[!!] {} (status stays {})", message, revert_to);
        }
        StatusChange::LoginRequired { revert_to } => {
            println!("[!!] Log in first (status stays {})", revert_to);
        }
        StatusChange::AlreadyPending => {
            println!("[!!] A request for this equipment is already in progress");
        }
    }
}

fn opt(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

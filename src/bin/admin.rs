//! CLI administration tool for gym-portal.
//!
//! Talks to the same backend API as the web portal, useful for checking
//! connectivity and inspecting data without opening a browser.
//!
//! # Usage
//!
//! ```bash
//! # Check backend connectivity
//! cargo run --bin admin -- check
//!
//! # List members (prompts for operator credentials)
//! cargo run --bin admin -- member list --search ann
//!
//! # List plans
//! cargo run --bin admin -- plan list
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_API_URL` (required): Base URL of the gym backend API
//! - `BACKEND_TIMEOUT_SECONDS` (optional): Per-request timeout (default: 10)
//!
//! # Features
//!
//! - **Connectivity Checks**: Probe the backend before deploying
//! - **Listings**: Members and plans straight from the backend
//! - **Interactive Prompts**: Credentials are prompted, never passed as arguments
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use gym_portal::domain::entities::{Member, Plan};
use gym_portal::domain::gateways::{
    AuthGateway, MemberGateway, MemberQuery, PageQuery, PlanGateway, PlanQuery,
};
use gym_portal::infrastructure::backend::{
    BackendClient, HttpAuthGateway, HttpMemberGateway, HttpPlanGateway,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for operating gym-portal.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Check backend connectivity
    Check,

    /// Member operations
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Plan operations
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
}

#[derive(Subcommand)]
enum MemberAction {
    /// List members
    List {
        /// Free-text search across member fields
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (default: 1)
        #[arg(short, long)]
        page: Option<u32>,

        /// Page size (default: 25)
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    /// List all plans, including retired ones
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let base_url = std::env::var("BACKEND_API_URL").context("BACKEND_API_URL must be set")?;
    let timeout = std::env::var("BACKEND_TIMEOUT_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let client = Arc::new(BackendClient::new(
        &base_url,
        Duration::from_secs(timeout),
    )?);

    match cli.command {
        Commands::Check => check_backend(client).await?,
        Commands::Member { action } => handle_member_action(action, client).await?,
        Commands::Plan { action } => handle_plan_action(action, client).await?,
    }

    Ok(())
}

/// Probes the backend with the unauthenticated plan listing.
async fn check_backend(client: Arc<BackendClient>) -> Result<()> {
    let gateway = HttpPlanGateway::new(client);

    match gateway.list_public().await {
        Ok(plans) => {
            println!(
                "{} backend reachable, {} public plans",
                "OK".green().bold(),
                plans.len()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "FAILED".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Prompts for operator credentials and returns an access token.
async fn login(client: Arc<BackendClient>) -> Result<String> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    // TTL fallbacks are irrelevant for a one-shot CLI call.
    let gateway = HttpAuthGateway::new(
        client,
        Duration::from_secs(900),
        Duration::from_secs(3600),
    );

    let (tokens, user) = gateway
        .login(email.trim(), &password)
        .await
        .map_err(|e| anyhow::anyhow!("login failed: {e}"))?;

    println!(
        "Logged in as {} ({})",
        user.name.bold(),
        user.role.label().cyan()
    );

    Ok(tokens.access)
}

async fn handle_member_action(action: MemberAction, client: Arc<BackendClient>) -> Result<()> {
    match action {
        MemberAction::List {
            search,
            page,
            limit,
        } => {
            let access = login(client.clone()).await?;
            let gateway = HttpMemberGateway::new(client);

            let query = MemberQuery {
                page: PageQuery::new(page, limit.or(Some(25)), search),
                ..Default::default()
            };
            let result = gateway
                .list(&access, &query)
                .await
                .map_err(|e| anyhow::anyhow!("member list failed: {e}"))?;

            print_members(&result.items);
            println!(
                "\nPage {} of {} ({} total)",
                result.meta.page, result.meta.total_pages, result.meta.total
            );
        }
    }
    Ok(())
}

async fn handle_plan_action(action: PlanAction, client: Arc<BackendClient>) -> Result<()> {
    match action {
        PlanAction::List => {
            let access = login(client.clone()).await?;
            let gateway = HttpPlanGateway::new(client);

            let result = gateway
                .list(
                    &access,
                    &PlanQuery {
                        page: PageQuery::new(Some(1), Some(100), None),
                        is_active: None,
                    },
                )
                .await
                .map_err(|e| anyhow::anyhow!("plan list failed: {e}"))?;

            print_plans(&result.items);
        }
    }
    Ok(())
}

fn print_members(members: &[Member]) {
    if members.is_empty() {
        println!("{}", "No members found".yellow());
        return;
    }

    println!(
        "{:<24} {:<30} {:<10} {:<16}",
        "NAME".bold(),
        "EMAIL".bold(),
        "STATUS".bold(),
        "PLAN".bold()
    );
    for member in members {
        println!(
            "{:<24} {:<30} {:<10} {:<16}",
            member.name,
            member.email,
            member.status.label(),
            member.plan_name.as_deref().unwrap_or("-")
        );
    }
}

fn print_plans(plans: &[Plan]) {
    if plans.is_empty() {
        println!("{}", "No plans configured".yellow());
        return;
    }

    println!(
        "{:<20} {:>10} {:>10} {:<8}",
        "NAME".bold(),
        "PRICE".bold(),
        "MONTHS".bold(),
        "STATUS".bold()
    );
    for plan in plans {
        let status = if plan.is_active {
            "active".green()
        } else {
            "retired".yellow()
        };
        println!(
            "{:<20} {:>10} {:>10} {:<8}",
            plan.name,
            plan.price_label(),
            plan.duration_months,
            status
        );
    }
}

//! vmnet - host dependency manager for shared VM networking
//!
//! Usage:
//!   vmnet status             # Show which dependencies are installed
//!   vmnet install            # Install whatever is missing
//!   vmnet --debug install    # Same, with debug logging

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use dialoguer::Confirm;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vmnet_core::config::ConfigStore;
use vmnet_core::context::DependencyContext;
use vmnet_core::dependency::{Group, install_missing};
use vmnet_core::status::{SystemStatus, collect_status};

#[derive(Parser)]
#[command(name = "vmnet")]
#[command(about = "Host dependency manager for shared VM networking", long_about = None)]
struct Cli {
    /// Run with debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Path to vmnet.toml (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show installation status
    Status {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Install missing dependencies
    Install {
        /// Skip the confirmation prompt for privileged installs
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "vmnet=debug,vmnet_core=debug,info"
    } else {
        "vmnet=info,vmnet_core=info,warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::with_defaults()?,
    };
    tracing::debug!(config = %store.config_path().display(), "loading configuration");
    let context = DependencyContext::load(&store)?;
    let groups = context.groups();

    match cli.command {
        Commands::Status { format } => run_status(&groups, format),
        Commands::Install { yes } => run_install(&groups, yes),
    }
}

fn run_status(groups: &[Group], format: OutputFormat) -> Result<()> {
    let status = collect_status(groups);
    match format {
        OutputFormat::Table => print_table(&status),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
    }
    Ok(())
}

fn print_table(status: &SystemStatus) {
    for group in &status.groups {
        println!("{} ({}):", group.name, group.description);
        println!("  {:<12} {:<14} Root", "Dependency", "Status");
        println!("  {}", "-".repeat(34));
        for dep in &group.dependencies {
            let state = if dep.installed {
                style("installed").green()
            } else {
                style("missing").yellow()
            };
            let root = if dep.requires_root { "yes" } else { "no" };
            println!("  {:<12} {:<14} {}", dep.name, state, root);
        }
        println!();
    }

    if status.is_ok() {
        println!("Summary: {} dependencies, all installed", status.summary.total);
    } else {
        println!(
            "Summary: {} dependencies, {} missing (run 'vmnet install' to resolve)",
            status.summary.total, status.summary.missing
        );
    }
}

fn run_install(groups: &[Group], yes: bool) -> Result<()> {
    let pending: Vec<&Group> = groups.iter().filter(|g| !g.installed()).collect();
    if pending.is_empty() {
        println!("{} All dependencies are already installed", style("✓").green());
        return Ok(());
    }

    if !yes && pending.iter().any(|g| g.requires_root()) {
        let names: Vec<_> = pending.iter().map(|g| g.name()).collect();
        println!("{}", root_advice(&names));
        let proceed = Confirm::new()
            .with_prompt("Continue with the current privileges?")
            .default(false)
            .interact()?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    match install_missing(groups) {
        Ok(()) => {
            println!("{} Dependencies installed", style("✓").green());
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {err}", style("✗").red());
            std::process::exit(1);
        }
    }
}

/// Notice shown before installs that write to system locations. vmnet does
/// not elevate itself.
fn root_advice(names: &[&str]) -> String {
    format!(
        "{} Installing {} writes to system locations and needs root. \
         If this is not a root shell, abort and rerun with 'sudo vmnet install'.",
        style("!").yellow(),
        names.join(", ")
    )
}

//! gatectl - Access Gate CLI
//!
//! Evaluates permission and role checks against a policy file

use access_gate::{
    with_context, AccessContext, Decision, Gate, PolicyConfig, RoleAssignment,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gatectl")]
#[command(version = "0.1.0")]
#[command(about = "Access Gate policy checker", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a gate (exit status 1 when denied)
    Check {
        /// Policy file (YAML)
        #[arg(long, short = 'p')]
        policy: PathBuf,
        /// Required permission
        #[arg(long)]
        permission: Option<String>,
        /// Required role
        #[arg(long)]
        role: Option<String>,
        /// Evaluate as these roles instead of the policy's userRoles
        #[arg(long = "as-role")]
        as_roles: Vec<String>,
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show granted roles and effective permissions
    Roles {
        /// Policy file (YAML)
        #[arg(long, short = 'p')]
        policy: PathBuf,
        /// Evaluate as these roles instead of the policy's userRoles
        #[arg(long = "as-role")]
        as_roles: Vec<String>,
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Validate a policy file
    Validate {
        /// Policy file (YAML)
        #[arg(long, short = 'p')]
        policy: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_policy(path: &Path) -> Result<PolicyConfig> {
    PolicyConfig::load(path).with_context(|| format!("Failed to load policy {}", path.display()))
}

fn resolve(config: &PolicyConfig, as_roles: Vec<String>) -> AccessContext {
    if as_roles.is_empty() {
        config.resolve()
    } else {
        debug!(roles = ?as_roles, "Overriding policy userRoles");
        config.resolve_as(&RoleAssignment::from(as_roles))
    }
}

fn format_decision(decision: Decision) -> String {
    match decision {
        Decision::Granted => decision.to_string().green().bold().to_string(),
        Decision::Denied => decision.to_string().red().bold().to_string(),
    }
}

fn handle_check(
    policy: PathBuf,
    permission: Option<String>,
    role: Option<String>,
    as_roles: Vec<String>,
    format: &str,
) -> Result<Decision> {
    let config = load_policy(&policy)?;
    let context = Arc::new(resolve(&config, as_roles));

    let mut gate = Gate::new();
    if let Some(p) = permission {
        gate = gate.permission(p);
    }
    if let Some(r) = role {
        gate = gate.role(r);
    }

    let decision = with_context(context.clone(), || gate.check())?;

    match format {
        "json" => {
            let out = json!({
                "decision": decision,
                "gate": gate,
                "userRoles": context.assignment(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            println!("Decision:    {}", format_decision(decision));
            println!(
                "Permission:  {}",
                gate.required_permission.as_deref().unwrap_or("-")
            );
            println!("Role:        {}", gate.required_role.as_deref().unwrap_or("-"));
            println!("User roles:  {}", context.assignment().as_slice().join(", "));
        }
    }

    Ok(decision)
}

fn handle_roles(policy: PathBuf, as_roles: Vec<String>, format: &str) -> Result<()> {
    let config = load_policy(&policy)?;
    let context = resolve(&config, as_roles);

    match format {
        "json" => {
            let out = json!({
                "grantedRoles": context.granted_roles(),
                "permissions": context.permissions(),
                "unknownRoles": context.unknown_roles(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            println!("{:<20} PERMISSIONS", "ROLE");
            println!("{}", "-".repeat(60));
            for role in context.granted_roles() {
                println!("{:<20} {}", role.name, role.permissions.join(", "));
            }
            let unknown = context.unknown_roles();
            if !unknown.is_empty() {
                println!(
                    "\n{} assigned roles not in policy: {}",
                    "!".yellow(),
                    unknown.join(", ")
                );
            }
            println!("\nEffective permissions: {}", context.permissions().join(", "));
        }
    }

    Ok(())
}

fn handle_validate(policy: PathBuf) -> Result<()> {
    let config = load_policy(&policy)?;

    println!("{} Policy is valid", "✓".green());
    println!("  Roles: {}", config.registry().len());
    println!("  User roles: {}", config.assignment().len());

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            policy,
            permission,
            role,
            as_roles,
            format,
        } => {
            let decision = handle_check(policy, permission, role, as_roles, &format)?;
            if !decision.is_granted() {
                std::process::exit(1);
            }
        }
        Commands::Roles {
            policy,
            as_roles,
            format,
        } => handle_roles(policy, as_roles, &format)?,
        Commands::Validate { policy } => handle_validate(policy)?,
    }

    Ok(())
}

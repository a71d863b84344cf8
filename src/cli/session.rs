//! Session commands: simulated login, logout and status

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::format_json;
use crate::session::{AuthStatus, SimulatedRole};

#[derive(Debug, Serialize)]
struct LoginResult<'a> {
    role: &'a str,
    landing_path: String,
}

/// Store a simulated credential and report where the user would land
pub fn login(ctx: &CommandContext, role: SimulatedRole, email: Option<&str>) -> Result<()> {
    let simulator = ctx.simulator();
    match email {
        Some(email) => simulator.login_as_with_email(role, email)?,
        None => simulator.login_as(role)?,
    }

    let result = LoginResult {
        role: role.as_str(),
        landing_path: ctx.guard().landing_path(),
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&result)?),
        OutputFormat::Pretty => {
            println!(
                "{} Logged in as {} (simulated, unsigned token)",
                "✓".green(),
                result.role.bold()
            );
            println!("  → Landing page: {}", result.landing_path.cyan());
        }
    }
    Ok(())
}

pub fn logout(ctx: &CommandContext) -> Result<()> {
    ctx.simulator().logout()?;

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", format_json(&serde_json::json!({ "logged_out": true }))?)
        }
        OutputFormat::Pretty => println!("{} Logged out", "✓".green()),
    }
    Ok(())
}

/// Run the status command to display the current session
pub fn status(ctx: &CommandContext) -> Result<()> {
    let status = ctx.simulator().status();

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&status)?),
        OutputFormat::Pretty => print_status(ctx, &status),
    }
    Ok(())
}

fn print_status(ctx: &CommandContext, status: &AuthStatus) {
    println!("{}\n", "LMS Session Status".bold());

    if ctx.tokens.credential().is_none() {
        println!("{} No credential stored", "✗".red());
        println!("  → Run 'lms-session token set' or 'lms-session login --role <ROLE>'");
        println!();
        return;
    }

    if status.authenticated {
        let remaining = status
            .expires_at
            .map(|exp| exp.signed_duration_since(Utc::now()))
            .unwrap_or_else(chrono::Duration::zero);
        println!(
            "{} Authenticated (expires in {}h {}m)",
            "✓".green(),
            remaining.num_hours(),
            remaining.num_minutes() % 60
        );
    } else if status.expires_at.is_some() {
        println!("{} Credential expired", "⚠".yellow());
    } else {
        println!("{} Credential could not be decoded", "⚠".yellow());
    }

    let field = |label: &str, value: &Option<String>| match value {
        Some(v) => println!("  {:<10} {}", label, v),
        None => println!("  {:<10} {}", label, "-".dimmed()),
    };
    field("Role:", &status.role);
    field("Email:", &status.email);
    field("Name:", &status.name);
    field("Entity ID:", &status.entity_id);
    println!();
}

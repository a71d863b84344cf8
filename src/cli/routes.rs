//! Route admission commands

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::{format_json, format_table};
use crate::routing::{Admission, ConsoleNavigator, RouteMeta};

#[derive(Debug, Tabled)]
struct RouteRow {
    #[tabled(rename = "PATH")]
    path: String,
    #[tabled(rename = "ROLES")]
    roles: String,
}

impl From<&RouteMeta> for RouteRow {
    fn from(route: &RouteMeta) -> Self {
        let roles = if route.roles.is_empty() {
            "(any authenticated)".to_string()
        } else {
            route.roles.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        Self {
            path: route.path.clone(),
            roles,
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckResult<'a> {
    path: &'a str,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
}

pub fn list(ctx: &CommandContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&ctx.config.routes)?),
        OutputFormat::Pretty => {
            let rows: Vec<RouteRow> = ctx.config.routes.iter().map(RouteRow::from).collect();
            println!("{}", format_table(&rows));
        }
    }
    Ok(())
}

/// Run the guard for `path` and act on the decision like a router would
pub fn check(ctx: &CommandContext, path: &str) -> Result<()> {
    let admission = ctx.guard().admit_path(&ctx.config.route_table(), path);

    let result = match &admission {
        Admission::Allow => CheckResult {
            path,
            allowed: true,
            reason: None,
            redirect: None,
        },
        Admission::Deny { reason, redirect } => CheckResult {
            path,
            allowed: false,
            reason: Some(reason.to_string()),
            redirect: Some(redirect.clone()),
        },
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&result)?),
        OutputFormat::Pretty => {
            if result.allowed {
                println!("{} Navigation to {} allowed", "✓".green(), path.cyan());
            } else if let Some(ref reason) = result.reason {
                println!("{} Navigation to {} denied: {}", "✗".red(), path.cyan(), reason);
            }
        }
    }
    admission.apply(&ConsoleNavigator);
    Ok(())
}

//! Credential commands

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::{CommandContext, OutputFormat};
use crate::error::{Error, Result};
use crate::output::format_json;

/// Store a credential issued by the backend login/OTP flow
pub fn set(ctx: &CommandContext, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(t) => t,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Paste the token")
            .interact()?,
    };
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Other("Token cannot be empty".to_string()));
    }

    ctx.tokens.set_credential(token)?;

    let landing = ctx.guard().landing_path();
    let decoded = ctx.tokens.decode_claims().is_some();

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({
                "stored": true,
                "decoded": decoded,
                "landing_path": landing,
            }))?
        ),
        OutputFormat::Pretty => {
            println!("{} Credential stored", "✓".green());
            if !decoded {
                println!("{} Credential could not be decoded", "⚠".yellow());
            }
            println!("  → Landing page: {}", landing.cyan());
        }
    }
    Ok(())
}

pub fn show(ctx: &CommandContext) -> Result<()> {
    match ctx.tokens.credential() {
        Some(token) => {
            println!("{}", token);
            Ok(())
        }
        None => Err(Error::Other("No credential stored".to_string())),
    }
}

pub fn claims(ctx: &CommandContext) -> Result<()> {
    if ctx.tokens.credential().is_none() {
        return Err(Error::Other("No credential stored".to_string()));
    }
    let claims = ctx
        .tokens
        .decode_claims()
        .ok_or_else(|| Error::Other("Stored credential could not be decoded".to_string()))?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&claims)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&claims)?),
    }
    Ok(())
}

//! Ad-hoc requests through the authorization interceptor

use reqwest::Method;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{HttpRequest, Transport};
use crate::error::Result;
use crate::output::format_json;

/// Send one request. Authorization failures trigger the interceptor's
/// redirect and are then reported as the command's error.
pub async fn run(
    ctx: &CommandContext,
    method: Method,
    target: &str,
    data: Option<String>,
) -> Result<()> {
    let mut request = HttpRequest::new(method, ctx.config.url_for(target));
    if let Some(body) = data {
        request = request.with_json_body(body);
    }

    let transport = ctx.transport()?;
    let response = transport.send(request).await?;

    let parsed: Option<serde_json::Value> = serde_json::from_str(&response.body).ok();
    match (ctx.format, parsed) {
        (OutputFormat::Json, Some(value)) => println!("{}", format_json(&value)?),
        (OutputFormat::Json, None) => println!("{}", format_json(&response.body)?),
        (OutputFormat::Pretty, Some(value)) => {
            println!("{}", serde_json::to_string_pretty(&value)?)
        }
        (OutputFormat::Pretty, None) => println!("{}", response.body),
    }
    Ok(())
}

use anyhow::{anyhow, bail};
use clap::Subcommand;
use serde_json::{json, Map, Value};

use crate::auth::TokenService;
use crate::cli::utils::{output_success, output_value};
use crate::cli::OutputFormat;
use crate::config::SecurityConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Issue a signed token for a subject")]
    Issue {
        #[arg(help = "Subject (sub claim)")]
        subject: String,
        #[arg(long = "claim", value_name = "KEY=VALUE", help = "Extra claim; JSON values are kept typed")]
        claims: Vec<String>,
        #[arg(long, help = "Lifetime in milliseconds (defaults to JWT_EXPIRATION)")]
        ttl_ms: Option<u64>,
    },

    #[command(about = "Check a token's signature and expiry and print its claims")]
    Verify {
        #[arg(help = "Token to verify")]
        token: String,
    },
}

pub fn handle(cmd: TokenCommands, security: &SecurityConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { subject, claims, ttl_ms } => {
            let tokens = TokenService::new(&security.jwt_secret, ttl_ms.unwrap_or(security.jwt_expiration_ms))?;
            let extra = parse_claims(&claims)?;
            let token = tokens.issue(&subject, extra)?;
            let claims = tokens.extract_claims(&token)?;

            output_value(
                output_format,
                &token,
                &json!({
                    "token": token,
                    "subject": claims.sub,
                    "expires_at": claims.expires_at(),
                }),
            )
        }
        TokenCommands::Verify { token } => {
            let tokens = TokenService::from_config(security)?;
            let claims = tokens.verify(&token)?;

            let message = format!("Token valid for '{}'", claims.sub);
            output_success(output_format, &message, Some(json!({ "claims": claims })))
        }
    }
}

/// `key=value` pairs; values that parse as JSON keep their type.
fn parse_claims(raw: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut claims = Map::new();
    for pair in raw {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Claim '{}' must look like key=value", pair))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("Claim '{}' has an empty key", pair);
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        claims.insert(key.to_string(), value);
    }
    Ok(claims)
}

use clap::Subcommand;
use serde_json::json;

use crate::auth::{generate_jwt, Claims, MAX_TOKEN_LIFETIME_HOURS};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint a bearer token signed with JWT_SECRET")]
    Issue {
        #[arg(long, help = "Token subject (user name)")]
        subject: String,
        #[arg(long, help = "Role claim (defaults to the configured admin role)")]
        role: Option<String>,
        #[arg(
            long,
            value_parser = clap::value_parser!(u64).range(1..=MAX_TOKEN_LIFETIME_HOURS),
            help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)"
        )]
        hours: Option<u64>,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;

    match cmd {
        TokenCommands::Issue { subject, role, hours } => {
            let role = role.unwrap_or_else(|| security.admin_role.clone());
            let hours = hours.unwrap_or(security.jwt_expiry_hours);
            let claims = Claims::new(subject, role, hours);
            let token = generate_jwt(&claims, &security.jwt_secret)?;

            match output_format {
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
                OutputFormat::Json => output_success(
                    &output_format,
                    "Token issued",
                    Some(json!({
                        "token": token,
                        "subject": claims.sub,
                        "role": claims.role,
                        "expires_at": claims.exp
                    })),
                ),
            }
        }
    }
}

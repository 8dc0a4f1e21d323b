use portfolio_config::Config;
use portfolio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Configuring smtp transport");
    let email = email::connect(&config.email).await?;

    // each submission reports its own delivery failure, so an unreachable
    // smtp server must not prevent the server from starting
    match email.ping().await {
        Ok(()) => info!("Smtp server is reachable"),
        Err(err) => warn!("Failed to ping smtp server: {err:#}"),
    }

    let server = environment::rest_server(&config, email)?;
    server.serve().await
}

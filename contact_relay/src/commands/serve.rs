use contact_relay_config::Config;
use contact_relay_email_contracts::EmailService;
use tracing::info;

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email)?;
    email.ping().await?;

    let server = environment::build(&config, email)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}

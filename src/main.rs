use anyhow::Result;
use guild_utilities::infrastructure::{discord, policy_store::PolicyStore, settings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let settings = settings::get().await?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = dotenv {
        warn!(error = %e, "no .env file loaded");
    }

    let token = settings::token()?;
    let policy = PolicyStore::load(settings.policy_path.clone()).await?;
    info!(path = %policy.path().display(), "policy loaded");

    let framework = discord::framework::get(settings, policy);
    let mut client = discord::client::Client::get(&token, framework).await?;
    client.start().await?;

    Ok(())
}

use anyhow::Result;
use serenity::{
    Client as SerenityClient,
    all::{Framework, GatewayIntents},
};

pub struct Client;

impl Client {
    pub async fn get<F: Framework + 'static>(token: &str, framework: F) -> Result<SerenityClient> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MEMBERS;

        let client = SerenityClient::builder(token, intents)
            .framework(framework)
            .await?;

        Ok(client)
    }
}

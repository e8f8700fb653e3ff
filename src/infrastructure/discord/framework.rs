use poise::{CreateReply, Framework, FrameworkError};
use serenity::all::GuildId;
use tracing::{error, info, warn};

use crate::{
    discord::commands::Commands,
    infrastructure::{policy_store::PolicyStore, settings::Settings},
    types::discord::framework::{Data, Error},
};

pub fn get(settings: Settings, policy: PolicyStore) -> Framework<Data, Error> {
    let options = poise::FrameworkOptions {
        commands: vec![Commands::utility()],
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    };

    poise::Framework::builder()
        .options(options)
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, guilds = ready.guilds.len(), "connected to Discord");
                let commands = &framework.options().commands;
                match settings.dev_guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(ctx, commands, GuildId::new(guild_id))
                            .await?
                    }
                    None => poise::builtins::register_globally(ctx, commands).await?,
                }
                Ok(Data::new(settings, policy))
            })
        })
        .build()
}

async fn on_error(error: FrameworkError<'_, Data, Error>) {
    match error {
        FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().qualified_name, %error, "command failed");
            let _ = ctx
                .say("Something went wrong while running this command.")
                .await;
        }
        FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            if let Some(error) = error {
                warn!(command = %ctx.command().qualified_name, %error, "permission check errored");
            }
            let reply = CreateReply::default()
                .content("You are not permitted to use this command.")
                .ephemeral(true);
            let _ = ctx.send(reply).await;
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "failed to report framework error");
            }
        }
    }
}

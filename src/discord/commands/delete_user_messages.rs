use std::sync::Arc;

use poise::{CreateReply, Modal};
use serenity::all::{Channel, GuildChannel, Http, User};
use tracing::info;

use crate::{
    discord::sweep,
    model::migration::{MAX_CONTENT_LEN, split_content},
    types::discord::framework::Error,
};

use super::{ApplicationContext, Context};

#[derive(Debug, Modal)]
#[name = "Confirm message deletion"]
struct Confirmation {
    #[name = "Type the user's username to confirm"]
    #[placeholder = "username"]
    #[max_length = 32]
    username: String,
}

impl Confirmation {
    fn confirms(&self, username: &str) -> bool {
        self.username.trim().eq_ignore_ascii_case(username)
    }
}

pub async fn handle(
    app_ctx: ApplicationContext<'_>,
    user: User,
    channel: Option<Channel>,
) -> Result<(), Error> {
    let ctx = Context::Application(app_ctx);
    let Some(guild_id) = ctx.guild_id() else {
        return Err("This command only works in a guild.".into());
    };

    let Some(_lease) = ctx.data().sweeps.try_acquire(user.id.get()) else {
        ctx.send(
            CreateReply::default()
                .content(format!(
                    "Messages of {} are already being deleted.",
                    user.name
                ))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let timeout = ctx.data().settings.confirm_timeout();
    let Some(confirmation) =
        poise::execute_modal::<_, _, Confirmation>(app_ctx, None, Some(timeout)).await?
    else {
        info!(subject = user.id.get(), "deletion confirmation timed out");
        return Ok(());
    };

    let http = ctx.http();
    let channel_id = ctx.channel_id();
    if !confirmation.confirms(&user.name) {
        channel_id
            .say(http, "Username did not match, nothing was deleted.")
            .await?;
        return Ok(());
    }

    info!(subject = user.id.get(), by = ctx.author().id.get(), "deleting user messages");
    channel_id
        .say(http, format!("Deleting messages of {}...", user.name))
        .await?;

    let targets = match channel {
        Some(channel) => single_target(http, channel).await?,
        None => sweep::guild_targets(http, guild_id).await?,
    };
    let summaries =
        sweep::sweep_user(Arc::clone(&ctx.serenity_context().http), &targets, user.id).await;

    for part in split_content(&sweep::render_report(&user.name, &summaries), MAX_CONTENT_LEN) {
        channel_id.say(http, part).await?;
    }

    Ok(())
}

async fn single_target(http: &Http, channel: Channel) -> Result<Vec<GuildChannel>, Error> {
    let channel = match channel {
        Channel::Guild(channel) => channel,
        other => other.id().to_channel(http).await?.guild().ok_or("Not a guild channel.")?,
    };
    if !sweep::is_sweepable(channel.kind) {
        return Err(format!("<#{}> cannot hold messages.", channel.id).into());
    }
    Ok(vec![channel])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_ignores_case_and_whitespace() {
        let confirmation = Confirmation {
            username: "  Alice_01 ".to_string(),
        };
        assert!(confirmation.confirms("alice_01"));
        assert!(!confirmation.confirms("alice_02"));
    }
}

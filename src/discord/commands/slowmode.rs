use serenity::all::{Channel, EditChannel};
use tracing::info;

use crate::{model::slowmode, types::discord::framework::Error};

use super::Context;

pub async fn handle(ctx: Context<'_>, seconds: u16, channel: Option<Channel>) -> Result<(), Error> {
    let seconds = match slowmode::validate(seconds) {
        Ok(seconds) => seconds,
        Err(message) => {
            ctx.say(message).await?;
            return Ok(());
        }
    };
    let channel_id = channel
        .map(|channel| channel.id())
        .unwrap_or_else(|| ctx.channel_id());

    channel_id
        .edit(ctx.http(), EditChannel::new().rate_limit_per_user(seconds))
        .await?;
    info!(channel_id = channel_id.get(), seconds, "slowmode updated");

    ctx.say(format!(
        "Slowmode for <#{channel_id}> is now {}.",
        slowmode::describe(seconds)
    ))
    .await?;

    Ok(())
}

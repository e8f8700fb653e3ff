use serenity::all::{Channel, EditThread};
use tracing::info;

use crate::types::discord::framework::Error;

use super::Context;

pub async fn handle(ctx: Context<'_>, thread: Option<Channel>) -> Result<(), Error> {
    let channel_id = thread
        .map(|thread| thread.id())
        .unwrap_or_else(|| ctx.channel_id());
    let channel = channel_id.to_channel(ctx.http()).await?.guild();
    let Some(metadata) = channel.and_then(|channel| channel.thread_metadata) else {
        ctx.say(format!("<#{channel_id}> is not a thread.")).await?;
        return Ok(());
    };

    if metadata.archived {
        channel_id
            .edit_thread(ctx.http(), EditThread::new().archived(false))
            .await?;
        ctx.say(format!("<#{channel_id}> has been unarchived.")).await?;
    } else {
        // Replying after archiving would unarchive the thread again.
        ctx.say(format!("<#{channel_id}> has been archived.")).await?;
        channel_id
            .edit_thread(ctx.http(), EditThread::new().archived(true))
            .await?;
    }
    info!(
        channel_id = channel_id.get(),
        archived = !metadata.archived,
        "thread archive state toggled"
    );

    Ok(())
}

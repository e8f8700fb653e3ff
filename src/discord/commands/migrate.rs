use serenity::all::{
    Channel, ChannelId, CreateAttachment, CreateEmbed, CreateWebhook, ExecuteWebhook, GetMessages,
    Http, Message, MessageId, MessageType, Webhook,
};
use tracing::{debug, info, warn};

use crate::{
    model::migration::{self, MigrationReport},
    types::discord::framework::Error,
};

use super::Context;

const WEBHOOK_NAME: &str = "Channel migration";
const PAGE_SIZE: u8 = 100;

pub async fn handle(ctx: Context<'_>, source: Channel, destination: Channel) -> Result<(), Error> {
    let source_id = source.id();
    let destination_id = destination.id();
    if source_id == destination_id {
        ctx.say("Source and destination must be different channels.")
            .await?;
        return Ok(());
    }

    let Some(_lease) = ctx.data().migrations.try_acquire(source_id.get()) else {
        ctx.say(format!("<#{source_id}> is already being migrated."))
            .await?;
        return Ok(());
    };

    ctx.say(format!("Migrating <#{source_id}> into <#{destination_id}>..."))
        .await?;
    info!(
        source = source_id.get(),
        destination = destination_id.get(),
        "migrating channel"
    );

    let http = ctx.http();
    let webhook = destination_id
        .create_webhook(http, CreateWebhook::new(WEBHOOK_NAME))
        .await?;
    let replayed = replay_history(http, &webhook, source_id).await;
    if let Err(e) = webhook.delete(http).await {
        warn!(webhook_id = webhook.id.get(), error = %e, "failed to delete migration webhook");
    }

    // The interaction token may have expired by now, so the result goes to the channel.
    let text = match replayed {
        Ok(report) => format!("Migrated <#{source_id}> into <#{destination_id}>: {report}."),
        Err((report, e)) => {
            warn!(source = source_id.get(), error = %e, "migration stopped early");
            format!("Migration of <#{source_id}> stopped early ({e}): {report}.")
        }
    };
    ctx.channel_id().say(http, text).await?;

    Ok(())
}

/// Replays the source's history oldest first, one page at a time. On a failed
/// page fetch the counts so far are returned with the error.
async fn replay_history(
    http: &Http,
    webhook: &Webhook,
    source_id: ChannelId,
) -> Result<MigrationReport, (MigrationReport, serenity::Error)> {
    let mut report = MigrationReport::default();
    let mut cursor = MessageId::new(1);

    loop {
        let request = GetMessages::new().after(cursor).limit(PAGE_SIZE);
        let mut page = match source_id.messages(http, request).await {
            Ok(page) => page,
            Err(e) => return Err((report, e)),
        };
        page.sort_by_key(|message| message.id);

        for message in &page {
            replay(http, webhook, message, &mut report).await;
        }

        let ids: Vec<MessageId> = page.iter().map(|message| message.id).collect();
        match next_cursor(&ids) {
            Some(next) => cursor = next,
            None => return Ok(report),
        }
    }
}

/// Where the next page starts, given the ids of a page in posting order. A
/// short page is the last one.
fn next_cursor(page: &[MessageId]) -> Option<MessageId> {
    if page.len() < usize::from(PAGE_SIZE) {
        return None;
    }
    page.last().copied()
}

async fn replay(http: &Http, webhook: &Webhook, message: &Message, report: &mut MigrationReport) {
    if !is_replayable(message.kind) {
        report.empty += 1;
        return;
    }
    match replay_one(http, webhook, message).await {
        Ok(true) => report.copied += 1,
        Ok(false) => report.empty += 1,
        Err(e) => {
            warn!(message_id = message.id.get(), error = %e, "failed to replay message");
            report.failed += 1;
        }
    }
}

fn is_replayable(kind: MessageType) -> bool {
    matches!(kind, MessageType::Regular | MessageType::InlineReply)
}

/// Posts one message through the webhook. Returns `false` when there was
/// nothing to post.
async fn replay_one(http: &Http, webhook: &Webhook, message: &Message) -> serenity::Result<bool> {
    let mut files = Vec::new();
    let mut unsent = Vec::new();
    for attachment in &message.attachments {
        match CreateAttachment::url(http, &attachment.url).await {
            Ok(file) => files.push(file),
            Err(e) => {
                debug!(url = %attachment.url, error = %e, "re-upload failed, linking instead");
                unsent.push(attachment.url.clone());
            }
        }
    }

    let bodies = migration::message_bodies(&message.content, &unsent);
    let mut embeds: Vec<CreateEmbed> = message
        .embeds
        .iter()
        .cloned()
        .map(CreateEmbed::from)
        .collect();
    if bodies.is_empty() && files.is_empty() && embeds.is_empty() {
        return Ok(false);
    }

    let username = message
        .author
        .global_name
        .clone()
        .unwrap_or_else(|| message.author.name.clone());
    let avatar_url = message.author.face();

    let posts = bodies.len().max(1);
    let mut bodies = bodies.into_iter();
    for index in 0..posts {
        let mut builder = ExecuteWebhook::new()
            .username(username.clone())
            .avatar_url(avatar_url.clone());
        if let Some(body) = bodies.next() {
            builder = builder.content(body);
        }
        if index + 1 == posts {
            builder = builder
                .add_files(std::mem::take(&mut files))
                .embeds(std::mem::take(&mut embeds));
        }
        webhook.execute(http, false, builder).await?;
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_stops_after_a_short_page() {
        let full: Vec<MessageId> = (1..=u64::from(PAGE_SIZE)).map(MessageId::new).collect();
        assert_eq!(next_cursor(&full), Some(MessageId::new(u64::from(PAGE_SIZE))));

        let short: Vec<MessageId> = (1..=5).map(MessageId::new).collect();
        assert_eq!(next_cursor(&short), None);
        assert_eq!(next_cursor(&[]), None);
    }

    #[test]
    fn only_user_messages_are_replayed() {
        assert!(is_replayable(MessageType::Regular));
        assert!(is_replayable(MessageType::InlineReply));
        assert!(!is_replayable(MessageType::PinsAdd));
        assert!(!is_replayable(MessageType::MemberJoin));
    }
}

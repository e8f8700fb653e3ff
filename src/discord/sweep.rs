//! Serenity side of the message sweep: channels and threads as traversal
//! targets, their history as the item source, and Discord error codes mapped
//! onto [`ErrorCode`].

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::{StreamExt, stream::BoxStream};
use serenity::all::{
    ChannelId, ChannelType, EditThread, GuildChannel, GuildId, Http, HttpError, Message, UserId,
};
use serenity::async_trait;
use tracing::{debug, warn};

use crate::traversal::{
    Action, ActionError, ActionTarget, ErrorCode, Fetched, ItemSource, Predicate, SecondaryAction,
    Summary, run_traversal,
};

const ARCHIVED_THREADS_PAGE: u64 = 100;

pub fn code_for(discord_code: isize) -> ErrorCode {
    match discord_code {
        50083 => ErrorCode::DisabledState,
        10003 => ErrorCode::ResourceNotFound,
        10008 => ErrorCode::ResourceGone,
        50001 => ErrorCode::NoAccess,
        50013 => ErrorCode::InsufficientPermission,
        50021 => ErrorCode::SystemItem,
        160005 => ErrorCode::TargetLocked,
        other => ErrorCode::Unclassified(Some(other as i64)),
    }
}

pub fn classify(error: &serenity::Error) -> ActionError {
    let code = match error {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            code_for(response.error.code)
        }
        _ => ErrorCode::Unclassified(None),
    };
    ActionError::new(code, error.to_string())
}

/// What the sweep predicate needs to know about a message.
pub trait Authored {
    fn author_id(&self) -> u64;
    /// The user who ran the interaction that produced this message, if any.
    fn invoker_id(&self) -> Option<u64>;
}

impl Authored for Message {
    fn author_id(&self) -> u64 {
        self.author.id.get()
    }

    #[allow(deprecated)]
    fn invoker_id(&self) -> Option<u64> {
        self.interaction
            .as_ref()
            .map(|interaction| interaction.user.id.get())
    }
}

/// Matches messages the subject wrote, or that answer a command the subject ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthoredOrInvokedBy(pub u64);

impl<I: Authored> Predicate<I> for AuthoredOrInvokedBy {
    fn matches(&self, item: &I) -> bool {
        item.author_id() == self.0 || item.invoker_id() == Some(self.0)
    }
}

/// A text channel or thread. For threads the toggle state is `archived`.
pub struct ChannelTarget {
    http: Arc<Http>,
    channel_id: ChannelId,
    archived: bool,
}

impl ChannelTarget {
    pub fn new(http: &Arc<Http>, channel: &GuildChannel) -> Self {
        Self {
            http: Arc::clone(http),
            channel_id: channel.id,
            archived: channel
                .thread_metadata
                .as_ref()
                .is_some_and(|metadata| metadata.archived),
        }
    }
}

#[async_trait]
impl ActionTarget for ChannelTarget {
    type Item = Message;
    type Items<'a>
        = HistorySource
    where
        Self: 'a;

    fn id(&self) -> u64 {
        self.channel_id.get()
    }

    fn toggle_state(&self) -> bool {
        self.archived
    }

    async fn set_toggle_state(&self, on: bool) -> Result<(), ActionError> {
        self.channel_id
            .edit_thread(&*self.http, EditThread::new().archived(on))
            .await
            .map(|_| ())
            .map_err(|e| classify(&e))
    }

    fn items(&self) -> HistorySource {
        HistorySource {
            stream: self.channel_id.messages_iter(Arc::clone(&self.http)).boxed(),
        }
    }
}

/// Channel history, newest first, as serenity pages it.
pub struct HistorySource {
    stream: BoxStream<'static, serenity::Result<Message>>,
}

#[async_trait]
impl ItemSource for HistorySource {
    type Item = Message;

    async fn next_item(&mut self) -> Result<Fetched<Message>, ActionError> {
        match self.stream.next().await {
            Some(Ok(message)) => Ok(Fetched::Item(message)),
            Some(Err(e)) => Err(classify(&e)),
            None => Ok(Fetched::End),
        }
    }
}

pub struct DeleteMessage {
    pub http: Arc<Http>,
}

#[async_trait]
impl Action<Message> for DeleteMessage {
    async fn apply(&self, message: &Message) -> Result<(), ActionError> {
        message
            .channel_id
            .delete_message(&*self.http, message.id)
            .await
            .map_err(|e| classify(&e))
    }
}

/// Removes the subject's reactions from messages that stay.
pub struct ClearReactions {
    pub http: Arc<Http>,
    pub subject: UserId,
}

#[async_trait]
impl SecondaryAction<Message> for ClearReactions {
    async fn apply(&self, message: &Message) -> anyhow::Result<()> {
        for reaction in &message.reactions {
            message
                .channel_id
                .delete_reaction(
                    &*self.http,
                    message.id,
                    Some(self.subject),
                    reaction.reaction_type.clone(),
                )
                .await?;
        }
        Ok(())
    }
}

pub fn is_sweepable(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::Text
            | ChannelType::News
            | ChannelType::Voice
            | ChannelType::NewsThread
            | ChannelType::PublicThread
            | ChannelType::PrivateThread
    )
}

fn has_threads(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::Text | ChannelType::News | ChannelType::Forum
    )
}

/// Every channel and thread of the guild that can hold messages, including
/// the most recent page of archived public threads of each parent channel.
pub async fn guild_targets(http: &Http, guild_id: GuildId) -> serenity::Result<Vec<GuildChannel>> {
    let mut targets = BTreeMap::new();
    let channels = guild_id.channels(http).await?;

    for channel in channels.values() {
        if !has_threads(channel.kind) {
            continue;
        }
        match channel
            .id
            .get_archived_public_threads(http, None, Some(ARCHIVED_THREADS_PAGE))
            .await
        {
            Ok(data) => {
                for thread in data.threads {
                    targets.insert(thread.id, thread);
                }
            }
            Err(e) => {
                debug!(channel_id = channel.id.get(), error = %e, "cannot list archived threads");
            }
        }
    }

    for thread in guild_id.get_active_threads(http).await?.threads {
        targets.insert(thread.id, thread);
    }
    for (id, channel) in channels {
        targets.insert(id, channel);
    }

    Ok(targets
        .into_values()
        .filter(|channel| is_sweepable(channel.kind))
        .collect())
}

/// Runs one traversal per target, in order.
///
/// An aborted traversal only ends that target; the others still run.
pub async fn sweep_targets<T, P, A, S>(
    targets: &[T],
    predicate: &P,
    action: &A,
    secondary: &S,
) -> Vec<Summary>
where
    T: ActionTarget,
    P: Predicate<T::Item>,
    A: Action<T::Item>,
    S: SecondaryAction<T::Item>,
{
    let mut summaries = Vec::with_capacity(targets.len());
    for target in targets {
        let summary = run_traversal(target, predicate, action, secondary).await;
        if !summary.status.is_completed() {
            warn!(target_id = target.id(), status = %summary.status, "sweep stopped early");
        }
        summaries.push(summary);
    }
    summaries
}

/// Deletes the subject's messages from every channel in `channels` and clears
/// their reactions from the rest.
pub async fn sweep_user(
    http: Arc<Http>,
    channels: &[GuildChannel],
    subject: UserId,
) -> Vec<Summary> {
    let targets: Vec<ChannelTarget> = channels
        .iter()
        .map(|channel| ChannelTarget::new(&http, channel))
        .collect();
    let action = DeleteMessage {
        http: Arc::clone(&http),
    };
    let secondary = ClearReactions { http, subject };

    sweep_targets(&targets, &AuthoredOrInvokedBy(subject.get()), &action, &secondary).await
}

/// Text posted once a sweep is over: totals, then every target that had
/// something to report. The subject is named in plain text so nobody is pinged.
pub fn render_report(subject_name: &str, summaries: &[Summary]) -> String {
    let matched: u64 = summaries.iter().map(|summary| summary.matched).sum();
    let deleted: u64 = summaries.iter().map(|summary| summary.deleted).sum();
    let failed: u64 = summaries.iter().map(|summary| summary.failed).sum();

    let mut report = format!(
        "Finished deleting messages of {subject_name}: \
         {deleted} of {matched} deleted, {failed} failed across {} channel(s).",
        summaries.len()
    );
    for summary in summaries {
        if summary.matched == 0 && summary.status.is_completed() && summary.restore_error.is_none()
        {
            continue;
        }
        report.push_str(&format!("\n- <#{}>: {summary}", summary.target_id));
    }
    report
}

use serenity::all::{Channel, Role, User};

use crate::{
    discord::checks::{is_operator, is_privileged},
    types::discord::framework::{Data, Error},
};

pub mod archive;
pub mod delete_user_messages;
pub mod elevate;
pub mod members_older_than;
pub mod migrate;
pub mod operators;
pub mod slowmode;

pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type ApplicationContext<'a> = poise::ApplicationContext<'a, Data, Error>;

pub struct Commands;

impl Commands {
    /// Useful utilities for Discord guilds
    #[poise::command(
        slash_command,
        guild_only,
        subcommands(
            "Self::elevate_role",
            "Self::elevate_member",
            "Self::elevate_clear",
            "Self::elevate_list",
            "Self::operator",
            "Self::guild"
        ),
        subcommand_required
    )]
    pub async fn utility(_ctx: Context<'_>) -> Result<(), Error> {
        Ok(())
    }

    /// Elevate certain role to run privileged commands
    #[poise::command(slash_command, guild_only, check = "is_operator")]
    pub async fn elevate_role(
        ctx: Context<'_>,
        #[description = "Role to be elevated"] role: Role,
    ) -> Result<(), Error> {
        elevate::role(ctx, role).await
    }

    /// Elevate certain member to run privileged commands
    #[poise::command(slash_command, guild_only, check = "is_operator")]
    pub async fn elevate_member(
        ctx: Context<'_>,
        #[description = "Member to be elevated"] member: User,
    ) -> Result<(), Error> {
        elevate::member(ctx, member).await
    }

    /// Clear all privilege elevations
    #[poise::command(slash_command, guild_only, check = "is_operator")]
    pub async fn elevate_clear(ctx: Context<'_>) -> Result<(), Error> {
        elevate::clear(ctx).await
    }

    /// List the roles and members elevated for privileged commands
    #[poise::command(slash_command, guild_only, check = "is_privileged")]
    pub async fn elevate_list(ctx: Context<'_>) -> Result<(), Error> {
        elevate::list(ctx).await
    }

    /// Manage the users allowed to run owner commands
    #[poise::command(
        slash_command,
        guild_only,
        subcommands("Self::operator_add", "Self::operator_remove", "Self::operator_list"),
        subcommand_required
    )]
    pub async fn operator(_ctx: Context<'_>) -> Result<(), Error> {
        Ok(())
    }

    /// Allow a user to run owner commands
    #[poise::command(slash_command, guild_only, rename = "add", check = "is_operator")]
    pub async fn operator_add(
        ctx: Context<'_>,
        #[description = "User to become an operator"] user: User,
    ) -> Result<(), Error> {
        operators::add(ctx, user).await
    }

    /// Revoke a user's operator status
    #[poise::command(slash_command, guild_only, rename = "remove", check = "is_operator")]
    pub async fn operator_remove(
        ctx: Context<'_>,
        #[description = "Operator to remove"] user: User,
    ) -> Result<(), Error> {
        operators::remove(ctx, user).await
    }

    /// List the operators
    #[poise::command(slash_command, guild_only, rename = "list", check = "is_operator")]
    pub async fn operator_list(ctx: Context<'_>) -> Result<(), Error> {
        operators::list(ctx).await
    }

    /// Guild related utilities
    #[poise::command(
        slash_command,
        guild_only,
        subcommands(
            "Self::members_older_than",
            "Self::slowmode",
            "Self::archive",
            "Self::delete_user_messages",
            "Self::migrate"
        ),
        subcommand_required
    )]
    pub async fn guild(_ctx: Context<'_>) -> Result<(), Error> {
        Ok(())
    }

    /// (Privileged) Get the list of members whose join date is longer than...
    #[poise::command(slash_command, guild_only, check = "is_privileged")]
    pub async fn members_older_than(
        ctx: Context<'_>,
        #[description = "Joined longer than... (weeks)"] weeks: Option<i64>,
        #[description = "Joined longer than... (days, default 30)"] days: Option<i64>,
        #[description = "Joined longer than... (hours)"] hours: Option<i64>,
    ) -> Result<(), Error> {
        members_older_than::handle(ctx, weeks, days, hours).await
    }

    /// (Privileged) Set the per-user rate limit of a channel
    #[poise::command(slash_command, guild_only, check = "is_privileged")]
    pub async fn slowmode(
        ctx: Context<'_>,
        #[description = "Seconds between messages, 0 to disable"] seconds: u16,
        #[description = "Channel to update, defaults to this one"] channel: Option<Channel>,
    ) -> Result<(), Error> {
        slowmode::handle(ctx, seconds, channel).await
    }

    /// (Privileged) Archive or unarchive a thread
    #[poise::command(slash_command, guild_only, check = "is_privileged")]
    pub async fn archive(
        ctx: Context<'_>,
        #[description = "Thread to toggle, defaults to this one"] thread: Option<Channel>,
    ) -> Result<(), Error> {
        archive::handle(ctx, thread).await
    }

    /// (Privileged) Delete every message of a user
    #[poise::command(slash_command, guild_only, check = "is_privileged")]
    pub async fn delete_user_messages(
        ctx: ApplicationContext<'_>,
        #[description = "User whose messages are deleted"] user: User,
        #[description = "Only this channel or thread, defaults to the whole guild"]
        channel: Option<Channel>,
    ) -> Result<(), Error> {
        delete_user_messages::handle(ctx, user, channel).await
    }

    /// (Privileged) Copy the history of a channel into another channel
    #[poise::command(slash_command, guild_only, check = "is_privileged")]
    pub async fn migrate(
        ctx: Context<'_>,
        #[description = "Channel to copy from"] source: Channel,
        #[description = "Channel to copy into"] destination: Channel,
    ) -> Result<(), Error> {
        migrate::handle(ctx, source, destination).await
    }
}

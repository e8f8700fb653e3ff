use chrono::{DateTime, Utc};
use poise::CreateReply;
use serenity::all::{CreateAttachment, GuildId, Http, Member, UserId};
use tracing::debug;

use crate::{
    model::member_age::{self, Age, JoinedMember},
    types::discord::framework::Error,
};

use super::Context;

const MEMBERS_PAGE: u64 = 1000;
const PAGE_LEN: usize = 1900;

pub async fn handle(
    ctx: Context<'_>,
    weeks: Option<i64>,
    days: Option<i64>,
    hours: Option<i64>,
) -> Result<(), Error> {
    let age = Age {
        weeks: weeks.unwrap_or(0),
        days: days.unwrap_or(30),
        hours: hours.unwrap_or(0),
    };
    let Some(threshold) = age.to_delta() else {
        ctx.say("Durations must be positive.").await?;
        return Ok(());
    };
    let Some(guild_id) = ctx.guild_id() else {
        return Err("This command only works in a guild.".into());
    };

    ctx.defer().await?;

    let members = fetch_members(ctx.http(), guild_id).await?;
    let selected = member_age::members_older_than(&members, Utc::now(), threshold);
    debug!(
        guild_id = guild_id.get(),
        total = members.len(),
        selected = selected.len(),
        "members filtered"
    );

    let label = age.label();
    let attachment = CreateAttachment::bytes(
        member_age::id_file(&selected).into_bytes(),
        format!("users_{}w_{}d_{}h.txt", age.weeks, age.days, age.hours),
    );
    ctx.send(
        CreateReply::default()
            .content(format!(
                "{} member(s) joined more than {label}",
                selected.len()
            ))
            .attachment(attachment),
    )
    .await?;

    let lines: Vec<String> = selected.iter().map(|member| member_age::list_line(member)).collect();
    let pages = member_age::paginate_lines(
        &format!("### Members joined more than {label}"),
        &lines,
        PAGE_LEN,
    );
    let pages: Vec<&str> = pages.iter().map(String::as_str).collect();
    poise::builtins::paginate(ctx, &pages).await?;

    Ok(())
}

async fn fetch_members(http: &Http, guild_id: GuildId) -> serenity::Result<Vec<JoinedMember>> {
    let mut members = Vec::new();
    let mut after: Option<UserId> = None;
    loop {
        let page = guild_id.members(http, Some(MEMBERS_PAGE), after).await?;
        let fetched = page.len() as u64;
        after = page.last().map(|member| member.user.id);
        members.extend(page.iter().map(joined_member));
        if fetched < MEMBERS_PAGE {
            break;
        }
    }
    Ok(members)
}

fn joined_member(member: &Member) -> JoinedMember {
    JoinedMember {
        id: member.user.id.get(),
        display_name: member.display_name().to_string(),
        username: member.user.name.clone(),
        joined_at: member
            .joined_at
            .and_then(|joined_at| DateTime::from_timestamp(joined_at.unix_timestamp(), 0)),
        bot: member.user.bot,
    }
}

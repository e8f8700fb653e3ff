use poise::CreateReply;
use serenity::all::{CreateAllowedMentions, User};
use tracing::info;

use crate::types::discord::framework::Error;

use super::Context;

pub async fn add(ctx: Context<'_>, user: User) -> Result<(), Error> {
    let added = ctx
        .data()
        .policy
        .update(|policy| policy.add_operator(user.id.get()))
        .await?;

    if added {
        info!(user_id = user.id.get(), by = ctx.author().id.get(), "operator added");
        ctx.say(format!("{} is now an operator.", user.name)).await?;
    } else {
        ctx.say(format!("{} is already an operator.", user.name))
            .await?;
    }

    Ok(())
}

pub async fn remove(ctx: Context<'_>, user: User) -> Result<(), Error> {
    let removed = ctx
        .data()
        .policy
        .update(|policy| policy.remove_operator(user.id.get()))
        .await?;

    if removed {
        info!(user_id = user.id.get(), by = ctx.author().id.get(), "operator removed");
        ctx.say(format!("{} is no longer an operator.", user.name))
            .await?;
    } else {
        ctx.say(format!("{} is not an operator.", user.name)).await?;
    }

    Ok(())
}

pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let operators = ctx
        .data()
        .policy
        .read(|policy| policy.operators.iter().copied().collect::<Vec<_>>())
        .await;

    if operators.is_empty() {
        ctx.say("There are no operators besides the application owners.")
            .await?;
    } else {
        let mentions = operators
            .iter()
            .map(|id| format!("<@{id}>"))
            .collect::<Vec<_>>()
            .join(", ");
        ctx.send(
            CreateReply::default()
                .content(format!("Operators: {mentions}"))
                .allowed_mentions(CreateAllowedMentions::new()),
        )
        .await?;
    }

    Ok(())
}

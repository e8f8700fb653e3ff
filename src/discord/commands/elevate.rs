use poise::CreateReply;
use serenity::all::{CreateAllowedMentions, Role, User};
use tracing::info;

use crate::{model::policy::Policy, types::discord::framework::Error};

use super::Context;

pub async fn role(ctx: Context<'_>, role: Role) -> Result<(), Error> {
    let added = ctx
        .data()
        .policy
        .update(|policy| policy.elevate_role(role.id.get()))
        .await?;

    if added {
        info!(role_id = role.id.get(), by = ctx.author().id.get(), "role elevated");
        ctx.say(format!(
            "Role {} has been elevated for all utility commands!",
            role.name
        ))
        .await?;
    } else {
        ctx.say(format!("Role {} is already elevated.", role.name))
            .await?;
    }

    Ok(())
}

pub async fn member(ctx: Context<'_>, member: User) -> Result<(), Error> {
    let added = ctx
        .data()
        .policy
        .update(|policy| policy.elevate_member(member.id.get()))
        .await?;

    let display_name = member.global_name.as_deref().unwrap_or(&member.name);
    if added {
        info!(user_id = member.id.get(), by = ctx.author().id.get(), "member elevated");
        ctx.say(format!(
            "Member {}({}) has been elevated for all utility commands!",
            display_name, member.name
        ))
        .await?;
    } else {
        ctx.say(format!(
            "Member {}({}) is already elevated.",
            display_name, member.name
        ))
        .await?;
    }

    Ok(())
}

pub async fn clear(ctx: Context<'_>) -> Result<(), Error> {
    ctx.data()
        .policy
        .update(Policy::clear_elevations)
        .await?;
    info!(by = ctx.author().id.get(), "elevations cleared");
    ctx.say("All privilege elevations have been removed!").await?;

    Ok(())
}

pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let text = ctx.data().policy.read(render_elevations).await;
    ctx.send(
        CreateReply::default()
            .content(text)
            .allowed_mentions(CreateAllowedMentions::new()),
    )
    .await?;

    Ok(())
}

fn render_elevations(policy: &Policy) -> String {
    if policy.elevated_roles.is_empty() && policy.elevated_members.is_empty() {
        return "Nothing is elevated. Only owners and operators can run privileged commands."
            .to_string();
    }

    let roles = policy
        .elevated_roles
        .iter()
        .map(|id| format!("<@&{id}>"))
        .collect::<Vec<_>>();
    let members = policy
        .elevated_members
        .iter()
        .map(|id| format!("<@{id}>"))
        .collect::<Vec<_>>();

    let mut text = String::from("Elevated for privileged commands:");
    if !roles.is_empty() {
        text.push_str(&format!("\nRoles: {}", roles.join(", ")));
    }
    if !members.is_empty() {
        text.push_str(&format!("\nMembers: {}", members.join(", ")));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_empty_policy() {
        assert!(render_elevations(&Policy::default()).starts_with("Nothing is elevated"));
    }

    #[test]
    fn renders_roles_and_members() {
        let mut policy = Policy::default();
        policy.elevate_role(2);
        policy.elevate_role(1);
        policy.elevate_member(9);

        assert_eq!(
            render_elevations(&policy),
            "Elevated for privileged commands:\nRoles: <@&1>, <@&2>\nMembers: <@9>"
        );
    }
}

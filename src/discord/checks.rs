use crate::{
    discord::commands::Context,
    model::policy::{Caller, Policy},
    types::discord::framework::Error,
};

async fn with_caller<T>(ctx: Context<'_>, f: impl FnOnce(&Policy, &Caller<'_>) -> T) -> T {
    let role_ids: Vec<u64> = match ctx.author_member().await {
        Some(member) => member.roles.iter().map(|role_id| role_id.get()).collect(),
        None => Vec::new(),
    };
    let caller = Caller {
        user_id: ctx.author().id.get(),
        role_ids: &role_ids,
        is_owner: ctx.framework().options().owners.contains(&ctx.author().id),
    };
    ctx.data().policy.read(|policy| f(policy, &caller)).await
}

/// Application owners and operators.
pub async fn is_operator(ctx: Context<'_>) -> Result<bool, Error> {
    Ok(with_caller(ctx, |policy, caller| policy.is_operator(caller)).await)
}

/// Operators plus elevated roles and members.
pub async fn is_privileged(ctx: Context<'_>) -> Result<bool, Error> {
    Ok(with_caller(ctx, |policy, caller| policy.is_privileged(caller)).await)
}

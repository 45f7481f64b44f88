//! Bot commands.
//!
//! Every command is a poise command returning `AppError`. Invalid input is reported
//! with `AppError::BadRequest`, whose message the framework's error hook shows to the
//! invoking user; anything else is logged and answered with a generic message.

pub mod config;
pub mod lockdown;
pub mod moderation;
pub mod purge;
pub mod role;

use std::{borrow::Cow, collections::HashMap};

use serenity::all::{GuildId, Member, Permissions, RoleId, UserId};

use crate::server::{
    bot::{Context, Data},
    error::AppError,
    util::parse::parse_role,
};

/// Every command the bot registers.
pub fn all() -> Vec<poise::Command<Data, AppError>> {
    vec![
        config::config(),
        lockdown::lock(),
        lockdown::unlock(),
        lockdown::lockdownroles(),
        role::role(),
        moderation::ban(),
        moderation::unban(),
        moderation::kick(),
        moderation::mute(),
        moderation::unmute(),
        purge::purge(),
    ]
}

/// Guild the command was invoked in.
///
/// Commands are declared `guild_only`, so the error only guards against poise letting
/// a direct message through.
fn guild_id(ctx: &Context<'_>) -> Result<GuildId, AppError> {
    ctx.guild_id()
        .ok_or_else(|| AppError::BadRequest("This command can only be used in a server.".to_string()))
}

/// Roles and effective guild permissions of the invoking member.
struct Invoker {
    roles: Vec<RoleId>,
    permissions: Permissions,
}

impl Invoker {
    fn has(&self, permission: Permissions) -> bool {
        self.permissions.contains(permission)
    }
}

async fn invoker(ctx: &Context<'_>) -> Result<Invoker, AppError> {
    let member: Cow<'_, Member> = ctx
        .author_member()
        .await
        .ok_or_else(|| AppError::BadRequest("Could not look up your server membership.".to_string()))?;

    // Interactions carry resolved permissions; prefix invocations compute them from the cache
    let permissions = match member.permissions {
        Some(permissions) => permissions,
        None => ctx
            .guild()
            .map(|guild| guild.member_permissions(&member))
            .unwrap_or_else(Permissions::empty),
    };

    Ok(Invoker {
        roles: member.roles.clone(),
        permissions,
    })
}

/// Role order and owner of the invoking guild, read from the cache.
///
/// Discord only checks the bot's own place in the role list, so the checks below keep
/// moderators from acting on members or roles that rank at or above them.
struct Hierarchy {
    owner_id: UserId,
    positions: HashMap<RoleId, u16>,
}

impl Hierarchy {
    /// Position of the highest of `role_ids`; 0 (the `@everyone` position) for none.
    fn top(&self, role_ids: &[RoleId]) -> u16 {
        role_ids
            .iter()
            .filter_map(|id| self.positions.get(id))
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Whether `moderator` may ban, kick or mute a member holding `target_roles`.
    ///
    /// The server owner may act on anyone; everyone else needs a highest role strictly
    /// above the target's.
    fn may_moderate(
        &self,
        moderator: UserId,
        moderator_roles: &[RoleId],
        target_roles: &[RoleId],
    ) -> bool {
        moderator == self.owner_id || self.top(moderator_roles) > self.top(target_roles)
    }

    /// Names of the roles in `roles` that rank at or above the invoker's highest role.
    ///
    /// Administrators may hand out any role.
    fn roles_above(&self, invoker: &Invoker, roles: &[(RoleId, String)]) -> Vec<String> {
        if invoker.has(Permissions::ADMINISTRATOR) {
            return Vec::new();
        }

        let ceiling = self.top(&invoker.roles);
        roles
            .iter()
            .filter(|(id, _)| self.positions.get(id).copied().unwrap_or(0) >= ceiling)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

fn hierarchy(ctx: &Context<'_>) -> Result<Hierarchy, AppError> {
    let guild = ctx
        .guild()
        .ok_or_else(|| AppError::InternalError("Invoking guild is not cached".to_string()))?;

    Ok(Hierarchy {
        owner_id: guild.owner_id,
        positions: guild
            .roles
            .iter()
            .map(|(id, role)| (*id, role.position))
            .collect(),
    })
}

/// Resolves a role typed as a mention, an id or a name (ignoring case).
///
/// # Returns
/// - `Some((RoleId, String))` - Role id and current name
/// - `None` - No such role in the guild, or the guild is not cached
fn find_role(ctx: &Context<'_>, input: &str) -> Option<(RoleId, String)> {
    let guild = ctx.guild()?;

    let role = match parse_role(input) {
        Some(role_id) => guild.roles.get(&role_id),
        None => guild
            .roles
            .values()
            .find(|role| role.name.eq_ignore_ascii_case(input.trim())),
    }?;

    Some((role.id, role.name.clone()))
}

/// Looks up the names of `role_ids`, dropping roles that no longer exist.
///
/// When the guild is not cached every id is kept and shown as a mention.
fn role_names(ctx: &Context<'_>, role_ids: &[RoleId]) -> Vec<(RoleId, String)> {
    let Some(guild) = ctx.guild() else {
        return role_ids.iter().map(|id| (*id, format!("<@&{id}>"))).collect();
    };

    role_ids
        .iter()
        .filter_map(|id| guild.roles.get(id).map(|role| (*id, role.name.clone())))
        .collect()
}

/// Formats roles as mentions, or `None` when empty.
fn mention_roles(role_ids: &[RoleId]) -> String {
    if role_ids.is_empty() {
        return "None".to_string();
    }

    role_ids
        .iter()
        .map(|id| format!("<@&{id}>"))
        .collect::<Vec<_>>()
        .join(", ")
}

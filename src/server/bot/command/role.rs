//! `/role` - delegated role granting and role groups.
//!
//! Members with `MANAGE_ROLES` may grant any role. Everyone else may grant a role when
//! one of their roles is configured as a giver of it (`/role setup`). A role group is
//! granted or removed as a whole and only when every role in it is grantable.

use poise::CreateReply;
use serenity::all::{CreateEmbed, Permissions, Role, RoleId, Timestamp, User};

use crate::server::{
    bot::{
        command::{find_role, guild_id, hierarchy, invoker, mention_roles, role_names, Invoker},
        Context,
    },
    error::AppError,
    model::guild_config::{GroupEdit, GuildConfig, LogKind},
    service::{guild_config::GuildConfigService, mod_log::ModLog},
};

/// Whether a giver gains or loses a grantable role.
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum SetupAction {
    #[name = "add"]
    Add,
    #[name = "remove"]
    Remove,
}

/// Operation on a role group.
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum GroupAction {
    #[name = "create"]
    Create,
    #[name = "delete"]
    Delete,
    #[name = "addrole"]
    AddRole,
    #[name = "removerole"]
    RemoveRole,
    #[name = "list"]
    List,
}

/// Roles resolved from a "role or group" argument.
struct Targets {
    /// Group display name when the argument named a group.
    group: Option<String>,
    roles: Vec<(RoleId, String)>,
}

/// Manage roles for a user
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("add", "remove", "view", "setup", "group"),
    subcommand_required,
    user_cooldown = 3
)]
pub async fn role(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Give a role or role group to a user
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "User to give the role to"] user: User,
    #[description = "Role or role group name"]
    #[rest]
    role_or_group: String,
) -> Result<(), AppError> {
    change_roles(ctx, user, &role_or_group, Change::Add).await
}

/// Remove a role or role group from a user
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "User to remove the role from"] user: User,
    #[description = "Role or role group name"]
    #[rest]
    role_or_group: String,
) -> Result<(), AppError> {
    change_roles(ctx, user, &role_or_group, Change::Remove).await
}

/// View the role permission configuration
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn view(ctx: Context<'_>) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let config = GuildConfigService::new(&ctx.data().db)
        .get_guild_config(guild_id)
        .await?;

    let givers = if config.role_permissions.is_empty() {
        "No role permissions configured.".to_string()
    } else {
        config
            .role_permissions
            .iter()
            .map(|(giver, targets)| format!("<@&{giver}> → {}", mention_roles(targets)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = CreateEmbed::new()
        .title("🎭 Role Permissions")
        .color(0xFFB6C1)
        .field("Givers", givers, false)
        .field("Role Groups", describe_groups(&config), false);

    ctx.send(CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Allow or disallow a role to give another role
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn setup(
    ctx: Context<'_>,
    #[description = "Role that can give other roles"] giver_role: Role,
    #[description = "Role that can be given"] target_role: Role,
    #[description = "Add or remove the permission"] action: SetupAction,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let service = GuildConfigService::new(&ctx.data().db);
    let mut config = service.get_guild_config(guild_id).await?;

    let changed = match action {
        SetupAction::Add => config.grant_role_permission(giver_role.id, target_role.id),
        SetupAction::Remove => config.revoke_role_permission(giver_role.id, target_role.id),
    };

    if !changed {
        return Err(AppError::BadRequest(match action {
            SetupAction::Add => format!(
                "{} can already give {}.",
                giver_role.name, target_role.name
            ),
            SetupAction::Remove => format!(
                "{} cannot give {}.",
                giver_role.name, target_role.name
            ),
        }));
    }
    service.save(&config).await?;

    let summary = match action {
        SetupAction::Add => format!(
            "✅ Members with {} can now give {}.",
            giver_role.name, target_role.name
        ),
        SetupAction::Remove => format!(
            "✅ Members with {} can no longer give {}.",
            giver_role.name, target_role.name
        ),
    };
    ctx.say(&summary).await?;

    let embed = CreateEmbed::new()
        .title("⚙️ Role Permission Updated")
        .color(0xFFB6C1)
        .description(summary)
        .field("Changed By", format!("<@{}>", ctx.author().id), true)
        .timestamp(Timestamp::now());
    ModLog::send(ctx.http(), &config, LogKind::Roles, embed, None).await;

    Ok(())
}

/// Manage role groups
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn group(
    ctx: Context<'_>,
    #[description = "Action to perform"] action: GroupAction,
    #[description = "Name of the role group"] group_name: Option<String>,
    #[description = "Role to add to or remove from the group"] role: Option<Role>,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let service = GuildConfigService::new(&ctx.data().db);
    let mut config = service.get_guild_config(guild_id).await?;

    let summary = match action {
        GroupAction::List => {
            let embed = CreateEmbed::new()
                .title("📋 Role Groups")
                .color(0xFFB6C1)
                .description(describe_groups(&config));
            ctx.send(CreateReply::default().embed(embed).ephemeral(true))
                .await?;
            return Ok(());
        }
        GroupAction::Create => {
            let name = editable_group_name(&ctx, group_name.as_deref()).await?;
            if !config.create_role_group(&name) {
                return Err(AppError::BadRequest(format!(
                    "Role group \"{name}\" already exists."
                )));
            }
            format!("✅ Created role group \"{name}\".")
        }
        GroupAction::Delete => {
            let name = editable_group_name(&ctx, group_name.as_deref()).await?;
            if !config.delete_role_group(&name) {
                return Err(missing_group(&name));
            }
            format!("✅ Deleted role group \"{name}\".")
        }
        GroupAction::AddRole => {
            let name = editable_group_name(&ctx, group_name.as_deref()).await?;
            let role = required_role(role)?;
            match config.add_role_to_group(&name, role.id) {
                GroupEdit::MissingGroup => return Err(missing_group(&name)),
                GroupEdit::Unchanged => {
                    return Err(AppError::BadRequest(format!(
                        "{} is already in \"{name}\".",
                        role.name
                    )))
                }
                GroupEdit::Updated => format!("✅ Added {} to \"{name}\".", role.name),
            }
        }
        GroupAction::RemoveRole => {
            let name = editable_group_name(&ctx, group_name.as_deref()).await?;
            let role = required_role(role)?;
            match config.remove_role_from_group(&name, role.id) {
                GroupEdit::MissingGroup => return Err(missing_group(&name)),
                GroupEdit::Unchanged => {
                    return Err(AppError::BadRequest(format!(
                        "{} is not in \"{name}\".",
                        role.name
                    )))
                }
                GroupEdit::Updated => format!("✅ Removed {} from \"{name}\".", role.name),
            }
        }
    };

    service.save(&config).await?;
    ctx.say(&summary).await?;

    let embed = CreateEmbed::new()
        .title("📋 Role Group Updated")
        .color(0xFFB6C1)
        .description(summary)
        .field("Changed By", format!("<@{}>", ctx.author().id), true)
        .timestamp(Timestamp::now());
    ModLog::send(ctx.http(), &config, LogKind::Roles, embed, None).await;

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Change {
    Add,
    Remove,
}

async fn change_roles(
    ctx: Context<'_>,
    user: User,
    role_or_group: &str,
    change: Change,
) -> Result<(), AppError> {
    let guild_id = guild_id(&ctx)?;
    let config = GuildConfigService::new(&ctx.data().db)
        .get_guild_config(guild_id)
        .await?;

    let targets = resolve_targets(&ctx, &config, role_or_group)?;
    let invoker = invoker(&ctx).await?;

    let denied = denied_roles(&config, &invoker, &targets.roles);
    if !denied.is_empty() {
        return Err(AppError::BadRequest(format!(
            "You are not allowed to {} {}.",
            match change {
                Change::Add => "give",
                Change::Remove => "remove",
            },
            denied.join(", ")
        )));
    }

    let above = hierarchy(&ctx)?.roles_above(&invoker, &targets.roles);
    if !above.is_empty() {
        return Err(AppError::BadRequest(format!(
            "You cannot {} {} because it is equal to or higher than your highest role.",
            match change {
                Change::Add => "give",
                Change::Remove => "remove",
            },
            above.join(", ")
        )));
    }

    let member = guild_id
        .member(ctx.serenity_context(), user.id)
        .await
        .map_err(|_| AppError::BadRequest("That user is not in this server.".to_string()))?;

    let (pending, skipped): (Vec<_>, Vec<_>) = targets
        .roles
        .into_iter()
        .partition(|(role_id, _)| member.roles.contains(role_id) == (change == Change::Remove));

    if pending.is_empty() {
        return Err(AppError::BadRequest(match change {
            Change::Add => format!("{} already has every requested role.", user.name),
            Change::Remove => format!("{} has none of the requested roles.", user.name),
        }));
    }

    let reason = format!(
        "Role{} {} by {}",
        if targets.group.is_some() { "s" } else { "" },
        match change {
            Change::Add => "given",
            Change::Remove => "removed",
        },
        ctx.author().name
    );
    for (role_id, _) in &pending {
        match change {
            Change::Add => {
                ctx.http()
                    .add_member_role(guild_id, user.id, *role_id, Some(reason.as_str()))
                    .await?
            }
            Change::Remove => {
                ctx.http()
                    .remove_member_role(guild_id, user.id, *role_id, Some(reason.as_str()))
                    .await?
            }
        }
    }

    tracing::info!(
        "{} {} {} role(s) for user {} in guild {}",
        ctx.author().name,
        match change {
            Change::Add => "added",
            Change::Remove => "removed",
        },
        pending.len(),
        user.id,
        guild_id
    );

    let names = |roles: &[(RoleId, String)]| {
        roles
            .iter()
            .map(|(_, name)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut embed = CreateEmbed::new()
        .title(match change {
            Change::Add => "✅ Roles Added",
            Change::Remove => "➖ Roles Removed",
        })
        .color(match change {
            Change::Add => 0x00FF00,
            Change::Remove => 0xFF8C00,
        })
        .field("User", format!("{} ({})", user.name, user.id), true)
        .field(
            match targets.group {
                Some(_) => "Role Group",
                None => "Role",
            },
            targets.group.clone().unwrap_or_else(|| names(&pending)),
            true,
        )
        .field(
            match change {
                Change::Add => "Given By",
                Change::Remove => "Removed By",
            },
            ctx.author().name.clone(),
            true,
        )
        .timestamp(Timestamp::now());

    if targets.group.is_some() {
        embed = embed.field("Roles", names(&pending), false);
    }
    if !skipped.is_empty() {
        embed = embed.field(
            match change {
                Change::Add => "Already Had",
                Change::Remove => "Did Not Have",
            },
            names(&skipped),
            false,
        );
    }

    ctx.send(CreateReply::default().embed(embed.clone())).await?;
    ModLog::send(ctx.http(), &config, LogKind::Roles, embed, None).await;

    Ok(())
}

/// Resolves a group name first, then a single role.
fn resolve_targets(
    ctx: &Context<'_>,
    config: &GuildConfig,
    role_or_group: &str,
) -> Result<Targets, AppError> {
    if let Some(group) = config.role_group(role_or_group) {
        let roles = role_names(ctx, &group.roles);
        if roles.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Role group \"{}\" exists but contains no valid roles.",
                group.name
            )));
        }

        return Ok(Targets {
            group: Some(group.name.clone()),
            roles,
        });
    }

    let role = find_role(ctx, role_or_group).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Role or role group \"{}\" not found.",
            role_or_group.trim()
        ))
    })?;

    Ok(Targets {
        group: None,
        roles: vec![role],
    })
}

/// Names of the roles in `roles` the invoker may not grant or remove.
fn denied_roles(config: &GuildConfig, invoker: &Invoker, roles: &[(RoleId, String)]) -> Vec<String> {
    if invoker.has(Permissions::MANAGE_ROLES) {
        return Vec::new();
    }

    roles
        .iter()
        .filter(|(role_id, _)| !config.can_grant(&invoker.roles, *role_id))
        .map(|(_, name)| name.clone())
        .collect()
}

/// Checks that the invoker may edit role groups and returns the trimmed group name.
async fn editable_group_name(ctx: &Context<'_>, group_name: Option<&str>) -> Result<String, AppError> {
    if !invoker(ctx).await?.has(Permissions::MANAGE_GUILD) {
        return Err(AppError::BadRequest(
            "You need the Manage Server permission to change role groups.".to_string(),
        ));
    }

    group_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Please provide a group name.".to_string()))
}

fn required_role(role: Option<Role>) -> Result<Role, AppError> {
    role.ok_or_else(|| AppError::BadRequest("Please provide the role to add or remove.".to_string()))
}

fn missing_group(name: &str) -> AppError {
    AppError::BadRequest(format!("Role group \"{name}\" does not exist."))
}

fn describe_groups(config: &GuildConfig) -> String {
    if config.role_groups.is_empty() {
        return "No role groups configured.".to_string();
    }

    config
        .role_groups
        .values()
        .map(|group| format!("**{}**: {}", group.name, mention_roles(&group.roles)))
        .collect::<Vec<_>>()
        .join("\n")
}

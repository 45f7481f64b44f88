//! Domain models for per-guild configuration.
//!
//! `GuildConfig` is the typed view of one `guild_config` row. Rows travel between the
//! repository and this module as `GuildConfigRow`, a map from declared column name to
//! raw stored text, so the set of columns is driven by the declared table rather than
//! by a fixed entity. Structured fields (lockdown roles, role permissions, role groups)
//! are stored as JSON text and are NULL when empty.

use std::{collections::BTreeMap, fmt, str::FromStr};

use migration::guild_config as columns;
use serde::{de::Error as _, Deserialize, Serialize};
use serenity::all::{ChannelId, GuildId, RoleId};

use crate::server::error::store::StoreError;

/// Raw stored values of one `guild_config` row keyed by column name.
///
/// A column that is absent from the map is treated the same as a NULL value and
/// falls back to the field's default when converted to `GuildConfig`.
pub type GuildConfigRow = BTreeMap<&'static str, Option<String>>;

/// Kind of moderation action that can be mirrored to a log channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Warn,
    Kick,
    Ban,
    Mute,
    Lockdown,
    Purge,
    Roles,
}

/// Named bundle of roles granted or removed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGroup {
    /// Display name as originally typed by the creator.
    pub name: String,
    /// Member roles in insertion order without duplicates.
    pub roles: Vec<RoleId>,
}

/// Outcome of editing the role list of a named group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupEdit {
    /// The group's role list changed.
    Updated,
    /// The role was already in (or already absent from) the group.
    Unchanged,
    /// No group with that name exists.
    MissingGroup,
}

/// Per-guild configuration record.
///
/// A read always yields a value for every field; a guild without a stored row gets
/// `GuildConfig::new(guild_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildConfig {
    /// Guild the record belongs to.
    pub guild_id: GuildId,
    /// Prefix for text commands.
    pub prefix: String,
    pub warn_log_channel_id: Option<ChannelId>,
    pub kick_log_channel_id: Option<ChannelId>,
    pub ban_log_channel_id: Option<ChannelId>,
    pub mute_log_channel_id: Option<ChannelId>,
    pub lockdown_log_channel_id: Option<ChannelId>,
    pub purge_log_channel_id: Option<ChannelId>,
    pub roles_command_log_channel_id: Option<ChannelId>,
    /// Roles that keep `SEND_MESSAGES` while a channel is locked.
    pub lockdown_allowed_roles: Vec<RoleId>,
    /// Giver role to the roles its holders may grant.
    pub role_permissions: BTreeMap<RoleId, Vec<RoleId>>,
    /// Lower-cased group name to group.
    pub role_groups: BTreeMap<String, RoleGroup>,
}

/// A configurable field of `GuildConfig`.
///
/// Each key maps to exactly one declared column. User input is parsed with
/// `ConfigKey::from_str`, which accepts the column name in any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Prefix,
    WarnLogChannel,
    KickLogChannel,
    BanLogChannel,
    MuteLogChannel,
    LockdownLogChannel,
    PurgeLogChannel,
    RolesLogChannel,
    LockdownAllowedRoles,
    RolePermissions,
    RoleGroups,
}

/// Shape of the value a `ConfigKey` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    Text,
    Channel,
    Roles,
    RolePermissions,
    RoleGroups,
}

/// New value for a single configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    Channel(ChannelId),
    Roles(Vec<RoleId>),
    RolePermissions(BTreeMap<RoleId, Vec<RoleId>>),
    RoleGroups(BTreeMap<String, RoleGroup>),
}

/// Error returned when parsing an unknown configuration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConfigKey(pub String);

impl fmt::Display for UnknownConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown configuration key '{}'", self.0)
    }
}

impl std::error::Error for UnknownConfigKey {}

impl ConfigKey {
    /// Every key in declaration order.
    pub const ALL: [ConfigKey; 11] = [
        ConfigKey::Prefix,
        ConfigKey::WarnLogChannel,
        ConfigKey::KickLogChannel,
        ConfigKey::BanLogChannel,
        ConfigKey::MuteLogChannel,
        ConfigKey::LockdownLogChannel,
        ConfigKey::PurgeLogChannel,
        ConfigKey::RolesLogChannel,
        ConfigKey::LockdownAllowedRoles,
        ConfigKey::RolePermissions,
        ConfigKey::RoleGroups,
    ];

    /// Name of the column that stores this key.
    pub fn column(self) -> &'static str {
        match self {
            ConfigKey::Prefix => columns::PREFIX,
            ConfigKey::WarnLogChannel => columns::WARN_LOG_CHANNEL_ID,
            ConfigKey::KickLogChannel => columns::KICK_LOG_CHANNEL_ID,
            ConfigKey::BanLogChannel => columns::BAN_LOG_CHANNEL_ID,
            ConfigKey::MuteLogChannel => columns::MUTE_LOG_CHANNEL_ID,
            ConfigKey::LockdownLogChannel => columns::LOCKDOWN_LOG_CHANNEL_ID,
            ConfigKey::PurgeLogChannel => columns::PURGE_LOG_CHANNEL_ID,
            ConfigKey::RolesLogChannel => columns::ROLES_COMMAND_LOG_CHANNEL_ID,
            ConfigKey::LockdownAllowedRoles => columns::LOCKDOWN_ALLOWED_ROLES,
            ConfigKey::RolePermissions => columns::ROLE_PERMISSIONS,
            ConfigKey::RoleGroups => columns::ROLE_GROUPS,
        }
    }

    /// Shape of the value this key accepts.
    pub fn kind(self) -> ConfigKind {
        match self {
            ConfigKey::Prefix => ConfigKind::Text,
            ConfigKey::LockdownAllowedRoles => ConfigKind::Roles,
            ConfigKey::RolePermissions => ConfigKind::RolePermissions,
            ConfigKey::RoleGroups => ConfigKind::RoleGroups,
            _ => ConfigKind::Channel,
        }
    }

    /// Human readable label used in command output.
    pub fn label(self) -> &'static str {
        match self {
            ConfigKey::Prefix => "Prefix",
            ConfigKey::WarnLogChannel => "Warn Log Channel",
            ConfigKey::KickLogChannel => "Kick Log Channel",
            ConfigKey::BanLogChannel => "Ban Log Channel",
            ConfigKey::MuteLogChannel => "Mute Log Channel",
            ConfigKey::LockdownLogChannel => "Lockdown Log Channel",
            ConfigKey::PurgeLogChannel => "Purge Log Channel",
            ConfigKey::RolesLogChannel => "Roles Log Channel",
            ConfigKey::LockdownAllowedRoles => "Lockdown Allowed Roles",
            ConfigKey::RolePermissions => "Role Permissions",
            ConfigKey::RoleGroups => "Role Groups",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = UnknownConfigKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();

        ConfigKey::ALL
            .into_iter()
            .find(|key| key.column() == wanted)
            .ok_or_else(|| UnknownConfigKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl ConfigValue {
    fn kind(&self) -> ConfigKind {
        match self {
            ConfigValue::Text(_) => ConfigKind::Text,
            ConfigValue::Channel(_) => ConfigKind::Channel,
            ConfigValue::Roles(_) => ConfigKind::Roles,
            ConfigValue::RolePermissions(_) => ConfigKind::RolePermissions,
            ConfigValue::RoleGroups(_) => ConfigKind::RoleGroups,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StoredRoleGroup {
    name: String,
    roles: Vec<String>,
}

impl GuildConfig {
    /// Creates the default record for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the record belongs to
    ///
    /// # Returns
    /// - `GuildConfig` - Record with the default prefix and every other field empty
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            prefix: columns::DEFAULT_PREFIX.to_string(),
            warn_log_channel_id: None,
            kick_log_channel_id: None,
            ban_log_channel_id: None,
            mute_log_channel_id: None,
            lockdown_log_channel_id: None,
            purge_log_channel_id: None,
            roles_command_log_channel_id: None,
            lockdown_allowed_roles: Vec::new(),
            role_permissions: BTreeMap::new(),
            role_groups: BTreeMap::new(),
        }
    }

    /// Converts a stored row to a configuration record at the repository boundary.
    ///
    /// NULL, blank or missing columns take their defaults. Role groups are keyed by
    /// their lower-cased name and every role list is deduplicated.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the row belongs to
    /// - `row` - Raw stored values keyed by column name
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Fully populated record
    /// - `Err(StoreError::Parse)` - A JSON column could not be decoded, or a channel
    ///   column does not hold a snowflake
    pub fn from_row(guild_id: GuildId, row: &GuildConfigRow) -> Result<Self, StoreError> {
        let raw = |column: &str| row.get(column).and_then(|value| value.as_deref());
        let channel = |column: &'static str| {
            raw(column)
                .filter(|value| !value.trim().is_empty())
                .map(|value| channel_id(column, value))
                .transpose()
        };

        let mut config = Self::new(guild_id);

        if let Some(prefix) = raw(columns::PREFIX) {
            config.prefix = prefix.to_string();
        }

        config.warn_log_channel_id = channel(columns::WARN_LOG_CHANNEL_ID)?;
        config.kick_log_channel_id = channel(columns::KICK_LOG_CHANNEL_ID)?;
        config.ban_log_channel_id = channel(columns::BAN_LOG_CHANNEL_ID)?;
        config.mute_log_channel_id = channel(columns::MUTE_LOG_CHANNEL_ID)?;
        config.lockdown_log_channel_id = channel(columns::LOCKDOWN_LOG_CHANNEL_ID)?;
        config.purge_log_channel_id = channel(columns::PURGE_LOG_CHANNEL_ID)?;
        config.roles_command_log_channel_id = channel(columns::ROLES_COMMAND_LOG_CHANNEL_ID)?;

        if let Some(json) = raw(columns::LOCKDOWN_ALLOWED_ROLES) {
            let column = columns::LOCKDOWN_ALLOWED_ROLES;
            let ids: Vec<String> = decode(column, json)?;
            config.lockdown_allowed_roles = role_ids(column, &ids)?;
        }

        if let Some(json) = raw(columns::ROLE_PERMISSIONS) {
            let column = columns::ROLE_PERMISSIONS;
            let stored: BTreeMap<String, Vec<String>> = decode(column, json)?;
            for (giver, targets) in stored {
                let giver = role_id(column, &giver)?;
                config
                    .role_permissions
                    .insert(giver, role_ids(column, &targets)?);
            }
        }

        if let Some(json) = raw(columns::ROLE_GROUPS) {
            let column = columns::ROLE_GROUPS;
            let stored: BTreeMap<String, StoredRoleGroup> = decode(column, json)?;
            let mut groups = Vec::with_capacity(stored.len());
            for (key, group) in stored {
                groups.push((
                    key,
                    RoleGroup {
                        name: group.name,
                        roles: role_ids(column, &group.roles)?,
                    },
                ));
            }
            config.role_groups = normalize_groups(groups);
        }

        Ok(config)
    }

    /// Converts the record to the full set of stored values.
    ///
    /// Every known column is present in the result; empty structured fields are
    /// stored as NULL.
    ///
    /// # Returns
    /// - `GuildConfigRow` - Values for every column the record knows about
    pub fn to_row(&self) -> GuildConfigRow {
        let channel = |id: Option<ChannelId>| id.map(|id| id.to_string());
        let ids = |roles: &[RoleId]| roles.iter().map(|id| id.to_string()).collect::<Vec<_>>();

        let mut row = GuildConfigRow::new();
        row.insert(columns::PREFIX, Some(self.prefix.clone()));
        row.insert(columns::WARN_LOG_CHANNEL_ID, channel(self.warn_log_channel_id));
        row.insert(columns::KICK_LOG_CHANNEL_ID, channel(self.kick_log_channel_id));
        row.insert(columns::BAN_LOG_CHANNEL_ID, channel(self.ban_log_channel_id));
        row.insert(columns::MUTE_LOG_CHANNEL_ID, channel(self.mute_log_channel_id));
        row.insert(
            columns::LOCKDOWN_LOG_CHANNEL_ID,
            channel(self.lockdown_log_channel_id),
        );
        row.insert(columns::PURGE_LOG_CHANNEL_ID, channel(self.purge_log_channel_id));
        row.insert(columns::ROLES_COMMAND_LOG_CHANNEL_ID, channel(self.roles_command_log_channel_id));

        let allowed = (!self.lockdown_allowed_roles.is_empty())
            .then(|| serde_json::json!(ids(&self.lockdown_allowed_roles)).to_string());
        row.insert(columns::LOCKDOWN_ALLOWED_ROLES, allowed);

        let permissions = (!self.role_permissions.is_empty()).then(|| {
            let stored: BTreeMap<String, Vec<String>> = self
                .role_permissions
                .iter()
                .map(|(giver, targets)| (giver.to_string(), ids(targets)))
                .collect();
            serde_json::json!(stored).to_string()
        });
        row.insert(columns::ROLE_PERMISSIONS, permissions);

        let groups = (!self.role_groups.is_empty()).then(|| {
            let stored: BTreeMap<&str, StoredRoleGroup> = self
                .role_groups
                .iter()
                .map(|(key, group)| {
                    (
                        key.as_str(),
                        StoredRoleGroup {
                            name: group.name.clone(),
                            roles: ids(&group.roles),
                        },
                    )
                })
                .collect();
            serde_json::json!(stored).to_string()
        });
        row.insert(columns::ROLE_GROUPS, groups);

        row
    }

    /// Overlays a single field.
    ///
    /// # Arguments
    /// - `key` - Field to change
    /// - `value` - New value, or `None` to restore the field's default
    ///
    /// # Returns
    /// - `Ok(())` - Field updated
    /// - `Err(StoreError::ValueMismatch)` - `value` is not of the key's kind
    pub fn apply(&mut self, key: ConfigKey, value: Option<ConfigValue>) -> Result<(), StoreError> {
        if let Some(ref value) = value {
            if value.kind() != key.kind() {
                return Err(StoreError::ValueMismatch { key: key.column() });
            }
        }

        let channel = |value: Option<ConfigValue>| match value {
            Some(ConfigValue::Channel(id)) => Some(id),
            _ => None,
        };

        match key {
            ConfigKey::Prefix => {
                self.prefix = match value {
                    Some(ConfigValue::Text(prefix)) => prefix,
                    _ => columns::DEFAULT_PREFIX.to_string(),
                }
            }
            ConfigKey::WarnLogChannel => self.warn_log_channel_id = channel(value),
            ConfigKey::KickLogChannel => self.kick_log_channel_id = channel(value),
            ConfigKey::BanLogChannel => self.ban_log_channel_id = channel(value),
            ConfigKey::MuteLogChannel => self.mute_log_channel_id = channel(value),
            ConfigKey::LockdownLogChannel => self.lockdown_log_channel_id = channel(value),
            ConfigKey::PurgeLogChannel => self.purge_log_channel_id = channel(value),
            ConfigKey::RolesLogChannel => self.roles_command_log_channel_id = channel(value),
            ConfigKey::LockdownAllowedRoles => {
                self.lockdown_allowed_roles = match value {
                    Some(ConfigValue::Roles(roles)) => dedup(roles),
                    _ => Vec::new(),
                }
            }
            ConfigKey::RolePermissions => {
                self.role_permissions = match value {
                    Some(ConfigValue::RolePermissions(map)) => map
                        .into_iter()
                        .map(|(giver, targets)| (giver, dedup(targets)))
                        .filter(|(_, targets)| !targets.is_empty())
                        .collect(),
                    _ => BTreeMap::new(),
                }
            }
            ConfigKey::RoleGroups => {
                self.role_groups = match value {
                    Some(ConfigValue::RoleGroups(map)) => normalize_groups(map),
                    _ => BTreeMap::new(),
                }
            }
        }

        Ok(())
    }

    /// Current value of a field, `None` when unset.
    ///
    /// The prefix always has a value.
    pub fn value(&self, key: ConfigKey) -> Option<ConfigValue> {
        let channel = |id: Option<ChannelId>| id.map(ConfigValue::Channel);

        match key {
            ConfigKey::Prefix => Some(ConfigValue::Text(self.prefix.clone())),
            ConfigKey::WarnLogChannel => channel(self.warn_log_channel_id),
            ConfigKey::KickLogChannel => channel(self.kick_log_channel_id),
            ConfigKey::BanLogChannel => channel(self.ban_log_channel_id),
            ConfigKey::MuteLogChannel => channel(self.mute_log_channel_id),
            ConfigKey::LockdownLogChannel => channel(self.lockdown_log_channel_id),
            ConfigKey::PurgeLogChannel => channel(self.purge_log_channel_id),
            ConfigKey::RolesLogChannel => channel(self.roles_command_log_channel_id),
            ConfigKey::LockdownAllowedRoles => (!self.lockdown_allowed_roles.is_empty())
                .then(|| ConfigValue::Roles(self.lockdown_allowed_roles.clone())),
            ConfigKey::RolePermissions => (!self.role_permissions.is_empty())
                .then(|| ConfigValue::RolePermissions(self.role_permissions.clone())),
            ConfigKey::RoleGroups => (!self.role_groups.is_empty())
                .then(|| ConfigValue::RoleGroups(self.role_groups.clone())),
        }
    }

    /// Log channel configured for an action kind.
    pub fn log_channel(&self, kind: LogKind) -> Option<ChannelId> {
        match kind {
            LogKind::Warn => self.warn_log_channel_id,
            LogKind::Kick => self.kick_log_channel_id,
            LogKind::Ban => self.ban_log_channel_id,
            LogKind::Mute => self.mute_log_channel_id,
            LogKind::Lockdown => self.lockdown_log_channel_id,
            LogKind::Purge => self.purge_log_channel_id,
            LogKind::Roles => self.roles_command_log_channel_id,
        }
    }

    /// Adds a role to the lockdown allow list.
    ///
    /// # Returns
    /// - `true` - Role added
    /// - `false` - Role was already present
    pub fn add_lockdown_role(&mut self, role: RoleId) -> bool {
        if self.lockdown_allowed_roles.contains(&role) {
            return false;
        }
        self.lockdown_allowed_roles.push(role);
        true
    }

    /// Removes a role from the lockdown allow list.
    ///
    /// # Returns
    /// - `true` - Role removed
    /// - `false` - Role was not present
    pub fn remove_lockdown_role(&mut self, role: RoleId) -> bool {
        let before = self.lockdown_allowed_roles.len();
        self.lockdown_allowed_roles.retain(|id| *id != role);
        before != self.lockdown_allowed_roles.len()
    }

    /// Allows holders of `giver` to grant `target`.
    ///
    /// # Returns
    /// - `true` - Permission added
    /// - `false` - Permission already existed
    pub fn grant_role_permission(&mut self, giver: RoleId, target: RoleId) -> bool {
        let targets = self.role_permissions.entry(giver).or_default();
        if targets.contains(&target) {
            return false;
        }
        targets.push(target);
        true
    }

    /// Revokes the permission of `giver` holders to grant `target`.
    ///
    /// A giver left with no grantable roles is dropped entirely.
    ///
    /// # Returns
    /// - `true` - Permission removed
    /// - `false` - Permission did not exist
    pub fn revoke_role_permission(&mut self, giver: RoleId, target: RoleId) -> bool {
        let Some(targets) = self.role_permissions.get_mut(&giver) else {
            return false;
        };

        let before = targets.len();
        targets.retain(|id| *id != target);
        let removed = before != targets.len();

        if targets.is_empty() {
            self.role_permissions.remove(&giver);
        }

        removed
    }

    /// Checks whether any of `member_roles` is configured as a giver of `target`.
    ///
    /// Only covers delegated permissions; members with `MANAGE_ROLES` are allowed by
    /// the caller before consulting this.
    pub fn can_grant(&self, member_roles: &[RoleId], target: RoleId) -> bool {
        member_roles.iter().any(|role| {
            self.role_permissions
                .get(role)
                .is_some_and(|targets| targets.contains(&target))
        })
    }

    /// Looks up a role group by name, ignoring letter case.
    pub fn role_group(&self, name: &str) -> Option<&RoleGroup> {
        self.role_groups.get(&group_key(name))
    }

    /// Creates an empty role group.
    ///
    /// # Returns
    /// - `true` - Group created
    /// - `false` - A group with the same name (ignoring case) already exists
    pub fn create_role_group(&mut self, name: &str) -> bool {
        let key = group_key(name);
        if self.role_groups.contains_key(&key) {
            return false;
        }

        self.role_groups.insert(
            key,
            RoleGroup {
                name: name.trim().to_string(),
                roles: Vec::new(),
            },
        );
        true
    }

    /// Deletes a role group.
    ///
    /// # Returns
    /// - `true` - Group deleted
    /// - `false` - No group with that name
    pub fn delete_role_group(&mut self, name: &str) -> bool {
        self.role_groups.remove(&group_key(name)).is_some()
    }

    /// Adds a role to an existing group.
    pub fn add_role_to_group(&mut self, name: &str, role: RoleId) -> GroupEdit {
        let Some(group) = self.role_groups.get_mut(&group_key(name)) else {
            return GroupEdit::MissingGroup;
        };

        if group.roles.contains(&role) {
            return GroupEdit::Unchanged;
        }
        group.roles.push(role);
        GroupEdit::Updated
    }

    /// Removes a role from an existing group. The group itself is kept even when empty.
    pub fn remove_role_from_group(&mut self, name: &str, role: RoleId) -> GroupEdit {
        let Some(group) = self.role_groups.get_mut(&group_key(name)) else {
            return GroupEdit::MissingGroup;
        };

        let before = group.roles.len();
        group.roles.retain(|id| *id != role);
        if before == group.roles.len() {
            return GroupEdit::Unchanged;
        }
        GroupEdit::Updated
    }
}

fn group_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Re-keys groups by their lower-cased name.
///
/// A group without a display name takes its key as name. Groups whose names only
/// differ in case are merged, and every role list loses its duplicates.
fn normalize_groups(
    groups: impl IntoIterator<Item = (String, RoleGroup)>,
) -> BTreeMap<String, RoleGroup> {
    let mut normalized: BTreeMap<String, RoleGroup> = BTreeMap::new();

    for (key, group) in groups {
        let name = match group.name.trim() {
            "" => key.trim().to_string(),
            name => name.to_string(),
        };

        normalized
            .entry(group_key(&name))
            .or_insert_with(|| RoleGroup {
                name,
                roles: Vec::new(),
            })
            .roles
            .extend(group.roles);
    }

    for group in normalized.values_mut() {
        group.roles = dedup(std::mem::take(&mut group.roles));
    }
    normalized
}

fn dedup(roles: Vec<RoleId>) -> Vec<RoleId> {
    let mut unique = Vec::with_capacity(roles.len());
    for role in roles {
        if !unique.contains(&role) {
            unique.push(role);
        }
    }
    unique
}

/// Parses a Discord snowflake, rejecting zero which no Discord object can have.
pub fn parse_snowflake(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|id| *id != 0)
}

fn decode<T: serde::de::DeserializeOwned>(column: &'static str, json: &str) -> Result<T, StoreError> {
    serde_json::from_str(json).map_err(|source| StoreError::Parse { column, source })
}

fn role_id(column: &'static str, raw: &str) -> Result<RoleId, StoreError> {
    parse_snowflake(raw)
        .map(RoleId::new)
        .ok_or_else(|| StoreError::Parse {
            column,
            source: serde_json::Error::custom(format!("invalid role id '{raw}'")),
        })
}

fn channel_id(column: &'static str, raw: &str) -> Result<ChannelId, StoreError> {
    parse_snowflake(raw)
        .map(ChannelId::new)
        .ok_or_else(|| StoreError::Parse {
            column,
            source: serde_json::Error::custom(format!("invalid channel id '{raw}'")),
        })
}

fn role_ids(column: &'static str, raw: &[String]) -> Result<Vec<RoleId>, StoreError> {
    let ids = raw
        .iter()
        .map(|id| role_id(column, id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(dedup(ids))
}

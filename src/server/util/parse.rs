//! Parsing of command arguments typed by users.

use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use serenity::all::{ChannelId, RoleId, UserId};

use crate::server::model::guild_config::parse_snowflake;

/// A number followed by one unit letter.
static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([smhdw])$").expect("duration pattern is valid"));

/// Longest timeout Discord accepts.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(28 * 24 * 60 * 60);

/// Parses a timeout duration such as `10m` or `2d`.
///
/// Accepts a single number followed by one unit: `s`, `m`, `h`, `d` or `w`.
///
/// # Arguments
/// - `value` - Duration as typed by the user
///
/// # Returns
/// - `Some(Duration)` - Parsed, non-zero duration no longer than 28 days
/// - `None` - Malformed, zero or longer than Discord allows
pub fn parse_duration(value: &str) -> Option<Duration> {
    let captures = DURATION.captures(value.trim())?;

    let amount: u64 = captures[1].parse().ok()?;
    let unit_secs = match &captures[2] {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        _ => return None,
    };

    let duration = Duration::from_secs(amount.checked_mul(unit_secs)?);
    if duration.is_zero() || duration > MAX_TIMEOUT {
        return None;
    }

    Some(duration)
}

/// Strips `prefix`...`>` mention syntax, falling back to a bare id.
fn mention_id(value: &str, prefixes: &[&str]) -> Option<u64> {
    let value = value.trim();

    let inner = prefixes
        .iter()
        .find_map(|prefix| value.strip_prefix(prefix)?.strip_suffix('>'))
        .unwrap_or(value);

    parse_snowflake(inner)
}

/// Parses `<#id>` or a bare channel id.
pub fn parse_channel(value: &str) -> Option<ChannelId> {
    mention_id(value, &["<#"]).map(ChannelId::new)
}

/// Parses `<@&id>` or a bare role id.
pub fn parse_role(value: &str) -> Option<RoleId> {
    mention_id(value, &["<@&"]).map(RoleId::new)
}

/// Parses `<@id>`, `<@!id>` or a bare user id.
pub fn parse_user(value: &str) -> Option<UserId> {
    mention_id(value, &["<@!", "<@"]).map(UserId::new)
}

/// Shortens `value` to at most `max` characters, marking the cut with `...`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }

    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

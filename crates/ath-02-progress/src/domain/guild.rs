//! # Guilds
//!
//! Guild creation and membership. Membership is recorded on both sides:
//! `Guild::members` and `PlayerProgress::guild_id`.

use super::entities::{Guild, PlayerProgress};
use super::errors::ProgressError;
use shared_types::GuildId;
use std::collections::BTreeSet;

pub const MAX_GUILD_NAME_LEN: usize = 32;
pub const MAX_GUILD_DESCRIPTION_LEN: usize = 200;

/// Trims and checks a guild's name and description.
pub fn validate_guild_fields(name: &str, description: &str) -> Result<(String, String), ProgressError> {
    let name = name.trim();
    let description = description.trim();

    if name.is_empty() {
        return Err(ProgressError::invalid("guild name is required"));
    }
    if name.chars().count() > MAX_GUILD_NAME_LEN {
        return Err(ProgressError::invalid(format!(
            "guild name exceeds {} characters",
            MAX_GUILD_NAME_LEN
        )));
    }
    if description.chars().count() > MAX_GUILD_DESCRIPTION_LEN {
        return Err(ProgressError::invalid(format!(
            "guild description exceeds {} characters",
            MAX_GUILD_DESCRIPTION_LEN
        )));
    }
    Ok((name.to_string(), description.to_string()))
}

/// Founds a guild with `leader` as its sole member.
pub fn create_guild(
    leader: &mut PlayerProgress,
    id: GuildId,
    name: &str,
    description: &str,
) -> Result<Guild, ProgressError> {
    let (name, description) = validate_guild_fields(name, description)?;
    if let Some(guild_id) = leader.guild_id {
        return Err(ProgressError::AlreadyInGuild { guild_id });
    }

    leader.guild_id = Some(id);
    Ok(Guild {
        id,
        name,
        description,
        leader_id: leader.player_id.clone(),
        members: BTreeSet::from([leader.player_id.clone()]),
    })
}

/// Adds a player to a guild. Returns whether either document changed and
/// must be written; `false` when already a recorded member.
pub fn join_guild(progress: &mut PlayerProgress, guild: &mut Guild) -> Result<bool, ProgressError> {
    match progress.guild_id {
        Some(current) if current == guild.id => Ok(guild.members.insert(progress.player_id.clone())),
        Some(current) => Err(ProgressError::AlreadyInGuild { guild_id: current }),
        None => {
            progress.guild_id = Some(guild.id);
            guild.members.insert(progress.player_id.clone());
            Ok(true)
        }
    }
}

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::commands::SYS_COMMAND;
use crate::features::FeatureRegistry;
use crate::guilds::GuildStore;

/// Why an interaction was not allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refusal {
  GloballyDisabled,
  GuildDisabled,
  NotAuthorized,
  NotBotOwner,
}

impl Refusal {
  /// User-facing refusal text.
  pub fn message(&self) -> &'static str {
    match self {
      Self::GloballyDisabled => "This command is currently disabled by the bot owner.",
      Self::GuildDisabled => "This command is disabled on this server.",
      Self::NotAuthorized => {
        "Only the server owner or designated settings managers can change server settings."
      }
      Self::NotBotOwner => "Only the bot owner can do that.",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  Allowed,
  Refused(Refusal),
}

impl Decision {
  pub fn is_allowed(&self) -> bool {
    matches!(self, Self::Allowed)
  }
}

/// Decides, for every inbound interaction, whether it may execute.
///
/// Two independent authorization axes hang off the same gate: per-guild
/// settings management (owner or delegated manager) and global toggles
/// (the configured bot owner only). Neither implies the other.
pub struct AccessGate {
  registry: Arc<FeatureRegistry>,
  guilds: Arc<GuildStore>,
  owner_id: Option<String>,
}

impl AccessGate {
  pub fn new(
    registry: Arc<FeatureRegistry>,
    guilds: Arc<GuildStore>,
    owner_id: Option<String>,
  ) -> Self {
    Self {
      registry,
      guilds,
      owner_id,
    }
  }

  /// Gate a command invocation. First match wins: the system command always
  /// passes (its own owner check runs downstream), then the global flag,
  /// then the guild's disabled set.
  pub fn decide(
    &self,
    command: &str,
    guild_id: &str,
    user_id: &str,
    guild_owner_id: &str,
  ) -> Decision {
    if command == SYS_COMMAND {
      return Decision::Allowed;
    }
    if !self.registry.is_command_enabled(command) {
      tracing::debug!(
        "Refusing '{}' for {} in {}: globally disabled",
        command,
        user_id,
        guild_id
      );
      return Decision::Refused(Refusal::GloballyDisabled);
    }
    if self.guilds.is_command_disabled(guild_id, command) {
      tracing::debug!(
        "Refusing '{}' for {} in {} (owner {}): disabled for this guild",
        command,
        user_id,
        guild_id,
        guild_owner_id
      );
      return Decision::Refused(Refusal::GuildDisabled);
    }
    Decision::Allowed
  }

  /// Gate a per-guild settings mutation: guild owner or delegated manager.
  pub fn authorize_guild_settings(
    &self,
    guild_id: &str,
    user_id: &str,
    guild_owner_id: &str,
  ) -> Decision {
    if self
      .guilds
      .can_manage_settings(guild_id, user_id, guild_owner_id)
    {
      Decision::Allowed
    } else {
      Decision::Refused(Refusal::NotAuthorized)
    }
  }

  /// Gate a global mutation. An unconfigured owner refuses everyone rather
  /// than failing.
  pub fn authorize_owner(&self, user_id: &str) -> Decision {
    match &self.owner_id {
      Some(owner) if owner == user_id => Decision::Allowed,
      _ => Decision::Refused(Refusal::NotBotOwner),
    }
  }
}

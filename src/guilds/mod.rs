use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::commands::SETTINGS_COMMAND;
use crate::features::{FeatureEntry, FeatureRegistry};
use crate::store::JsonStore;

/// Per-community overrides for a single guild.
///
/// The guild owner is always authorized to manage settings whether or not
/// they appear in `settings_managers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildSettings {
  #[serde(default)]
  pub disabled_commands: BTreeSet<String>,
  #[serde(default)]
  pub settings_managers: BTreeSet<String>,
}

type GuildMap = BTreeMap<String, GuildSettings>;

/// Process-wide per-guild settings table, keyed by guild id.
///
/// A guild record is created lazily on first access with empty sets, and
/// that creation is itself persisted. Mutations persist only when they
/// actually change something.
pub struct GuildStore {
  store: JsonStore,
  guilds: RwLock<GuildMap>,
}

impl GuildStore {
  pub fn load(store: JsonStore) -> Self {
    let guilds: GuildMap = store.load_or_default();
    Self {
      store,
      guilds: RwLock::new(guilds),
    }
  }

  /// Run a closure against the (created-if-needed) record for a guild. The
  /// closure returns its result plus whether it changed the record; the
  /// document is saved when the record was created or changed.
  fn with_guild<R>(&self, guild_id: &str, f: impl FnOnce(&mut GuildSettings) -> (R, bool)) -> R {
    let mut guilds = self.guilds.write();
    let created = !guilds.contains_key(guild_id);
    let entry = guilds.entry(guild_id.to_string()).or_default();
    let (result, changed) = f(entry);
    if created || changed {
      self.store.save_logged(&*guilds);
    }
    result
  }

  /// Settings snapshot for a guild, creating the default record on first
  /// sight. Idempotent thereafter.
  pub fn settings(&self, guild_id: &str) -> GuildSettings {
    self.with_guild(guild_id, |s| (s.clone(), false))
  }

  pub fn is_command_disabled(&self, guild_id: &str, name: &str) -> bool {
    self.with_guild(guild_id, |s| (s.disabled_commands.contains(name), false))
  }

  /// Add a command to the guild's disabled set. No-op when already disabled.
  pub fn disable_command(&self, guild_id: &str, name: &str) -> bool {
    self.with_guild(guild_id, |s| {
      let changed = s.disabled_commands.insert(name.to_string());
      (changed, changed)
    })
  }

  /// Remove a command from the guild's disabled set. No-op when not disabled.
  pub fn enable_command(&self, guild_id: &str, name: &str) -> bool {
    self.with_guild(guild_id, |s| {
      let changed = s.disabled_commands.remove(name);
      (changed, changed)
    })
  }

  /// Flip a command between disabled and enabled for the guild.
  pub fn toggle_command(&self, guild_id: &str, name: &str) -> bool {
    self.with_guild(guild_id, |s| {
      if !s.disabled_commands.remove(name) {
        s.disabled_commands.insert(name.to_string());
      }
      (true, true)
    })
  }

  pub fn add_settings_manager(&self, guild_id: &str, user_id: &str) -> bool {
    self.with_guild(guild_id, |s| {
      let changed = s.settings_managers.insert(user_id.to_string());
      (changed, changed)
    })
  }

  pub fn remove_settings_manager(&self, guild_id: &str, user_id: &str) -> bool {
    self.with_guild(guild_id, |s| {
      let changed = s.settings_managers.remove(user_id);
      (changed, changed)
    })
  }

  /// The guild owner may always manage settings; ownership cannot be revoked
  /// through the managers list.
  pub fn can_manage_settings(&self, guild_id: &str, user_id: &str, owner_id: &str) -> bool {
    if user_id == owner_id {
      return true;
    }
    self.with_guild(guild_id, |s| (s.settings_managers.contains(user_id), false))
  }

  pub fn disabled_commands(&self, guild_id: &str) -> BTreeSet<String> {
    self.with_guild(guild_id, |s| (s.disabled_commands.clone(), false))
  }

  pub fn settings_managers(&self, guild_id: &str) -> BTreeSet<String> {
    self.with_guild(guild_id, |s| (s.settings_managers.clone(), false))
  }

  /// Commands a community may toggle: globally enabled ones, minus the
  /// settings command itself so a guild can never disable its own way back.
  pub fn available_commands(
    &self,
    registry: &FeatureRegistry,
  ) -> BTreeMap<String, FeatureEntry> {
    registry
      .all_commands()
      .into_iter()
      .filter(|(name, entry)| entry.enabled && name != SETTINGS_COMMAND)
      .collect()
  }
}

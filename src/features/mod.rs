use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::commands::CommandSpec;
use crate::store::JsonStore;

/// Feature names consulted by the dispatcher.
pub const AUTO_DEPLOY: &str = "auto_deploy";
pub const COMPONENT_INTERACTIONS: &str = "component_interactions";
pub const MODAL_FORMS: &str = "modal_forms";

/// A single toggleable entry in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureEntry {
  pub enabled: bool,
  pub description: String,
}

impl FeatureEntry {
  fn on(description: &str) -> Self {
    Self {
      enabled: true,
      description: description.to_string(),
    }
  }

  fn off(description: &str) -> Self {
    Self {
      enabled: false,
      description: description.to_string(),
    }
  }
}

/// The persisted registry document: one toggle table for commands, one for
/// optional subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDoc {
  #[serde(default)]
  pub commands: BTreeMap<String, FeatureEntry>,
  #[serde(default)]
  pub features: BTreeMap<String, FeatureEntry>,
}

impl RegistryDoc {
  /// Built-in seed document. Used only as the merge base for whatever is on
  /// disk; never regenerated from runtime state.
  pub fn builtin() -> Self {
    let mut commands = BTreeMap::new();
    commands.insert("ping".into(), FeatureEntry::on("Latency check with an interactive retry button"));
    commands.insert("hello".into(), FeatureEntry::on("Says hello to you"));
    commands.insert("say".into(), FeatureEntry::on("Make the bot speak a message"));
    commands.insert("roll".into(), FeatureEntry::on("Dice rolling with configurable sides and count"));
    commands.insert("user".into(), FeatureEntry::on("Profile card for the invoking user"));
    commands.insert("server".into(), FeatureEntry::on("Server information panel"));
    commands.insert("announce".into(), FeatureEntry::on("Modal-based announcement creation"));
    commands.insert("components".into(), FeatureEntry::on("Interactive component showcase"));
    commands.insert("settings".into(), FeatureEntry::on("Server settings management for command control and permissions"));
    commands.insert("sys".into(), FeatureEntry::on("Bot system administration commands"));

    let mut features = BTreeMap::new();
    features.insert(AUTO_DEPLOY.into(), FeatureEntry::on("Advertise commands to the platform on startup"));
    features.insert(COMPONENT_INTERACTIONS.into(), FeatureEntry::on("Handle button and select menu interactions"));
    features.insert(MODAL_FORMS.into(), FeatureEntry::on("Support for modal form submissions"));
    features.insert("rich_embeds".into(), FeatureEntry::off("Traditional embed formatting (deprecated)"));
    features.insert("component_ui".into(), FeatureEntry::on("Component-based user interface with buttons and select menus"));
    features.insert("error_handling".into(), FeatureEntry::on("Generic error replies for failed commands"));

    Self { commands, features }
  }

  /// Merge a loaded document over a base. A loaded entry replaces the base
  /// entry of the same name wholesale; loaded-only entries are kept; base
  /// entries absent from the loaded document fill the gaps.
  pub fn merged_over(base: Self, loaded: Self) -> Self {
    let mut doc = base;
    doc.commands.extend(loaded.commands);
    doc.features.extend(loaded.features);
    doc
  }
}

/// Result of a successful toggle. `persisted` is false when the in-memory
/// flip could not be written to disk; the new state is kept either way so
/// callers can warn that it may not survive a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
  pub enabled: bool,
  pub persisted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionStatus {
  pub enabled: usize,
  pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStatus {
  pub commands: SectionStatus,
  pub features: SectionStatus,
}

/// Process-wide command and feature toggle table.
///
/// Constructed once at startup and shared by handle; every mutation runs
/// its read-modify-persist sequence under one write-lock acquisition.
pub struct FeatureRegistry {
  store: JsonStore,
  doc: RwLock<RegistryDoc>,
}

impl FeatureRegistry {
  /// Load the registry from disk, merging the built-in defaults under
  /// whatever was persisted.
  pub fn load(store: JsonStore) -> Self {
    let loaded: RegistryDoc = store.load_or_default();
    let doc = RegistryDoc::merged_over(RegistryDoc::builtin(), loaded);
    Self {
      store,
      doc: RwLock::new(doc),
    }
  }

  /// Absence is treated as disabled, not as an error.
  pub fn is_command_enabled(&self, name: &str) -> bool {
    self
      .doc
      .read()
      .commands
      .get(name)
      .map(|e| e.enabled)
      .unwrap_or(false)
  }

  pub fn is_feature_enabled(&self, name: &str) -> bool {
    self
      .doc
      .read()
      .features
      .get(name)
      .map(|e| e.enabled)
      .unwrap_or(false)
  }

  /// Flip a command's flag and persist. `None` when the name is unknown;
  /// no entry is created as a side effect.
  pub fn toggle_command(&self, name: &str) -> Option<ToggleOutcome> {
    let mut doc = self.doc.write();
    let entry = doc.commands.get_mut(name)?;
    entry.enabled = !entry.enabled;
    let enabled = entry.enabled;
    let persisted = self.store.save_logged(&*doc);
    tracing::info!("Command '{}' toggled to enabled={}", name, enabled);
    Some(ToggleOutcome { enabled, persisted })
  }

  pub fn toggle_feature(&self, name: &str) -> Option<ToggleOutcome> {
    let mut doc = self.doc.write();
    let entry = doc.features.get_mut(name)?;
    entry.enabled = !entry.enabled;
    let enabled = entry.enabled;
    let persisted = self.store.save_logged(&*doc);
    tracing::info!("Feature '{}' toggled to enabled={}", name, enabled);
    Some(ToggleOutcome { enabled, persisted })
  }

  /// Read-only snapshot; the registry remains the sole mutator.
  pub fn all_commands(&self) -> BTreeMap<String, FeatureEntry> {
    self.doc.read().commands.clone()
  }

  pub fn all_features(&self) -> BTreeMap<String, FeatureEntry> {
    self.doc.read().features.clone()
  }

  /// Aggregate enabled/total counts, computed on demand.
  pub fn status(&self) -> RegistryStatus {
    let doc = self.doc.read();
    RegistryStatus {
      commands: SectionStatus {
        enabled: doc.commands.values().filter(|e| e.enabled).count(),
        total: doc.commands.len(),
      },
      features: SectionStatus {
        enabled: doc.features.values().filter(|e| e.enabled).count(),
        total: doc.features.len(),
      },
    }
  }

  /// Insert an enabled entry for every implemented command the registry does
  /// not know yet. Persists once at the end if anything was added.
  pub fn auto_register_commands(&self, implemented: &[CommandSpec]) -> bool {
    let mut doc = self.doc.write();
    let mut added = false;
    for spec in implemented {
      if !doc.commands.contains_key(spec.name) {
        let description = if spec.description.is_empty() {
          "Auto-registered command".to_string()
        } else {
          spec.description.to_string()
        };
        doc.commands.insert(
          spec.name.to_string(),
          FeatureEntry {
            enabled: true,
            description,
          },
        );
        tracing::info!("Auto-registered new command: {}", spec.name);
        added = true;
      }
    }
    if added {
      self.store.save_logged(&*doc);
    }
    added
  }

  /// Delete every registry entry whose command is no longer implemented.
  /// Persists once at the end if anything was removed.
  pub fn cleanup_removed_commands(&self, implemented: &[&str]) -> bool {
    let mut doc = self.doc.write();
    let before = doc.commands.len();
    doc.commands.retain(|name, _| {
      let keep = implemented.contains(&name.as_str());
      if !keep {
        tracing::info!("Pruned removed command from registry: {}", name);
      }
      keep
    });
    let removed = doc.commands.len() != before;
    if removed {
      self.store.save_logged(&*doc);
    }
    removed
  }
}

use acornbot::features::FeatureRegistry;
use acornbot::guilds::GuildStore;
use acornbot::store::JsonStore;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> GuildStore {
  GuildStore::load(JsonStore::new(dir.path().join("guild-settings.json")))
}

// =============================================================================
// Lazy Creation
// =============================================================================

#[test]
fn test_first_access_creates_and_persists() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("guild-settings.json");
  let store = GuildStore::load(JsonStore::new(path.clone()));

  let settings = store.settings("g1");
  assert!(settings.disabled_commands.is_empty());
  assert!(settings.settings_managers.is_empty());

  // The first read itself caused a write.
  assert!(path.exists());
  let reloaded = GuildStore::load(JsonStore::new(path));
  assert_eq!(reloaded.settings("g1"), settings);
}

#[test]
fn test_persisted_shape_uses_camel_case_keys() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("guild-settings.json");
  let store = GuildStore::load(JsonStore::new(path.clone()));

  store.disable_command("g1", "roll");
  store.add_settings_manager("g1", "u9");

  let raw = std::fs::read_to_string(&path).unwrap();
  assert!(raw.contains("disabledCommands"));
  assert!(raw.contains("settingsManagers"));
}

// =============================================================================
// Disable / Enable / Toggle
// =============================================================================

#[test]
fn test_disable_and_enable_detect_changes() {
  let dir = tempfile::tempdir().unwrap();
  let store = store_in(&dir);

  assert!(store.disable_command("g1", "roll"));
  assert!(store.is_command_disabled("g1", "roll"));
  assert!(!store.disable_command("g1", "roll"), "already disabled is a no-op");

  assert!(store.enable_command("g1", "roll"));
  assert!(!store.is_command_disabled("g1", "roll"));
  assert!(!store.enable_command("g1", "roll"), "not disabled is a no-op");
}

#[test]
fn test_toggle_flips_both_ways() {
  let dir = tempfile::tempdir().unwrap();
  let store = store_in(&dir);

  assert!(store.toggle_command("g1", "say"));
  assert!(store.is_command_disabled("g1", "say"));
  assert!(store.toggle_command("g1", "say"));
  assert!(!store.is_command_disabled("g1", "say"));
}

#[test]
fn test_guilds_are_isolated() {
  let dir = tempfile::tempdir().unwrap();
  let store = store_in(&dir);

  store.disable_command("g1", "roll");
  assert!(!store.is_command_disabled("g2", "roll"));
}

// =============================================================================
// Settings Managers
// =============================================================================

#[test]
fn test_manager_add_remove() {
  let dir = tempfile::tempdir().unwrap();
  let store = store_in(&dir);

  assert!(store.add_settings_manager("g1", "u2"));
  assert!(!store.add_settings_manager("g1", "u2"));
  assert!(store.settings_managers("g1").contains("u2"));

  assert!(store.remove_settings_manager("g1", "u2"));
  assert!(!store.remove_settings_manager("g1", "u2"));
  assert!(store.settings_managers("g1").is_empty());
}

#[test]
fn test_owner_always_manages_settings() {
  let dir = tempfile::tempdir().unwrap();
  let store = store_in(&dir);

  // True even with an empty managers list.
  assert!(store.can_manage_settings("g1", "owner", "owner"));
  assert!(!store.can_manage_settings("g1", "u2", "owner"));

  store.add_settings_manager("g1", "u2");
  assert!(store.can_manage_settings("g1", "u2", "owner"));

  // Removing the owner from the managers list cannot revoke ownership.
  store.remove_settings_manager("g1", "owner");
  assert!(store.can_manage_settings("g1", "owner", "owner"));
}

// =============================================================================
// Available Commands
// =============================================================================

#[test]
fn test_available_commands_exclude_settings_command() {
  let dir = tempfile::tempdir().unwrap();
  let store = store_in(&dir);
  let registry = FeatureRegistry::load(JsonStore::new(dir.path().join("features.json")));

  let available = store.available_commands(&registry);
  assert!(!available.contains_key("settings"));
  assert!(available.contains_key("ping"));

  // Excluded regardless of its enabled flag.
  registry.toggle_command("settings").unwrap();
  assert!(!store.available_commands(&registry).contains_key("settings"));
}

#[test]
fn test_available_commands_hide_globally_disabled() {
  let dir = tempfile::tempdir().unwrap();
  let store = store_in(&dir);
  let registry = FeatureRegistry::load(JsonStore::new(dir.path().join("features.json")));

  registry.toggle_command("roll").unwrap();
  assert!(!store.available_commands(&registry).contains_key("roll"));
}

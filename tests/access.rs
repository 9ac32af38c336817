use std::sync::Arc;

use acornbot::access::{AccessGate, Decision, Refusal};
use acornbot::features::FeatureRegistry;
use acornbot::guilds::GuildStore;
use acornbot::store::JsonStore;
use tempfile::TempDir;

fn fixtures(dir: &TempDir, owner: Option<&str>) -> (Arc<FeatureRegistry>, Arc<GuildStore>, AccessGate) {
  let registry = Arc::new(FeatureRegistry::load(JsonStore::new(
    dir.path().join("features.json"),
  )));
  let guilds = Arc::new(GuildStore::load(JsonStore::new(
    dir.path().join("guild-settings.json"),
  )));
  let gate = AccessGate::new(
    registry.clone(),
    guilds.clone(),
    owner.map(str::to_string),
  );
  (registry, guilds, gate)
}

// =============================================================================
// Decision Order
// =============================================================================

#[test]
fn test_enabled_command_is_allowed() {
  let dir = tempfile::tempdir().unwrap();
  let (_, _, gate) = fixtures(&dir, Some("B1"));
  assert_eq!(gate.decide("ping", "g1", "u1", "owner"), Decision::Allowed);
}

#[test]
fn test_unknown_command_counts_as_globally_disabled() {
  let dir = tempfile::tempdir().unwrap();
  let (_, _, gate) = fixtures(&dir, Some("B1"));
  assert_eq!(
    gate.decide("bogus", "g1", "u1", "owner"),
    Decision::Refused(Refusal::GloballyDisabled)
  );
}

#[test]
fn test_global_disable_wins_over_guild_state() {
  let dir = tempfile::tempdir().unwrap();
  let (registry, guilds, gate) = fixtures(&dir, Some("B1"));

  guilds.disable_command("g1", "ping");
  registry.toggle_command("ping").unwrap();

  // Both layers refuse, the global one is reported first.
  assert_eq!(
    gate.decide("ping", "g1", "u1", "owner"),
    Decision::Refused(Refusal::GloballyDisabled)
  );
}

#[test]
fn test_guild_disable_refuses() {
  let dir = tempfile::tempdir().unwrap();
  let (_, guilds, gate) = fixtures(&dir, Some("B1"));

  guilds.disable_command("g1", "roll");
  assert_eq!(
    gate.decide("roll", "g1", "u1", "owner"),
    Decision::Refused(Refusal::GuildDisabled)
  );
  // Other guilds are unaffected.
  assert_eq!(gate.decide("roll", "g2", "u1", "owner"), Decision::Allowed);
}

#[test]
fn test_sys_command_bypasses_the_generic_gate() {
  let dir = tempfile::tempdir().unwrap();
  let (registry, guilds, gate) = fixtures(&dir, Some("B1"));

  registry.toggle_command("sys").unwrap();
  guilds.disable_command("g1", "sys");
  assert_eq!(gate.decide("sys", "g1", "u1", "owner"), Decision::Allowed);
}

// =============================================================================
// Authorization Axes
// =============================================================================

#[test]
fn test_guild_settings_authorization() {
  let dir = tempfile::tempdir().unwrap();
  let (_, guilds, gate) = fixtures(&dir, Some("B1"));

  assert_eq!(
    gate.authorize_guild_settings("g1", "owner", "owner"),
    Decision::Allowed
  );
  assert_eq!(
    gate.authorize_guild_settings("g1", "u2", "owner"),
    Decision::Refused(Refusal::NotAuthorized)
  );

  guilds.add_settings_manager("g1", "u2");
  assert_eq!(
    gate.authorize_guild_settings("g1", "u2", "owner"),
    Decision::Allowed
  );
}

#[test]
fn test_owner_authorization() {
  let dir = tempfile::tempdir().unwrap();
  let (_, _, gate) = fixtures(&dir, Some("B1"));

  assert_eq!(gate.authorize_owner("B1"), Decision::Allowed);
  assert_eq!(
    gate.authorize_owner("u1"),
    Decision::Refused(Refusal::NotBotOwner)
  );
}

#[test]
fn test_unconfigured_owner_refuses_everyone() {
  let dir = tempfile::tempdir().unwrap();
  let (_, _, gate) = fixtures(&dir, None);

  assert_eq!(
    gate.authorize_owner("anyone"),
    Decision::Refused(Refusal::NotBotOwner)
  );
}

#[test]
fn test_guild_owner_is_not_the_bot_owner() {
  let dir = tempfile::tempdir().unwrap();
  let (_, _, gate) = fixtures(&dir, Some("B1"));

  // Managing a guild's settings does not grant global toggles.
  assert_eq!(
    gate.authorize_guild_settings("g1", "owner", "owner"),
    Decision::Allowed
  );
  assert_eq!(
    gate.authorize_owner("owner"),
    Decision::Refused(Refusal::NotBotOwner)
  );
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[test]
fn test_guild_disable_applies_to_the_owner_too() {
  let dir = tempfile::tempdir().unwrap();
  let (_, guilds, gate) = fixtures(&dir, Some("B1"));

  assert!(guilds.disable_command("G1", "roll"));
  assert!(guilds.is_command_disabled("G1", "roll"));

  assert_eq!(
    gate.decide("roll", "G1", "U2", "U1"),
    Decision::Refused(Refusal::GuildDisabled)
  );
  // The guild owner is exempt from settings-management authorization, not
  // from command-level disablement.
  assert_eq!(
    gate.decide("roll", "G1", "U1", "U1"),
    Decision::Refused(Refusal::GuildDisabled)
  );
}

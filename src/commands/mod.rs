mod announce;
mod components;
mod hello;
mod ping;
mod roll;
mod say;
mod server;
mod settings;
mod sys;
mod user;

pub use announce::{run as announce, submit_announcement, ANNOUNCE_FORM};
pub use components::run as components;
pub use hello::run as hello;
pub use ping::run as ping;
pub use roll::{quick_roll, run as roll};
pub use say::run as say;
pub use server::run as server;
pub use settings::run as settings;
pub use sys::run as sys;
pub(crate) use sys::toggle_reply;
pub use user::run as user;

use serde_json::Value;
use std::collections::BTreeMap;

use crate::features::FeatureRegistry;

/// Name of the per-community administration command. Excluded from the
/// community toggle surface so a guild can never lock itself out.
pub const SETTINGS_COMMAND: &str = "settings";

/// Name of the owner-only system command. The generic gate never blocks it;
/// it carries its own owner check.
pub const SYS_COMMAND: &str = "sys";

/// Static description of an implemented command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
  pub name: &'static str,
  pub description: &'static str,
}

/// Inventory of the commands this build actually implements. The registry
/// is reconciled against this list on startup and on reload.
pub fn catalog() -> Vec<CommandSpec> {
  vec![
    CommandSpec { name: "ping", description: "Latency check with an interactive retry button" },
    CommandSpec { name: "hello", description: "Says hello to you" },
    CommandSpec { name: "say", description: "Make the bot speak a message" },
    CommandSpec { name: "roll", description: "Dice rolling with configurable sides and count" },
    CommandSpec { name: "user", description: "Profile card for the invoking user" },
    CommandSpec { name: "server", description: "Server information panel" },
    CommandSpec { name: "announce", description: "Modal-based announcement creation" },
    CommandSpec { name: "components", description: "Interactive component showcase" },
    CommandSpec { name: SETTINGS_COMMAND, description: "Server settings management for command control and permissions" },
    CommandSpec { name: SYS_COMMAND, description: "Bot system administration commands" },
  ]
}

/// True when this build implements `name`.
pub fn is_implemented(name: &str) -> bool {
  catalog().iter().any(|spec| spec.name == name)
}

/// Sync the registry's command table with the implemented inventory: new
/// commands are registered enabled, stale entries are pruned. Runs before
/// any remote registration so the local table and the advertised set agree
/// on which commands exist.
pub fn reconcile(registry: &FeatureRegistry) -> bool {
  let specs = catalog();
  let added = registry.auto_register_commands(&specs);
  let names: Vec<&str> = specs.iter().map(|s| s.name).collect();
  let removed = registry.cleanup_removed_commands(&names);
  if added || removed {
    tracing::info!("Command inventory changed; registry updated");
  }
  added || removed
}

/// Envelope data handed to a command body.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
  pub guild_id: &'a str,
  pub guild_owner_id: &'a str,
  pub user_id: &'a str,
  pub subcommand: Option<&'a str>,
  pub options: &'a BTreeMap<String, Value>,
}

impl Invocation<'_> {
  pub fn str_option(&self, name: &str) -> Option<&str> {
    self.options.get(name).and_then(Value::as_str)
  }

  pub fn int_option(&self, name: &str) -> Option<i64> {
    self.options.get(name).and_then(Value::as_i64)
  }
}

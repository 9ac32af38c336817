use crate::access::{AccessGate, Refusal};
use crate::commands::Invocation;
use crate::features::FeatureRegistry;
use crate::guilds::GuildStore;
use crate::types::Reply;

/// Per-community administration: disable/enable commands for this guild and
/// manage the delegated settings managers.
pub fn run(
  gate: &AccessGate,
  registry: &FeatureRegistry,
  guilds: &GuildStore,
  inv: &Invocation,
) -> Reply {
  if !gate
    .authorize_guild_settings(inv.guild_id, inv.user_id, inv.guild_owner_id)
    .is_allowed()
  {
    return Reply::ephemeral(Refusal::NotAuthorized.message());
  }

  match inv.subcommand {
    Some("disable") => disable(registry, guilds, inv),
    Some("enable") => enable(guilds, inv),
    Some("list") => list(registry, guilds, inv),
    Some("manager") => manager(guilds, inv),
    _ => Reply::ephemeral("Unknown settings subcommand. Use disable, enable, list or manager."),
  }
}

fn disable(registry: &FeatureRegistry, guilds: &GuildStore, inv: &Invocation) -> Reply {
  let Some(name) = inv.str_option("command") else {
    return Reply::ephemeral("You need to name a command to disable.");
  };

  // Only globally-enabled commands (minus the settings command itself) are
  // toggleable at the guild level.
  let available = guilds.available_commands(registry);
  if !available.contains_key(name) {
    return Reply::ephemeral(format!(
      "Command `{}` doesn't exist or is disabled by the bot owner.",
      name
    ));
  }
  if guilds.is_command_disabled(inv.guild_id, name) {
    return Reply::ephemeral(format!(
      "Command `{}` is already disabled on this server.",
      name
    ));
  }

  if guilds.disable_command(inv.guild_id, name) {
    Reply::ephemeral(format!("Command `{}` has been disabled for this server.", name))
  } else {
    Reply::ephemeral(format!("Failed to disable command `{}`.", name))
  }
}

fn enable(guilds: &GuildStore, inv: &Invocation) -> Reply {
  let Some(name) = inv.str_option("command") else {
    return Reply::ephemeral("You need to name a command to enable.");
  };
  if !guilds.is_command_disabled(inv.guild_id, name) {
    return Reply::ephemeral(format!("Command `{}` is not disabled on this server.", name));
  }

  if guilds.enable_command(inv.guild_id, name) {
    Reply::ephemeral(format!("Command `{}` has been enabled for this server.", name))
  } else {
    Reply::ephemeral(format!("Failed to enable command `{}`.", name))
  }
}

fn list(registry: &FeatureRegistry, guilds: &GuildStore, inv: &Invocation) -> Reply {
  let available = guilds.available_commands(registry);
  let disabled = guilds.disabled_commands(inv.guild_id);

  let mut content = String::from("Command Settings for this Server\n");
  for (name, entry) in &available {
    let marker = if disabled.contains(name) {
      "disabled"
    } else {
      "enabled"
    };
    content.push_str(&format!("/{} ({}): {}\n", name, marker, entry.description));
  }
  content.push_str(&format!(
    "\n{} of {} commands disabled here.",
    disabled.len(),
    available.len()
  ));
  Reply::ephemeral(content)
}

fn manager(guilds: &GuildStore, inv: &Invocation) -> Reply {
  match inv.str_option("action") {
    Some("add") => {
      let Some(user) = inv.str_option("user") else {
        return Reply::ephemeral("You need to name a user to add.");
      };
      if guilds.add_settings_manager(inv.guild_id, user) {
        Reply::ephemeral(format!("<@{}> can now manage settings for this server.", user))
      } else {
        Reply::ephemeral(format!("<@{}> is already a settings manager.", user))
      }
    }
    Some("remove") => {
      let Some(user) = inv.str_option("user") else {
        return Reply::ephemeral("You need to name a user to remove.");
      };
      if guilds.remove_settings_manager(inv.guild_id, user) {
        Reply::ephemeral(format!("<@{}> can no longer manage settings for this server.", user))
      } else {
        Reply::ephemeral(format!("<@{}> is not a settings manager.", user))
      }
    }
    Some("list") => {
      let managers = guilds.settings_managers(inv.guild_id);
      if managers.is_empty() {
        Reply::ephemeral("No settings managers configured. Only the server owner can manage settings.")
      } else {
        let names: Vec<String> = managers.iter().map(|id| format!("<@{}>", id)).collect();
        Reply::ephemeral(format!("Settings managers: {}", names.join(", ")))
      }
    }
    _ => Reply::ephemeral("Unknown manager action. Use add, remove or list."),
  }
}
